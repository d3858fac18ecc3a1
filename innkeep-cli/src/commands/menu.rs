//! Menu command implementation.
//!
//! This module implements `menu add` and `menu list`.

use crate::error::CliError;
use crate::utils::{format_money, open_store, GlobalOptions};
use clap::{Args, Subcommand};
use innkeep::entities::MenuItem;
use innkeep::Record;

/// Manage the room-service menu.
#[derive(Args)]
pub struct MenuCommand {
    #[command(subcommand)]
    pub action: MenuAction,
}

/// Menu subcommands.
#[derive(Subcommand)]
pub enum MenuAction {
    /// Add a dish to the menu
    Add(MenuAddArgs),

    /// List the menu
    List,
}

/// Arguments for `menu add`.
#[derive(Args)]
pub struct MenuAddArgs {
    /// Dish name (unique)
    #[arg(long)]
    pub name: String,

    /// Description shown to guests
    #[arg(long, default_value = "")]
    pub description: String,

    /// Preparation steps for the kitchen
    #[arg(long, default_value = "")]
    pub prep_steps: String,

    /// Price per portion
    #[arg(long)]
    pub price: f64,
}

impl MenuCommand {
    /// Execute the menu command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            MenuAction::Add(args) => {
                let mut store = open_store(global)?;
                let mut item = Record::new(MenuItem {
                    name: args.name,
                    description: args.description,
                    prep_steps: args.prep_steps,
                    price: args.price,
                });
                item.save(&mut store)?;
                println!("{}", item.name);
                Ok(())
            }
            MenuAction::List => {
                let store = open_store(global)?;
                let currency = store.config().currency_symbol();
                println!("NAME\tPRICE\tDESCRIPTION");
                for item in store.all::<MenuItem>() {
                    println!(
                        "{}\t{}\t{}",
                        item.name,
                        format_money(currency, item.price),
                        item.description
                    );
                }
                Ok(())
            }
        }
    }
}
