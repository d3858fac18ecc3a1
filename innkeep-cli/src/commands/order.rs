//! Room-service command implementations.
//!
//! `order` places an order for a checked-in reservation; `order-status`
//! advances an order through the kitchen.

use crate::error::CliError;
use crate::utils::{find_reservation, format_money, open_store, GlobalOptions};
use clap::Args;
use innkeep::entities::RoomService;
use innkeep::error::Error as LibError;
use innkeep::operations::OrderLine;
use innkeep::RoomServiceOperations;

/// Parse `NAME=QTY`; a bare `NAME` orders one portion.
fn parse_order_line(s: &str) -> Result<OrderLine, String> {
    match s.rsplit_once('=') {
        Some((name, qty)) => {
            let qty = qty
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid quantity in '{s}'"))?;
            Ok(OrderLine::new(name.trim(), qty))
        }
        None => Ok(OrderLine::new(s.trim(), 1)),
    }
}

/// Order room service for a checked-in reservation.
#[derive(Args)]
pub struct OrderCommand {
    /// Reservation code
    pub code: String,

    /// Menu item and quantity as NAME=QTY (repeatable)
    #[arg(long = "item", value_name = "NAME=QTY", value_parser = parse_order_line, required = true)]
    pub items: Vec<OrderLine>,

    /// Remarks for the kitchen
    #[arg(long, default_value = "")]
    pub remarks: String,
}

impl OrderCommand {
    /// Execute the order command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let reservation = find_reservation(&store, &self.code)?;

        let order =
            RoomServiceOperations::place_order(&mut store, &reservation, &self.items, &self.remarks)?;

        println!("{}", order.id);
        if !global.quiet {
            let total = order.total(&store);
            eprintln!(
                "Order for room {} is {} ({})",
                reservation.room_id,
                order.status,
                format_money(store.config().currency_symbol(), total)
            );
        }
        Ok(())
    }
}

/// Advance a room-service order to its next status.
#[derive(Args)]
pub struct OrderStatusCommand {
    /// Order id
    pub id: String,
}

impl OrderStatusCommand {
    /// Execute the order-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let mut order = store.lookup::<RoomService>("id", &self.id).ok_or_else(|| {
            CliError::from(LibError::NotFound {
                resource: format!("room service order {}", self.id),
            })
        })?;

        let status = RoomServiceOperations::advance_order(&mut store, &mut order)?;
        println!("{status}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_line() {
        let line = parse_order_line("Nasi Lemak=2").unwrap();
        assert_eq!(line.menu_item, "Nasi Lemak");
        assert_eq!(line.qty, 2);

        let single = parse_order_line("Kopi").unwrap();
        assert_eq!(single.qty, 1);

        assert!(parse_order_line("Kopi=two").is_err());
    }
}
