//! Room-service menu.

use crate::error::Result;
use crate::record::value::{self, format_real};
use crate::record::{Descriptor, Entity, FieldDef, FieldKind, FieldMap, RecordKind, ValidationContext};
use crate::store::{Table, Tables};

pub(crate) static DESCRIPTOR: Descriptor = Descriptor {
    kind: RecordKind::MenuItem,
    fields: &[
        FieldDef::editable("name", FieldKind::Text),
        FieldDef::editable("description", FieldKind::Text),
        FieldDef::editable("prepSteps", FieldKind::Text),
        FieldDef::editable("price", FieldKind::Currency),
    ],
    identity: Some("name"),
    labels: &[
        ("name", "Name"),
        ("description", "Description"),
        ("prepSteps", "Preparation Steps"),
        ("price", "Price"),
    ],
};

/// An item guests can order from their room.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Name; unique across the menu.
    pub name: String,
    /// Description shown to guests.
    pub description: String,
    /// Preparation notes for the kitchen.
    pub prep_steps: String,
    /// Current price.
    pub price: f64,
}

impl Entity for MenuItem {
    const KIND: RecordKind = RecordKind::MenuItem;

    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("name".into(), self.name.clone()),
            ("description".into(), self.description.clone()),
            ("prepSteps".into(), self.prep_steps.clone()),
            ("price".into(), format_real(self.price)),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let kind = Self::KIND;
        Ok(Self {
            name: value::text(fields, kind, "name")?,
            description: value::text(fields, kind, "description")?,
            prep_steps: value::text(fields, kind, "prepSteps")?,
            price: value::parse(fields, kind, "price")?,
        })
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<String> {
        let mut errors = Vec::new();
        if !ctx.is_unique::<Self>("name", &self.name) {
            errors.push("Name has already been used.".to_string());
        }
        if self.price <= 0.0 {
            errors.push("Price is invalid.".to_string());
        }
        errors
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.menu_items
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.menu_items
    }
}
