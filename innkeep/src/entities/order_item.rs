//! Menu items as ordered on a room-service order.

use crate::entities::menu_item::MenuItem;
use crate::error::Result;
use crate::record::value::{self, format_real};
use crate::record::{Descriptor, Entity, FieldDef, FieldKind, FieldMap, RecordKind, ValidationContext};
use crate::store::{Table, Tables};

pub(crate) static DESCRIPTOR: Descriptor = Descriptor {
    kind: RecordKind::OrderMenuItem,
    fields: &[
        FieldDef::fixed("name", FieldKind::Text),
        FieldDef::fixed("price", FieldKind::Currency),
        FieldDef::fixed("rsId", FieldKind::Text),
        FieldDef::editable("qty", FieldKind::Integer),
    ],
    identity: None,
    labels: &[("qty", "Quantity")],
};

/// One line of a room-service order.
///
/// Name and price are copied from the menu when the order is placed, so
/// later menu changes do not alter placed orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderMenuItem {
    /// Menu item name at order time.
    pub name: String,
    /// Unit price at order time.
    pub price: f64,
    /// Id of the owning room-service order.
    pub rs_id: String,
    /// Quantity ordered.
    pub qty: i32,
}

impl OrderMenuItem {
    /// Copies `item` onto the order `rs_id`.
    #[must_use]
    pub fn from_menu(item: &MenuItem, rs_id: &str, qty: i32) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            rs_id: rs_id.to_string(),
            qty,
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

impl Entity for OrderMenuItem {
    const KIND: RecordKind = RecordKind::OrderMenuItem;

    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("name".into(), self.name.clone()),
            ("price".into(), format_real(self.price)),
            ("rsId".into(), self.rs_id.clone()),
            ("qty".into(), self.qty.to_string()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let kind = Self::KIND;
        Ok(Self {
            name: value::text(fields, kind, "name")?,
            price: value::parse(fields, kind, "price")?,
            rs_id: value::text(fields, kind, "rsId")?,
            qty: value::parse(fields, kind, "qty")?,
        })
    }

    fn check(&self, _ctx: &ValidationContext<'_>) -> Vec<String> {
        if self.qty <= 0 {
            vec!["Quantity is invalid.".to_string()]
        } else {
            Vec::new()
        }
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.order_items
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.order_items
    }
}
