//! In-memory tables of loaded records.

use crate::entities::{Guest, MenuItem, OrderMenuItem, Reservation, Room, RoomService};
use crate::record::{Entity, FieldMap, RecordKind};

/// Identity of a row in the record cache.
///
/// Row ids are assigned by the store and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u64);

/// One cached record.
#[derive(Debug, Clone)]
pub struct Row<T> {
    pub(crate) id: RowId,
    pub(crate) value: T,
}

impl<T> Row<T> {
    /// The row's identity.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The cached value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// The cached records of one type, in file order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<Row<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Table<T> {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    /// The value stored at `id`.
    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&T> {
        self.rows.iter().find(|row| row.id == id).map(|row| &row.value)
    }

    /// Replaces the value at `id`, or appends a new row if `id` is absent.
    pub(crate) fn upsert(&mut self, id: RowId, value: T) {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => row.value = value,
            None => self.rows.push(Row { id, value }),
        }
    }

    /// Removes the row at `id`.
    pub(crate) fn remove(&mut self, id: RowId) -> Option<T> {
        let index = self.rows.iter().position(|row| row.id == id)?;
        Some(self.rows.remove(index).value)
    }
}

impl<T: Entity> Table<T> {
    /// The stored fields of every row, in file order.
    #[must_use]
    pub fn field_maps(&self) -> Vec<FieldMap> {
        self.rows.iter().map(|row| row.value.to_fields()).collect()
    }
}

/// One table per record type.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub(crate) guests: Table<Guest>,
    pub(crate) rooms: Table<Room>,
    pub(crate) reservations: Table<Reservation>,
    pub(crate) menu_items: Table<MenuItem>,
    pub(crate) order_items: Table<OrderMenuItem>,
    pub(crate) room_services: Table<RoomService>,
}

impl Tables {
    /// The stored fields of every record of `kind`, in file order.
    #[must_use]
    pub fn field_maps(&self, kind: RecordKind) -> Vec<FieldMap> {
        match kind {
            RecordKind::Guest => self.guests.field_maps(),
            RecordKind::Room => self.rooms.field_maps(),
            RecordKind::Reservation => self.reservations.field_maps(),
            RecordKind::MenuItem => self.menu_items.field_maps(),
            RecordKind::OrderMenuItem => self.order_items.field_maps(),
            RecordKind::RoomService => self.room_services.field_maps(),
        }
    }

    /// Number of records of `kind`.
    #[must_use]
    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Guest => self.guests.len(),
            RecordKind::Room => self.rooms.len(),
            RecordKind::Reservation => self.reservations.len(),
            RecordKind::MenuItem => self.menu_items.len(),
            RecordKind::OrderMenuItem => self.order_items.len(),
            RecordKind::RoomService => self.room_services.len(),
        }
    }
}
