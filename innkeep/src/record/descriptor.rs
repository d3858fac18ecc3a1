//! Per-type record metadata.
//!
//! A [`Descriptor`] is the registry entry for one record type: its ordered
//! persisted fields, the kind of each field, which fields a user may edit,
//! the identity field, and human-readable labels.

use std::fmt;

use crate::entities;

/// The record types held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// A hotel guest.
    Guest,
    /// A hotel room.
    Room,
    /// A room reservation.
    Reservation,
    /// An item on the room-service menu.
    MenuItem,
    /// A menu item as ordered on a room-service order.
    OrderMenuItem,
    /// A room-service order.
    RoomService,
}

impl RecordKind {
    /// Every record type, in bootstrap order.
    pub const ALL: [Self; 6] = [
        Self::Guest,
        Self::Room,
        Self::Reservation,
        Self::MenuItem,
        Self::OrderMenuItem,
        Self::RoomService,
    ];

    /// The descriptor registered for this type.
    #[must_use]
    pub fn descriptor(self) -> &'static Descriptor {
        match self {
            Self::Guest => &entities::guest::DESCRIPTOR,
            Self::Room => &entities::room::DESCRIPTOR,
            Self::Reservation => &entities::reservation::DESCRIPTOR,
            Self::MenuItem => &entities::menu_item::DESCRIPTOR,
            Self::OrderMenuItem => &entities::order_item::DESCRIPTOR,
            Self::RoomService => &entities::room_service::DESCRIPTOR,
        }
    }

    /// The type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::Room => "Room",
            Self::Reservation => "Reservation",
            Self::MenuItem => "MenuItem",
            Self::OrderMenuItem => "OrderMenuItem",
            Self::RoomService => "RoomService",
        }
    }

    /// The key naming this type in the `files` configuration table.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Room => "room",
            Self::Reservation => "reservation",
            Self::MenuItem => "menu_item",
            Self::OrderMenuItem => "order_menu_item",
            Self::RoomService => "room_service",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// A whole number.
    Integer,
    /// A decimal number.
    Real,
    /// A decimal amount of money.
    Currency,
    /// `true` or `false`.
    Boolean,
    /// One of a fixed set of symbolic names.
    Enumerated(&'static [&'static str]),
    /// A timestamp in the given chrono pattern.
    Date(&'static str),
    /// `M` or `F`.
    Gender,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Integer => f.write_str("integer"),
            Self::Real => f.write_str("real"),
            Self::Currency => f.write_str("currency"),
            Self::Boolean => f.write_str("boolean"),
            Self::Enumerated(names) => write!(f, "one of {}", names.join("|")),
            Self::Date(pattern) => write!(f, "date ({pattern})"),
            Self::Gender => f.write_str("gender (M|F)"),
        }
    }
}

/// One persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as written on disk.
    pub name: &'static str,
    /// How the field's text is interpreted.
    pub kind: FieldKind,
    /// Whether the interactive layer may edit it.
    pub editable: bool,
}

impl FieldDef {
    /// A field the interactive layer may edit.
    #[must_use]
    pub const fn editable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            editable: true,
        }
    }

    /// A field maintained by the system.
    #[must_use]
    pub const fn fixed(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            editable: false,
        }
    }
}

/// Registry entry describing one record type.
#[derive(Debug)]
pub struct Descriptor {
    /// The record type described.
    pub kind: RecordKind,
    /// Persisted fields in on-disk order.
    pub fields: &'static [FieldDef],
    /// The field that must be unique across the type, if any.
    pub identity: Option<&'static str>,
    /// Human labels for field names and enumerated values.
    pub labels: &'static [(&'static str, &'static str)],
}

impl Descriptor {
    /// Field names in on-disk order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    /// Looks up a field definition by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Check if `name` is a declared field.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Fields the interactive layer may edit, in on-disk order.
    pub fn editable_fields(&self) -> impl Iterator<Item = &FieldDef> + '_ {
        self.fields.iter().filter(|field| field.editable)
    }

    /// The human label for a field name or enumerated value.
    ///
    /// Falls back to `attribute` itself when no label is registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::record::RecordKind;
    ///
    /// let rooms = RecordKind::Room.descriptor();
    /// assert_eq!(rooms.label("UNDER_MAINTENANCE"), "Under Maintenance");
    /// assert_eq!(rooms.label("roomNumber"), "roomNumber");
    /// ```
    #[must_use]
    pub fn label<'a>(&self, attribute: &'a str) -> &'a str {
        self.labels
            .iter()
            .find(|(key, _)| *key == attribute)
            .map_or(attribute, |&(_, label)| label)
    }
}
