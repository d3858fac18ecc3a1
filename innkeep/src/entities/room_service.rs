//! Room-service orders.

use chrono::NaiveDateTime;

use crate::entities::order_item::OrderMenuItem;
use crate::entities::reservation::Reservation;
use crate::error::Result;
use crate::record::value::{self, symbolic_enum};
use crate::record::{
    Descriptor, Entity, FieldDef, FieldKind, FieldMap, Record, RecordKind, ValidationContext,
};
use crate::store::{RecordStore, Table, Tables};

/// Pattern of the stored creation time, also used as the id prefix.
pub const DATE_FORMAT: &str = "%Y-%m-%d-%-H-%-M";

symbolic_enum! {
    /// Progress of a room-service order.
    pub enum OrderStatus {
        /// Received by the kitchen.
        Confirmed => "CONFIRMED",
        /// Being prepared.
        Preparing => "PREPARING",
        /// Delivered to the room.
        Delivered => "DELIVERED",
    }
}

impl OrderStatus {
    /// The status an order moves to next, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

pub(crate) static DESCRIPTOR: Descriptor = Descriptor {
    kind: RecordKind::RoomService,
    fields: &[
        FieldDef::fixed("id", FieldKind::Text),
        FieldDef::editable("remarks", FieldKind::Text),
        FieldDef::fixed("status", FieldKind::Enumerated(OrderStatus::NAMES)),
        FieldDef::fixed("created", FieldKind::Date(DATE_FORMAT)),
        FieldDef::fixed("reservationId", FieldKind::Text),
    ],
    identity: Some("id"),
    labels: &[
        ("remarks", "Remarks"),
        ("created", "Created On"),
        ("status", "Order Status"),
        ("CONFIRMED", "Confirmed"),
        ("PREPARING", "Preparing"),
        ("DELIVERED", "Delivered"),
    ],
};

/// A room-service order placed against a checked-in reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomService {
    /// Creation time followed by the room id.
    pub id: String,
    /// Free-text remarks for the kitchen.
    pub remarks: String,
    /// Progress of the order.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created: NaiveDateTime,
    /// Code of the reservation the order is billed to.
    pub reservation_id: String,
}

impl RoomService {
    /// Builds an order id from its creation time and room id.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::entities::RoomService;
    ///
    /// let created = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();
    /// assert_eq!(RoomService::generate_id(created, "0205"), "2099-01-01-15-0-0205");
    /// ```
    #[must_use]
    pub fn generate_id(created: NaiveDateTime, room_id: &str) -> String {
        format!("{}-{room_id}", created.format(DATE_FORMAT))
    }

    /// The lines ordered on this order.
    #[must_use]
    pub fn items(&self, store: &RecordStore) -> Vec<Record<OrderMenuItem>> {
        store
            .all::<OrderMenuItem>()
            .into_iter()
            .filter(|item| item.rs_id == self.id)
            .collect()
    }

    /// Sum of the order's line totals.
    #[must_use]
    pub fn total(&self, store: &RecordStore) -> f64 {
        self.items(store).iter().map(|item| item.total()).sum()
    }

    /// The reservation the order is billed to, if it still exists.
    #[must_use]
    pub fn reservation(&self, store: &RecordStore) -> Option<Record<Reservation>> {
        store.lookup::<Reservation>("reservationCode", &self.reservation_id)
    }
}

impl Entity for RoomService {
    const KIND: RecordKind = RecordKind::RoomService;

    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("id".into(), self.id.clone()),
            ("remarks".into(), self.remarks.clone()),
            ("status".into(), self.status.as_str().into()),
            ("created".into(), self.created.format(DATE_FORMAT).to_string()),
            ("reservationId".into(), self.reservation_id.clone()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let kind = Self::KIND;
        Ok(Self {
            id: value::text(fields, kind, "id")?,
            remarks: value::text(fields, kind, "remarks")?,
            status: value::parse(fields, kind, "status")?,
            created: value::date(fields, kind, "created", DATE_FORMAT)?,
            reservation_id: value::text(fields, kind, "reservationId")?,
        })
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<String> {
        let mut errors = Vec::new();
        if !ctx.is_unique::<Self>("id", &self.id) {
            errors.push("Order id has already been used.".to_string());
        }
        if self.items(ctx.store()).is_empty() {
            errors.push("No menu items have been added to the order.".to_string());
        }
        errors
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.room_services
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.room_services
    }
}
