//! Hotel rooms.

use crate::entities::reservation::{Reservation, ReservationStatus};
use crate::error::Result;
use crate::record::value::{self, format_real, symbolic_enum};
use crate::record::{
    Descriptor, Entity, FieldDef, FieldKind, FieldMap, Record, RecordKind, ValidationContext,
};
use crate::store::{RecordStore, Table, Tables};

symbolic_enum! {
    /// Occupancy state of a room.
    pub enum RoomStatus {
        /// Free to be reserved.
        Vacant => "VACANT",
        /// A guest is checked in.
        Occupied => "OCCUPIED",
        /// Held by a confirmed reservation.
        Reserved => "RESERVED",
        /// Out of service.
        UnderMaintenance => "UNDER_MAINTENANCE",
    }
}

symbolic_enum! {
    /// Room category.
    pub enum RoomType {
        /// Single room.
        Single => "SINGLE",
        /// Standard room.
        Standard => "STANDARD",
        /// Deluxe room.
        Deluxe => "DELUXE",
        /// VIP room.
        Vip => "VIP",
    }
}

symbolic_enum! {
    /// Bed fitted in a room.
    pub enum BedType {
        /// Single bed.
        SingleBed => "SINGLE_BED",
        /// Double bed.
        DoubleBed => "DOUBLE_BED",
        /// Master bed.
        MasterBed => "MASTER_BED",
    }
}

symbolic_enum! {
    /// What the room's windows face.
    pub enum Facing {
        /// Sea view.
        SeaView => "SEA_VIEW",
        /// City view.
        CityView => "CITY_VIEW",
        /// Mountain view.
        MountainView => "MOUNTAIN_VIEW",
        /// No view.
        NoView => "NO_VIEW",
    }
}

/// Lowest floor that carries guest rooms.
pub const MIN_FLOOR: i32 = 2;
/// Highest floor number.
pub const MAX_FLOOR: i32 = 99;
/// Lowest room number on a floor.
pub const MIN_ROOM_NUMBER: i32 = 1;
/// Highest room number on a floor.
pub const MAX_ROOM_NUMBER: i32 = 99;

pub(crate) static DESCRIPTOR: Descriptor = Descriptor {
    kind: RecordKind::Room,
    fields: &[
        FieldDef::fixed("roomId", FieldKind::Text),
        FieldDef::editable("roomType", FieldKind::Enumerated(RoomType::NAMES)),
        FieldDef::editable("roomRate", FieldKind::Currency),
        FieldDef::editable("roomWeekendRate", FieldKind::Currency),
        FieldDef::editable("roomFloor", FieldKind::Integer),
        FieldDef::editable("roomNumber", FieldKind::Integer),
        FieldDef::editable("wifiEnabled", FieldKind::Boolean),
        FieldDef::editable("smokingAllowed", FieldKind::Boolean),
        FieldDef::editable("bedType", FieldKind::Enumerated(BedType::NAMES)),
        FieldDef::editable("facing", FieldKind::Enumerated(Facing::NAMES)),
        FieldDef::fixed("status", FieldKind::Enumerated(RoomStatus::NAMES)),
    ],
    identity: Some("roomId"),
    labels: &[
        ("roomId", "Room ID"),
        ("roomType", "Room Type"),
        ("roomRate", "Room Rate"),
        ("roomWeekendRate", "Room Weekend Rate"),
        ("roomFloor", "Room Floor"),
        ("wifiEnabled", "Wifi Enabled"),
        ("smokingAllowed", "Smoking Allowed"),
        ("bedType", "Bed Type"),
        ("facing", "Direction Facing"),
        ("status", "Room Status"),
        ("VACANT", "Vacant"),
        ("OCCUPIED", "Occupied"),
        ("RESERVED", "Reserved"),
        ("UNDER_MAINTENANCE", "Under Maintenance"),
        ("SINGLE", "Single Room"),
        ("STANDARD", "Standard Room"),
        ("VIP", "VIP Room"),
        ("DELUXE", "Deluxe Room"),
        ("SINGLE_BED", "Single Bed"),
        ("DOUBLE_BED", "Double Bed"),
        ("MASTER_BED", "Master Bed"),
        ("SEA_VIEW", "Sea View"),
        ("CITY_VIEW", "City View"),
        ("MOUNTAIN_VIEW", "Mountain View"),
        ("NO_VIEW", "No View"),
    ],
};

/// A hotel room.
///
/// The room id is derived from floor and number and is not stored
/// separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Category.
    pub room_type: RoomType,
    /// Nightly rate on weekdays.
    pub rate: f64,
    /// Nightly rate on weekends.
    pub weekend_rate: f64,
    /// Floor, 2 to 99.
    pub floor: i32,
    /// Number on the floor, 1 to 99.
    pub number: i32,
    /// Whether wifi is available.
    pub wifi_enabled: bool,
    /// Whether smoking is allowed.
    pub smoking_allowed: bool,
    /// Bed fitted.
    pub bed_type: BedType,
    /// View from the room.
    pub facing: Facing,
    /// Occupancy state.
    pub status: RoomStatus,
}

impl Room {
    /// Zero-padded floor followed by zero-padded number.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::entities::{BedType, Facing, Room, RoomStatus, RoomType};
    ///
    /// let room = Room {
    ///     room_type: RoomType::Standard,
    ///     rate: 100.0,
    ///     weekend_rate: 80.0,
    ///     floor: 2,
    ///     number: 5,
    ///     wifi_enabled: true,
    ///     smoking_allowed: false,
    ///     bed_type: BedType::DoubleBed,
    ///     facing: Facing::CityView,
    ///     status: RoomStatus::Vacant,
    /// };
    /// assert_eq!(room.room_id(), "0205");
    /// ```
    #[must_use]
    pub fn room_id(&self) -> String {
        format!("{:02}{:02}", self.floor, self.number)
    }

    /// The human label for the room's status.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        DESCRIPTOR.label(self.status.as_str())
    }

    /// The first reservation held against this room, if any.
    #[must_use]
    pub fn reservation(&self, store: &RecordStore) -> Option<Record<Reservation>> {
        store.lookup::<Reservation>("roomId", &self.room_id())
    }

    fn active_reservation(store: &RecordStore, room_id: &str) -> Option<Record<Reservation>> {
        store.all::<Reservation>().into_iter().find(|reservation| {
            reservation.room_id == room_id
                && matches!(
                    reservation.status,
                    ReservationStatus::Confirmed
                        | ReservationStatus::Waitlist
                        | ReservationStatus::CheckedIn
                )
        })
    }
}

impl Entity for Room {
    const KIND: RecordKind = RecordKind::Room;

    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("roomId".into(), self.room_id()),
            ("roomType".into(), self.room_type.as_str().into()),
            ("roomRate".into(), format_real(self.rate)),
            ("roomWeekendRate".into(), format_real(self.weekend_rate)),
            ("roomFloor".into(), self.floor.to_string()),
            ("roomNumber".into(), self.number.to_string()),
            ("wifiEnabled".into(), self.wifi_enabled.to_string()),
            ("smokingAllowed".into(), self.smoking_allowed.to_string()),
            ("bedType".into(), self.bed_type.as_str().into()),
            ("facing".into(), self.facing.as_str().into()),
            ("status".into(), self.status.as_str().into()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let kind = Self::KIND;
        Ok(Self {
            room_type: value::parse(fields, kind, "roomType")?,
            rate: value::parse(fields, kind, "roomRate")?,
            weekend_rate: value::parse(fields, kind, "roomWeekendRate")?,
            floor: value::parse(fields, kind, "roomFloor")?,
            number: value::parse(fields, kind, "roomNumber")?,
            wifi_enabled: value::boolean(fields, kind, "wifiEnabled")?,
            smoking_allowed: value::boolean(fields, kind, "smokingAllowed")?,
            bed_type: value::parse(fields, kind, "bedType")?,
            facing: value::parse(fields, kind, "facing")?,
            status: value::parse(fields, kind, "status")?,
        })
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<String> {
        let mut errors = Vec::new();

        if !(MIN_FLOOR..=MAX_FLOOR).contains(&self.floor) {
            errors.push(format!(
                "Invalid Room Floor. Floor number can only be from {MIN_FLOOR} - {MAX_FLOOR}."
            ));
        }
        if !(MIN_ROOM_NUMBER..=MAX_ROOM_NUMBER).contains(&self.number) {
            errors.push(format!(
                "Invalid Room Number. Room Number can only be from {MIN_ROOM_NUMBER} - {MAX_ROOM_NUMBER}."
            ));
        }
        if !ctx.is_unique::<Self>("roomId", &self.room_id()) {
            errors.push(
                "Duplicate Room Id found. Please update Room Floor or Room Unit Number".to_string(),
            );
        }

        if let Some(clean) = ctx.clean::<Self>() {
            let old_id = clean.room_id();
            if old_id != self.room_id() {
                if let Some(holder) = Self::active_reservation(ctx.store(), &old_id) {
                    errors.push(format!(
                        "Room {old_id} cannot be renumbered while reservation {} holds it.",
                        holder.code
                    ));
                }
            }
        }

        errors
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.rooms
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.rooms
    }
}
