//! Room reservations.
//!
//! A reservation links a guest to a room for a stay. Its status moves along
//! `CONFIRMED -> CHECKED_IN -> CHECKED_OUT`, or `CONFIRMED -> EXPIRED` when
//! the guest never arrives. Transitions that also move the room's status
//! live in [`crate::operations`].

use chrono::NaiveDateTime;

use crate::entities::guest::Guest;
use crate::entities::room::{Room, RoomStatus};
use crate::error::Result;
use crate::record::value::{self, symbolic_enum};
use crate::record::{
    Descriptor, Entity, FieldDef, FieldKind, FieldMap, Record, RecordKind, ValidationContext,
};
use crate::store::{RecordStore, Table, Tables};

/// Pattern of the stored check-in and check-out dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H%M";

/// Pattern of the timestamp prefix of a reservation code.
pub const CODE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%-H%-M";

symbolic_enum! {
    /// Where a reservation is in its lifecycle.
    pub enum ReservationStatus {
        /// Booked, guest not yet arrived.
        Confirmed => "CONFIRMED",
        /// Waiting for a room. No transition produces it.
        Waitlist => "WAITLIST",
        /// Guest is staying.
        CheckedIn => "CHECKED_IN",
        /// Guest has left.
        CheckedOut => "CHECKED_OUT",
        /// Guest never arrived within the grace period.
        Expired => "EXPIRED",
    }
}

pub(crate) static DESCRIPTOR: Descriptor = Descriptor {
    kind: RecordKind::Reservation,
    fields: &[
        FieldDef::fixed("reservationCode", FieldKind::Text),
        FieldDef::fixed(
            "reservationStatus",
            FieldKind::Enumerated(ReservationStatus::NAMES),
        ),
        FieldDef::editable("numberOfChildren", FieldKind::Integer),
        FieldDef::editable("numberOfAdult", FieldKind::Integer),
        FieldDef::editable("checkInDate", FieldKind::Date(DATE_FORMAT)),
        FieldDef::editable("checkOutDate", FieldKind::Date(DATE_FORMAT)),
        FieldDef::fixed("guestId", FieldKind::Text),
        FieldDef::fixed("roomId", FieldKind::Text),
    ],
    identity: Some("reservationCode"),
    labels: &[
        ("reservationCode", "Reservation Code"),
        ("reservationStatus", "Reservation Status"),
        ("numberOfChildren", "Number of Children"),
        ("numberOfAdult", "Number of Adult"),
        ("checkInDate", "Check in Date"),
        ("checkOutDate", "Check Out Date"),
        ("CONFIRMED", "Confirmed"),
        ("WAITLIST", "Wait List"),
        ("CHECKED_IN", "Checked In"),
        ("CHECKED_OUT", "Checked Out"),
        ("EXPIRED", "Expired"),
    ],
};

/// A reservation of one room by one guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Generated at booking; never reassigned afterwards.
    pub code: String,
    /// Lifecycle state.
    pub status: ReservationStatus,
    /// Number of children staying.
    pub children: u32,
    /// Number of adults staying.
    pub adults: u32,
    /// Scheduled arrival.
    pub check_in: NaiveDateTime,
    /// Scheduled departure.
    pub check_out: NaiveDateTime,
    /// The guest's id.
    pub guest_id: String,
    /// The room's id.
    pub room_id: String,
    /// Set for walk-in bookings, whose check-in time is "now". Not persisted.
    pub walk_in: bool,
}

impl Reservation {
    /// Generates a reservation code from the booking time and guest id.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::entities::Reservation;
    ///
    /// let booked = NaiveDate::from_ymd_opt(2098, 12, 3).unwrap().and_hms_opt(9, 5, 0).unwrap();
    /// assert_eq!(Reservation::generate_code(booked, "G1"), "20981203-95-G1");
    /// ```
    #[must_use]
    pub fn generate_code(booked_at: NaiveDateTime, guest_id: &str) -> String {
        format!("{}-{guest_id}", booked_at.format(CODE_TIMESTAMP_FORMAT))
    }

    /// Length of stay in whole calendar days, ignoring times of day.
    #[must_use]
    pub fn total_days(&self) -> i64 {
        (self.check_out.date() - self.check_in.date()).num_days()
    }

    /// The reserving guest, if it still exists.
    #[must_use]
    pub fn guest(&self, store: &RecordStore) -> Option<Record<Guest>> {
        store.lookup::<Guest>("id", &self.guest_id)
    }

    /// The reserved room, if it still exists.
    #[must_use]
    pub fn room(&self, store: &RecordStore) -> Option<Record<Room>> {
        store.lookup::<Room>("roomId", &self.room_id)
    }
}

impl Entity for Reservation {
    const KIND: RecordKind = RecordKind::Reservation;

    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("reservationCode".into(), self.code.clone()),
            ("reservationStatus".into(), self.status.as_str().into()),
            ("numberOfChildren".into(), self.children.to_string()),
            ("numberOfAdult".into(), self.adults.to_string()),
            (
                "checkInDate".into(),
                self.check_in.format(DATE_FORMAT).to_string(),
            ),
            (
                "checkOutDate".into(),
                self.check_out.format(DATE_FORMAT).to_string(),
            ),
            ("guestId".into(), self.guest_id.clone()),
            ("roomId".into(), self.room_id.clone()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let kind = Self::KIND;
        Ok(Self {
            code: value::text(fields, kind, "reservationCode")?,
            status: value::parse(fields, kind, "reservationStatus")?,
            children: value::parse(fields, kind, "numberOfChildren")?,
            adults: value::parse(fields, kind, "numberOfAdult")?,
            check_in: value::date(fields, kind, "checkInDate", DATE_FORMAT)?,
            check_out: value::date(fields, kind, "checkOutDate", DATE_FORMAT)?,
            guest_id: value::text(fields, kind, "guestId")?,
            room_id: value::text(fields, kind, "roomId")?,
            walk_in: false,
        })
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<String> {
        let mut errors = Vec::new();

        if !ctx.is_unique::<Self>("reservationCode", &self.code) {
            errors.push("Reservation code has already been used.".to_string());
        }

        if let Some(clean) = ctx.clean::<Self>() {
            if self.code != clean.code {
                errors.push("Reservation code cannot be changed.".to_string());
            }
            if self.guest_id != clean.guest_id {
                errors.push("Guest of a reservation cannot be changed.".to_string());
            }
            if self.room_id != clean.room_id {
                errors.push("Room of a reservation cannot be changed.".to_string());
            }
        }

        if ctx.is_new() && !self.walk_in && self.check_in <= ctx.now() {
            errors.push("Check in date has already past.".to_string());
        }

        if self.total_days() < 1 {
            errors.push(
                "Check out Date cannot be before Check in date or the day itself".to_string(),
            );
        }

        if ctx.is_new() {
            match self.room(ctx.store()) {
                Some(room) if room.status == RoomStatus::Vacant => {}
                Some(room) => errors.push(format!(
                    "Invalid Room selected. Room Status: {}",
                    room.status_label()
                )),
                None => errors.push(format!(
                    "Invalid Room selected. Room {} does not exist.",
                    self.room_id
                )),
            }
        }

        errors
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.reservations
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.reservations
    }
}
