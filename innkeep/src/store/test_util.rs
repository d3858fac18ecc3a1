//! Shared test utilities for store and entity unit tests.

use chrono::NaiveDateTime;
use tempfile::tempdir;

use crate::clock::ManualClock;
use crate::entities::{
    BedType, Facing, Guest, IdType, MenuItem, Reservation, ReservationStatus, Room, RoomStatus,
    RoomType,
};
use crate::entities::reservation::DATE_FORMAT;
use crate::store::{RecordStore, StoreConfig};

/// Parses a `YYYY-MM-DD HHMM` timestamp.
///
/// # Panics
///
/// Panics if `text` does not match the pattern.
#[must_use]
pub fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT).unwrap()
}

/// Opens a store in a temporary directory with a manual clock stopped at
/// 2098-12-31 09:00.
///
/// # Panics
///
/// Panics if the temporary directory or store cannot be created.
#[must_use]
pub fn create_test_store() -> (RecordStore, ManualClock) {
    let dir = tempdir().unwrap();
    let clock = ManualClock::new(at("2098-12-31 0900"));
    let config = StoreConfig::new(dir.path()).with_clock(clock.clone());
    let store = RecordStore::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    (store, clock)
}

/// A vacant standard room at `floor`/`number`.
#[must_use]
pub fn sample_room(floor: i32, number: i32) -> Room {
    Room {
        room_type: RoomType::Standard,
        rate: 100.0,
        weekend_rate: 80.0,
        floor,
        number,
        wifi_enabled: true,
        smoking_allowed: false,
        bed_type: BedType::DoubleBed,
        facing: Facing::CityView,
        status: RoomStatus::Vacant,
    }
}

/// A guest that passes validation.
#[must_use]
pub fn sample_guest(id: &str) -> Guest {
    Guest {
        id: id.to_string(),
        id_type: IdType::Passport,
        name: "Tan Ah Kow".to_string(),
        address: "1 Orchard Road".to_string(),
        country: "Singapore".to_string(),
        gender: "M".to_string(),
        nationality: "Singaporean".to_string(),
        contact: "91234567".to_string(),
        credit_card: "4111111111111111".to_string(),
    }
}

/// A menu item with a fixed description.
#[must_use]
pub fn sample_menu_item(name: &str, price: f64) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        description: "house special".to_string(),
        prep_steps: "plate it".to_string(),
        price,
    }
}

/// A confirmed reservation for guest `G1` with a code derived from its room
/// and check-in.
#[must_use]
pub fn sample_reservation(room_id: &str, check_in: &str, check_out: &str) -> Reservation {
    Reservation {
        code: format!("R-{room_id}-{check_in}"),
        status: ReservationStatus::Confirmed,
        children: 0,
        adults: 2,
        check_in: at(check_in),
        check_out: at(check_out),
        guest_id: "G1".to_string(),
        room_id: room_id.to_string(),
        walk_in: false,
    }
}
