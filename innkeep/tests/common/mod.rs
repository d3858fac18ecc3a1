//! Common test utilities for integration tests.
//!
//! This module provides a hotel fixture: a record store in a temporary data
//! directory, driven by a manual clock, with helpers for seeding records.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tempfile::TempDir;

use innkeep::entities::reservation::DATE_FORMAT;
use innkeep::entities::{BedType, Facing, Guest, IdType, MenuItem, Room, RoomStatus, RoomType};
use innkeep::{ManualClock, Record, RecordStore, StoreConfig};

/// Parses a `YYYY-MM-DD HHMM` timestamp.
#[allow(dead_code)]
pub fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT).unwrap()
}

/// A record store in its own temporary directory.
///
/// The directory lives as long as the fixture; [`reopen`](Self::reopen)
/// loads the files again as a fresh process would.
#[allow(dead_code)]
pub struct Hotel {
    dir: TempDir,
    /// The manual clock shared with the store.
    pub clock: ManualClock,
    /// The open store.
    pub store: RecordStore,
}

#[allow(dead_code)]
impl Hotel {
    /// Opens an empty hotel with the clock at 2098-12-31 09:00.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at("2098-12-31 0900"));
        let store = RecordStore::open(StoreConfig::new(dir.path()).with_clock(clock.clone()))
            .unwrap();
        Self { dir, clock, store }
    }

    /// The data directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file in the data directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Re-opens the store from disk with the same clock.
    pub fn reopen(&mut self) {
        self.store =
            RecordStore::open(StoreConfig::new(self.dir.path()).with_clock(self.clock.clone()))
                .unwrap();
    }

    /// Saves a vacant room with rates 100/80.
    pub fn add_room(&mut self, floor: i32, number: i32, room_type: RoomType) -> Record<Room> {
        let mut room = Record::new(Room {
            room_type,
            rate: 100.0,
            weekend_rate: 80.0,
            floor,
            number,
            wifi_enabled: true,
            smoking_allowed: false,
            bed_type: BedType::DoubleBed,
            facing: Facing::SeaView,
            status: RoomStatus::Vacant,
        });
        room.save(&mut self.store).unwrap();
        room
    }

    /// Saves a guest that passes validation.
    pub fn add_guest(&mut self, id: &str) -> Record<Guest> {
        let mut guest = Record::new(Guest {
            id: id.to_string(),
            id_type: IdType::Passport,
            name: format!("Guest {id}"),
            address: "1 Beach Road".to_string(),
            country: "Singapore".to_string(),
            gender: "F".to_string(),
            nationality: "Singaporean".to_string(),
            contact: "98765432".to_string(),
            credit_card: "5500000000000004".to_string(),
        });
        guest.save(&mut self.store).unwrap();
        guest
    }

    /// Saves a menu item.
    pub fn add_menu_item(&mut self, name: &str, price: f64) -> Record<MenuItem> {
        let mut item = Record::new(MenuItem {
            name: name.to_string(),
            description: format!("{name}, freshly made"),
            prep_steps: "cook; serve".to_string(),
            price,
        });
        item.save(&mut self.store).unwrap();
        item
    }

    /// The stored status of a room.
    pub fn room_status(&self, room_id: &str) -> RoomStatus {
        self.store
            .lookup::<Room>("roomId", room_id)
            .unwrap()
            .status
    }
}
