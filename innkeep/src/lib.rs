#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A flat-file record store and reservation lifecycle engine for small
//! hotels.
//!
//! Guests, rooms, reservations, menu items and room-service orders are kept
//! in one tab-separated text file per record type. The files are loaded
//! once into a [`RecordStore`], queried in memory and rewritten whenever a
//! record of their type changes.
//!
//! ## Core Types
//!
//! - [`RecordStore`] and [`StoreConfig`]: the record cache and its files
//! - [`Record`]: a typed record with a clean snapshot and validation errors
//! - [`Query`]: conjunctive field queries
//! - [`operations`]: booking, expiry, check-in/out, maintenance, room service
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use innkeep::entities::{BedType, Facing, Room, RoomStatus, RoomType};
//! use innkeep::{Query, Record, RecordStore, StoreConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut store = RecordStore::open(StoreConfig::new(dir.path())).unwrap();
//!
//! let mut room = Record::new(Room {
//!     room_type: RoomType::Standard,
//!     rate: 100.0,
//!     weekend_rate: 80.0,
//!     floor: 2,
//!     number: 5,
//!     wifi_enabled: true,
//!     smoking_allowed: false,
//!     bed_type: BedType::DoubleBed,
//!     facing: Facing::CityView,
//!     status: RoomStatus::Vacant,
//! });
//! room.save(&mut store).unwrap();
//!
//! let found = store.find::<Room>(&Query::by("roomId", "0205")).unwrap();
//! assert!(found.is_some());
//! ```

pub mod clock;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod operations;
pub mod record;
pub mod store;

// Re-export key types at crate root for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    Bill, Booking, BookingOperations, ExpireResult, ExpiryOperations, MaintenanceOperations,
    ReservationRequest, RoomSelection, RoomServiceOperations, StayOperations,
};
pub use record::{Entity, Record, RecordKind};
pub use store::{Changeset, Query, RecordStore, StoreConfig};
