//! Taking rooms out of service and back.
//!
//! Maintenance only toggles between `VACANT` and `UNDER_MAINTENANCE`; a room
//! held by a reservation cannot be taken out of service.

use crate::entities::{Room, RoomStatus};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::store::RecordStore;

/// Maintenance operations.
pub struct MaintenanceOperations;

impl MaintenanceOperations {
    /// Puts a vacant room under maintenance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless the room is `VACANT`, or
    /// an I/O error if the room file cannot be written.
    pub fn start(store: &mut RecordStore, room: &mut Record<Room>) -> Result<()> {
        Self::toggle(
            store,
            room,
            RoomStatus::Vacant,
            RoomStatus::UnderMaintenance,
            "start maintenance on",
        )
    }

    /// Returns a room under maintenance to service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless the room is
    /// `UNDER_MAINTENANCE`, or an I/O error if the room file cannot be
    /// written.
    pub fn end(store: &mut RecordStore, room: &mut Record<Room>) -> Result<()> {
        Self::toggle(
            store,
            room,
            RoomStatus::UnderMaintenance,
            RoomStatus::Vacant,
            "end maintenance on",
        )
    }

    fn toggle(
        store: &mut RecordStore,
        room: &mut Record<Room>,
        from: RoomStatus,
        to: RoomStatus,
        action: &'static str,
    ) -> Result<()> {
        if room.status != from {
            return Err(Error::InvalidTransition {
                action,
                subject: format!("room {}", room.room_id()),
                status: room.status_label().to_string(),
            });
        }

        room.status = to;
        room.save(store)?;
        log::info!("room {} is now {}", room.room_id(), room.status_label());
        Ok(())
    }
}
