//! Lifecycle operations over the record store.
//!
//! Every operation that moves a reservation and its room together stages
//! both records in one [`Changeset`](crate::store::Changeset) and commits
//! them as a unit: either both files are replaced or neither is, and the
//! records passed in are left as they were on failure.
//!
//! # Architecture
//!
//! Operations are static methods on unit structs, grouped by concern:
//! 1. **Booking**: reserving a room, walk-ins, listing reservations
//! 2. **Expiry**: the sweep that expires no-shows
//! 3. **Stay**: check-in, billing and check-out
//! 4. **Maintenance**: taking rooms in and out of service
//! 5. **Room service**: placing and advancing orders
//! 6. **Reports**: read-only summaries of the rooms
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use innkeep::entities::RoomType;
//! use innkeep::operations::{BookingOperations, ReservationRequest, RoomSelection, StayOperations};
//! use innkeep::store::{RecordStore, StoreConfig};
//!
//! let mut store = RecordStore::open(StoreConfig::new("/tmp/hotel")).unwrap();
//! let day = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
//! let request = ReservationRequest::new(
//!     "G1",
//!     RoomSelection::ByType(RoomType::Standard),
//!     day.and_hms_opt(14, 0, 0).unwrap(),
//!     day.and_hms_opt(12, 0, 0).unwrap() + chrono::Duration::days(2),
//! );
//!
//! let mut booking = BookingOperations::create(&mut store, &request).unwrap();
//! // ... on the day
//! StayOperations::check_in(&mut store, &mut booking.reservation).unwrap();
//! let bill = StayOperations::check_out(&mut store, &mut booking.reservation).unwrap();
//! println!("{}", bill.total);
//! ```

pub mod booking;
pub mod expiry;
pub mod maintenance;
pub mod payment;
pub mod report;
pub mod room_service;
pub mod stay;

#[cfg(test)]
mod proptests;

pub use booking::{Booking, BookingOperations, ReservationRequest, RoomSelection};
pub use expiry::{ExpireResult, ExpiryOperations};
pub use maintenance::MaintenanceOperations;
pub use payment::{Bill, Payment};
pub use report::{OccupancyLine, ReportOperations, StatusCount};
pub use room_service::{OrderLine, RoomServiceOperations};
pub use stay::StayOperations;

use crate::entities::{Reservation, Room};
use crate::error::Result;
use crate::record::{Entity, Record};
use crate::store::{Changeset, RecordStore};

/// Stages a reservation and its room, in that order, and commits both.
///
/// On success both records are marked clean. On failure the staged
/// changes are rolled back and both records are restored to their state
/// before the call; validation messages stay on the record that failed.
pub(crate) fn commit_pair(
    store: &mut RecordStore,
    reservation: &mut Record<Reservation>,
    room: &mut Record<Room>,
) -> Result<()> {
    let outcome = {
        let mut changes = store.changeset();
        stage_pair(&mut changes, reservation, room)
    };

    match outcome {
        Ok(()) => {
            reservation.mark_saved();
            room.mark_saved();
            Ok(())
        }
        Err(e) => {
            reservation.abandon();
            room.abandon();
            Err(e)
        }
    }
}

fn stage_pair<A: Entity, B: Entity>(
    changes: &mut Changeset<'_>,
    first: &mut Record<A>,
    second: &mut Record<B>,
) -> Result<()> {
    changes.stage(first)?;
    changes.stage(second)?;
    changes.commit()
}

/// The human label of a reservation's status.
pub(crate) fn reservation_status_label(reservation: &Reservation) -> String {
    Reservation::descriptor()
        .label(reservation.status.as_str())
        .to_string()
}
