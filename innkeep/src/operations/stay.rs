//! Check-in and check-out.

use crate::entities::reservation::DATE_FORMAT;
use crate::entities::{Reservation, ReservationStatus, Room, RoomStatus};
use crate::error::{Error, Result};
use crate::operations::payment::{Bill, Payment};
use crate::operations::{commit_pair, reservation_status_label};
use crate::record::Record;
use crate::store::RecordStore;

/// Check-in and check-out of reservations.
pub struct StayOperations;

impl StayOperations {
    /// Checks a confirmed reservation in and marks its room occupied.
    ///
    /// Check-in is allowed once the store's clock has reached the
    /// reservation's check-in time. Returns the updated room.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTransition`] unless the reservation is `CONFIRMED`
    /// - [`Error::CheckInTooEarly`] before the check-in time; the message is
    ///   also added to the record's errors
    /// - [`Error::NotFound`] if the room no longer exists
    /// - [`Error::TransitionFailed`] if the files cannot be written
    ///
    /// Nothing changes on any error.
    pub fn check_in(
        store: &mut RecordStore,
        reservation: &mut Record<Reservation>,
    ) -> Result<Record<Room>> {
        reservation.clear_errors();
        Self::require(reservation, ReservationStatus::Confirmed, "check in")?;

        if store.now() < reservation.check_in {
            reservation.push_error(format!(
                "You can only check in after {}.",
                reservation.check_in.format(DATE_FORMAT)
            ));
            return Err(Error::CheckInTooEarly {
                code: reservation.code.clone(),
                not_before: reservation.check_in,
            });
        }

        let mut room = Self::room_of(store, reservation)?;
        reservation.status = ReservationStatus::CheckedIn;
        room.status = RoomStatus::Occupied;
        commit_pair(store, reservation, &mut room)?;

        log::info!(
            "checked in reservation {} to room {}",
            reservation.code,
            reservation.room_id
        );
        Ok(room)
    }

    /// Computes the bill for a checked-in reservation without changing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] unless the reservation is
    /// `CHECKED_IN`, or [`Error::NotFound`] if its room no longer exists.
    pub fn prepare_check_out(store: &RecordStore, reservation: &Record<Reservation>) -> Result<Bill> {
        Self::require(reservation, ReservationStatus::CheckedIn, "check out")?;
        Payment::compute(store, reservation)
    }

    /// Bills a checked-in reservation, checks it out and frees its room.
    ///
    /// # Errors
    ///
    /// As [`prepare_check_out`](Self::prepare_check_out), plus
    /// [`Error::TransitionFailed`] if the files cannot be written. Nothing
    /// changes on any error.
    pub fn check_out(store: &mut RecordStore, reservation: &mut Record<Reservation>) -> Result<Bill> {
        reservation.clear_errors();
        let bill = Self::prepare_check_out(store, reservation)?;

        let mut room = Self::room_of(store, reservation)?;
        reservation.status = ReservationStatus::CheckedOut;
        room.status = RoomStatus::Vacant;
        commit_pair(store, reservation, &mut room)?;

        log::info!(
            "checked out reservation {} from room {}",
            reservation.code,
            reservation.room_id
        );
        Ok(bill)
    }

    fn require(
        reservation: &Reservation,
        status: ReservationStatus,
        action: &'static str,
    ) -> Result<()> {
        if reservation.status == status {
            return Ok(());
        }
        Err(Error::InvalidTransition {
            action,
            subject: format!("reservation {}", reservation.code),
            status: reservation_status_label(reservation),
        })
    }

    fn room_of(store: &RecordStore, reservation: &Reservation) -> Result<Record<Room>> {
        reservation.room(store).ok_or_else(|| Error::NotFound {
            resource: format!("room {}", reservation.room_id),
        })
    }
}
