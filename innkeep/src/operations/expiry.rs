//! Expiry of reservations whose guests never arrived.
//!
//! The sweep is pull-based: it runs whenever a caller asks, typically before
//! listing or creating reservations, and never on a timer. A `CONFIRMED`
//! reservation expires once its check-in time plus the configured grace
//! period has been reached; its room goes back to `VACANT`.
//!
//! ## Transactional Semantics
//!
//! Each reservation is expired together with its room as one unit, but the
//! sweep as a whole is not transactional. A reservation that cannot be
//! expired is logged and reported in [`ExpireResult::failed`], and the sweep
//! moves on to the next one.

use chrono::{Duration, NaiveDateTime};

use crate::entities::{Reservation, ReservationStatus, RoomStatus};
use crate::error::Result;
use crate::operations::commit_pair;
use crate::record::Record;
use crate::store::{Query, RecordStore};

/// Result of an expiry sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpireResult {
    /// Number of reservations expired (or that would be in dry-run mode).
    pub expired_count: usize,
    /// Reservations that were (or would be) expired, as they were before the
    /// sweep.
    pub expired_reservations: Vec<Reservation>,
    /// Codes of due reservations that could not be expired, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Expiry operations.
pub struct ExpiryOperations;

impl ExpiryOperations {
    /// The reservations a sweep at `now` would expire.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation query fails.
    pub fn due(store: &RecordStore, now: NaiveDateTime) -> Result<Vec<Record<Reservation>>> {
        let grace = Duration::hours(i64::from(store.config().expiry_grace_hours()));
        let confirmed = store.find_all::<Reservation>(&Query::by(
            "reservationStatus",
            ReservationStatus::Confirmed.as_str(),
        ))?;

        Ok(confirmed
            .into_iter()
            .filter(|reservation| reservation.check_in + grace <= now)
            .collect())
    }

    /// Expires every due reservation and frees its room.
    ///
    /// # Arguments
    ///
    /// * `store` - Store to operate on
    /// * `dry_run` - If true, report what would be expired without changing anything
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation query fails. Reservations that
    /// fail validation or cannot be committed do not stop the sweep.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::operations::ExpiryOperations;
    /// use innkeep::store::{RecordStore, StoreConfig};
    ///
    /// let mut store = RecordStore::open(StoreConfig::new("/tmp/hotel")).unwrap();
    ///
    /// let preview = ExpiryOperations::sweep(&mut store, true).unwrap();
    /// println!("Would expire {} reservations", preview.expired_count);
    ///
    /// let result = ExpiryOperations::sweep(&mut store, false).unwrap();
    /// println!("Expired {} reservations", result.expired_count);
    /// ```
    pub fn sweep(store: &mut RecordStore, dry_run: bool) -> Result<ExpireResult> {
        let now = store.now();
        let due = Self::due(store, now)?;
        let mut expired_reservations = Vec::with_capacity(due.len());
        let mut failed = Vec::new();

        for mut reservation in due {
            let before = reservation.value().clone();
            if dry_run {
                expired_reservations.push(before);
                continue;
            }

            match Self::expire(store, &mut reservation) {
                Ok(()) => expired_reservations.push(before),
                Err(e) => {
                    log::warn!("could not expire reservation {}: {e}", before.code);
                    failed.push((before.code, e.to_string()));
                }
            }
        }

        Ok(ExpireResult {
            expired_count: expired_reservations.len(),
            expired_reservations,
            failed,
        })
    }

    fn expire(store: &mut RecordStore, reservation: &mut Record<Reservation>) -> Result<()> {
        reservation.status = ReservationStatus::Expired;

        match reservation.room(store) {
            Some(mut room) => {
                room.status = RoomStatus::Vacant;
                commit_pair(store, reservation, &mut room)?;
            }
            None => {
                log::warn!(
                    "reservation {} refers to missing room {}",
                    reservation.code,
                    reservation.room_id
                );
                let mut changes = store.changeset();
                changes.stage(reservation)?;
                changes.commit()?;
                drop(changes);
                reservation.mark_saved();
            }
        }

        log::info!("expired reservation {}", reservation.code);
        Ok(())
    }
}
