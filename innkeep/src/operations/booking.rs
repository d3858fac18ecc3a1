//! Reservation creation and listing.
//!
//! Both creating and listing reservations run the expiry sweep first, so a
//! room held by a no-show is free again before a new booking looks for one.

use chrono::NaiveDateTime;

use crate::entities::{Guest, Reservation, ReservationStatus, Room, RoomStatus, RoomType};
use crate::error::{Error, Result};
use crate::operations::commit_pair;
use crate::operations::expiry::ExpiryOperations;
use crate::record::Record;
use crate::store::{Query, RecordStore};

/// How the room for a new reservation is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomSelection {
    /// The first vacant room of this type, in file order.
    ByType(RoomType),
    /// A specific room, by its four-digit id.
    ById(String),
}

/// Parameters for a new reservation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::entities::RoomType;
/// use innkeep::operations::{ReservationRequest, RoomSelection};
///
/// let day = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
/// let request = ReservationRequest::new(
///     "G1",
///     RoomSelection::ByType(RoomType::Deluxe),
///     day.and_hms_opt(14, 0, 0).unwrap(),
///     day.and_hms_opt(12, 0, 0).unwrap() + chrono::Duration::days(2),
/// )
/// .with_party(2, 1);
/// assert_eq!(request.adults, 2);
/// assert_eq!(request.children, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// The reserving guest's id.
    pub guest_id: String,
    /// Which room to reserve.
    pub room: RoomSelection,
    /// Scheduled check-in. Ignored for walk-ins, which check in now.
    pub check_in: NaiveDateTime,
    /// Scheduled check-out.
    pub check_out: NaiveDateTime,
    /// Number of adults.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
}

impl ReservationRequest {
    /// Creates a request for one adult and no children.
    #[must_use]
    pub fn new(
        guest_id: impl Into<String>,
        room: RoomSelection,
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    ) -> Self {
        Self {
            guest_id: guest_id.into(),
            room,
            check_in,
            check_out,
            adults: 1,
            children: 0,
        }
    }

    /// Sets the party size.
    #[must_use]
    pub fn with_party(mut self, adults: u32, children: u32) -> Self {
        self.adults = adults;
        self.children = children;
        self
    }
}

/// A committed reservation and the room it holds.
#[derive(Debug, Clone)]
pub struct Booking {
    /// The new reservation.
    pub reservation: Record<Reservation>,
    /// The reserved room, as committed.
    pub room: Record<Room>,
}

/// Booking operations.
pub struct BookingOperations;

impl BookingOperations {
    /// The first vacant room of `room_type`, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoVacancy`] if every room of the type is taken.
    pub fn select_room(store: &RecordStore, room_type: RoomType) -> Result<Record<Room>> {
        store
            .find::<Room>(
                &Query::new()
                    .filter("roomType", room_type.as_str())
                    .filter("status", RoomStatus::Vacant.as_str()),
            )?
            .ok_or_else(|| Error::NoVacancy {
                room_type: Some(room_type.to_string()),
            })
    }

    /// Reserves a room for a future stay.
    ///
    /// The reservation is created `CONFIRMED` and its room becomes
    /// `RESERVED`, committed together.
    ///
    /// # Errors
    ///
    /// - [`Error::NoVacancy`] if no room of the requested type is vacant
    /// - [`Error::NotFound`] if the guest or the requested room does not exist
    /// - [`Error::Invalid`] if the reservation breaks a rule, such as a
    ///   check-in in the past or a room that is not vacant
    /// - [`Error::TransitionFailed`] if the files cannot be written
    pub fn create(store: &mut RecordStore, request: &ReservationRequest) -> Result<Booking> {
        ExpiryOperations::sweep(store, false)?;
        Self::book(store, request, false)
    }

    /// Books a guest who is at the desk: the stay starts now and the
    /// reservation is checked in immediately, so the room goes straight to
    /// `OCCUPIED`.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create), except that the check-in rule does not
    /// apply.
    pub fn walk_in(store: &mut RecordStore, request: &ReservationRequest) -> Result<Booking> {
        ExpiryOperations::sweep(store, false)?;
        Self::book(store, request, true)
    }

    /// Every reservation, in file order, after an expiry sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation query fails.
    pub fn list(store: &mut RecordStore) -> Result<Vec<Record<Reservation>>> {
        ExpiryOperations::sweep(store, false)?;
        Ok(store.all::<Reservation>())
    }

    fn book(store: &mut RecordStore, request: &ReservationRequest, walk_in: bool) -> Result<Booking> {
        let guest = store
            .lookup::<Guest>("id", &request.guest_id)
            .ok_or_else(|| Error::NotFound {
                resource: format!("guest {}", request.guest_id),
            })?;

        let mut room = match &request.room {
            RoomSelection::ByType(room_type) => Self::select_room(store, *room_type)?,
            RoomSelection::ById(room_id) => {
                store
                    .lookup::<Room>("roomId", room_id)
                    .ok_or_else(|| Error::NotFound {
                        resource: format!("room {room_id}"),
                    })?
            }
        };

        let now = store.now();
        let (status, room_status, check_in) = if walk_in {
            (ReservationStatus::CheckedIn, RoomStatus::Occupied, now)
        } else {
            (ReservationStatus::Confirmed, RoomStatus::Reserved, request.check_in)
        };

        let mut reservation = Record::new(Reservation {
            code: Reservation::generate_code(now, &guest.id),
            status,
            children: request.children,
            adults: request.adults,
            check_in,
            check_out: request.check_out,
            guest_id: guest.id.clone(),
            room_id: room.room_id(),
            walk_in,
        });
        room.status = room_status;

        if let Err(e) = commit_pair(store, &mut reservation, &mut room) {
            log::debug!("booking for guest {} failed: {e}", request.guest_id);
            return Err(e);
        }

        log::info!(
            "{} reservation {} for guest {} in room {}",
            if walk_in { "walked in" } else { "created" },
            reservation.code,
            reservation.guest_id,
            reservation.room_id
        );
        Ok(Booking { reservation, room })
    }
}
