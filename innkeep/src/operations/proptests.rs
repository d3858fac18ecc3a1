//! Property-based tests for lifecycle operations.
//!
//! These tests drive random sequences of operations and check that the
//! reservation and room files never disagree.

use std::collections::HashSet;

use chrono::Duration;
use proptest::prelude::*;

use crate::clock::Clock;
use crate::entities::{Reservation, ReservationStatus, Room, RoomStatus, RoomType};
use crate::operations::{
    BookingOperations, ExpiryOperations, MaintenanceOperations, ReservationRequest, RoomSelection,
    StayOperations,
};
use crate::record::Record;
use crate::store::test_util::{at, create_test_store, sample_guest, sample_room};
use crate::store::RecordStore;

#[derive(Debug, Clone)]
enum Action {
    Book { room: usize, nights: i64 },
    CheckIn { pick: usize },
    CheckOut { pick: usize },
    Maintain { room: usize },
    Advance { hours: i64 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..3, 0i64..3).prop_map(|(room, nights)| Action::Book { room, nights }),
        (0usize..4).prop_map(|pick| Action::CheckIn { pick }),
        (0usize..4).prop_map(|pick| Action::CheckOut { pick }),
        (0usize..3).prop_map(|room| Action::Maintain { room }),
        (1i64..30).prop_map(|hours| Action::Advance { hours }),
    ]
}

const ROOM_IDS: [&str; 3] = ["0201", "0202", "0203"];

fn pick(store: &RecordStore, status: ReservationStatus, index: usize) -> Option<Record<Reservation>> {
    let matching: Vec<_> = store
        .all::<Reservation>()
        .into_iter()
        .filter(|reservation| reservation.status == status)
        .collect();
    if matching.is_empty() {
        return None;
    }
    let len = matching.len();
    matching.into_iter().nth(index % len)
}

// Every room held by a live reservation is in the matching status, and no
// room is held twice
fn assert_consistent(store: &RecordStore) -> Result<(), TestCaseError> {
    let mut held = HashSet::new();
    for reservation in store.all::<Reservation>() {
        let expected = match reservation.status {
            ReservationStatus::Confirmed => RoomStatus::Reserved,
            ReservationStatus::CheckedIn => RoomStatus::Occupied,
            _ => continue,
        };
        let room = store.lookup::<Room>("roomId", &reservation.room_id).unwrap();
        prop_assert_eq!(room.status, expected);
        prop_assert!(held.insert(reservation.room_id.clone()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn lifecycle_keeps_rooms_and_reservations_in_step(
        actions in prop::collection::vec(action_strategy(), 1..25)
    ) {
        let (mut store, clock) = create_test_store();
        Record::new(sample_guest("G1")).save(&mut store).unwrap();
        for number in 1..=3 {
            Record::new(sample_room(2, number)).save(&mut store).unwrap();
        }

        for action in actions {
            // outcomes are ignored: failures must leave everything consistent
            match action {
                Action::Book { room, nights } => {
                    let check_in = clock.now() + Duration::hours(2);
                    let request = ReservationRequest::new(
                        "G1",
                        RoomSelection::ById(ROOM_IDS[room].to_string()),
                        check_in,
                        check_in + Duration::days(nights),
                    );
                    let _ = BookingOperations::create(&mut store, &request);
                    clock.advance(Duration::minutes(1));
                }
                Action::CheckIn { pick: index } => {
                    if let Some(mut reservation) = pick(&store, ReservationStatus::Confirmed, index) {
                        let _ = StayOperations::check_in(&mut store, &mut reservation);
                    }
                }
                Action::CheckOut { pick: index } => {
                    if let Some(mut reservation) = pick(&store, ReservationStatus::CheckedIn, index) {
                        let _ = StayOperations::check_out(&mut store, &mut reservation);
                    }
                }
                Action::Maintain { room: index } => {
                    if let Some(mut room) = store.lookup::<Room>("roomId", ROOM_IDS[index]) {
                        let _ = if room.status == RoomStatus::UnderMaintenance {
                            MaintenanceOperations::end(&mut store, &mut room)
                        } else {
                            MaintenanceOperations::start(&mut store, &mut room)
                        };
                    }
                }
                Action::Advance { hours } => {
                    clock.advance(Duration::hours(hours));
                    ExpiryOperations::sweep(&mut store, false).unwrap();
                }
            }
            assert_consistent(&store)?;
        }

        // room ids stay unique
        let ids: HashSet<String> = store.all::<Room>().iter().map(|room| room.room_id()).collect();
        prop_assert_eq!(ids.len(), 3);
    }

    #[test]
    fn booking_by_type_never_double_books(count in 1usize..6) {
        let (mut store, clock) = create_test_store();
        Record::new(sample_guest("G1")).save(&mut store).unwrap();
        for number in 1..=3 {
            Record::new(sample_room(2, number)).save(&mut store).unwrap();
        }

        let mut booked = 0;
        for _ in 0..count {
            let request = ReservationRequest::new(
                "G1",
                RoomSelection::ByType(RoomType::Standard),
                at("2099-01-01 1400"),
                at("2099-01-03 1200"),
            );
            if BookingOperations::create(&mut store, &request).is_ok() {
                booked += 1;
            }
            clock.advance(Duration::minutes(1));
        }

        prop_assert_eq!(booked, count.min(3));
        assert_consistent(&store)?;
    }
}
