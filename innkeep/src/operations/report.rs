//! Read-only summaries of the rooms.

use serde::Serialize;

use crate::entities::{Room, RoomStatus, RoomType};
use crate::store::RecordStore;

/// Number of rooms in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// The status counted.
    pub status: RoomStatus,
    /// Rooms currently in it.
    pub count: usize,
}

/// Rooms of one type split by whether they are in a chosen status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyLine {
    /// The room type.
    pub room_type: RoomType,
    /// Ids of the rooms in the chosen status.
    pub matching: Vec<String>,
    /// Ids of the other rooms.
    pub other: Vec<String>,
}

/// Report operations.
pub struct ReportOperations;

impl ReportOperations {
    /// Room counts for every status, in declaration order.
    #[must_use]
    pub fn status_counts(store: &RecordStore) -> Vec<StatusCount> {
        let rooms = store.all::<Room>();
        RoomStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: rooms.iter().filter(|room| room.status == status).count(),
            })
            .collect()
    }

    /// For every room type, which rooms are and are not in `status`.
    #[must_use]
    pub fn occupancy(store: &RecordStore, status: RoomStatus) -> Vec<OccupancyLine> {
        let rooms = store.all::<Room>();
        RoomType::ALL
            .iter()
            .map(|&room_type| {
                let (matching, other): (Vec<_>, Vec<_>) = rooms
                    .iter()
                    .filter(|room| room.room_type == room_type)
                    .partition(|room| room.status == status);
                OccupancyLine {
                    room_type,
                    matching: matching.iter().map(|room| room.room_id()).collect(),
                    other: other.iter().map(|room| room.room_id()).collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::store::test_util::{create_test_store, sample_room};

    fn room(floor: i32, number: i32, room_type: RoomType, status: RoomStatus) -> Room {
        Room {
            room_type,
            status,
            ..sample_room(floor, number)
        }
    }

    #[test]
    fn test_status_counts_cover_every_status() {
        let (mut store, _clock) = create_test_store();
        Record::new(sample_room(2, 1)).save(&mut store).unwrap();
        Record::new(room(2, 2, RoomType::Vip, RoomStatus::Occupied))
            .save(&mut store)
            .unwrap();
        Record::new(sample_room(2, 3)).save(&mut store).unwrap();

        let counts = ReportOperations::status_counts(&store);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0], StatusCount { status: RoomStatus::Vacant, count: 2 });
        assert_eq!(counts[1], StatusCount { status: RoomStatus::Occupied, count: 1 });
        assert_eq!(counts[3].count, 0);
    }

    #[test]
    fn test_occupancy_partitions_by_type() {
        let (mut store, _clock) = create_test_store();
        Record::new(room(2, 1, RoomType::Vip, RoomStatus::Vacant))
            .save(&mut store)
            .unwrap();
        Record::new(room(2, 2, RoomType::Vip, RoomStatus::Occupied))
            .save(&mut store)
            .unwrap();

        let lines = ReportOperations::occupancy(&store, RoomStatus::Vacant);
        let vip = lines.iter().find(|line| line.room_type == RoomType::Vip).unwrap();
        assert_eq!(vip.matching, ["0201"]);
        assert_eq!(vip.other, ["0202"]);
        assert!(lines
            .iter()
            .filter(|line| line.room_type != RoomType::Vip)
            .all(|line| line.matching.is_empty() && line.other.is_empty()));
    }
}
