//! Property-based tests for the record file format and queries.

use proptest::prelude::*;

use crate::entities::{Room, RoomStatus, RoomType};
use crate::record::{Entity, FieldMap};
use crate::store::cache::{Row, RowId};
use crate::store::test_util::sample_room;
use crate::store::{FlatFile, Query};

const FIELDS: [&str; 4] = ["name", "price", "remarks", "status"];

// Values survive a round trip when they carry no tab, newline or
// surrounding whitespace
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9.,-]{1,8}( [A-Za-z0-9.,-]{1,8}){0,3}",
    ]
}

fn record_strategy() -> impl Strategy<Value = FieldMap> {
    prop::collection::vec(value_strategy(), FIELDS.len()).prop_map(|values| {
        FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| ((*name).to_string(), value))
            .collect()
    })
}

fn room_strategy() -> impl Strategy<Value = Room> {
    (
        2i32..=4,
        1i32..=3,
        prop::sample::select(RoomType::ALL.to_vec()),
        prop::sample::select(RoomStatus::ALL.to_vec()),
    )
        .prop_map(|(floor, number, room_type, status)| Room {
            room_type,
            status,
            ..sample_room(floor, number)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Rendering then parsing yields the same records
    #[test]
    fn flat_file_roundtrip(records in prop::collection::vec(record_strategy(), 0..6)) {
        let text = FlatFile::render(&records, &FIELDS);
        prop_assert_eq!(FlatFile::parse(&text), records);
    }

    // Every typed room survives its stored form
    #[test]
    fn room_fields_roundtrip(room in room_strategy()) {
        prop_assert_eq!(Room::from_fields(&room.to_fields()).unwrap(), room);
    }

    // Without a limit, a two-predicate query equals the intersection of
    // the single-predicate queries, in table order
    #[test]
    fn query_predicates_intersect(
        rooms in prop::collection::vec(room_strategy(), 0..12),
        room_type in prop::sample::select(RoomType::ALL.to_vec()),
        status in prop::sample::select(RoomStatus::ALL.to_vec()),
    ) {
        let rows: Vec<Row<Room>> = rooms
            .into_iter()
            .zip(1..)
            .map(|(value, id)| Row { id: RowId(id), value })
            .collect();

        let both: Vec<RowId> = Query::new()
            .filter("roomType", room_type.as_str())
            .filter("status", status.as_str())
            .select(&rows)
            .unwrap()
            .iter()
            .map(|row| row.id())
            .collect();

        let expected: Vec<RowId> = rows
            .iter()
            .filter(|row| row.value.room_type == room_type && row.value.status == status)
            .map(Row::id)
            .collect();

        prop_assert_eq!(both, expected);
    }
}
