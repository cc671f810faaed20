//! Property-based tests for the conversion round-trip law.
//!
//! For every entity whose values fit their member types,
//! `to_entity(to_record(e)) == e`, and the record never carries a column
//! for a key-role member.

mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::{Order, Person, Priority, Status};
use proptest::prelude::*;
use tablemap_mapper::{EntityTypeDescriptor, KeyRole};
use uuid::Uuid;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn string_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _-]{0,40}").unwrap()
}

fn datetime_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    prop_oneof![
        Just(DateTime::<Utc>::UNIX_EPOCH),
        (-4_000_000_000i64..4_000_000_000, 0u32..1_000_000_000)
            .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap()),
    ]
}

fn etag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        prop::string::string_regex("(W/)?\"[a-z0-9]{0,16}\"").unwrap(),
    ]
}

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Pending),
        Just(Status::Shipped),
        Just(Status::Cancelled),
    ]
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Normal), Just(Priority::Urgent)]
}

fn person_strategy() -> impl Strategy<Value = Person> {
    (string_strategy(), string_strategy(), string_strategy(), any::<i32>()).prop_map(
        |(category, id, name, age)| Person {
            category,
            id,
            name,
            age,
        },
    )
}

fn order_strategy() -> impl Strategy<Value = Order> {
    let keys = (string_strategy(), any::<u128>().prop_map(Uuid::from_u128));
    let roles = (
        prop::option::of(datetime_strategy()),
        prop::option::of(etag_strategy()),
    );
    let columns = (
        -1.0e12f64..1.0e12,
        status_strategy(),
        priority_strategy(),
        prop::option::of(string_strategy()),
        any::<u16>(),
        prop::collection::vec(any::<u8>(), 0..32),
        any::<bool>(),
        any::<i64>(),
    );
    (keys, roles, columns).prop_map(
        |(
            (customer, order_id),
            (placed_at, version),
            (total, status, priority, notes, quantity, attachment, rush, sequence),
        )| Order {
            customer,
            order_id,
            placed_at,
            version,
            total,
            status,
            priority,
            notes,
            quantity,
            attachment,
            rush,
            sequence,
        },
    )
}

// =============================================================================
// ROUND-TRIP PROPERTIES
// =============================================================================

proptest! {
    /// Plain string keys and scalar columns survive a round trip.
    #[test]
    fn person_roundtrip(person in person_strategy()) {
        let d = EntityTypeDescriptor::<Person>::build().unwrap();
        let record = d.to_record(Some(&person)).unwrap();
        prop_assert_eq!(record.partition_key(), person.category.as_str());
        prop_assert_eq!(record.row_key(), person.id.as_str());
        prop_assert_eq!(record.property_count(), 2);

        let restored = d.to_entity(Some(&record)).unwrap();
        prop_assert_eq!(restored, person);
    }

    /// Every role, every column kind, nullable and renamed members.
    #[test]
    fn order_roundtrip(order in order_strategy()) {
        let d = EntityTypeDescriptor::<Order>::build().unwrap();
        let record = d.record_for(&order).unwrap();
        for role in KeyRole::ALL {
            prop_assert!(record.property(role.reserved_name()).is_none());
        }

        let restored = d.entity_from(&record).unwrap();
        prop_assert_eq!(restored, order);
    }

    /// Columns the entity does not know about never change the result.
    #[test]
    fn extra_columns_are_ignored(person in person_strategy(), extra in "[A-Z][a-z]{3,10}X") {
        let d = EntityTypeDescriptor::<Person>::build().unwrap();
        let record = d.record_for(&person).unwrap().with_property(extra, "noise");
        prop_assert_eq!(d.entity_from(&record).unwrap(), person);
    }
}
