// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Queries and Filters
//!
//! Arity rules must hold for every operator and value count, and the pure
//! filters must behave like set operations over arbitrary resource maps.

use cim_inventory::filter::{filter_label, filter_type, filter_uuid};
use cim_inventory::{
    default_factory, BaseResource, Lab, Labels, NamedResource, Operator, Query, ResourceMap,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Equal),
        Just(Operator::NotEqual),
        Just(Operator::In),
        Just(Operator::NotIn),
        prop_oneof![4i64..=1024, i64::MIN..0].prop_map(Operator::Unsupported),
    ]
}

fn label_value() -> impl Strategy<Value = String> {
    prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(str::to_string)
}

fn label_key() -> impl Strategy<Value = String> {
    prop_oneof![Just("owner"), Just("team")].prop_map(str::to_string)
}

/// Map of labs spread over a few buckets with random owner/team labels
fn resource_map() -> impl Strategy<Value = ResourceMap> {
    prop::collection::vec(
        (
            0usize..3,
            prop::option::of(label_value()),
            prop::option::of(label_value()),
        ),
        0..20,
    )
    .prop_map(|entries| {
        let mut map = ResourceMap::new(&default_factory());

        for (index, (bucket, owner, team)) in entries.into_iter().enumerate() {
            let mut labels = Labels::new();
            if let Some(owner) = owner {
                labels.add("owner", owner);
            }
            if let Some(team) = team {
                labels.add("team", team);
            }

            let id = format!("{:010}", index + 1);
            let lab = Lab {
                named: NamedResource::new(BaseResource::with_id(id, "Lab", labels), "lab"),
            };
            map.insert(lab, ["Lab", "labs", "spare"][bucket]);
        }

        map
    })
}

fn valid_query() -> impl Strategy<Value = Query> {
    prop_oneof![
        (label_key(), label_value()).prop_map(|(k, v)| Query::new(Operator::Equal, k, [v])),
        (label_key(), label_value()).prop_map(|(k, v)| Query::new(Operator::NotEqual, k, [v])),
        (label_key(), prop::collection::vec(label_value(), 1..4))
            .prop_map(|(k, vs)| Query::new(Operator::In, k, vs)),
        (label_key(), prop::collection::vec(label_value(), 1..4))
            .prop_map(|(k, vs)| Query::new(Operator::NotIn, k, vs)),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Arity rules are exact
    ///
    /// Equal/NotEqual need exactly one value, In/NotIn at least one, and
    /// unsupported operators never validate.
    #[test]
    fn prop_arity_rules(op in operator(), values in prop::collection::vec(label_value(), 0..6)) {
        let count = values.len();
        let query = Query::new(op, "owner", values);

        let expected = match op {
            Operator::Equal | Operator::NotEqual => count == 1,
            Operator::In | Operator::NotIn => count >= 1,
            Operator::Unsupported(_) => false,
        };

        prop_assert_eq!(query.validate().is_ok(), expected);
    }

    /// Property: Label filtering is idempotent
    #[test]
    fn prop_filter_label_idempotent(map in resource_map(), query in valid_query()) {
        let once = filter_label(&query, &map).unwrap();
        let twice = filter_label(&query, &once).unwrap();

        prop_assert_eq!(once.ids(), twice.ids());
        prop_assert_eq!(
            once.bucket_names().collect::<Vec<_>>(),
            twice.bucket_names().collect::<Vec<_>>()
        );
    }

    /// Property: A query and its negation partition the map
    #[test]
    fn prop_negation_partitions(map in resource_map(), key in label_key(), value in label_value()) {
        let equal = filter_label(&Query::new(Operator::Equal, key.clone(), [value.clone()]), &map).unwrap();
        let not_equal = filter_label(&Query::new(Operator::NotEqual, key, [value]), &map).unwrap();

        prop_assert_eq!(equal.len() + not_equal.len(), map.len());
        for id in equal.ids() {
            prop_assert!(!not_equal.contains_id(id));
        }
    }

    /// Property: Filters never grow or mutate the input
    #[test]
    fn prop_filters_are_pure(map in resource_map(), query in valid_query()) {
        let before = map.ids().into_iter().map(str::to_string).collect::<Vec<_>>();
        let selected = filter_label(&query, &map).unwrap();

        prop_assert!(selected.len() <= map.len());
        prop_assert_eq!(map.ids(), before.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert!(selected.buckets().all(|b| !b.is_empty()));
    }

    /// Property: Type filtering is empty for no types and identity for all
    #[test]
    fn prop_filter_type_bounds(map in resource_map()) {
        prop_assert!(filter_type::<&str>(&[], &map).is_empty());

        let names: Vec<String> = map.bucket_names().map(str::to_string).collect();
        let all = filter_type(&names, &map);

        prop_assert_eq!(all.ids(), map.ids());
        prop_assert_eq!(
            all.bucket_names().collect::<Vec<_>>(),
            map.bucket_names().collect::<Vec<_>>()
        );
    }

    /// Property: Selecting every id returns everything
    #[test]
    fn prop_filter_uuid_all(map in resource_map()) {
        let ids: Vec<String> = map.ids().into_iter().map(str::to_string).collect();
        prop_assert_eq!(filter_uuid(&ids, &map).len(), map.len());
    }
}
