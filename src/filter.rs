// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filter Engine
//!
//! Pure selections over a [`ResourceMap`]. Every filter leaves its input
//! untouched and returns a fresh map sharing the selected records; buckets
//! left empty are omitted.

use crate::errors::{InventoryError, InventoryResult};
use crate::query::Query;
use crate::resource::Resource;
use crate::resource_map::ResourceMap;

/// Structured field a property query can address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Declared type tag
    Type,
}

impl Property {
    /// Resolve a query key, ignoring case
    pub fn parse(key: &str) -> InventoryResult<Self> {
        if key.eq_ignore_ascii_case("type") {
            Ok(Property::Type)
        } else {
            Err(InventoryError::UnknownProperty(key.to_string()))
        }
    }

    fn value_of<'r>(&self, resource: &'r dyn Resource) -> Option<&'r str> {
        match self {
            Property::Type => Some(resource.resource_type()),
        }
    }
}

/// Keep resources whose id is in `ids`
///
/// Ids with no match are simply absent from the result.
pub fn filter_uuid<S: AsRef<str>>(ids: &[S], map: &ResourceMap) -> ResourceMap {
    map.select(|_, resource| ids.iter().any(|id| id.as_ref() == resource.id()))
}

/// Keep whole buckets whose name is in `types`
pub fn filter_type<S: AsRef<str>>(types: &[S], map: &ResourceMap) -> ResourceMap {
    map.select(|bucket, _| types.iter().any(|t| t.as_ref() == bucket))
}

/// Keep resources whose labels satisfy `query`
pub fn filter_label(query: &Query, map: &ResourceMap) -> InventoryResult<ResourceMap> {
    query.validate()?;
    Ok(map.select(|_, resource| resource.labels().matches(query)))
}

/// Keep resources whose structured property satisfies `query`
pub fn filter_property(query: &Query, map: &ResourceMap) -> InventoryResult<ResourceMap> {
    query.validate()?;
    let property = Property::parse(&query.key)?;

    Ok(map.select(|_, resource| {
        query
            .op
            .matches(property.value_of(resource), &query.values)
    }))
}

/// Apply label queries as a conjunction
pub fn filter_labels(queries: &[Query], map: &ResourceMap) -> InventoryResult<ResourceMap> {
    queries
        .iter()
        .try_fold(map.clone(), |selected, query| filter_label(query, &selected))
}

/// Apply property queries as a conjunction
pub fn filter_properties(queries: &[Query], map: &ResourceMap) -> InventoryResult<ResourceMap> {
    queries
        .iter()
        .try_fold(map.clone(), |selected, query| filter_property(query, &selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::default_factory;
    use crate::query::Operator;
    use crate::resource::dc::Lab;
    use crate::resource::network::VLANPool;
    use crate::resource::{BaseResource, Labels, NamedResource};

    fn lab() -> Lab {
        Lab {
            named: NamedResource::new(
                BaseResource::with_id("0100000001", "Lab", Labels::new().with("owner", "shravya")),
                "shravya's lab",
            ),
        }
    }

    fn vlan() -> VLANPool {
        let mut pool = VLANPool::new(0, 10, Labels::new().with("owner", "nandini"));
        pool.base.id = "0100000002".to_string();
        pool
    }

    fn sample() -> ResourceMap {
        let mut map = ResourceMap::new(&default_factory());
        map.insert(lab(), "Lab");
        map.insert(vlan(), "VLANPool");
        map
    }

    #[test]
    fn test_filter_uuid() {
        let map = sample();

        let selected = filter_uuid(&["0100000001", "0100000009"], &map);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.bucket_len("Lab"), 1);

        assert!(filter_uuid::<&str>(&[], &map).is_empty());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_filter_type() {
        let map = sample();

        assert!(filter_type::<&str>(&[], &map).is_empty());
        assert!(filter_type(&["Toaster"], &map).is_empty());

        let all = filter_type(&["VLANPool", "Lab"], &map);
        assert_eq!(all.bucket_names().collect::<Vec<_>>(), vec!["Lab", "VLANPool"]);
        assert_eq!(all.ids(), map.ids());
    }

    #[test]
    fn test_filter_type_matches_bucket_not_tag() {
        let mut map = ResourceMap::new(&default_factory());
        map.insert(lab(), "labs");

        assert!(filter_type(&["Lab"], &map).is_empty());
        assert_eq!(filter_type(&["labs"], &map).len(), 1);
    }

    #[test]
    fn test_filter_label() {
        let map = sample();

        let query = Query::new(Operator::Equal, "owner", ["shravya"]);
        let selected = filter_label(&query, &map).unwrap();
        assert_eq!(selected.ids(), vec!["0100000001"]);

        let query = Query::new(Operator::NotEqual, "owner", ["shravya"]);
        let rest = filter_label(&query, &selected).unwrap();
        assert!(rest.is_empty());
        assert_eq!(rest.bucket_count(), 0);

        let query = Query::new(Operator::In, "owner", ["shravya", "nandini"]);
        assert_eq!(filter_label(&query, &map).unwrap().len(), 2);

        let query = Query::new(Operator::NotIn, "team", ["infra"]);
        assert_eq!(filter_label(&query, &map).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_label_rejects_invalid_query() {
        let map = sample();
        let query = Query::new(Operator::Equal, "owner", ["a", "b"]);
        assert!(matches!(
            filter_label(&query, &map),
            Err(InventoryError::InvalidArity { .. })
        ));
    }

    #[test]
    fn test_filter_property() {
        let map = sample();

        let query = Query::new(Operator::Unsupported(10), "Type", ["Lab"]);
        assert!(filter_property(&query, &map).is_err());

        let query = Query::new(Operator::Equal, "Type", ["Lab", "VLANPool"]);
        assert!(filter_property(&query, &map).is_err());

        let query = Query::new(Operator::Equal, "Type", ["Lab"]);
        let selected = filter_property(&query, &map).unwrap();
        assert_eq!(selected.bucket_count(), 1);
        assert_eq!(selected.ids(), vec!["0100000001"]);

        let query = Query::new(Operator::NotEqual, "type", ["Lab"]);
        assert!(filter_property(&query, &selected).unwrap().is_empty());
    }

    #[test]
    fn test_filter_property_unknown_key() {
        let query = Query::new(Operator::Equal, "color", ["red"]);
        assert!(matches!(
            filter_property(&query, &sample()),
            Err(InventoryError::UnknownProperty(k)) if k == "color"
        ));
    }

    #[test]
    fn test_conjunction() {
        let map = sample();
        let queries = vec![
            Query::new(Operator::In, "owner", ["shravya", "nandini"]),
            Query::new(Operator::NotEqual, "owner", ["nandini"]),
        ];

        let selected = filter_labels(&queries, &map).unwrap();
        assert_eq!(selected.ids(), vec!["0100000001"]);

        let queries = vec![Query::new(Operator::In, "TYPE", ["VLANPool"])];
        assert_eq!(filter_properties(&queries, &map).unwrap().len(), 1);
    }
}
