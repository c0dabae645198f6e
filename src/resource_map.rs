// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Map
//!
//! Ephemeral, ordered container grouping resources into named buckets. A
//! map is what queries return and what bulk requests decode into; it is
//! never persisted itself.
//!
//! # Invariants
//!
//! - Bucket names are caller-supplied and need not equal a resource's type
//! - Bucket order and in-bucket order follow insertion
//! - The factory is a snapshot taken at construction
//!
//! Resources are held behind `Arc`, so deriving a new map from an existing
//! one shares records instead of copying them.

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::errors::{InventoryError, InventoryResult};
use crate::factory::ResourceFactory;
use crate::resource::{Resource, ValidationContext};

/// One named group of resources
#[derive(Debug, Clone)]
pub struct Bucket {
    name: String,
    resources: Vec<Arc<dyn Resource>>,
}

impl Bucket {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resources(&self) -> &[Arc<dyn Resource>] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Resource>> {
        self.resources.iter()
    }
}

/// Ordered bucket name → resources container
#[derive(Debug, Clone)]
pub struct ResourceMap {
    factory: ResourceFactory,
    buckets: Vec<Bucket>,
}

impl ResourceMap {
    /// Create an empty map holding a copy of `factory`
    pub fn new(factory: &ResourceFactory) -> Self {
        Self {
            factory: factory.clone(),
            buckets: Vec::new(),
        }
    }

    /// Empty map sharing this map's factory snapshot
    pub fn empty_like(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            buckets: Vec::new(),
        }
    }

    pub fn factory(&self) -> &ResourceFactory {
        &self.factory
    }

    /// Append a resource to `bucket`, creating the bucket on first use
    pub fn add(&mut self, resource: Arc<dyn Resource>, bucket: &str) {
        match self.buckets.iter_mut().find(|b| b.name == bucket) {
            Some(existing) => existing.resources.push(resource),
            None => {
                let mut created = Bucket::new(bucket);
                created.resources.push(resource);
                self.buckets.push(created);
            }
        }
    }

    /// Convenience for owned concrete resources
    pub fn insert<R: Resource>(&mut self, resource: R, bucket: &str) {
        self.add(Arc::new(resource), bucket);
    }

    pub fn bucket(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.name.as_str())
    }

    /// Number of resources in `name`, zero when absent
    pub fn bucket_len(&self, name: &str) -> usize {
        self.bucket(name).map_or(0, Bucket::len)
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of resources across buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// Flattened iteration as `(bucket, resource)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Resource>)> {
        self.buckets
            .iter()
            .flat_map(|b| b.resources.iter().map(move |r| (b.name.as_str(), r)))
    }

    /// Ids of all resources in iteration order
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|(_, r)| r.id()).collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.iter().any(|(_, r)| r.id() == id)
    }

    /// Derive a fresh map holding the resources `keep` accepts
    ///
    /// Buckets left without resources are omitted.
    pub fn select<F>(&self, mut keep: F) -> ResourceMap
    where
        F: FnMut(&str, &dyn Resource) -> bool,
    {
        let mut selected = self.empty_like();

        for bucket in &self.buckets {
            let mut resources = Vec::new();
            for resource in &bucket.resources {
                if keep(&bucket.name, &**resource) {
                    resources.push(Arc::clone(resource));
                }
            }

            if !resources.is_empty() {
                selected.buckets.push(Bucket {
                    name: bucket.name.clone(),
                    resources,
                });
            }
        }

        selected
    }

    /// Label key → distinct values seen across the map
    ///
    /// Restricted to `keys` when non-empty.
    pub fn label_values<S: AsRef<str>>(&self, keys: &[S]) -> BTreeMap<String, BTreeSet<String>> {
        let mut values: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (_, resource) in self.iter() {
            for (key, value) in resource.labels().iter() {
                if keys.is_empty() || keys.iter().any(|k| k.as_ref() == key) {
                    values
                        .entry(key.to_string())
                        .or_default()
                        .insert(value.to_string());
                }
            }
        }

        values
    }

    /// Validate every resource, failing on the first invalid one
    pub fn validate_all(&self, ctx: &ValidationContext<'_>) -> InventoryResult<()> {
        for (_, resource) in self.iter() {
            resource.validate(ctx)?;
        }
        Ok(())
    }

    /// Decode a `{bucket: [document, ...]}` body
    ///
    /// Each document is decoded by its own `type` through `factory`; the
    /// bucket name is kept as given. Any undecodable document fails the
    /// whole body.
    pub fn from_json(factory: &ResourceFactory, body: Value) -> InventoryResult<Self> {
        let Value::Object(buckets) = body else {
            return Err(InventoryError::Serialization(
                "resource map must be a JSON object".to_string(),
            ));
        };

        let mut map = Self::new(factory);

        for (bucket, documents) in buckets {
            let Value::Array(documents) = documents else {
                return Err(InventoryError::Serialization(format!(
                    "bucket {bucket:?} must be a JSON array"
                )));
            };

            for document in documents {
                let resource = factory.decode(document)?;
                map.add(Arc::from(resource), &bucket);
            }
        }

        Ok(map)
    }
}

struct BucketDocuments<'a>(&'a [Arc<dyn Resource>]);

impl Serialize for BucketDocuments<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for resource in self.0 {
            let document = resource.to_document().map_err(S::Error::custom)?;
            seq.serialize_element(&document)?;
        }
        seq.end()
    }
}

impl Serialize for ResourceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.name, &BucketDocuments(&bucket.resources))?;
        }
        map.end()
    }
}
