// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Store Abstraction
//!
//! Durable storage of heterogeneous resources plus the query surface built
//! on top of the filter engine.
//!
//! # Architecture
//!
//! ```text
//! QueryRequest → Selection → Store::select → load → filter → ResourceMap
//!                                              ↑
//!                                    persisted documents
//! ```
//!
//! # Guarantees
//!
//! 1. **Per-record atomicity**: a record is either fully written or untouched
//! 2. **Upsert by id**: creating an existing id replaces it
//! 3. **No cache**: every query re-reads persisted state
//! 4. **No cross-record transactions**: bulk failures are reported, not rolled back
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_inventory::store::{ResourceStore, Store};
//! use cim_inventory::{default_factory, Lab, Labels, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ResourceStore::new(StoreConfig::new("/tmp/inventory"), default_factory())?;
//!     store.initialize().await?;
//!
//!     store.create(&Lab::new("lab1", Labels::new().with("owner", "alice"))).await?;
//!
//!     let labs = store.query_type(&["Lab".to_string()]).await?;
//!     println!("{}", serde_json::to_string_pretty(&labs)?);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::errors::{DecodeFailure, InventoryError, InventoryResult};
use crate::factory::ResourceFactory;
use crate::filter;
use crate::query::{Query, Selection};
use crate::resource::Resource;
use crate::resource_map::ResourceMap;

pub mod fs;

pub use fs::ResourceStore;

/// Result of reading every persisted record
#[derive(Debug)]
pub struct Loaded {
    /// Decoded records grouped by declared type
    pub resources: ResourceMap,
    /// Records that could not be decoded and were skipped
    pub failures: Vec<DecodeFailure>,
}

impl Loaded {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail with [`InventoryError::PartialDecodeFailure`] when anything was skipped
    pub fn into_result(self) -> InventoryResult<ResourceMap> {
        if self.failures.is_empty() {
            Ok(self.resources)
        } else {
            Err(InventoryError::PartialDecodeFailure(self.failures))
        }
    }

    /// Decoded subset, ignoring failures
    pub fn into_resources(self) -> ResourceMap {
        self.resources
    }
}

/// Persistent, queryable resource storage
///
/// Implementations must be safe to share between tasks. Query methods
/// return fresh snapshots; mutating a returned map never touches the store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Factory whose installed types this store accepts
    fn factory(&self) -> &ResourceFactory;

    /// Prepare the backing storage; calling it again is harmless
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the storage cannot be created
    async fn initialize(&self) -> InventoryResult<()>;

    /// Validate and persist a resource, replacing any record with its id
    ///
    /// # Errors
    ///
    /// - `Validation` if the resource breaks an invariant or its type is not installed
    /// - `StorageUnavailable` if the write fails
    async fn create(&self, resource: &dyn Resource) -> InventoryResult<()>;

    /// Remove a resource's record
    ///
    /// Deleting an id that was never stored succeeds.
    ///
    /// # Errors
    ///
    /// - `NilResource` if no resource is given
    async fn delete(&self, resource: Option<&dyn Resource>) -> InventoryResult<()>;

    /// Read every record, grouped by declared type
    async fn load(&self) -> InventoryResult<Loaded>;

    /// Remove the backing storage entirely
    async fn wipe(&self) -> InventoryResult<()>;

    /// Remove every record, leaving the store usable
    async fn clear(&self) -> InventoryResult<()>;

    /// Everything that decodes
    async fn query(&self) -> InventoryResult<ResourceMap> {
        Ok(self.load().await?.into_resources())
    }

    async fn query_uuid(&self, ids: &[String]) -> InventoryResult<ResourceMap> {
        let map = self.query().await?;
        Ok(filter::filter_uuid(ids, &map))
    }

    async fn query_type(&self, types: &[String]) -> InventoryResult<ResourceMap> {
        let map = self.query().await?;
        Ok(filter::filter_type(types, &map))
    }

    async fn query_label(&self, query: &Query) -> InventoryResult<ResourceMap> {
        query.validate()?;
        let map = self.query().await?;
        filter::filter_label(query, &map)
    }

    async fn query_property(&self, query: &Query) -> InventoryResult<ResourceMap> {
        query.validate()?;
        let map = self.query().await?;
        filter::filter_property(query, &map)
    }

    /// Resolve a validated selection; query lists apply as a conjunction
    async fn select(&self, selection: &Selection) -> InventoryResult<ResourceMap> {
        match selection {
            Selection::All => self.query().await,
            Selection::Ids(ids) => self.query_uuid(ids).await,
            Selection::Types(types) => self.query_type(types).await,
            Selection::Labels(queries) => {
                crate::query::validate_queries(queries)?;
                let map = self.query().await?;
                filter::filter_labels(queries, &map)
            }
            Selection::Properties(queries) => {
                crate::query::validate_queries(queries)?;
                let map = self.query().await?;
                filter::filter_properties(queries, &map)
            }
        }
    }

    /// Create every resource of `map` independently
    ///
    /// # Returns
    ///
    /// Number of resources written
    ///
    /// # Errors
    ///
    /// - `BulkFailure` listing each resource that was not written
    async fn create_many(&self, map: &ResourceMap) -> InventoryResult<usize>;

    /// Delete every resource of `map` independently
    ///
    /// # Errors
    ///
    /// - `BulkFailure` listing each resource that was not removed
    async fn delete_many(&self, map: &ResourceMap) -> InventoryResult<usize>;
}
