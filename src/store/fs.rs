// Copyright (c) 2025 - Cowboy AI, Inc.
//! File-backed Resource Store
//!
//! One JSON document per resource under `<root>/resources/<shard>/<id>.json`,
//! where the shard is the leading digits of the id. Documents are written to
//! a temporary sibling and renamed over the target, so readers never see a
//! partial record. Temporary files are ignored when loading.
//!
//! `<root>/layout.json` pins the shard width a store was initialized with.
//! Opening the same root with another width is refused, since every record
//! path would resolve to the wrong shard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{Loaded, Store};
use crate::config::StoreConfig;
use crate::domain::serial;
use crate::errors::{DecodeFailure, InventoryError, InventoryResult, ItemFailure};
use crate::factory::ResourceFactory;
use crate::resource::{Resource, ValidationContext};
use crate::resource_map::ResourceMap;

const RECORD_EXTENSION: &str = "json";

/// On-disk shape recorded at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Layout {
    shard_width: usize,
}

/// Resource store persisting to the local filesystem
///
/// Reads share the lock; anything that changes files takes it exclusively.
#[derive(Debug)]
pub struct ResourceStore {
    config: StoreConfig,
    factory: ResourceFactory,
    lock: RwLock<()>,
}

impl ResourceStore {
    /// Create a store over `config.root` accepting the types in `factory`
    ///
    /// Nothing is touched on disk until [`Store::initialize`]. A root already
    /// laid out with a different shard width is refused on first use.
    pub fn new(config: StoreConfig, factory: ResourceFactory) -> InventoryResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            lock: RwLock::new(()),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        self.config.root()
    }

    fn layout(&self) -> Layout {
        Layout {
            shard_width: self.config.shard_width,
        }
    }

    /// Layout recorded under the root, if the root has one
    async fn recorded_layout(&self) -> InventoryResult<Option<Layout>> {
        let path = self.config.layout_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(InventoryError::storage(path, e)),
        };

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            InventoryError::Configuration(format!(
                "unreadable layout manifest {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Refuse to touch records laid out with another shard width
    async fn check_layout(&self) -> InventoryResult<Option<Layout>> {
        let recorded = self.recorded_layout().await?;

        if let Some(layout) = recorded {
            if layout != self.layout() {
                return Err(InventoryError::Configuration(format!(
                    "store at {} uses shard width {}, configured {}",
                    self.root().display(),
                    layout.shard_width,
                    self.config.shard_width
                )));
            }
        }
        Ok(recorded)
    }

    fn encode(&self, resource: &dyn Resource) -> InventoryResult<Vec<u8>> {
        let document = resource.to_document()?;
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };
        Ok(bytes)
    }

    async fn write_record(&self, resource: &dyn Resource) -> InventoryResult<()> {
        let id = resource.id();
        let shard = self.config.shard_dir(id);
        let path = self.config.record_path(id);
        let data = self.encode(resource)?;

        tokio::fs::create_dir_all(&shard)
            .await
            .map_err(|e| InventoryError::storage(&shard, e))?;

        atomic_write(&path, &data)
            .await
            .map_err(|e| InventoryError::storage(&path, e))?;

        debug!("Wrote {} {} to {}", resource.resource_type(), id, path.display());
        Ok(())
    }

    /// Remove the record for `id`, reporting whether one existed
    async fn remove_record(&self, id: &str) -> InventoryResult<bool> {
        if !serial::is_serial(id) {
            debug!("Ignoring delete of malformed id {:?}", id);
            return Ok(false);
        }

        let path = self.config.record_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Delete of {} found no record", id);
                Ok(false)
            }
            Err(e) => Err(InventoryError::storage(path, e)),
        }
    }

    /// Every record file currently on disk
    async fn record_files(&self) -> InventoryResult<Vec<PathBuf>> {
        let resources = self.config.resources_dir();
        let mut shards = tokio::fs::read_dir(&resources)
            .await
            .map_err(|e| InventoryError::storage(&resources, e))?;

        let mut files = Vec::new();

        while let Some(shard) = shards
            .next_entry()
            .await
            .map_err(|e| InventoryError::storage(&resources, e))?
        {
            let shard_path = shard.path();
            let kind = shard
                .file_type()
                .await
                .map_err(|e| InventoryError::storage(&shard_path, e))?;
            if !kind.is_dir() {
                continue;
            }

            let mut entries = tokio::fs::read_dir(&shard_path)
                .await
                .map_err(|e| InventoryError::storage(&shard_path, e))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| InventoryError::storage(&shard_path, e))?
            {
                let path = entry.path();
                let kind = entry
                    .file_type()
                    .await
                    .map_err(|e| InventoryError::storage(&path, e))?;
                if kind.is_file() && is_record_name(&path) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    async fn decode_record(&self, path: &Path) -> Result<Box<dyn Resource>, String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
        let document: Value = serde_json::from_slice(&bytes).map_err(|e| e.to_string())?;
        let resource = self.factory.decode(document).map_err(|e| e.to_string())?;

        let expected = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if resource.id() != expected {
            return Err(format!(
                "record id {:?} does not match file name",
                resource.id()
            ));
        }

        Ok(resource)
    }

    async fn read_all(&self) -> InventoryResult<Loaded> {
        let mut decoded = Vec::new();
        let mut failures = Vec::new();

        for path in self.record_files().await? {
            match self.decode_record(&path).await {
                Ok(resource) => decoded.push(resource),
                Err(reason) => {
                    warn!("Skipping record {}: {}", path.display(), reason);
                    failures.push(DecodeFailure { path, reason });
                }
            }
        }

        decoded.sort_by(|a, b| a.id().cmp(b.id()));
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        let mut resources = ResourceMap::new(&self.factory);
        for resource in decoded {
            let bucket = resource.resource_type().to_string();
            resources.add(Arc::from(resource), &bucket);
        }

        debug!(
            "Loaded {} resources ({} skipped) from {}",
            resources.len(),
            failures.len(),
            self.root().display()
        );

        Ok(Loaded {
            resources,
            failures,
        })
    }
}

#[async_trait]
impl Store for ResourceStore {
    fn factory(&self) -> &ResourceFactory {
        &self.factory
    }

    async fn initialize(&self) -> InventoryResult<()> {
        let _guard = self.lock.write().await;

        let resources = self.config.resources_dir();
        tokio::fs::create_dir_all(&resources)
            .await
            .map_err(|e| InventoryError::storage(&resources, e))?;

        if self.check_layout().await?.is_none() {
            let path = self.config.layout_path();
            let data = serde_json::to_vec(&self.layout())?;
            atomic_write(&path, &data)
                .await
                .map_err(|e| InventoryError::storage(&path, e))?;
            debug!("Recorded shard width {} in {}", self.config.shard_width, path.display());
        }

        info!("Initialized resource store at {}", self.root().display());
        Ok(())
    }

    async fn create(&self, resource: &dyn Resource) -> InventoryResult<()> {
        resource.validate(&ValidationContext::new(&self.factory))?;

        let _guard = self.lock.write().await;
        self.check_layout().await?;
        self.write_record(resource).await
    }

    async fn delete(&self, resource: Option<&dyn Resource>) -> InventoryResult<()> {
        let resource = resource.ok_or(InventoryError::NilResource)?;

        let _guard = self.lock.write().await;
        self.check_layout().await?;
        self.remove_record(resource.id()).await?;
        Ok(())
    }

    async fn load(&self) -> InventoryResult<Loaded> {
        let _guard = self.lock.read().await;
        self.check_layout().await?;
        self.read_all().await
    }

    async fn wipe(&self) -> InventoryResult<()> {
        let _guard = self.lock.write().await;

        let root = self.root();
        warn!("Wiping resource store at {} - ALL RECORDS WILL BE DELETED", root.display());

        match tokio::fs::remove_dir_all(root).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(InventoryError::storage(root, e)),
        }

        info!("Resource store wiped");
        Ok(())
    }

    async fn clear(&self) -> InventoryResult<()> {
        let _guard = self.lock.write().await;
        self.check_layout().await?;

        let resources = self.config.resources_dir();
        match tokio::fs::remove_dir_all(&resources).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(InventoryError::storage(&resources, e)),
        }

        tokio::fs::create_dir_all(&resources)
            .await
            .map_err(|e| InventoryError::storage(&resources, e))?;

        info!("Cleared all records from {}", self.root().display());
        Ok(())
    }

    async fn create_many(&self, map: &ResourceMap) -> InventoryResult<usize> {
        let ctx = ValidationContext::new(&self.factory);
        let _guard = self.lock.write().await;
        self.check_layout().await?;

        let mut succeeded = 0;
        let mut failures = Vec::new();

        for (_, resource) in map.iter() {
            let outcome = match resource.validate(&ctx) {
                Ok(()) => self.write_record(&**resource).await,
                Err(e) => Err(e.into()),
            };

            match outcome {
                Ok(()) => succeeded += 1,
                Err(e) => failures.push(ItemFailure {
                    id: resource.id().to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        bulk_outcome("create", succeeded, failures)
    }

    async fn delete_many(&self, map: &ResourceMap) -> InventoryResult<usize> {
        let _guard = self.lock.write().await;
        self.check_layout().await?;

        let mut succeeded = 0;
        let mut failures = Vec::new();

        for (_, resource) in map.iter() {
            match self.remove_record(resource.id()).await {
                Ok(_) => succeeded += 1,
                Err(e) => failures.push(ItemFailure {
                    id: resource.id().to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        bulk_outcome("delete", succeeded, failures)
    }
}

fn bulk_outcome(
    operation: &str,
    succeeded: usize,
    failures: Vec<ItemFailure>,
) -> InventoryResult<usize> {
    if failures.is_empty() {
        debug!("Bulk {} applied to {} resources", operation, succeeded);
        return Ok(succeeded);
    }

    for failure in &failures {
        warn!("Bulk {} failed for {}: {}", operation, failure.id, failure.reason);
    }

    Err(InventoryError::BulkFailure {
        succeeded,
        failures,
    })
}

/// Final `<id>.json` names only; temporaries carry a trailing `.tmp.<uuid>`
fn is_record_name(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
}

/// Write to a synced temporary sibling, then rename over `path`
///
/// The temporary never outlives a failed call.
async fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_file_name(format!(
        "{}.tmp.{}",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("record"),
        Uuid::new_v4()
    ));

    if let Err(e) = write_synced(&temp_path, data).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    sync_parent(path).await
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

/// Persist the rename itself
#[cfg(unix)]
async fn sync_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::File::open(parent).await?.sync_all().await
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
async fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
