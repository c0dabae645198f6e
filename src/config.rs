// Copyright (c) 2025 - Cowboy AI, Inc.
//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{InventoryError, InventoryResult};

/// Default store root
pub const DEFAULT_ROOT: &str = "inventory-store";

/// Default number of id digits used to name shard directories
pub const DEFAULT_SHARD_WIDTH: usize = 2;

/// File-backed store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the store
    pub root: PathBuf,

    /// Leading id digits naming each shard directory (1..=4)
    pub shard_width: usize,

    /// Pretty-print persisted documents
    pub pretty: bool,
}

impl StoreConfig {
    /// Create a configuration rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Set the shard directory width
    pub fn with_shard_width(mut self, shard_width: usize) -> Self {
        self.shard_width = shard_width;
        self
    }

    /// Toggle pretty-printed documents
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Load from `INVENTORY_ROOT` and `INVENTORY_SHARD_WIDTH`
    pub fn from_env() -> InventoryResult<Self> {
        let root = std::env::var("INVENTORY_ROOT").unwrap_or_else(|_| DEFAULT_ROOT.to_string());

        let shard_width = match std::env::var("INVENTORY_SHARD_WIDTH") {
            Ok(raw) => raw.parse().map_err(|_| {
                InventoryError::Configuration(format!(
                    "INVENTORY_SHARD_WIDTH must be a number, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_SHARD_WIDTH,
        };

        let config = Self::new(root).with_shard_width(shard_width);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InventoryResult<()> {
        if self.root.as_os_str().is_empty() {
            return Err(InventoryError::Configuration(
                "store root cannot be empty".to_string(),
            ));
        }

        if !(1..=4).contains(&self.shard_width) {
            return Err(InventoryError::Configuration(format!(
                "shard width must be between 1 and 4, got {}",
                self.shard_width
            )));
        }
        Ok(())
    }

    /// Directory holding the resource shards
    pub fn resources_dir(&self) -> PathBuf {
        self.root.join("resources")
    }

    /// Manifest recording the layout a store was initialized with
    pub fn layout_path(&self) -> PathBuf {
        self.root.join("layout.json")
    }

    /// Shard directory a given id lives in
    pub fn shard_dir(&self, id: &str) -> PathBuf {
        let prefix: String = id.chars().take(self.shard_width).collect();
        self.resources_dir().join(prefix)
    }

    /// File a given id is persisted in
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.shard_dir(id).join(format!("{id}.json"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            shard_width: DEFAULT_SHARD_WIDTH,
            pretty: true,
        }
    }
}
