// Copyright (c) 2025 - Cowboy AI, Inc.
//! Datacenter inventory store for the Composable Information Machine
//!
//! Persistent, polymorphic storage of inventory resources (labs, racks,
//! servers, hypervisors, VMs, switches, VLAN and IP pools, accounts) with
//! a label and property query engine.
//!
//! # Modules
//!
//! - [`domain`] - value objects and invariant checks
//! - [`resource`] - the resource model and concrete types
//! - [`factory`] - type tag registry used for polymorphic decode
//! - [`resource_map`] - grouped, ordered result container
//! - [`query`] - queries and selection requests
//! - [`filter`] - pure filters over resource maps
//! - [`store`] - persistence

pub mod config;
pub mod domain;
pub mod errors;
pub mod factory;
pub mod filter;
pub mod query;
pub mod resource;
pub mod resource_map;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use errors::{DecodeFailure, InventoryError, InventoryResult, ItemFailure};
pub use factory::{default_factory, ResourceFactory, ResourceType, TypeInfo};
pub use query::{Operator, Query, QueryRequest, Selection};
pub use resource::auth::{Credentials, Role, User};
pub use resource::compute::{Server, VCenter, ESX, VM};
pub use resource::dc::{Datacenter, Lab, Rack};
pub use resource::network::{IPAddressPool, Switch, VLANPool};
pub use resource::{
    BaseResource, Labels, NamedResource, Resource, ResourceKind, Status, ValidationContext,
};
pub use resource_map::ResourceMap;
pub use store::{Loaded, ResourceStore, Store};
