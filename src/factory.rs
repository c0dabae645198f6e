// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Factory
//!
//! Registry resolving a type tag to a constructor and a decoder. Decoding a
//! document goes through the registry, so a factory holding only some types
//! acts as an allow-list: anything else is rejected with
//! [`InventoryError::UnknownType`].
//!
//! There is no process-wide factory. Callers build one (usually with
//! [`default_factory`]) and hand it to the stores and maps that need it.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::errors::{InventoryError, InventoryResult};
use crate::resource::auth::{Credentials, User};
use crate::resource::compute::{Server, VCenter, ESX, VM};
use crate::resource::dc::{Datacenter, Lab, Rack};
use crate::resource::network::{IPAddressPool, Switch, VLANPool};
use crate::resource::{Resource, ResourceKind};

type Constructor = fn() -> Box<dyn Resource>;
type Decoder = fn(Value) -> Result<Box<dyn Resource>, serde_json::Error>;

fn construct<T: ResourceKind>() -> Box<dyn Resource> {
    Box::new(T::zero())
}

fn decode<T: ResourceKind>(value: Value) -> Result<Box<dyn Resource>, serde_json::Error> {
    Ok(Box::new(serde_json::from_value::<T>(value)?))
}

/// Descriptor of one installable resource type
#[derive(Clone, Copy)]
pub struct ResourceType {
    name: &'static str,
    description: &'static str,
    constructor: Constructor,
    decoder: Decoder,
}

impl ResourceType {
    /// Descriptor for a concrete kind
    pub fn of<T: ResourceKind>() -> Self {
        Self {
            name: T::TYPE,
            description: T::DESCRIPTION,
            constructor: construct::<T>,
            decoder: decode::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Serializable summary for type listings
    pub fn info(&self) -> TypeInfo {
        TypeInfo {
            name: self.name,
            description: self.description,
        }
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("name", &self.name)
            .finish()
    }
}

/// Name and description of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Tag → descriptor registry
///
/// Registration order is kept so listings are stable. Cloning produces an
/// independent snapshot.
#[derive(Debug, Clone, Default)]
pub struct ResourceFactory {
    types: Vec<ResourceType>,
}

impl ResourceFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ResourceFactory::register`]
    pub fn add(mut self, resource_type: ResourceType) -> Self {
        self.register(resource_type);
        self
    }

    /// Install a type, replacing any descriptor with the same tag
    pub fn register(&mut self, resource_type: ResourceType) {
        match self.types.iter_mut().find(|t| t.name == resource_type.name) {
            Some(existing) => *existing = resource_type,
            None => self.types.push(resource_type),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&ResourceType> {
        self.types.iter().find(|t| t.name == tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered tags in registration order
    pub fn types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.iter().map(|t| t.name)
    }

    /// Descriptors for the requested tags, or all of them when `names` is empty
    ///
    /// Unknown names are skipped.
    pub fn describe<S: AsRef<str>>(&self, names: &[S]) -> Vec<TypeInfo> {
        if names.is_empty() {
            return self.types.iter().map(ResourceType::info).collect();
        }

        names
            .iter()
            .filter_map(|name| self.get(name.as_ref()))
            .map(ResourceType::info)
            .collect()
    }

    /// Fresh zero value of the type registered under `tag`
    pub fn new_resource(&self, tag: &str) -> InventoryResult<Box<dyn Resource>> {
        self.get(tag)
            .map(|t| (t.constructor)())
            .ok_or_else(|| InventoryError::UnknownType(tag.to_string()))
    }

    /// Decode a resource document by its `type` member
    pub fn decode(&self, document: Value) -> InventoryResult<Box<dyn Resource>> {
        let tag = document
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let resource_type = self
            .get(&tag)
            .ok_or_else(|| InventoryError::UnknownType(tag.clone()))?;

        Ok((resource_type.decoder)(document)?)
    }
}

/// Factory with every built-in resource type installed
pub fn default_factory() -> ResourceFactory {
    ResourceFactory::new()
        .add(ResourceType::of::<Datacenter>())
        .add(ResourceType::of::<Lab>())
        .add(ResourceType::of::<Rack>())
        .add(ResourceType::of::<Server>())
        .add(ResourceType::of::<ESX>())
        .add(ResourceType::of::<VCenter>())
        .add(ResourceType::of::<VM>())
        .add(ResourceType::of::<Switch>())
        .add(ResourceType::of::<VLANPool>())
        .add(ResourceType::of::<IPAddressPool>())
        .add(ResourceType::of::<User>())
        .add(ResourceType::of::<Credentials>())
}
