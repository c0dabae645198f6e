// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource & Label Model
//!
//! Shared attributes and the capability contract every inventory resource
//! satisfies.
//!
//! # Layers
//!
//! - [`BaseResource`] - serial id, type tag, labels, status
//! - [`NamedResource`] - base plus a human-readable name
//! - [`ResourceKind`] - implemented by each concrete type; carries its tag
//! - [`Resource`] - object-safe view used by maps, filters and stores
//!
//! Every `ResourceKind` is a `Resource` through a blanket impl, so concrete
//! types only describe their own fields and invariants.
//!
//! # Concrete Types
//!
//! - [`dc`] - `Datacenter`, `Lab`, `Rack`
//! - [`compute`] - `Server`, `ESX`, `VCenter`, `VM`
//! - [`network`] - `Switch`, `VLANPool`, `IPAddressPool`
//! - [`auth`] - `User`, `Credentials`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use crate::domain::invariants::{self, ValidationResult};
use crate::domain::serial;
use crate::factory::ResourceFactory;

pub mod auth;
pub mod compute;
pub mod dc;
pub mod labels;
pub mod network;
pub mod status;

pub use labels::Labels;
pub use status::{ActivityState, Fault, Lease, LeaseStatus, Status};

/// Context handed to [`Resource::validate`]
///
/// Carries the factory whose installed types define which tags are legal.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    factory: &'a ResourceFactory,
}

impl<'a> ValidationContext<'a> {
    pub fn new(factory: &'a ResourceFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &'a ResourceFactory {
        self.factory
    }

    /// Whether `tag` is installed in the context's factory
    pub fn is_registered(&self, tag: &str) -> bool {
        self.factory.contains(tag)
    }
}

/// Attributes shared by every resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResource {
    /// Serial id, fixed once assigned
    #[serde(default)]
    pub id: String,

    /// Type tag used for polymorphic decode
    #[serde(rename = "type", default)]
    pub resource_type: String,

    #[serde(default)]
    pub labels: Labels,

    #[serde(default)]
    pub status: Status,
}

impl BaseResource {
    /// Create a base with a freshly generated serial id
    pub fn new(resource_type: impl Into<String>, labels: Labels) -> Self {
        Self {
            id: serial::generate(),
            resource_type: resource_type.into(),
            labels,
            status: Status::default(),
        }
    }

    /// Create a base with a caller-chosen id
    pub fn with_id(
        id: impl Into<String>,
        resource_type: impl Into<String>,
        labels: Labels,
    ) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            labels,
            status: Status::default(),
        }
    }
}

/// Base resource with a human-readable name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(flatten)]
    pub base: BaseResource,

    #[serde(default)]
    pub name: String,
}

impl NamedResource {
    pub fn new(base: BaseResource, name: impl Into<String>) -> Self {
        Self {
            base,
            name: name.into(),
        }
    }
}

/// Capability contract of every stored resource
///
/// Object safe; maps and stores hold resources as `Arc<dyn Resource>`.
pub trait Resource: fmt::Debug + Send + Sync + 'static {
    fn id(&self) -> &str;

    /// Declared type tag
    fn resource_type(&self) -> &str;

    /// Name, for named resources
    fn name(&self) -> Option<&str>;

    fn labels(&self) -> &Labels;

    fn labels_mut(&mut self) -> &mut Labels;

    fn status(&self) -> &Status;

    fn status_mut(&mut self) -> &mut Status;

    /// Check all invariants against the installed types of `ctx`
    ///
    /// # Rules
    /// - Id is a well-formed serial
    /// - Type equals the concrete tag and is registered
    /// - Named resources have a non-empty name
    /// - Type-specific required fields are present
    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult;

    /// Encode as a resource document
    fn to_document(&self) -> Result<serde_json::Value, serde_json::Error>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn Resource {
    /// Borrow as a concrete type
    pub fn downcast_ref<T: ResourceKind>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A concrete resource type
///
/// Implementors only describe where their base lives and their own field
/// invariants; the [`Resource`] surface comes from the blanket impl.
pub trait ResourceKind:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Type tag, also the default bucket name
    const TYPE: &'static str;

    /// Short description for type listings
    const DESCRIPTION: &'static str;

    fn base(&self) -> &BaseResource;

    fn base_mut(&mut self) -> &mut BaseResource;

    /// Name, for named kinds
    fn name(&self) -> Option<&str> {
        None
    }

    /// Type-specific invariants
    fn validate_fields(&self) -> ValidationResult {
        Ok(())
    }

    /// Zero value with the type tag filled in
    fn zero() -> Self {
        let mut value = Self::default();
        value.base_mut().resource_type = Self::TYPE.to_string();
        value
    }
}

impl<T: ResourceKind> Resource for T {
    fn id(&self) -> &str {
        &self.base().id
    }

    fn resource_type(&self) -> &str {
        &self.base().resource_type
    }

    fn name(&self) -> Option<&str> {
        ResourceKind::name(self)
    }

    fn labels(&self) -> &Labels {
        &self.base().labels
    }

    fn labels_mut(&mut self) -> &mut Labels {
        &mut self.base_mut().labels
    }

    fn status(&self) -> &Status {
        &self.base().status
    }

    fn status_mut(&mut self) -> &mut Status {
        &mut self.base_mut().status
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        let base = self.base();

        invariants::validate_id(&base.id)?;
        invariants::validate_type(
            T::TYPE,
            &base.resource_type,
            ctx.is_registered(&base.resource_type),
        )?;

        if let Some(name) = ResourceKind::name(self) {
            invariants::validate_name(name)?;
        }

        self.validate_fields()
    }

    fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::dc::Lab;
    use super::network::VLANPool;
    use super::*;
    use crate::domain::ValidationError;
    use crate::factory::default_factory;

    #[test]
    fn test_base_resource_gets_serial() {
        let base = BaseResource::new("Lab", Labels::new());
        assert!(serial::is_serial(&base.id));
        assert_eq!(base.resource_type, "Lab");
    }

    #[test]
    fn test_zero_value_carries_tag() {
        let lab = Lab::zero();
        assert_eq!(Resource::resource_type(&lab), "Lab");
        assert_eq!(Resource::id(&lab), "");
    }

    #[test]
    fn test_validate_checks_identity_first() {
        let factory = default_factory();
        let ctx = ValidationContext::new(&factory);

        let lab = Lab::zero();
        assert!(matches!(
            lab.validate(&ctx),
            Err(ValidationError::InvalidId(_))
        ));

        let mut lab = Lab::new("lab1", Labels::new());
        lab.named.base.resource_type = "notLab".to_string();
        assert!(matches!(
            lab.validate(&ctx),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_requires_registration() {
        let factory = ResourceFactory::new();
        let ctx = ValidationContext::new(&factory);

        let lab = Lab::new("lab1", Labels::new());
        assert_eq!(
            lab.validate(&ctx),
            Err(ValidationError::UnregisteredType("Lab".to_string()))
        );
    }

    #[test]
    fn test_validate_named_requires_name() {
        let factory = default_factory();
        let ctx = ValidationContext::new(&factory);

        let lab = Lab::new("", Labels::new());
        assert_eq!(lab.validate(&ctx), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_document_shape() {
        let lab = Lab {
            named: NamedResource::new(
                BaseResource::with_id("10000001", "Lab", Labels::new().with("owner", "alice")),
                "Lab1",
            ),
        };

        let doc = lab.to_document().unwrap();
        assert_eq!(doc["id"], "10000001");
        assert_eq!(doc["type"], "Lab");
        assert_eq!(doc["name"], "Lab1");
        assert_eq!(doc["labels"]["owner"], "alice");
        assert!(doc["status"].is_object());
    }

    #[test]
    fn test_downcast() {
        let pool: Box<dyn Resource> = Box::new(VLANPool::new(1, 10, Labels::new()));
        assert!(pool.downcast_ref::<VLANPool>().is_some());
        assert!(pool.downcast_ref::<Lab>().is_none());
    }

    #[test]
    fn test_status_mutation_through_trait() {
        let mut lab: Box<dyn Resource> = Box::new(Lab::new("lab1", Labels::new()));
        lab.status_mut().set_user("alice");
        lab.labels_mut().add("team", "infra");

        assert_eq!(lab.status().user(), Some("alice"));
        assert_eq!(lab.labels().get("team"), Some("infra"));
    }
}
