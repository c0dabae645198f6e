// Copyright (c) 2025 - Cowboy AI, Inc.
//! Datacenter resources: sites, labs and racks

use serde::{Deserialize, Serialize};

use super::{BaseResource, Labels, NamedResource, ResourceKind};
use crate::domain::invariants::{self, ValidationResult};

/// A physical site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    #[serde(flatten)]
    pub named: NamedResource,

    /// Postal address of the site
    #[serde(default)]
    pub address: String,
}

impl Datacenter {
    pub fn new(name: impl Into<String>, address: impl Into<String>, labels: Labels) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            address: address.into(),
        }
    }
}

impl ResourceKind for Datacenter {
    const TYPE: &'static str = "Datacenter";
    const DESCRIPTION: &'static str = "data center site";

    fn base(&self) -> &BaseResource {
        &self.named.base
    }

    fn base_mut(&mut self) -> &mut BaseResource {
        &mut self.named.base
    }

    fn name(&self) -> Option<&str> {
        Some(&self.named.name)
    }

    fn validate_fields(&self) -> ValidationResult {
        invariants::require_text("address", &self.address)
    }
}

/// A lab inside a datacenter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    #[serde(flatten)]
    pub named: NamedResource,
}

impl Lab {
    pub fn new(name: impl Into<String>, labels: Labels) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
        }
    }
}

impl ResourceKind for Lab {
    const TYPE: &'static str = "Lab";
    const DESCRIPTION: &'static str = "lab inside a data center";

    fn base(&self) -> &BaseResource {
        &self.named.base
    }

    fn base_mut(&mut self) -> &mut BaseResource {
        &mut self.named.base
    }

    fn name(&self) -> Option<&str> {
        Some(&self.named.name)
    }
}

/// An equipment rack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    #[serde(flatten)]
    pub named: NamedResource,

    /// Row the rack stands in
    #[serde(default)]
    pub row: String,
}

impl Rack {
    pub fn new(name: impl Into<String>, row: impl Into<String>, labels: Labels) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            row: row.into(),
        }
    }
}

impl ResourceKind for Rack {
    const TYPE: &'static str = "Rack";
    const DESCRIPTION: &'static str = "equipment rack";

    fn base(&self) -> &BaseResource {
        &self.named.base
    }

    fn base_mut(&mut self) -> &mut BaseResource {
        &mut self.named.base
    }

    fn name(&self) -> Option<&str> {
        Some(&self.named.name)
    }

    fn validate_fields(&self) -> ValidationResult {
        invariants::require_text("row", &self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_datacenter_requires_address() {
        let dc = Datacenter::new("dc1", "", Labels::new());
        assert_eq!(
            dc.validate_fields(),
            Err(ValidationError::MissingField {
                field: "address".to_string()
            })
        );

        let dc = Datacenter::new("dc1", "1 Main St", Labels::new());
        assert!(dc.validate_fields().is_ok());
    }

    #[test]
    fn test_rack_requires_row() {
        assert!(Rack::new("r1", "", Labels::new()).validate_fields().is_err());
        assert!(Rack::new("r1", "A", Labels::new()).validate_fields().is_ok());
    }

    #[test]
    fn test_lab_decodes_from_document() {
        let lab: Lab = serde_json::from_str(
            r#"{"id":"0100000003","type":"Lab","labels":{"owner":"shravya"},"name":"shravya's lab"}"#,
        )
        .unwrap();

        assert_eq!(lab.named.base.id, "0100000003");
        assert_eq!(lab.named.name, "shravya's lab");
        assert_eq!(lab.named.base.labels.get("owner"), Some("shravya"));
    }
}
