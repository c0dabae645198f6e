// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network resources: switches and allocation pools

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::{BaseResource, Labels, NamedResource, ResourceKind};
use crate::domain::invariants::{self, ValidationError, ValidationResult};
use crate::domain::IpAddressWithCidr;

/// Network switch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    #[serde(flatten)]
    pub named: NamedResource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_ip: Option<IpAddr>,

    #[serde(default)]
    pub serial_number: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub num_ports: u32,
}

impl Switch {
    pub fn new(
        name: impl Into<String>,
        management_ip: IpAddr,
        serial_number: impl Into<String>,
        model: impl Into<String>,
        num_ports: u32,
        labels: Labels,
    ) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            management_ip: Some(management_ip),
            serial_number: serial_number.into(),
            model: model.into(),
            num_ports,
        }
    }
}

impl ResourceKind for Switch {
    const TYPE: &'static str = "Switch";
    const DESCRIPTION: &'static str = "network switch";

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
        invariants::require_ip("management_ip", &self.management_ip)?;
        invariants::require_text("serial_number", &self.serial_number)?;
        invariants::require_text("model", &self.model)?;

        if self.num_ports == 0 {
            return Err(ValidationError::InvalidField {
                field: "num_ports".to_string(),
                reason: "a switch needs at least one port".to_string(),
            });
        }
        Ok(())
    }
}

/// Contiguous range of VLAN ids available for allocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VLANPool {
    #[serde(flatten)]
    pub base: BaseResource,

    #[serde(default)]
    pub range_start: u16,

    #[serde(default)]
    pub range_end: u16,
}

impl VLANPool {
    pub fn new(range_start: u16, range_end: u16, labels: Labels) -> Self {
        Self {
            base: BaseResource::new(Self::TYPE, labels),
            range_start,
            range_end,
        }
    }

    /// Number of VLAN ids in the pool
    pub fn size(&self) -> usize {
        if self.range_end < self.range_start {
            return 0;
        }
        usize::from(self.range_end - self.range_start) + 1
    }
}

impl ResourceKind for VLANPool {
    const TYPE: &'static str = "VLANPool";
    const DESCRIPTION: &'static str = "pool of VLAN ids";

    fn base(&self) -> &BaseResource {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseResource {
        &mut self.base
    }

    fn validate_fields(&self) -> ValidationResult {
        invariants::validate_vlan_range(self.range_start, self.range_end)
    }
}

/// Set of subnets available for address allocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IPAddressPool {
    #[serde(flatten)]
    pub base: BaseResource,

    #[serde(default)]
    pub subnets: Vec<IpAddressWithCidr>,
}

impl IPAddressPool {
    pub fn new(subnets: Vec<IpAddressWithCidr>, labels: Labels) -> Self {
        Self {
            base: BaseResource::new(Self::TYPE, labels),
            subnets,
        }
    }
}

impl ResourceKind for IPAddressPool {
    const TYPE: &'static str = "IPAddressPool";
    const DESCRIPTION: &'static str = "pool of IP subnets";

    fn base(&self) -> &BaseResource {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseResource {
        &mut self.base
    }

    fn validate_fields(&self) -> ValidationResult {
        invariants::validate_subnets(&self.subnets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_needs_ports() {
        let sw = Switch::new(
            "sw1",
            "10.0.0.2".parse().unwrap(),
            "SN-9",
            "N9K",
            48,
            Labels::new(),
        );
        assert!(sw.validate_fields().is_ok());

        let mut no_ports = sw;
        no_ports.num_ports = 0;
        assert!(no_ports.validate_fields().is_err());
    }

    #[test]
    fn test_vlan_pool_size() {
        assert_eq!(VLANPool::new(1, 10, Labels::new()).size(), 10);
        assert_eq!(VLANPool::new(5, 5, Labels::new()).size(), 1);
        assert_eq!(VLANPool::new(10, 1, Labels::new()).size(), 0);
    }

    #[test]
    fn test_vlan_pool_range() {
        assert!(VLANPool::new(1, 10, Labels::new()).validate_fields().is_ok());
        assert!(VLANPool::new(0, 1, Labels::new()).validate_fields().is_err());
        assert!(VLANPool::new(10, 1, Labels::new()).validate_fields().is_err());
    }

    #[test]
    fn test_ip_pool_subnets() {
        let pool = IPAddressPool::new(
            vec![IpAddressWithCidr::new("10.10.0.0/16").unwrap()],
            Labels::new(),
        );
        assert!(pool.validate_fields().is_ok());

        let doc = serde_json::to_value(&pool).unwrap();
        assert_eq!(doc["subnets"][0], "10.10.0.0/16");

        let empty = IPAddressPool::new(Vec::new(), Labels::new());
        assert!(empty.validate_fields().is_err());
    }
}
