// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute resources: bare metal servers, hypervisors and virtual machines

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::{BaseResource, Labels, NamedResource, ResourceKind};
use crate::domain::invariants::{self, ValidationResult};

/// Bare metal server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(flatten)]
    pub named: NamedResource,

    #[serde(default)]
    pub serial_number: String,

    /// Address of the out-of-band management board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_ip: Option<IpAddr>,

    #[serde(default)]
    pub model: String,
}

impl Server {
    pub fn new(
        name: impl Into<String>,
        serial_number: impl Into<String>,
        board_ip: IpAddr,
        model: impl Into<String>,
        labels: Labels,
    ) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            serial_number: serial_number.into(),
            board_ip: Some(board_ip),
            model: model.into(),
        }
    }
}

impl ResourceKind for Server {
    const TYPE: &'static str = "Server";
    const DESCRIPTION: &'static str = "bare metal server";

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
        invariants::require_text("serial_number", &self.serial_number)?;
        invariants::require_ip("board_ip", &self.board_ip)?;
        invariants::require_text("model", &self.model)
    }
}

/// ESX hypervisor installed on a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ESX {
    #[serde(flatten)]
    pub named: NamedResource,

    /// Id of the server the hypervisor runs on
    #[serde(default)]
    pub server_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
}

impl ESX {
    pub fn new(
        name: impl Into<String>,
        server_id: impl Into<String>,
        ip: IpAddr,
        labels: Labels,
    ) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            server_id: server_id.into(),
            ip: Some(ip),
        }
    }
}

impl ResourceKind for ESX {
    const TYPE: &'static str = "ESX";
    const DESCRIPTION: &'static str = "ESX hypervisor";

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
        invariants::require_reference("server_id", &self.server_id)?;
        invariants::require_ip("ip", &self.ip)
    }
}

/// vCenter management appliance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VCenter {
    #[serde(flatten)]
    pub named: NamedResource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
}

impl VCenter {
    pub fn new(name: impl Into<String>, ip: IpAddr, labels: Labels) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            ip: Some(ip),
        }
    }
}

impl ResourceKind for VCenter {
    const TYPE: &'static str = "VCenter";
    const DESCRIPTION: &'static str = "vCenter management appliance";

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
        invariants::require_ip("ip", &self.ip)
    }
}

/// Virtual machine hosted on an ESX hypervisor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VM {
    #[serde(flatten)]
    pub named: NamedResource,

    #[serde(default)]
    pub esx_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_ip: Option<IpAddr>,

    /// Managing vCenter, empty when standalone
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vcenter_id: String,
}

impl VM {
    pub fn new(
        name: impl Into<String>,
        esx_id: impl Into<String>,
        management_ip: IpAddr,
        labels: Labels,
    ) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            esx_id: esx_id.into(),
            management_ip: Some(management_ip),
            vcenter_id: String::new(),
        }
    }

    pub fn managed_by(mut self, vcenter_id: impl Into<String>) -> Self {
        self.vcenter_id = vcenter_id.into();
        self
    }
}

impl ResourceKind for VM {
    const TYPE: &'static str = "VM";
    const DESCRIPTION: &'static str = "virtual machine";

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
        invariants::require_reference("esx_id", &self.esx_id)?;
        invariants::require_ip("management_ip", &self.management_ip)?;

        if !self.vcenter_id.is_empty() {
            invariants::require_reference("vcenter_id", &self.vcenter_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_server_fields() {
        let server = Server::new("srv1", "SN-1", ip("10.0.0.10"), "R750", Labels::new());
        assert!(server.validate_fields().is_ok());

        let mut missing_board = server.clone();
        missing_board.board_ip = None;
        assert_eq!(
            missing_board.validate_fields(),
            Err(ValidationError::MissingField {
                field: "board_ip".to_string()
            })
        );

        let mut missing_model = server;
        missing_model.model.clear();
        assert!(missing_model.validate_fields().is_err());
    }

    #[test]
    fn test_esx_requires_server_reference() {
        let esx = ESX::new("esx1", "0100000001", ip("10.0.0.11"), Labels::new());
        assert!(esx.validate_fields().is_ok());

        let esx = ESX::new("esx1", "server-one", ip("10.0.0.11"), Labels::new());
        assert!(matches!(
            esx.validate_fields(),
            Err(ValidationError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_vm_optional_vcenter() {
        let vm = VM::new("vm1", "0100000002", ip("10.0.1.5"), Labels::new());
        assert!(vm.validate_fields().is_ok());

        let managed = vm.clone().managed_by("0100000009");
        assert!(managed.validate_fields().is_ok());

        let bad = vm.managed_by("vc");
        assert!(bad.validate_fields().is_err());
    }

    #[test]
    fn test_vcenter_document_omits_missing_ip() {
        let vc = VCenter::zero();
        let doc = serde_json::to_value(&vc).unwrap();
        assert!(doc.get("ip").is_none());
        assert_eq!(doc["type"], "VCenter");
    }
}
