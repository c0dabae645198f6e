// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Resource Invariants
//!
//! Business rule checks shared by every concrete resource type. All
//! functions are pure (no I/O, no mutation) and return detailed failures so
//! that a resource's `validate` can compose them with `?`.
//!
//! # Invariant Categories
//!
//! 1. **Identity**: serial id format, type tag registration
//! 2. **Naming**: named resources carry a non-empty name
//! 3. **Required Fields**: type-specific fields that must be present
//! 4. **Ranges**: numeric ranges such as VLAN pools

use std::net::IpAddr;

use super::network::{IpAddressWithCidr, NetworkError, VlanId};
use super::serial;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Id is empty or not a serial
    #[error("Invalid resource id: {0:?}")]
    InvalidId(String),

    /// Type tag is not installed in the factory
    #[error("Resource type {0:?} is not registered")]
    UnregisteredType(String),

    /// Type tag does not match the concrete resource
    #[error("Resource type mismatch: expected {expected}, got {actual:?}")]
    TypeMismatch { expected: String, actual: String },

    /// Named resource without a name
    #[error("Resource name cannot be empty")]
    EmptyName,

    /// Required field missing or empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Field present but out of its domain
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Network value object rejected
    #[error("Network validation failed: {0}")]
    Network(#[from] NetworkError),
}

/// Validate a resource id
///
/// # Rules
/// - Must not be empty
/// - Must be a decimal serial (see [`serial::is_serial`])
pub fn validate_id(id: &str) -> ValidationResult {
    if !serial::is_serial(id) {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Validate a resource's type tag
///
/// # Rules
/// - Tag must equal the concrete type's own tag
/// - Tag must be installed in the caller's factory
pub fn validate_type(expected: &str, actual: &str, registered: bool) -> ValidationResult {
    if expected != actual {
        return Err(ValidationError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    if !registered {
        return Err(ValidationError::UnregisteredType(actual.to_string()));
    }

    Ok(())
}

/// Validate a resource name
pub fn validate_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Require a non-empty string field
pub fn require_text(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Require an address that can actually be reached
///
/// # Rules
/// - Must be present
/// - Must not be the unspecified address (`0.0.0.0` / `::`)
pub fn require_ip(field: &str, value: &Option<IpAddr>) -> ValidationResult {
    match value {
        None => Err(ValidationError::MissingField {
            field: field.to_string(),
        }),
        Some(ip) if ip.is_unspecified() => Err(ValidationError::InvalidField {
            field: field.to_string(),
            reason: "unspecified address".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

/// Require a field that references another resource by id
pub fn require_reference(field: &str, value: &str) -> ValidationResult {
    require_text(field, value)?;

    if !serial::is_serial(value) {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            reason: format!("{value:?} is not a resource id"),
        });
    }
    Ok(())
}

/// Validate a VLAN pool range
///
/// # Rules
/// - Both ends must be valid VLAN ids (1-4094)
/// - Start must not exceed end
pub fn validate_vlan_range(start: u16, end: u16) -> ValidationResult {
    let first = VlanId::new(start)?;
    let last = VlanId::new(end)?;

    if first.value() > last.value() {
        return Err(ValidationError::InvalidField {
            field: "range_start".to_string(),
            reason: format!("{start} is greater than range_end {end}"),
        });
    }
    Ok(())
}

/// Validate the subnets of an address pool
///
/// # Rules
/// - At least one subnet
/// - Every subnet carries a prefix length
pub fn validate_subnets(subnets: &[IpAddressWithCidr]) -> ValidationResult {
    if subnets.is_empty() {
        return Err(ValidationError::MissingField {
            field: "subnets".to_string(),
        });
    }

    if let Some(host) = subnets.iter().find(|s| !s.is_subnet()) {
        return Err(ValidationError::InvalidField {
            field: "subnets".to_string(),
            reason: format!("{host} has no prefix length"),
        });
    }

    Ok(())
}
