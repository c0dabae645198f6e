// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Value objects and pure invariant checks shared by every resource type.
//!
//! # Value Objects with Invariants
//!
//! - [`IpAddressWithCidr`] - IPv4/IPv6 with CIDR notation
//! - [`VlanId`] - IEEE 802.1Q VLAN ID (1-4094)
//! - [`serial`] - fixed-width decimal resource ids
//!
//! # Invariants
//!
//! [`invariants`] holds the composable checks resources use in `validate`.

pub mod invariants;
pub mod network;
pub mod serial;

pub use invariants::{ValidationError, ValidationResult};
pub use network::{IpAddressWithCidr, NetworkError, VlanId};
