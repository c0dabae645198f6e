// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Status
//!
//! Ownership, occupancy and lease bookkeeping carried by every resource.
//! Only the recorded state lives here; when a lease expires is decided by
//! the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fault severity reported for a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fault {
    #[default]
    None,
    Minor,
    Major,
    Critical,
}

/// Occupancy of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaseStatus {
    /// Available for allocation
    #[default]
    Free,
    /// Allocated to a user
    Leased,
    /// Being prepared for a user
    Setup,
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeaseStatus::Free => "free",
            LeaseStatus::Leased => "leased",
            LeaseStatus::Setup => "setup",
        };
        f.write_str(name)
    }
}

/// Operational state of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityState {
    #[default]
    Inactive,
    Active,
}

/// Lease metadata recorded while a resource is allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// Identifier of the lease request
    pub lease_id: String,

    /// When the lease was granted
    pub acquired_at: DateTime<Utc>,

    /// When the holder is expected to give it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Status block shared by all resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub fault: Fault,

    #[serde(default)]
    pub lease_status: LeaseStatus,

    /// Identity of the current owner/user, empty when unowned
    #[serde(default)]
    pub used_by: String,

    #[serde(default)]
    pub state: ActivityState,

    #[serde(default = "Utc::now")]
    pub created_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease: Option<Lease>,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            fault: Fault::default(),
            lease_status: LeaseStatus::default(),
            used_by: String::new(),
            state: ActivityState::default(),
            created_time: Utc::now(),
            lease: None,
        }
    }
}

impl Status {
    /// Stamp the identity of the resource's user
    ///
    /// The identity is trusted as given; verifying it is the caller's job.
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.used_by = user.into();
    }

    /// Current owner, if any
    pub fn user(&self) -> Option<&str> {
        (!self.used_by.is_empty()).then_some(self.used_by.as_str())
    }

    /// Record a lease granted to `user`
    pub fn lease_to(
        &mut self,
        user: impl Into<String>,
        lease_id: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.set_user(user);
        self.lease_status = LeaseStatus::Leased;
        self.state = ActivityState::Active;
        self.lease = Some(Lease {
            lease_id: lease_id.into(),
            acquired_at: Utc::now(),
            expires_at,
        });
    }

    /// Drop lease and ownership, returning the resource to the free pool
    pub fn release(&mut self) -> Option<Lease> {
        self.used_by.clear();
        self.lease_status = LeaseStatus::Free;
        self.state = ActivityState::Inactive;
        self.lease.take()
    }

    pub fn is_leased(&self) -> bool {
        self.lease_status == LeaseStatus::Leased
    }
}
