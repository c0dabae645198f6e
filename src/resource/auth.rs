// Copyright (c) 2025 - Cowboy AI, Inc.
//! Account resources: users and stored credentials
//!
//! Only the records live here. Verifying passwords or keys belongs to the
//! authentication layer in front of the store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{BaseResource, Labels, NamedResource, ResourceKind};
use crate::domain::invariants::{self, ValidationError, ValidationResult};

/// Role granted to a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,

    #[serde(default)]
    pub privileges: Vec<String>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privileges: Vec::new(),
        }
    }

    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privileges.push(privilege.into());
        self
    }
}

/// User account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub named: NamedResource,

    #[serde(default)]
    pub role: Role,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password_hash: String,

    /// PEM encoded public key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
}

impl User {
    pub fn new(name: impl Into<String>, role: Role, labels: Labels) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            role,
            password_hash: String::new(),
            key: String::new(),
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

impl ResourceKind for User {
    const TYPE: &'static str = "User";
    const DESCRIPTION: &'static str = "user account";

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
        invariants::require_text("role.name", &self.role.name)?;

        if self.password_hash.is_empty() && self.key.is_empty() {
            return Err(ValidationError::MissingField {
                field: "password_hash or key".to_string(),
            });
        }
        Ok(())
    }
}

/// Named set of secrets for reaching a device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(flatten)]
    pub named: NamedResource,

    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

impl Credentials {
    pub fn new(name: impl Into<String>, labels: Labels) -> Self {
        Self {
            named: NamedResource::new(BaseResource::new(Self::TYPE, labels), name),
            keys: BTreeMap::new(),
        }
    }

    pub fn add_key(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.keys.insert(name.into(), value.into());
        self
    }
}

impl ResourceKind for Credentials {
    const TYPE: &'static str = "Credentials";
    const DESCRIPTION: &'static str = "device credentials";

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
        if self.keys.is_empty() {
            return Err(ValidationError::MissingField {
                field: "keys".to_string(),
            });
        }

        if let Some((name, _)) = self.keys.iter().find(|(k, _)| k.trim().is_empty()) {
            return Err(ValidationError::InvalidField {
                field: "keys".to_string(),
                reason: format!("empty key name {name:?}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_needs_secret() {
        let user = User::new("alice", Role::new("admin"), Labels::new());
        assert!(user.validate_fields().is_err());

        assert!(user.clone().with_password_hash("$2b$hash").validate_fields().is_ok());
        assert!(user.with_key("-----BEGIN PUBLIC KEY-----").validate_fields().is_ok());
    }

    #[test]
    fn test_user_needs_role() {
        let user = User::new("alice", Role::default(), Labels::new()).with_key("k");
        assert!(user.validate_fields().is_err());
    }

    #[test]
    fn test_credentials_need_keys() {
        let mut creds = Credentials::new("switch-admin", Labels::new());
        assert!(creds.validate_fields().is_err());

        creds.add_key("password", "secret");
        assert!(creds.validate_fields().is_ok());

        creds.add_key(" ", "x");
        assert!(creds.validate_fields().is_err());
    }
}
