// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration
//!
//! ```toml
//! namespace = "leadlock"
//! kind = "Serial"
//!
//! [locks.restart]
//! policy = "concurrent"
//! max_holders = 2
//! ```

use ll_core::{Concurrent, GrantPolicies, Permissive, Serial};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which default grant policy a coordinator applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorKind {
    /// Grants every request unless a lock says otherwise
    Base,
    /// One holder per lock, first come first served
    Serial,
}

impl CoordinatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            CoordinatorKind::Base => "Base",
            CoordinatorKind::Serial => "Serial",
        }
    }
}

/// Per-lock policy override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum LockPolicyConfig {
    Serial,
    Permissive,
    Concurrent { max_holders: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoordinatorConfig {
    /// Prefix for the key every store tier is read and written under
    pub namespace: String,
    pub kind: CoordinatorKind,
    /// Policy overrides by lock name
    pub locks: BTreeMap<String, LockPolicyConfig>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            namespace: "leadlock".to_string(),
            kind: CoordinatorKind::Serial,
            locks: BTreeMap::new(),
        }
    }
}

impl CoordinatorConfig {
    pub fn new(kind: CoordinatorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_lock(mut self, lock: impl Into<String>, policy: LockPolicyConfig) -> Self {
        self.locks.insert(lock.into(), policy);
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::Invalid("namespace must not be empty".to_string()));
        }
        for (lock, policy) in &self.locks {
            if let LockPolicyConfig::Concurrent { max_holders: 0 } = policy {
                return Err(ConfigError::Invalid(format!(
                    "lock {lock}: max_holders must be at least 1"
                )));
            }
        }
        Ok(())
    }

    /// Key shared by the leader blob, every peer row and the local fallback
    pub fn key(&self) -> String {
        format!("{}.{}", self.namespace, self.kind.name())
    }

    /// Build the policy registry this configuration describes
    pub fn policies(&self) -> GrantPolicies {
        let mut policies = match self.kind {
            CoordinatorKind::Base => GrantPolicies::permissive(),
            CoordinatorKind::Serial => GrantPolicies::serial(),
        };
        for (lock, policy) in &self.locks {
            match *policy {
                LockPolicyConfig::Serial => policies.set(lock.as_str(), Serial),
                LockPolicyConfig::Permissive => policies.set(lock.as_str(), Permissive),
                LockPolicyConfig::Concurrent { max_holders } => {
                    policies.set(lock.as_str(), Concurrent::new(max_holders))
                }
            }
        }
        policies
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
