//! Settings
//!
//! [`Settings`] is read once at startup from TOML. The policy section is then
//! shared through a [`SettingsHandle`] so an administrator can flip version
//! duplication while controllers keep running; every save reads the value
//! committed at that moment.

use crate::error::SettingsError;
use apiref_parser::ParserSettings;
use apiref_revision::PolicyConfig;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Process settings
///
/// ```toml
/// [policy]
/// allow_version_duplication = false
///
/// [parser]
/// max_document_bytes = 4194304
/// cache_capacity = 256
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Duplicate-version policy
    pub policy: PolicyConfig,
    /// Upload limits and cache size
    pub parser: ParserSettings,
}

impl Settings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] on malformed TOML or mistyped values
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file
    ///
    /// # Errors
    /// Returns [`SettingsError::Read`] if the file cannot be read, otherwise
    /// as [`Self::from_toml_str`]
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Encode as TOML
    ///
    /// # Errors
    /// Returns [`SettingsError::Encode`] if encoding fails
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }

    /// With version duplication allowed or not
    #[inline]
    #[must_use]
    pub fn with_allow_version_duplication(mut self, allow: bool) -> Self {
        self.policy.allow_version_duplication = allow;
        self
    }

    /// With upload size limit
    #[inline]
    #[must_use]
    pub fn with_max_document_bytes(mut self, bytes: usize) -> Self {
        self.parser.max_document_bytes = bytes;
        self
    }

    /// With parse cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.parser.cache_capacity = capacity;
        self
    }
}

/// Shared, mutable policy settings
///
/// Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    policy: Arc<RwLock<PolicyConfig>>,
}

impl SettingsHandle {
    /// Handle holding `policy`
    #[must_use]
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy: Arc::new(RwLock::new(policy)),
        }
    }

    /// Latest committed policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> PolicyConfig {
        *self.policy.read()
    }

    /// Administrative action: allow or forbid duplicate versions
    pub fn set_allow_version_duplication(&self, allow: bool) {
        let mut policy = self.policy.write();
        if policy.allow_version_duplication != allow {
            tracing::info!(allow_version_duplication = allow, "policy changed");
        }
        policy.allow_version_duplication = allow;
    }
}

impl From<&Settings> for SettingsHandle {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.policy)
    }
}
