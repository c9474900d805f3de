//! Duplicate-version policy
//!
//! Decides whether a candidate attachment may reuse a version string already
//! recorded on the same content item. The flag is passed in by the caller;
//! nothing here reads shared state.

use crate::log::{RevisionEntry, SequenceNumber};
use crate::record::SpecVersion;
use serde::{Deserialize, Serialize};

/// Policy settings, the `[policy]` section of the settings file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Let several revisions carry the same version
    pub allow_version_duplication: bool,
}

impl PolicyConfig {
    /// Config with duplication allowed or not
    #[inline]
    #[must_use]
    pub fn new(allow_version_duplication: bool) -> Self {
        Self {
            allow_version_duplication,
        }
    }
}

/// Accept or reject a candidate version
///
/// With `allow_duplication` false the candidate is accepted only when no
/// existing version equals it; with it true every candidate is accepted.
/// Comparison is exact string equality.
#[must_use]
pub fn accept<'a>(
    existing_versions: impl IntoIterator<Item = &'a SpecVersion>,
    candidate: &SpecVersion,
    allow_duplication: bool,
) -> bool {
    allow_duplication || existing_versions.into_iter().all(|v| v != candidate)
}

/// Outcome of evaluating a candidate against a history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Candidate may be appended
    Accept,
    /// Candidate duplicates an existing revision's version
    Reject {
        /// The duplicated version
        version: SpecVersion,
        /// Oldest retained revision holding that version
        duplicate_of: SequenceNumber,
    },
}

impl PolicyDecision {
    /// True for [`PolicyDecision::Accept`]
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Duplicate-version policy bound to one configuration snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicationPolicy {
    allow_duplication: bool,
}

impl DuplicationPolicy {
    /// Policy from a configuration snapshot
    #[inline]
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            allow_duplication: config.allow_version_duplication,
        }
    }

    /// Whether duplicates are allowed
    #[inline]
    #[must_use]
    pub fn allows_duplication(&self) -> bool {
        self.allow_duplication
    }

    /// Evaluate a candidate against recorded revisions
    #[must_use]
    pub fn evaluate<'a>(
        &self,
        recorded: impl IntoIterator<Item = &'a RevisionEntry>,
        candidate: &SpecVersion,
    ) -> PolicyDecision {
        if self.allow_duplication {
            return PolicyDecision::Accept;
        }
        match recorded
            .into_iter()
            .find(|entry| entry.attachment().version() == candidate)
        {
            Some(entry) => PolicyDecision::Reject {
                version: candidate.clone(),
                duplicate_of: entry.sequence(),
            },
            None => PolicyDecision::Accept,
        }
    }

    /// Name used in logs
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        if self.allow_duplication {
            "allow_duplicates"
        } else {
            "unique_versions"
        }
    }
}

impl From<PolicyConfig> for DuplicationPolicy {
    fn from(config: PolicyConfig) -> Self {
        Self::new(config)
    }
}
