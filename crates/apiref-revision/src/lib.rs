//! apiref Revision History
//!
//! The state behind one API reference content item:
//!
//! - [`AttachmentRecord`]: title, version and provenance of one attachment
//! - [`DuplicationPolicy`] / [`accept`]: may a candidate reuse a recorded version?
//! - [`RevisionLog`]: ordered history with append, revert and delete
//!
//! # Example
//!
//! ```rust
//! use apiref_revision::{AttachmentRecord, DuplicationPolicy, PolicyConfig, RevisionLog};
//!
//! let mut log = RevisionLog::new();
//! let policy = DuplicationPolicy::new(PolicyConfig::default());
//!
//! log.try_append(AttachmentRecord::manual("Pets", "0.1").unwrap(), &policy).unwrap();
//! assert!(log.try_append(AttachmentRecord::manual("Pets", "0.1").unwrap(), &policy).is_err());
//! assert_eq!(log.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod log;
pub mod policy;
pub mod record;

pub use error::{RecordError, RevisionError};
pub use log::{RevisionEntry, RevisionLog, SequenceNumber};
pub use policy::{accept, DuplicationPolicy, PolicyConfig, PolicyDecision};
pub use record::{AttachmentOrigin, AttachmentRecord, SpecVersion};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
