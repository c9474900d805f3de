//! apiref Core
//!
//! Content items carrying a versioned OpenAPI attachment:
//! - Saves from the dual-mode edit form (manual entry or upload)
//! - Duplicate-version policy read from shared settings at decision time
//! - Revert and delete on the item's revision history
//! - Text rendering of item pages, attachment lists and revision tables
//!
//! # Example
//!
//! ```rust
//! use apiref_core::{AttachmentSource, ContentItemController, Settings};
//!
//! let controller = ContentItemController::in_memory(&Settings::default());
//! let item = controller
//!     .create(AttachmentSource::manual("Swagger Petstore", "1.0.0"))
//!     .unwrap();
//!
//! let rejected = controller.save(item.id(), AttachmentSource::manual("Swagger Petstore", "1.0.0"));
//! assert!(rejected.is_err());
//! assert_eq!(controller.view(item.id()).unwrap().revision_count(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod render;
pub mod snapshot;
pub mod store;

pub use config::{Settings, SettingsHandle};
pub use controller::ContentItemController;
pub use error::{ApiRefError, ApiRefResult, FormError, SettingsError, StoreError};
pub use form::{AttachmentSource, EditForm, FormMode};
pub use snapshot::ItemSnapshot;
pub use store::{ContentItem, ContentItemId, ContentStore, InMemoryStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with apiref Core
    pub use crate::{
        AttachmentSource, ContentItemController, ContentItemId, EditForm, FormMode, ItemSnapshot,
        Settings,
    };
    pub use apiref_revision::{SequenceNumber, SpecVersion};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use super::ApiRefError;

    #[test]
    fn manual_flow_with_policy_toggle() {
        let controller = ContentItemController::in_memory(&Settings::default());
        let item = controller
            .create(AttachmentSource::manual("Pets", "0.1"))
            .unwrap();

        let err = controller
            .save(item.id(), AttachmentSource::manual("Pets", "0.1"))
            .unwrap_err();
        assert!(matches!(err, ApiRefError::DuplicateVersion { .. }));

        controller.settings().set_allow_version_duplication(true);
        let snapshot = controller
            .save(item.id(), AttachmentSource::manual("Pets again", "0.1"))
            .unwrap();
        assert_eq!(snapshot.revision_count(), 2);
        assert_eq!(snapshot.title(), "Pets again");
    }

    #[test]
    fn blank_manual_version_is_invalid() {
        let controller = ContentItemController::in_memory(&Settings::default());
        let err = controller
            .create(AttachmentSource::manual("Pets", " "))
            .unwrap_err();
        assert!(matches!(err, ApiRefError::InvalidAttachment(_)));
        assert!(controller.items().unwrap().is_empty());
    }

    #[test]
    fn unknown_item() {
        let controller = ContentItemController::in_memory(&Settings::default());
        let err = controller.view(ContentItemId::new(42)).unwrap_err();
        assert!(matches!(err, ApiRefError::ItemNotFound(_)));
        assert!(err.is_not_found());
    }
}
