//! Attachment edit form
//!
//! The form has two modes. In `manual` the editor types a title and version;
//! in `upload` they come from the attached document. Switching modes keeps
//! what was typed or attached in the other mode, but only the selected mode
//! is submitted.

use crate::error::FormError;
use apiref_artifact::types::UploadContent;
use apiref_revision::AttachmentRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a save's title and version come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Typed in by the editor
    Manual {
        /// Title field
        title: String,
        /// Version field
        version: String,
    },
    /// Extracted from an uploaded document
    Uploaded {
        /// Name of the uploaded file
        filename: String,
        /// File contents
        bytes: Vec<u8>,
    },
}

impl AttachmentSource {
    /// Manual title and version
    #[must_use]
    pub fn manual(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Manual {
            title: title.into(),
            version: version.into(),
        }
    }

    /// Uploaded file
    #[must_use]
    pub fn upload(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Uploaded {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Mode this source corresponds to
    #[inline]
    #[must_use]
    pub fn mode(&self) -> FormMode {
        match self {
            Self::Manual { .. } => FormMode::Manual,
            Self::Uploaded { .. } => FormMode::Upload,
        }
    }
}

impl From<UploadContent> for AttachmentSource {
    fn from(upload: UploadContent) -> Self {
        Self::upload(upload.filename(), upload.bytes())
    }
}

/// Form mode selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// Title and version fields
    Manual,
    /// File upload
    #[default]
    Upload,
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual",
            Self::Upload => "upload",
        })
    }
}

impl FromStr for FormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "upload" => Ok(Self::Upload),
            other => Err(format!("unknown form mode '{other}'")),
        }
    }
}

/// State of the edit form between interactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    mode: FormMode,
    title: String,
    version: String,
    upload: Option<(String, Vec<u8>)>,
}

impl EditForm {
    /// Blank form for a new item, in upload mode
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form for an existing item, prefilled from its current attachment
    ///
    /// Opens in the mode the attachment was created with.
    #[must_use]
    pub fn prefilled(current: &AttachmentRecord) -> Self {
        Self {
            mode: if current.is_manual() {
                FormMode::Manual
            } else {
                FormMode::Upload
            },
            title: current.title().to_string(),
            version: current.version().to_string(),
            upload: None,
        }
    }

    /// Selected mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Select a mode, keeping the other mode's values
    pub fn switch_mode(&mut self, mode: FormMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Set the manual title
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Set the manual version
    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    /// Attach a file, replacing any previous one
    pub fn attach(&mut self, filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.upload = Some((filename.into(), bytes.into()));
        self
    }

    /// Remove the attached file
    pub fn clear_upload(&mut self) -> &mut Self {
        self.upload = None;
        self
    }

    /// Manual title field
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Manual version field
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Name of the attached file
    #[must_use]
    pub fn upload_filename(&self) -> Option<&str> {
        self.upload.as_ref().map(|(name, _)| name.as_str())
    }

    /// Submit the selected mode
    ///
    /// # Errors
    /// - [`FormError::MissingField`] for a blank title or version in manual mode
    /// - [`FormError::MissingUpload`] in upload mode without a file
    pub fn into_source(self) -> Result<AttachmentSource, FormError> {
        match self.mode {
            FormMode::Manual => {
                if self.title.trim().is_empty() {
                    return Err(FormError::MissingField { field: "title" });
                }
                if self.version.trim().is_empty() {
                    return Err(FormError::MissingField { field: "version" });
                }
                Ok(AttachmentSource::Manual {
                    title: self.title,
                    version: self.version,
                })
            }
            FormMode::Upload => self
                .upload
                .map(|(filename, bytes)| AttachmentSource::Uploaded { filename, bytes })
                .ok_or(FormError::MissingUpload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_defaults_to_upload() {
        let form = EditForm::new();
        assert_eq!(form.mode(), FormMode::Upload);
        assert_eq!(form.into_source(), Err(FormError::MissingUpload));
    }

    #[test]
    fn switching_keeps_values_but_submits_selected_mode() {
        let mut form = EditForm::new();
        form.attach("petstore-openapi.yaml", b"openapi: 3.0.0".to_vec())
            .switch_mode(FormMode::Manual)
            .set_title("Pets")
            .set_version("0.1");
        assert_eq!(form.upload_filename(), Some("petstore-openapi.yaml"));
        assert_eq!(
            form.clone().into_source().unwrap(),
            AttachmentSource::manual("Pets", "0.1")
        );

        form.switch_mode(FormMode::Upload);
        assert_eq!(form.title(), "Pets");
        assert_eq!(form.into_source().unwrap().mode(), FormMode::Upload);
    }

    #[test]
    fn manual_mode_requires_both_fields() {
        let mut form = EditForm::new();
        form.switch_mode(FormMode::Manual).set_title("Pets");
        assert_eq!(
            form.clone().into_source(),
            Err(FormError::MissingField { field: "version" })
        );
        form.set_title("  ").set_version("1");
        assert_eq!(
            form.into_source(),
            Err(FormError::MissingField { field: "title" })
        );
    }

    #[test]
    fn prefilled_from_manual_record() {
        let record = AttachmentRecord::manual("Pets", "0.1").unwrap();
        let form = EditForm::prefilled(&record);
        assert_eq!(form.mode(), FormMode::Manual);
        assert_eq!(form.title(), "Pets");
        assert_eq!(form.version(), "0.1");
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Manual".parse::<FormMode>(), Ok(FormMode::Manual));
        assert!("ajax".parse::<FormMode>().is_err());
        assert_eq!(FormMode::Upload.to_string(), "upload");
    }
}
