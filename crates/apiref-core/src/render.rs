//! Text rendering of snapshots and errors
//!
//! Thin presentation layer over [`ItemSnapshot`]; decisions are made by the
//! controller, these functions only format what it returns.

use crate::error::ApiRefError;
use crate::form::{EditForm, FormMode};
use crate::snapshot::ItemSnapshot;
use apiref_revision::{AttachmentOrigin, RevisionEntry};
use std::fmt::Write as _;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Item page: title and version of the current revision
#[must_use]
pub fn page_text(snapshot: &ItemSnapshot) -> String {
    let attachment = snapshot.attachment();
    let mut out = format!(
        "{}\nVersion: {}\n",
        attachment.title(),
        attachment.version()
    );
    match attachment.origin() {
        AttachmentOrigin::Uploaded {
            filename, format, ..
        } => {
            let _ = writeln!(out, "Source: {filename} ({format})");
        }
        AttachmentOrigin::Manual => out.push_str("Source: entered manually\n"),
    }
    out
}

/// Attachment list on the edit form, one `"<filename> (<version>)"` line per
/// retained uploaded revision
#[must_use]
pub fn edit_form_attachments(snapshot: &ItemSnapshot) -> Vec<String> {
    snapshot
        .uploaded_attachments()
        .map(|(filename, version)| format!("{filename} ({version})"))
        .collect()
}

/// Edit form as text: mode, fields and the item's attachment list
#[must_use]
pub fn edit_form_text(form: &EditForm, snapshot: Option<&ItemSnapshot>) -> String {
    let mut out = format!("Mode: {}\n", form.mode());
    match form.mode() {
        FormMode::Manual => {
            let _ = writeln!(out, "Title: {}", form.title());
            let _ = writeln!(out, "Version: {}", form.version());
        }
        FormMode::Upload => {
            let _ = writeln!(out, "File: {}", form.upload_filename().unwrap_or("(none)"));
        }
    }
    if let Some(snapshot) = snapshot {
        for line in edit_form_attachments(snapshot) {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

/// Revision table
///
/// Columns: current marker, sequence, timestamp, title, version, source.
#[must_use]
pub fn revision_table(snapshot: &ItemSnapshot) -> String {
    let header = ["", "#", "Date", "Title", "Version", "Source"];
    let rows: Vec<[String; 6]> = snapshot
        .revisions()
        .iter()
        .map(|entry| row(entry, entry.sequence() == snapshot.current_sequence()))
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &header, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

/// Validation message for a failed operation
#[inline]
#[must_use]
pub fn validation_message(error: &ApiRefError) -> String {
    error.user_message()
}

fn row(entry: &RevisionEntry, is_current: bool) -> [String; 6] {
    let attachment = entry.attachment();
    [
        if is_current { "*".to_string() } else { String::new() },
        entry.sequence().to_string(),
        entry.created_at().format(TIMESTAMP_FORMAT).to_string(),
        attachment.title().to_string(),
        attachment.version().to_string(),
        attachment.source_filename().unwrap_or("manual").to_string(),
    ]
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
