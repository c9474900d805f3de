//! apiref operator CLI
//!
//! - `apiref inspect <FILE>...` prints the metadata the extractor finds in
//!   each document
//! - `apiref replay <FILE>...` uploads the files in order into one new
//!   content item and prints the resulting page, form and history

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod logging;

use anyhow::Context;
use apiref_core::render::{edit_form_text, page_text, revision_table, validation_message};
use apiref_core::{AttachmentSource, ContentItemController, ContentItemId, Settings};
use apiref_parser::{read_upload, ExtractedMetadata, VersionExtractor};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of one command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Files processed without error
    pub succeeded: usize,
    /// Files that failed (inspect) or were rejected (replay)
    pub failures: usize,
}

/// Command-line definition
#[must_use]
pub fn command() -> Command {
    let files = Arg::new("files")
        .value_name("FILE")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("OpenAPI / Swagger documents (.yaml, .yml, .json)");
    let config = Arg::new("config")
        .long("config")
        .value_name("TOML")
        .value_parser(value_parser!(PathBuf))
        .help("Settings file");

    Command::new("apiref")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Versioned OpenAPI attachments for content items")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print format, title, version and checksum of documents")
                .arg(files.clone())
                .arg(config.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output one JSON object per file"),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Upload documents in order into one new content item")
                .arg(files)
                .arg(config)
                .arg(
                    Arg::new("allow-duplication")
                        .long("allow-duplication")
                        .action(ArgAction::SetTrue)
                        .help("Accept uploads that repeat a recorded version"),
                ),
        )
}

/// Run the selected subcommand, writing results to `out`
///
/// # Errors
/// Fails on unreadable settings or output errors; per-file problems are
/// reported in `out` and counted in the [`Report`]
pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> anyhow::Result<Report> {
    match matches.subcommand() {
        Some(("inspect", args)) => {
            let settings = load_settings(args)?;
            inspect(&settings, &files(args), args.get_flag("json"), out)
        }
        Some(("replay", args)) => {
            let mut settings = load_settings(args)?;
            if args.get_flag("allow-duplication") {
                settings = settings.with_allow_version_duplication(true);
            }
            replay(&settings, &files(args), out)
        }
        _ => anyhow::bail!("no subcommand given"),
    }
}

/// Extract metadata from each file
///
/// # Errors
/// Fails only if writing to `out` fails
pub fn inspect(
    settings: &Settings,
    paths: &[PathBuf],
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Report> {
    let extractor = VersionExtractor::new(settings.parser.clone());
    let mut report = Report::default();

    for path in paths {
        match extractor.extract_file(path) {
            Ok((_, metadata)) => {
                report.succeeded += 1;
                if json {
                    let line = serde_json::json!({ "file": path, "metadata": metadata });
                    writeln!(out, "{line}")?;
                } else {
                    writeln!(out, "{}", describe(path, &metadata))?;
                }
            }
            Err(err) => {
                report.failures += 1;
                tracing::debug!(file = %path.display(), error = %err, "inspect failed");
                if json {
                    let line = serde_json::json!({ "file": path, "error": err.to_string() });
                    writeln!(out, "{line}")?;
                } else {
                    writeln!(out, "{}: error: {err}", path.display())?;
                }
            }
        }
    }
    Ok(report)
}

/// Upload each file in order into one new content item
///
/// The first accepted file creates the item. Rejected files print their
/// validation message and the replay continues.
///
/// # Errors
/// Fails on storage errors or if writing to `out` fails
pub fn replay(settings: &Settings, paths: &[PathBuf], out: &mut dyn Write) -> anyhow::Result<Report> {
    let controller = ContentItemController::in_memory(settings);
    let mut item: Option<ContentItemId> = None;
    let mut report = Report::default();

    for path in paths {
        let result = read_upload(path)
            .map_err(apiref_core::ApiRefError::from)
            .and_then(|upload| {
                let source = AttachmentSource::from(upload);
                match item {
                    Some(id) => controller.save(id, source),
                    None => controller.create(source),
                }
            });

        match result {
            Ok(snapshot) => {
                report.succeeded += 1;
                item = Some(snapshot.id());
                writeln!(
                    out,
                    "accepted {}: revision {} ({} {})",
                    path.display(),
                    snapshot.current_sequence(),
                    snapshot.title(),
                    snapshot.version()
                )?;
            }
            Err(err) if err.is_retryable() => {
                report.failures += 1;
                tracing::warn!(file = %path.display(), error = %err, "upload not readable");
                writeln!(out, "skipped {}: {err}", path.display())?;
            }
            Err(err) if err.is_user_facing() => {
                report.failures += 1;
                writeln!(out, "rejected {}: {}", path.display(), validation_message(&err))?;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("replaying {}", path.display()));
            }
        }
    }

    let Some(id) = item else {
        writeln!(out, "\nno upload was accepted")?;
        return Ok(report);
    };

    let snapshot = controller.view(id)?;
    let form = controller.edit_form(id)?;
    writeln!(out, "\n== Page ==\n{}", page_text(&snapshot))?;
    writeln!(out, "== Edit form ==\n{}", edit_form_text(&form, Some(&snapshot)))?;
    write!(out, "== Revisions ==\n{}", revision_table(&snapshot))?;
    Ok(report)
}

fn describe(path: &Path, metadata: &ExtractedMetadata) -> String {
    format!(
        "{}: {}, \"{}\" version {}, {} paths, checksum {}",
        path.display(),
        metadata.format,
        metadata.title,
        metadata.version,
        metadata.path_count,
        metadata.checksum.short()
    )
}

fn files(args: &ArgMatches) -> Vec<PathBuf> {
    args.get_many::<PathBuf>("files")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn load_settings(args: &ArgMatches) -> anyhow::Result<Settings> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}
