//! One storyboard sync run: scan, load, merge, render, write.
//!
//! The whole document is rendered before anything touches the output file,
//! and the write itself goes through a temp file and a rename, so a failed
//! run never leaves a half-written layout behind.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::config::{SyncConfig, SyncOptions};
use crate::error::{Result, StoryboardError};
use crate::layout::{load_existing_layout, merge_with_report, render, MergeReport};
use crate::scanner::scan;

/// Summary of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Components found by the scan
    pub components: usize,
    /// Whether a previous layout was loaded
    pub had_existing: bool,
    pub merge: MergeReport,
    /// Scenes in the rendered document
    pub scenes: usize,
    pub output_path: PathBuf,
    /// False for dry runs
    pub written: bool,
    /// Whether the rendered text differs from what was on disk
    pub changed: bool,
}

/// Rendered document plus its report
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub text: String,
    pub report: SyncReport,
}

/// Compute the storyboard text without writing anything.
pub fn generate(config: &SyncConfig, options: &SyncOptions) -> SyncOutcome {
    let records = scan(&config.root_dir, config, options);
    let existing = load_existing_layout(&config.output_path);
    let (document, merge_report) = merge_with_report(&records, existing.as_ref(), config, options);
    let text = render(&document, config);

    let changed = std::fs::read_to_string(&config.output_path)
        .map(|old| old != text)
        .unwrap_or(true);

    SyncOutcome {
        report: SyncReport {
            components: records.len(),
            had_existing: existing.is_some(),
            merge: merge_report,
            scenes: document.scenes.len(),
            output_path: config.output_path.clone(),
            written: false,
            changed,
        },
        text,
    }
}

/// Generate and, unless this is a dry run, write the storyboard.
#[instrument(name = "sync", skip_all, fields(root = %config.root_dir.display()))]
pub fn run_sync(config: &SyncConfig, options: &SyncOptions) -> Result<SyncOutcome> {
    let mut outcome = generate(config, options);

    if !options.dry_run {
        write_atomic(&config.output_path, &outcome.text)?;
        outcome.report.written = true;
    }

    let report = &outcome.report;
    info!(
        output = %report.output_path.display(),
        components = report.components,
        scenes = report.scenes,
        kept = report.merge.kept,
        created = report.merge.created,
        pruned = report.merge.pruned,
        verbatim = report.merge.verbatim,
        changed = report.changed,
        written = report.written,
        "Storyboard sync finished"
    );
    Ok(outcome)
}

/// Write `contents` to `path` through a sibling temp file and a rename.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| StoryboardError::OutputWrite {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let extension = path
        .extension()
        .map(|ext| format!("{}.tmp", ext.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    let tmp_path = path.with_extension(extension);

    std::fs::write(&tmp_path, contents).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
