//! Scanner module - component discovery in a source tree
//!
//! This module provides functionality for:
//! - Walking the source tree in a deterministic order
//! - Skipping ignored and utility files
//! - Detecting exported UI components
//! - Inferring pixel sizes for files in the components subtree
//!
//! # Module Structure
//!
//! - `types` - `ComponentRecord`, `ExportKind`, `Size`
//! - `filter` - File name ignore filter
//! - `detect` - Export and UI-signal heuristics
//! - `sizing` - Size inference heuristics

mod detect;
mod filter;
mod sizing;
mod types;

pub use detect::{accepts_style_prop, exported_components, ui_signal, UiSignal};
pub use filter::IgnoreFilter;
pub use sizing::{infer_size, InferredSize, SizeSource};
pub use types::{ComponentRecord, ExportKind, Size};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{SyncConfig, SyncOptions};
use crate::error::StoryboardError;

/// Directories never descended into
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "build"];

/// Scan `root` for exported UI components.
///
/// Never fails: unreadable directories are skipped and unreadable files
/// produce a default record, both with a warning. Records come back in
/// sorted path order, one per component name.
#[instrument(level = "debug", skip(config, options), fields(root = %root.display()))]
pub fn scan(root: &Path, config: &SyncConfig, options: &SyncOptions) -> Vec<ComponentRecord> {
    let filter = IgnoreFilter::new(config, options);

    let files = collect_source_files(root, &config.extensions);

    let mut records: Vec<ComponentRecord> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if filter.is_ignored(file_name) {
            debug!(file = %file_name, "Ignored by name filter");
            continue;
        }

        let source_path = relative_path(root, &path);
        for record in scan_file(&path, &source_path, file_name, config) {
            if seen.insert(record.name.clone()) {
                records.push(record);
            } else {
                warn!(
                    component = %record.name,
                    path = %record.source_path,
                    "Duplicate component name, keeping the first one found"
                );
            }
        }
    }

    info!(count = records.len(), "Scanned components");
    records
}

/// Records for one file; a read failure degrades to a default record.
fn scan_file(path: &Path, source_path: &str, file_name: &str, config: &SyncConfig) -> Vec<ComponentRecord> {
    let in_components = components_cluster(source_path, &config.components_dir).is_some();
    let default_size = Size::new(config.layout.default_width, config.layout.default_height);

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let err = StoryboardError::SourceRead {
                path: source_path.to_string(),
                source,
            };
            err.log("Using default record for unreadable file");

            // `Button.stories.jsx` has no identifier to fall back to
            let stem = filter::file_stem(file_name);
            if !detect::is_component_name(stem) || stem.contains('.') {
                return Vec::new();
            }
            return vec![ComponentRecord {
                name: stem.to_string(),
                source_path: source_path.to_string(),
                export_kind: ExportKind::Default,
                accepts_style_prop: false,
                inferred_size: in_components.then_some(default_size),
            }];
        }
    };

    let components = exported_components(&content);
    if components.is_empty() {
        return Vec::new();
    }

    let accepts_style = accepts_style_prop(&content);
    let inferred = in_components.then(|| infer_size(file_name, &content, default_size));
    if let Some(inferred) = &inferred {
        debug!(
            path = %source_path,
            width = inferred.size.width,
            height = inferred.size.height,
            source = ?inferred.source,
            "Inferred component size"
        );
    }

    components
        .into_iter()
        .map(|(name, export_kind)| ComponentRecord {
            name,
            source_path: source_path.to_string(),
            export_kind,
            accepts_style_prop: accepts_style,
            inferred_size: inferred.map(|i| i.size),
        })
        .collect()
}

/// Collect files with a matching extension, in sorted depth-first order.
///
/// Hidden entries and `SKIPPED_DIRS` are pruned below the root; unreadable
/// entries are logged and skipped.
fn collect_source_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_entry(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    error = %e,
                    path = ?e.path().map(|p| p.display().to_string()),
                    "Failed to read source entry"
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_source_file(name, extensions) {
                files.push(entry.into_path());
            }
        }
    }
    files
}

fn is_skipped_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&&*name))
}

fn is_source_file(name: &str, extensions: &[String]) -> bool {
    if name.ends_with(".d.ts") {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// `/`-separated path of `path` below `root`
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Cluster of a source path inside the components subtree.
///
/// `None` outside the subtree, `Some("")` for files directly in it, and the
/// immediate subdirectory name for anything deeper.
pub fn components_cluster(source_path: &str, components_dir: &str) -> Option<String> {
    let segments: Vec<&str> = source_path.split('/').collect();
    let dirs = &segments[..segments.len().saturating_sub(1)];
    let idx = dirs.iter().position(|s| *s == components_dir)?;
    Some(dirs.get(idx + 1).map(|s| s.to_string()).unwrap_or_default())
}

#[cfg(test)]
#[path = "../scanner_tests.rs"]
mod tests;
