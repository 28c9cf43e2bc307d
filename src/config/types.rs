//! Configuration type definitions
//!
//! `SyncConfig` holds everything that shapes a run and is passed by reference
//! into scan, merge and render. `SyncOptions` carries the CLI toggles.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

// ============================================
// SYNC CONFIG
// ============================================

/// Immutable settings for one storyboard sync run.
///
/// Every field has a default, so a JSON config file may override any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// Source tree to scan
    pub root_dir: PathBuf,
    /// Generated layout file
    pub output_path: PathBuf,
    /// Prefix prepended to scanned paths in import specifiers
    pub import_prefix: String,
    /// Directory name that marks the components subtree
    pub components_dir: String,
    /// Extensions (without dot) treated as source files
    pub extensions: Vec<String>,
    /// File name globs that are always skipped
    pub ignore_patterns: Vec<String>,
    /// File name globs skipped unless utilities are included
    pub utility_patterns: Vec<String>,
    /// File names or stems that bypass both ignore lists
    pub force_include: Vec<String>,
    pub layout: LayoutConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            import_prefix: DEFAULT_IMPORT_PREFIX.to_string(),
            components_dir: DEFAULT_COMPONENTS_DIR.to_string(),
            extensions: to_strings(DEFAULT_EXTENSIONS),
            ignore_patterns: to_strings(DEFAULT_IGNORE_PATTERNS),
            utility_patterns: to_strings(DEFAULT_UTILITY_PATTERNS),
            force_include: Vec::new(),
            layout: LayoutConfig::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================
// LAYOUT CONFIG
// ============================================

/// Canvas geometry used when placing new scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub default_width: i32,
    pub default_height: i32,
    /// Vertical offset of the side-by-side row
    pub row_top: i32,
    /// Left edge of the first scene in the row
    pub row_start_left: i32,
    /// Horizontal cursor increment per row scene
    pub row_spacing: i32,
    /// Top edge of every component cluster
    pub clusters_top: i32,
    /// Left edge of the first cluster
    pub clusters_start_left: i32,
    /// Minimum horizontal distance between successive clusters
    pub cluster_offset: i32,
    /// Grid column cap per cluster
    pub max_columns: usize,
    /// Gap between grid cells
    pub grid_gap: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            default_width: DEFAULT_SCENE_WIDTH,
            default_height: DEFAULT_SCENE_HEIGHT,
            row_top: DEFAULT_ROW_TOP,
            row_start_left: DEFAULT_ROW_START_LEFT,
            row_spacing: DEFAULT_ROW_SPACING,
            clusters_top: DEFAULT_CLUSTERS_TOP,
            clusters_start_left: DEFAULT_CLUSTERS_START_LEFT,
            cluster_offset: DEFAULT_CLUSTER_OFFSET,
            max_columns: DEFAULT_MAX_COLUMNS,
            grid_gap: DEFAULT_GRID_GAP,
        }
    }
}

// ============================================
// SYNC OPTIONS
// ============================================

/// Behavior toggles, normally set from CLI flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Scan files matched by the utility patterns too
    pub include_utilities: bool,
    /// Keep prior positions and sizes of scenes whose component still exists
    pub preserve: bool,
    /// Drop scenes whose component is gone from the scan
    pub prune: bool,
    /// Create scenes for components that lack one in an existing layout
    pub force_regenerate: bool,
    /// Print the document instead of writing it
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            include_utilities: false,
            preserve: true,
            prune: true,
            force_regenerate: true,
            dry_run: false,
        }
    }
}
