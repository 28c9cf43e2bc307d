//! File name ignore filter
//!
//! Built once per run from `SyncConfig` and `SyncOptions`; nothing here is
//! mutated after construction.

use glob::Pattern;
use std::path::Path;
use tracing::warn;

use crate::config::{SyncConfig, SyncOptions};

/// Decides which file names the scanner skips
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    ignore: Vec<Pattern>,
    utility: Vec<Pattern>,
    force_include: Vec<String>,
    include_utilities: bool,
}

impl IgnoreFilter {
    pub fn new(config: &SyncConfig, options: &SyncOptions) -> Self {
        Self {
            ignore: compile_patterns(&config.ignore_patterns),
            utility: compile_patterns(&config.utility_patterns),
            force_include: config.force_include.clone(),
            include_utilities: options.include_utilities,
        }
    }

    /// True when `file_name` should not be scanned.
    ///
    /// Force-include is checked last, so it wins over both lists.
    pub fn is_ignored(&self, file_name: &str) -> bool {
        let ignored = self.ignore.iter().any(|p| p.matches(file_name))
            || (!self.include_utilities && self.utility.iter().any(|p| p.matches(file_name)));

        ignored && !self.is_force_included(file_name)
    }

    fn is_force_included(&self, file_name: &str) -> bool {
        let stem = file_stem(file_name);
        self.force_include
            .iter()
            .any(|entry| entry == file_name || entry == stem)
    }
}

/// File name without its last extension: `Button.test.jsx` -> `Button.test`
pub(crate) fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|raw| match Pattern::new(raw) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(pattern = %raw, error = %e, "Skipping invalid ignore pattern");
                None
            }
        })
        .collect()
}
