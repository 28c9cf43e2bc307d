//! Configuration module - run settings and CLI toggles
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - `SyncConfig`, `LayoutConfig`, `SyncOptions`
//! - `loader` - Optional JSON config file loading

mod defaults;
mod loader;
mod types;

pub use types::{LayoutConfig, SyncConfig, SyncOptions};

pub use loader::{load_config, read_config};

#[cfg(test)]
pub use defaults::{
    DEFAULT_IGNORE_PATTERNS, DEFAULT_MAX_COLUMNS, DEFAULT_OUTPUT_PATH, DEFAULT_ROW_SPACING,
    DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, DEFAULT_UTILITY_PATTERNS,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
