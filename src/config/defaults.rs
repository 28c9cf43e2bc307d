//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Default source tree and output file, relative to the working directory
pub const DEFAULT_ROOT_DIR: &str = "src";
pub const DEFAULT_OUTPUT_PATH: &str = "utopia/storyboard.js";

/// Import specifier prefix for generated imports (`/src/components/Button.jsx`)
pub const DEFAULT_IMPORT_PREFIX: &str = "/src";

/// Directory name whose subtree gets size inference and grid clustering
pub const DEFAULT_COMPONENTS_DIR: &str = "components";

/// Extensions considered source files
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// File name globs that are never scanned unless force-included
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "*.test.*",
    "*.spec.*",
    "*.stories.*",
    "setupTests.*",
    "reportWebVitals.*",
    "serviceWorker.*",
];

/// File name globs skipped unless utilities are included
pub const DEFAULT_UTILITY_PATTERNS: &[&str] = &[
    "index.*",
    "*util*",
    "*Util*",
    "*helper*",
    "*Helper*",
    "*constants*",
    "*config*",
    "*Context.*",
    "use[A-Z]*",
];

/// Fallback scene size when nothing better is known
pub const DEFAULT_SCENE_WIDTH: i32 = 700;
pub const DEFAULT_SCENE_HEIGHT: i32 = 700;

/// Side-by-side row for scenes outside the components subtree
pub const DEFAULT_ROW_TOP: i32 = 128;
pub const DEFAULT_ROW_START_LEFT: i32 = 212;
pub const DEFAULT_ROW_SPACING: i32 = 800;

/// Grid clusters for scenes inside the components subtree
pub const DEFAULT_CLUSTERS_TOP: i32 = 1000;
pub const DEFAULT_CLUSTERS_START_LEFT: i32 = 212;
pub const DEFAULT_CLUSTER_OFFSET: i32 = 1600;
pub const DEFAULT_MAX_COLUMNS: usize = 3;
pub const DEFAULT_GRID_GAP: i32 = 60;
