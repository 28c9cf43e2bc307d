//! Layout module - storyboard documents
//!
//! This module provides functionality for:
//! - Reading a previously generated storyboard file
//! - Merging it with a fresh scan (preserve, prune, regenerate)
//! - Placing new scenes without overlap
//! - Rendering the document back to text
//!
//! # Module Structure
//!
//! - `types` - `LayoutDocument`, `SceneEntry`, geometry
//! - `existing` - Parsing a previous layout file
//! - `placement` - Row and cluster-grid placement
//! - `merge` - Combining scan results with a previous layout
//! - `render` - Text output

mod existing;
mod merge;
mod placement;
mod render;
mod types;

pub use existing::{load_existing_layout, parse_layout, read_layout};
pub use merge::{merge, merge_with_report, MergeReport};
pub use placement::Placer;
pub use render::{import_lines, import_statement, render};
pub use types::{
    scene_id_for, ImportLine, LayoutDocument, Position, Rect, SceneComponent, SceneEntry,
};
