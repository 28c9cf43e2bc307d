//! Component record type definitions

use serde::{Deserialize, Serialize};

/// Width and height in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// How a component is exported from its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Named,
    Default,
}

/// An exported UI component found during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Exported identifier (always capitalized)
    pub name: String,
    /// Path relative to the scan root, `/`-separated
    pub source_path: String,
    pub export_kind: ExportKind,
    /// Whether the component reads a `style` prop
    pub accepts_style_prop: bool,
    /// Inferred canvas size; only set inside the components subtree
    pub inferred_size: Option<Size>,
}

impl ComponentRecord {
    /// Size to give a new scene for this component
    pub fn scene_size(&self, fallback: Size) -> Size {
        self.inferred_size.unwrap_or(fallback)
    }
}
