//! Layout document type definitions

use crate::scanner::{ComponentRecord, Size};

/// Top-left corner of a scene on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

impl Position {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

/// Axis-aligned bounding box of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            left: position.left,
            top: position.top,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Touching edges do not count as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// What a scene shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneComponent {
    /// A component from the current scan
    Resolved(ComponentRecord),
    /// A scene as read from a previous layout, emitted unchanged.
    ///
    /// `body_components` lists the capitalized, undotted tags of the scene
    /// body in order of appearance, without repeats.
    Verbatim {
        body_components: Vec<String>,
        source: String,
    },
}

impl SceneComponent {
    /// The component a scene shows, when that is clear without a scan:
    /// a resolved record, or a verbatim body with exactly one component tag.
    pub fn component_name(&self) -> Option<&str> {
        match self {
            Self::Resolved(record) => Some(record.name.as_str()),
            Self::Verbatim { body_components, .. } => match body_components.as_slice() {
                [only] => Some(only.as_str()),
                _ => None,
            },
        }
    }

    /// Every component name the scene references
    pub fn referenced_names(&self) -> &[String] {
        match self {
            Self::Resolved(record) => std::slice::from_ref(&record.name),
            Self::Verbatim { body_components, .. } => body_components.as_slice(),
        }
    }

    /// The component this scene belongs to, given which names were scanned.
    ///
    /// The first body tag found by the scan wins, so `<Provider><Button /></Provider>`
    /// resolves to `Button`. With no scanned tag, only a single-tag body is
    /// identified; anything else is unidentifiable.
    pub fn identify(&self, in_scan: impl Fn(&str) -> bool) -> Option<&str> {
        self.referenced_names()
            .iter()
            .map(String::as_str)
            .find(|name| in_scan(name))
            .or_else(|| self.component_name())
    }

    /// Verbatim body wrapping its component in other components
    pub fn is_wrapped(&self) -> bool {
        self.referenced_names().len() > 1
    }
}

/// One positioned, sized placement of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEntry {
    pub scene_id: String,
    pub position: Position,
    pub size: Size,
    pub label: String,
    pub component: SceneComponent,
}

impl SceneEntry {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

/// An import statement recovered from a previous layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    /// Local name the statement binds
    pub name: String,
    /// Statement text, trimmed
    pub line: String,
}

/// Ordered scenes plus the imports that verbatim scenes still need
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDocument {
    pub scenes: Vec<SceneEntry>,
    pub carried_imports: Vec<ImportLine>,
}

impl LayoutDocument {
    pub fn scene(&self, scene_id: &str) -> Option<&SceneEntry> {
        self.scenes.iter().find(|s| s.scene_id == scene_id)
    }

    /// Scenes that show `component`
    pub fn scenes_for<'a>(&'a self, component: &'a str) -> impl Iterator<Item = &'a SceneEntry> + 'a {
        self.scenes
            .iter()
            .filter(move |s| s.component.component_name() == Some(component))
    }
}

/// Scene id for a component name: `PrimaryButton` becomes `primary-button-scene`
pub fn scene_id_for(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut id = String::with_capacity(name.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_is_lower) {
                id.push('-');
            }
        }
        if c == '_' || c == '$' {
            id.push('-');
        } else {
            id.push(c.to_ascii_lowercase());
        }
    }

    id.push_str("-scene");
    id
}
