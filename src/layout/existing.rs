//! Reading a previously generated layout file
//!
//! The file may have been edited by hand, so it is read with a tag scanner
//! and regexes rather than a JavaScript parser. Every scene comes back as
//! `SceneComponent::Verbatim`; merge decides which ones to resolve.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use super::types::{ImportLine, LayoutDocument, Position, SceneComponent, SceneEntry};
use crate::error::{Result, ResultExt, StoryboardError};
use crate::scanner::Size;

const SCENE_OPEN: &str = "<Scene";
const SCENE_CLOSE: &str = "</Scene>";

/// Hand-edited geometry is clamped to this many pixels on every axis
const MAX_COORDINATE: f64 = 1_000_000.0;

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(.+?)\s+from\s+['"]([^'"]+)['"];?[ \t]*$"#)
        .expect("Invalid regex")
});
static SCENE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bid\s*=\s*\{?\s*(?:'([^']+)'|"([^"]+)")"#).expect("Invalid regex")
});
// 'text', "text", or a JS string literal in braces: {"Bob's \"best\""}
static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-label\s*=\s*(?:'([^']*)'|"([^"]*)"|\{\s*(?:'([^']*)'|("(?:[^"\\]|\\.)*"))\s*\})"#)
        .expect("Invalid regex")
});
// group 2 marks member tags like <React.Fragment>
static BODY_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][\w$]*)(\.[\w$.]*)?").expect("Invalid regex"));
static GEOMETRY: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    ["width", "height", "left", "top"].map(|field| {
        Regex::new(&format!(r"\b{}\s*:\s*(-?\d+(?:\.\d+)?)", field)).expect("Invalid regex")
    })
});

/// Load the layout at `path`.
///
/// Returns `None` when the file is absent, unreadable or malformed; the
/// caller then generates a fresh layout. Never panics on bad input.
pub fn load_existing_layout(path: &Path) -> Option<LayoutDocument> {
    if !path.exists() {
        info!(path = %path.display(), "No existing layout, generating a fresh one");
        return None;
    }

    let document = read_layout(path).warn_on_err()?;
    debug!(
        path = %path.display(),
        scenes = document.scenes.len(),
        imports = document.carried_imports.len(),
        "Loaded existing layout"
    );
    Some(document)
}

/// Read and parse a layout file, reporting why it could not be used.
pub fn read_layout(path: &Path) -> Result<LayoutDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| StoryboardError::LayoutRead {
        path: path.display().to_string(),
        source,
    })?;

    parse_layout(&text).map_err(|reason| StoryboardError::MalformedLayout {
        path: path.display().to_string(),
        reason,
    })
}

/// Parse layout text. The error is a human-readable reason.
pub fn parse_layout(text: &str) -> std::result::Result<LayoutDocument, String> {
    if !text.contains("<Storyboard") {
        return Err("no <Storyboard> element".to_string());
    }

    let mut scenes: Vec<SceneEntry> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut cursor = 0;

    while let Some(start) = find_scene_open(text, cursor) {
        let (scene, end) = parse_scene(text, start)?;
        cursor = end;

        if !seen_ids.insert(scene.scene_id.clone()) {
            warn!(scene_id = %scene.scene_id, "Duplicate scene id in layout, keeping the first");
            continue;
        }
        scenes.push(scene);
    }

    let closes = text.matches(SCENE_CLOSE).count();
    let opens = count_scene_opens(text);
    if closes != opens {
        return Err(format!(
            "unbalanced scene tags ({} opened, {} closed)",
            opens, closes
        ));
    }

    Ok(LayoutDocument {
        scenes,
        carried_imports: parse_imports(text),
    })
}

/// Next `<Scene` that is a tag of its own, not a prefix like `<SceneGroup`
fn find_scene_open(text: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    while let Some(found) = text[offset..].find(SCENE_OPEN) {
        let start = offset + found;
        let after = text[start + SCENE_OPEN.len()..].chars().next();
        if after.is_some_and(|c| c.is_whitespace() || c == '>' || c == '/') {
            return Some(start);
        }
        offset = start + SCENE_OPEN.len();
    }
    None
}

fn count_scene_opens(text: &str) -> usize {
    let mut count = 0;
    let mut cursor = 0;
    while let Some(start) = find_scene_open(text, cursor) {
        count += 1;
        cursor = start + SCENE_OPEN.len();
    }
    count
}

/// End of the opening tag that starts at `start`: index just past its `>`,
/// and whether it was self-closing. Braces and quotes are skipped over, so
/// `style={{ ... }}` and arrow functions inside attributes are safe.
fn find_tag_end(text: &str, start: usize) -> Option<(usize, bool)> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut quote: Option<u8> = None;
    let mut i = start + 1;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
        } else {
            match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => depth -= 1,
                b'>' if depth == 0 => {
                    let self_closing = i > 0 && bytes[i - 1] == b'/';
                    return Some((i + 1, self_closing));
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Parse one scene starting at `start`; returns the scene and the index
/// just past it.
fn parse_scene(text: &str, start: usize) -> std::result::Result<(SceneEntry, usize), String> {
    let (tag_end, self_closing) =
        find_tag_end(text, start).ok_or_else(|| "unterminated <Scene> tag".to_string())?;
    let attributes = &text[start..tag_end];

    let (body, end) = if self_closing {
        ("", tag_end)
    } else {
        let close = text[tag_end..]
            .find(SCENE_CLOSE)
            .map(|i| tag_end + i)
            .ok_or_else(|| "missing </Scene>".to_string())?;
        (&text[tag_end..close], close + SCENE_CLOSE.len())
    };

    if find_scene_open(body, 0).is_some() {
        return Err("nested <Scene> elements".to_string());
    }

    let scene_id = SCENE_ID
        .captures(attributes)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| "scene without an id".to_string())?;

    let mut geometry = [0i32; 4];
    for (slot, (re, field)) in geometry
        .iter_mut()
        .zip(GEOMETRY.iter().zip(["width", "height", "left", "top"]))
    {
        *slot = re
            .captures(attributes)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|v| v.round().clamp(-MAX_COORDINATE, MAX_COORDINATE) as i32)
            .ok_or_else(|| format!("scene '{}' has no {}", scene_id, field))?;
    }
    let [width, height, left, top] = geometry;
    let (width, height) = (width.max(0), height.max(0));

    let mut body_components: Vec<String> = Vec::new();
    for caps in BODY_COMPONENT.captures_iter(body) {
        if caps.get(2).is_some() {
            continue;
        }
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !body_components.iter().any(|n| n == name) {
                body_components.push(name.to_string());
            }
        }
    }

    let label = LABEL
        .captures(attributes)
        .and_then(|c| label_value(&c))
        .or_else(|| body_components.first().cloned())
        .unwrap_or_else(|| scene_id.clone());

    let scene = SceneEntry {
        scene_id,
        position: Position::new(left, top),
        size: Size::new(width, height),
        label,
        component: SceneComponent::Verbatim {
            body_components,
            source: text[start..end].to_string(),
        },
    };
    Ok((scene, end))
}

fn label_value(caps: &regex::Captures<'_>) -> Option<String> {
    if let Some(m) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) {
        return Some(m.as_str().to_string());
    }
    // double-quoted literal inside braces may carry escapes
    caps.get(4)
        .and_then(|m| serde_json::from_str::<String>(m.as_str()).ok())
}

/// Import statements keyed by the names they bind.
///
/// The framework header imports are regenerated on render and skipped here.
fn parse_imports(text: &str) -> Vec<ImportLine> {
    let mut imports = Vec::new();

    for caps in IMPORT.captures_iter(text) {
        let (Some(clause), Some(specifier), Some(whole)) = (caps.get(1), caps.get(2), caps.get(0))
        else {
            continue;
        };
        if matches!(specifier.as_str(), "react" | "utopia-api") {
            continue;
        }

        let line = whole.as_str().trim().to_string();
        for name in bound_names(clause.as_str()) {
            imports.push(ImportLine {
                name,
                line: line.clone(),
            });
        }
    }
    imports
}

/// Local names bound by an import clause: `A`, `{ B, C as D }`, `* as E`
fn bound_names(clause: &str) -> Vec<String> {
    let mut names = Vec::new();
    let (default_part, named_part) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => {
            (format!("{}{}", &clause[..open], &clause[close + 1..]), Some(&clause[open + 1..close]))
        }
        _ => (clause.to_string(), None),
    };

    for part in default_part.split(',') {
        let part = part.trim();
        let name = part.strip_prefix("* as ").unwrap_or(part).trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    if let Some(list) = named_part {
        for item in list.split(',') {
            let mut words = item.split_whitespace();
            let Some(first) = words.next() else {
                continue;
            };
            let name = match (words.next(), words.next()) {
                (Some("as"), Some(alias)) => alias,
                _ => first,
            };
            names.push(name.to_string());
        }
    }
    names
}
