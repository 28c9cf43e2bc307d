//! Pixel size inference for components
//!
//! A best-effort heuristic chain, tried in this order:
//!
//! 1. inline style literals (`width`, `maxWidth`, `height`, `minHeight`)
//! 2. keywords in the file name (`PrimaryButton.jsx` is a button)
//! 3. the root markup tag returned by the component (`<nav`, `<form`)
//! 4. structure: JSX nesting depth and dominant flex direction
//! 5. the configured default size
//!
//! An inline literal only settles its own dimension; the other one still
//! comes from the first later step that yields a size.

use regex::Regex;
use std::sync::LazyLock;

use super::types::Size;

/// Pixels per rem/em
const REM_PX: f64 = 16.0;
/// Percentages cannot be resolved without a parent, so they map to fixed sizes
const PERCENT_WIDTH_PX: i32 = 800;
const PERCENT_HEIGHT_PX: i32 = 600;
const MIN_DIMENSION: i32 = 16;
const MAX_DIMENSION: i32 = 4000;

/// File name keywords, first match wins
const NAME_KEYWORDS: &[(&[&str], Size)] = &[
    (&["button", "btn"], Size::new(120, 40)),
    (&["icon", "avatar"], Size::new(48, 48)),
    (&["input", "field", "textbox"], Size::new(300, 40)),
    (&["card"], Size::new(320, 400)),
    (&["navbar", "nav", "header", "toolbar"], Size::new(1200, 80)),
    (&["footer"], Size::new(1200, 120)),
    (&["sidebar", "drawer"], Size::new(280, 800)),
    (&["modal", "dialog", "popup"], Size::new(500, 400)),
    (&["form"], Size::new(400, 500)),
    (&["list", "table"], Size::new(400, 600)),
    (&["hero", "banner"], Size::new(1200, 500)),
    (&["grid", "gallery"], Size::new(1000, 800)),
];

/// Root markup tags
const ROOT_TAGS: &[(&[&str], Size)] = &[
    (&["button", "a"], Size::new(120, 40)),
    (&["img", "svg"], Size::new(48, 48)),
    (&["input", "select", "textarea"], Size::new(300, 40)),
    (&["nav", "header"], Size::new(1200, 80)),
    (&["footer"], Size::new(1200, 120)),
    (&["aside"], Size::new(280, 800)),
    (&["dialog"], Size::new(500, 400)),
    (&["form"], Size::new(400, 500)),
    (&["ul", "ol", "table"], Size::new(400, 600)),
];

static WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[^\w\-])width\s*[:=]\s*\{?\s*['"]?(\d+(?:\.\d+)?)\s*(px|r?em|%)?"#)
        .expect("Invalid regex")
});
static MAX_WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:maxWidth|max-width)\s*[:=]\s*\{?\s*['"]?(\d+(?:\.\d+)?)\s*(px|r?em|%)?"#)
        .expect("Invalid regex")
});
static HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[^\w\-])height\s*[:=]\s*\{?\s*['"]?(\d+(?:\.\d+)?)\s*(px|r?em|%)?"#)
        .expect("Invalid regex")
});
static MIN_HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:minHeight|min-height)\s*[:=]\s*\{?\s*['"]?(\d+(?:\.\d+)?)\s*(px|r?em|%)?"#)
        .expect("Invalid regex")
});
static ROOT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:=>|\breturn)\s*\(?\s*<([a-z][\w\-]*)").expect("Invalid regex")
});
static JSX_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][\w.]*)[^<>]*?(/?)>").expect("Invalid regex"));
static FLEX_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"flexDirection\s*:\s*['"]row|flex-direction\s*:\s*row|\bflex-row\b"#)
        .expect("Invalid regex")
});
static FLEX_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"flexDirection\s*:\s*['"]column|flex-direction\s*:\s*column|\bflex-col\b"#)
        .expect("Invalid regex")
});

/// Which step of the chain produced a size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    InlineStyle,
    FileName,
    RootTag,
    Structure,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredSize {
    pub size: Size,
    /// Step that settled the width (inline literals may settle only one axis)
    pub source: SizeSource,
}

/// Run the heuristic chain for one component file.
pub fn infer_size(file_name: &str, content: &str, default: Size) -> InferredSize {
    let inline_width = first_dimension(&WIDTH, content, PERCENT_WIDTH_PX)
        .or_else(|| first_dimension(&MAX_WIDTH, content, PERCENT_WIDTH_PX));
    let inline_height = first_dimension(&HEIGHT, content, PERCENT_HEIGHT_PX)
        .or_else(|| first_dimension(&MIN_HEIGHT, content, PERCENT_HEIGHT_PX));

    if let (Some(width), Some(height)) = (inline_width, inline_height) {
        return InferredSize {
            size: Size::new(width, height),
            source: SizeSource::InlineStyle,
        };
    }

    let fallback = fallback_size(file_name, content, default);
    match (inline_width, inline_height) {
        (Some(width), None) => InferredSize {
            size: Size::new(width, fallback.size.height),
            source: SizeSource::InlineStyle,
        },
        (None, Some(height)) => InferredSize {
            size: Size::new(fallback.size.width, height),
            source: fallback.source,
        },
        _ => fallback,
    }
}

/// Steps 2 through 5
fn fallback_size(file_name: &str, content: &str, default: Size) -> InferredSize {
    if let Some(size) = size_from_name(file_name) {
        return InferredSize {
            size,
            source: SizeSource::FileName,
        };
    }
    if let Some(size) = size_from_root_tag(content) {
        return InferredSize {
            size,
            source: SizeSource::RootTag,
        };
    }
    if let Some(size) = size_from_structure(content) {
        return InferredSize {
            size,
            source: SizeSource::Structure,
        };
    }
    InferredSize {
        size: default,
        source: SizeSource::Default,
    }
}

fn first_dimension(re: &Regex, content: &str, percent_px: i32) -> Option<i32> {
    re.captures_iter(content).find_map(|caps| {
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let px = match caps.get(2).map(|m| m.as_str()) {
            Some("rem") | Some("em") => (value * REM_PX).round() as i32,
            Some("%") => percent_px,
            _ => value.round() as i32,
        };
        // 0 and 1px hairlines say nothing about the component
        (px >= MIN_DIMENSION).then(|| px.min(MAX_DIMENSION))
    })
}

fn size_from_name(file_name: &str) -> Option<Size> {
    let stem = file_name.split('.').next().unwrap_or(file_name).to_lowercase();
    NAME_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| stem.contains(k)))
        .map(|(_, size)| *size)
}

fn size_from_root_tag(content: &str) -> Option<Size> {
    let tag = ROOT_TAG.captures(content)?.get(1)?.as_str();
    ROOT_TAGS
        .iter()
        .find(|(tags, _)| tags.contains(&tag))
        .map(|(_, size)| *size)
}

/// Deepest JSX nesting level
pub fn jsx_depth(content: &str) -> usize {
    let mut depth: usize = 0;
    let mut max_depth: usize = 0;

    for caps in JSX_TAG.captures_iter(content) {
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        if closing {
            depth = depth.saturating_sub(1);
        } else if self_closing {
            max_depth = max_depth.max(depth + 1);
        } else {
            depth += 1;
            max_depth = max_depth.max(depth);
        }
    }
    max_depth
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Flex direction mentioned most often, ties go to row
pub fn dominant_flex_direction(content: &str) -> Option<FlexDirection> {
    let rows = FLEX_ROW.find_iter(content).count();
    let columns = FLEX_COLUMN.find_iter(content).count();
    match (rows, columns) {
        (0, 0) => None,
        (r, c) if c > r => Some(FlexDirection::Column),
        _ => Some(FlexDirection::Row),
    }
}

fn size_from_structure(content: &str) -> Option<Size> {
    let depth = jsx_depth(content) as i32;
    match dominant_flex_direction(content) {
        Some(FlexDirection::Row) => Some(Size::new(900, (120 + 60 * depth).clamp(120, 600))),
        Some(FlexDirection::Column) => Some(Size::new(400, (200 + 100 * depth).clamp(200, 900))),
        None if depth >= 2 => Some(Size::new(600, (150 + 100 * depth).clamp(200, 800))),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Size = Size::new(700, 700);

    #[test]
    fn test_inline_px_both_axes() {
        let src = "const style = { width: 240, height: '180px' };\nexport const Tile = () => <div style={style} />;";
        let inferred = infer_size("Tile.jsx", src, DEFAULT);
        assert_eq!(inferred.size, Size::new(240, 180));
        assert_eq!(inferred.source, SizeSource::InlineStyle);
    }

    #[test]
    fn test_inline_rem_and_percent() {
        let src = "<div style={{ maxWidth: '20rem', height: '50%' }} />";
        let inferred = infer_size("Thing.jsx", src, DEFAULT);
        assert_eq!(inferred.size, Size::new(320, PERCENT_HEIGHT_PX));
    }

    #[test]
    fn test_explicit_width_beats_max_width() {
        let src = "<div style={{ maxWidth: 900, width: 300, minHeight: 200 }} />";
        assert_eq!(infer_size("X.jsx", src, DEFAULT).size, Size::new(300, 200));
    }

    #[test]
    fn test_max_width_alone_is_not_width() {
        let src = "<div style={{ maxWidth: 500 }} />";
        // only the width is settled, height falls through to the default
        assert_eq!(infer_size("Wrapper.jsx", src, DEFAULT).size, Size::new(500, 700));
    }

    #[test]
    fn test_line_height_is_not_height() {
        let src = "<p style={{ lineHeight: 24 }}>text</p>";
        assert_eq!(infer_size("Copy.jsx", src, DEFAULT).source, SizeSource::Default);
    }

    #[test]
    fn test_file_name_keyword() {
        let src = "export const Button = () => <button>Go</button>;";
        let inferred = infer_size("Button.jsx", src, DEFAULT);
        assert_eq!(inferred.size, Size::new(120, 40));
        assert_eq!(inferred.source, SizeSource::FileName);

        assert_eq!(infer_size("NavBar.tsx", "", DEFAULT).size, Size::new(1200, 80));
        assert_eq!(infer_size("ProductCard.jsx", "", DEFAULT).size, Size::new(320, 400));
    }

    #[test]
    fn test_root_tag() {
        let src = "export default function Signup() {\n  return (\n    <form>\n      <input />\n    </form>\n  );\n}";
        let inferred = infer_size("Signup.jsx", src, DEFAULT);
        assert_eq!(inferred.size, Size::new(400, 500));
        assert_eq!(inferred.source, SizeSource::RootTag);
    }

    #[test]
    fn test_jsx_depth() {
        assert_eq!(jsx_depth("<div><section><p>x</p></section></div>"), 3);
        assert_eq!(jsx_depth("<div><img src='a' /></div>"), 2);
        assert_eq!(jsx_depth("no markup"), 0);
    }

    #[test]
    fn test_flex_direction() {
        let src = "<div style={{ display: 'flex', flexDirection: 'column' }} />";
        assert_eq!(dominant_flex_direction(src), Some(FlexDirection::Column));
        assert_eq!(dominant_flex_direction("<div className='flex flex-row' />"), Some(FlexDirection::Row));
        assert_eq!(dominant_flex_direction("<div />"), None);
    }

    #[test]
    fn test_structure_fallback() {
        let src = "export const Panel = () => (\n  <div className=\"flex flex-col\">\n    <div><p>a</p></div>\n  </div>\n);";
        let inferred = infer_size("Panel.jsx", src, DEFAULT);
        assert_eq!(inferred.source, SizeSource::Structure);
        assert_eq!(inferred.size.width, 400);
    }

    #[test]
    fn test_default_when_no_signal() {
        let inferred = infer_size("Thing.jsx", "export const Thing = () => null;", DEFAULT);
        assert_eq!(inferred.size, DEFAULT);
        assert_eq!(inferred.source, SizeSource::Default);
    }
}
