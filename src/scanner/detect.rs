//! Component detection heuristics
//!
//! Source files are matched with regexes, not parsed. A file counts as a UI
//! module when any of these signals is present, checked in this order:
//!
//! 1. markup-like angle-bracket token (`<div`, `<Card />`)
//! 2. framework import (`react`, `preact`, `solid-js`, `react-native`)
//! 3. base-class extension (`extends React.Component`)
//! 4. hook-like call (`useState(`)
//! 5. markup-returning arrow or return expression (`=> (<`, `return <`)
//!
//! Every capitalized identifier the file exports is then a component.

use regex::Regex;
use std::sync::LazyLock;

use super::types::ExportKind;

static MARKUP_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][\w.\-]*[\s/>]").expect("Invalid regex"));
static FRAMEWORK_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:from\s+|require\(\s*)['"](?:react|preact|solid-js|react-native)(?:/[\w\-]+)*['"]"#)
        .expect("Invalid regex")
});
static BASE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"extends\s+(?:React\.)?(?:Pure)?Component\b").expect("Invalid regex")
});
static HOOK_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\buse[A-Z]\w*\s*\(").expect("Invalid regex"));
static MARKUP_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:=>|\breturn)\s*\(?\s*<").expect("Invalid regex"));

static DEFAULT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+(?:async\s+)?(?:function|class)\s*\*?\s+([A-Za-z_$][\w$]*)")
        .expect("Invalid regex")
});
static DEFAULT_IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)export\s+default\s+([A-Za-z_$][\w$]*)\s*;?\s*$").expect("Invalid regex")
});
// export default memo(Card), export default withRouter(Page)
static DEFAULT_WRAPPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+[\w$.]+\(\s*([A-Z][\w$]*)\s*\)").expect("Invalid regex")
});
static NAMED_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:const|let|var|class|function|async\s+function)\s+([A-Za-z_$][\w$]*)")
        .expect("Invalid regex")
});
static EXPORT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s*\{([^}]*)\}(\s*from\b)?").expect("Invalid regex")
});

static STYLE_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprops\.style\b").expect("Invalid regex"));
static STYLE_DESTRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*\{[^{}()]*\bstyle\b[^{}()]*\}").expect("Invalid regex")
});

/// Which signal marked a file as a UI module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    MarkupToken,
    FrameworkImport,
    BaseClass,
    HookCall,
    MarkupReturn,
}

/// First UI signal found in `content`, in the documented order
pub fn ui_signal(content: &str) -> Option<UiSignal> {
    let checks: [(&LazyLock<Regex>, UiSignal); 5] = [
        (&MARKUP_TOKEN, UiSignal::MarkupToken),
        (&FRAMEWORK_IMPORT, UiSignal::FrameworkImport),
        (&BASE_CLASS, UiSignal::BaseClass),
        (&HOOK_CALL, UiSignal::HookCall),
        (&MARKUP_RETURN, UiSignal::MarkupReturn),
    ];

    checks
        .into_iter()
        .find(|(re, _)| re.is_match(content))
        .map(|(_, signal)| signal)
}

/// Component identifiers start with an ASCII capital
pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// All exported identifiers in source order, deduplicated.
///
/// A name exported both ways is reported as `Default`.
pub fn exported_names(content: &str) -> Vec<(String, ExportKind)> {
    let mut found: Vec<(usize, String, ExportKind)> = Vec::new();

    for re in [&DEFAULT_DECL, &DEFAULT_IDENT, &DEFAULT_WRAPPED] {
        for m in re.captures_iter(content).filter_map(|caps| caps.get(1)) {
            if !matches!(m.as_str(), "function" | "class" | "async") {
                found.push((m.start(), m.as_str().to_string(), ExportKind::Default));
            }
        }
    }

    for m in NAMED_DECL.captures_iter(content).filter_map(|caps| caps.get(1)) {
        found.push((m.start(), m.as_str().to_string(), ExportKind::Named));
    }

    for caps in EXPORT_LIST.captures_iter(content) {
        // Re-exports do not define anything in this file
        if caps.get(2).is_some() {
            continue;
        }
        let list = &caps[1];
        let offset = caps.get(1).map_or(0, |m| m.start());
        for item in list.split(',') {
            if let Some((name, kind)) = parse_export_item(item) {
                found.push((offset, name, kind));
            }
        }
    }

    found.sort_by_key(|(pos, _, _)| *pos);

    let mut names: Vec<(String, ExportKind)> = Vec::new();
    for (_, name, kind) in found {
        match names.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => {
                if kind == ExportKind::Default {
                    existing.1 = ExportKind::Default;
                }
            }
            None => names.push((name, kind)),
        }
    }
    names
}

/// `A`, `A as B`, `A as default`, `type A`
fn parse_export_item(item: &str) -> Option<(String, ExportKind)> {
    let item = item.trim();
    if item.is_empty() || item.starts_with("type ") {
        return None;
    }

    let mut parts = item.split_whitespace();
    let local = parts.next()?;
    match (parts.next(), parts.next()) {
        (Some("as"), Some("default")) => Some((local.to_string(), ExportKind::Default)),
        (Some("as"), Some(alias)) => Some((alias.to_string(), ExportKind::Named)),
        _ => Some((local.to_string(), ExportKind::Named)),
    }
}

/// Exported UI components of a file; empty when it has no UI signal
pub fn exported_components(content: &str) -> Vec<(String, ExportKind)> {
    if ui_signal(content).is_none() {
        return Vec::new();
    }
    exported_names(content)
        .into_iter()
        .filter(|(name, _)| is_component_name(name))
        .collect()
}

/// Whether the module reads a `style` prop
pub fn accepts_style_prop(content: &str) -> bool {
    STYLE_MEMBER.is_match(content) || STYLE_DESTRUCTURE.is_match(content)
}
