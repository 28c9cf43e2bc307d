//! Rendering a layout document as a storyboard module

use std::collections::HashSet;
use std::fmt::Write;

use super::types::{LayoutDocument, SceneComponent, SceneEntry};
use crate::config::SyncConfig;
use crate::scanner::{ComponentRecord, ExportKind};

const HEADER: &str = "import * as React from 'react'\nimport { Scene, Storyboard } from 'utopia-api'\n";
const SCENE_INDENT: &str = "    ";

/// Render the whole document. Output depends only on the document and
/// config, so equal inputs give byte-identical text.
pub fn render(document: &LayoutDocument, config: &SyncConfig) -> String {
    let mut out = String::from(HEADER);

    for line in import_lines(document, config) {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\nexport var storyboard = (\n  <Storyboard>\n");
    for scene in &document.scenes {
        match &scene.component {
            SceneComponent::Resolved(record) => render_scene(&mut out, scene, record),
            SceneComponent::Verbatim { source, .. } => {
                out.push_str(SCENE_INDENT);
                out.push_str(source);
                out.push('\n');
            }
        }
    }
    out.push_str("  </Storyboard>\n)\n");
    out
}

/// One import per component, in order of first use.
///
/// Verbatim scenes reuse the import lines recorded for their components in
/// the previous layout, when there were any.
pub fn import_lines(document: &LayoutDocument, config: &SyncConfig) -> Vec<String> {
    let mut names: HashSet<&str> = HashSet::new();
    let mut lines: Vec<String> = Vec::new();

    for scene in &document.scenes {
        match &scene.component {
            SceneComponent::Resolved(record) => {
                if names.insert(record.name.as_str()) {
                    push_unique(&mut lines, import_statement(record, &config.import_prefix));
                }
            }
            SceneComponent::Verbatim {
                body_components, ..
            } => {
                for name in body_components {
                    let Some(import) = document.carried_imports.iter().find(|i| i.name == *name)
                    else {
                        continue;
                    };
                    if names.insert(name.as_str()) {
                        push_unique(&mut lines, import.line.clone());
                    }
                }
            }
        }
    }
    lines
}

// one statement may bind several carried names
fn push_unique(lines: &mut Vec<String>, line: String) {
    if !lines.contains(&line) {
        lines.push(line);
    }
}

/// `import Name from '...'` or `import { Name } from '...'`
pub fn import_statement(record: &ComponentRecord, prefix: &str) -> String {
    let specifier = import_specifier(&record.source_path, prefix);
    match record.export_kind {
        ExportKind::Default => format!("import {} from '{}'", record.name, specifier),
        ExportKind::Named => format!("import {{ {} }} from '{}'", record.name, specifier),
    }
}

fn import_specifier(source_path: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("./{}", source_path)
    } else {
        format!("{}/{}", prefix, source_path)
    }
}

fn render_scene(out: &mut String, scene: &SceneEntry, record: &ComponentRecord) {
    let style_prop = if record.accepts_style_prop {
        " style={{}}"
    } else {
        ""
    };

    // Writing to a String cannot fail
    let _ = write!(
        out,
        "    <Scene\n\
         \x20     id='{id}'\n\
         \x20     commentId='{id}'\n\
         \x20     style={{{{\n\
         \x20       width: {width},\n\
         \x20       height: {height},\n\
         \x20       position: 'absolute',\n\
         \x20       left: {left},\n\
         \x20       top: {top},\n\
         \x20     }}}}\n\
         \x20     data-label={label}\n\
         \x20   >\n\
         \x20     <{name}{style_prop} />\n\
         \x20   </Scene>\n",
        id = scene.scene_id,
        width = scene.size.width,
        height = scene.size.height,
        left = scene.position.left,
        top = scene.position.top,
        label = label_attribute(&scene.label),
        name = record.name,
        style_prop = style_prop,
    );
}

/// Quoted attribute value that reads back as `label`
fn label_attribute(label: &str) -> String {
    if !label.contains('\'') {
        format!("'{}'", label)
    } else if !label.contains('"') {
        format!("\"{}\"", label)
    } else {
        // serde_json output is a valid JS string literal
        let literal = serde_json::to_string(label).unwrap_or_else(|_| "\"\"".to_string());
        format!("{{{}}}", literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::existing::parse_layout;
    use crate::layout::types::Position;
    use crate::scanner::Size;

    fn scene(record: ComponentRecord, left: i32, top: i32) -> SceneEntry {
        SceneEntry {
            scene_id: crate::layout::types::scene_id_for(&record.name),
            position: Position::new(left, top),
            size: Size::new(120, 40),
            label: record.name.clone(),
            component: SceneComponent::Resolved(record),
        }
    }

    fn record(name: &str, path: &str, kind: ExportKind, style: bool) -> ComponentRecord {
        ComponentRecord {
            name: name.to_string(),
            source_path: path.to_string(),
            export_kind: kind,
            accepts_style_prop: style,
            inferred_size: None,
        }
    }

    #[test]
    fn test_import_syntax_follows_export_kind() {
        let named = record("Button", "components/Button.jsx", ExportKind::Named, false);
        let default = record("Home", "pages/Home.jsx", ExportKind::Default, false);
        assert_eq!(
            import_statement(&named, "/src"),
            "import { Button } from '/src/components/Button.jsx'"
        );
        assert_eq!(
            import_statement(&default, "/src/"),
            "import Home from '/src/pages/Home.jsx'"
        );
        assert_eq!(
            import_statement(&default, ""),
            "import Home from './pages/Home.jsx'"
        );
    }

    #[test]
    fn test_one_import_per_component() {
        let button = record("Button", "components/Button.jsx", ExportKind::Named, false);
        let mut second = scene(button.clone(), 500, 0);
        second.scene_id = "button-scene-2".to_string();
        let document = LayoutDocument {
            scenes: vec![scene(button, 0, 0), second],
            carried_imports: Vec::new(),
        };

        let text = render(&document, &SyncConfig::default());
        assert_eq!(text.matches("import { Button }").count(), 1);
        assert_eq!(text.matches("<Scene\n").count(), 2);
    }

    #[test]
    fn test_scene_markup() {
        let document = LayoutDocument {
            scenes: vec![scene(
                record("Card", "components/Card.jsx", ExportKind::Default, true),
                212,
                1000,
            )],
            carried_imports: Vec::new(),
        };

        let text = render(&document, &SyncConfig::default());
        assert!(text.contains("      id='card-scene'\n"));
        assert!(text.contains("        width: 120,\n"));
        assert!(text.contains("        left: 212,\n"));
        assert!(text.contains("        top: 1000,\n"));
        assert!(text.contains("      data-label='Card'\n"));
        assert!(text.contains("      <Card style={{}} />\n"));
        assert!(text.starts_with(HEADER));
        assert!(text.ends_with("  </Storyboard>\n)\n"));
    }

    #[test]
    fn test_without_style_prop() {
        let document = LayoutDocument {
            scenes: vec![scene(
                record("Logo", "components/Logo.jsx", ExportKind::Named, false),
                0,
                0,
            )],
            carried_imports: Vec::new(),
        };
        let text = render(&document, &SyncConfig::default());
        assert!(text.contains("      <Logo />\n"));
    }

    #[test]
    fn test_rendered_text_parses_back() {
        let document = LayoutDocument {
            scenes: vec![
                scene(record("Button", "components/Button.jsx", ExportKind::Named, false), 212, 1000),
                scene(record("Home", "pages/Home.jsx", ExportKind::Default, true), 212, 128),
            ],
            carried_imports: Vec::new(),
        };
        let text = render(&document, &SyncConfig::default());

        let parsed = parse_layout(&text).unwrap();
        assert_eq!(parsed.scenes.len(), 2);
        for (original, back) in document.scenes.iter().zip(&parsed.scenes) {
            assert_eq!(original.scene_id, back.scene_id);
            assert_eq!(original.position, back.position);
            assert_eq!(original.size, back.size);
            assert_eq!(original.label, back.label);
            assert_eq!(original.component.component_name(), back.component.component_name());
        }
    }

    #[test]
    fn test_labels_with_quotes_survive_a_rerun() {
        for label in ["Bob's Button", "The \"Big\" One", "Bob's \"Big\" Button", "Plain"] {
            let mut entry = scene(
                record("Button", "components/Button.jsx", ExportKind::Named, false),
                212,
                1000,
            );
            entry.label = label.to_string();
            let document = LayoutDocument {
                scenes: vec![entry],
                carried_imports: Vec::new(),
            };

            let text = render(&document, &SyncConfig::default());
            let parsed = parse_layout(&text).unwrap();
            assert_eq!(parsed.scenes[0].label, label, "rendered:\n{}", text);
        }
    }

    #[test]
    fn test_hand_edited_double_quoted_label_is_kept() {
        let text = "<Storyboard><Scene id='button-scene' data-label=\"Bob's Button\" style={{ width: 120, height: 40, left: 0, top: 0 }}><Button /></Scene></Storyboard>";
        let parsed = parse_layout(text).unwrap();
        assert_eq!(parsed.scenes[0].label, "Bob's Button");

        let mut entry = parsed.scenes[0].clone();
        entry.component = SceneComponent::Resolved(record(
            "Button",
            "components/Button.jsx",
            ExportKind::Named,
            false,
        ));
        let rendered = render(
            &LayoutDocument {
                scenes: vec![entry],
                carried_imports: Vec::new(),
            },
            &SyncConfig::default(),
        );
        assert!(rendered.contains("      data-label=\"Bob's Button\"\n"));
    }

    #[test]
    fn test_wrapped_verbatim_scene_keeps_all_imports() {
        let text = render(
            &parse_layout(
                "import { ThemeProvider } from '/src/theme/ThemeContext.jsx'\nimport { Button } from '/src/components/Button.jsx'\n<Storyboard><Scene id='themed-scene' style={{ width: 1, height: 1, left: 0, top: 0 }}><ThemeProvider><Button /></ThemeProvider></Scene></Storyboard>",
            )
            .unwrap(),
            &SyncConfig::default(),
        );
        assert!(text.contains("import { ThemeProvider } from '/src/theme/ThemeContext.jsx'\n"));
        assert!(text.contains("import { Button } from '/src/components/Button.jsx'\n"));
    }

    #[test]
    fn test_verbatim_scenes_render_as_read() {
        let text = render(
            &parse_layout(
                "import { Gone } from '/src/Gone.jsx'\n<Storyboard>\n    <Scene id='gone-scene' style={{ width: 1, height: 1, left: 0, top: 0 }}><Gone /></Scene>\n</Storyboard>",
            )
            .unwrap(),
            &SyncConfig::default(),
        );
        assert!(text.contains("import { Gone } from '/src/Gone.jsx'\n"));
        assert!(text.contains(
            "    <Scene id='gone-scene' style={{ width: 1, height: 1, left: 0, top: 0 }}><Gone /></Scene>\n"
        ));
    }
}
