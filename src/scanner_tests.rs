use super::*;
use std::fs;
use tempfile::TempDir;

/// Helper to write a file below the temp root, creating directories
fn write(root: &TempDir, rel: &str, content: &str) {
    let path = root.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn names(records: &[ComponentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

const BUTTON: &str = "export const Button = ({ label }) => <button>{label}</button>;\n";
const HOME: &str = "import React from 'react';\n\nexport default function Home() {\n  return (\n    <main>\n      <h1>Hello</h1>\n    </main>\n  );\n}\n";

// ============================================
// EXAMPLE TREE
// ============================================

#[test]
fn test_scan_button_and_home() {
    let root = TempDir::new().unwrap();
    write(&root, "components/Button.jsx", BUTTON);
    write(&root, "pages/Home.jsx", HOME);

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(names(&records), vec!["Button", "Home"]);

    let button = &records[0];
    assert_eq!(button.source_path, "components/Button.jsx");
    assert_eq!(button.export_kind, ExportKind::Named);
    assert_eq!(button.inferred_size, Some(Size::new(120, 40)));
    assert!(!button.accepts_style_prop);

    let home = &records[1];
    assert_eq!(home.source_path, "pages/Home.jsx");
    assert_eq!(home.export_kind, ExportKind::Default);
    assert_eq!(home.inferred_size, None);
}

#[test]
fn test_scan_missing_root_is_empty() {
    let records = scan(
        std::path::Path::new("/nonexistent/storyboard/src"),
        &SyncConfig::default(),
        &SyncOptions::default(),
    );
    assert!(records.is_empty());
}

// ============================================
// IGNORE FILTER
// ============================================

#[test]
fn test_ignored_files_never_scanned() {
    let root = TempDir::new().unwrap();
    write(&root, "components/Button.jsx", BUTTON);
    write(&root, "components/Button.test.jsx", "export const ButtonTest = () => <div />;");
    write(&root, "components/index.js", "export const Barrel = () => <div />;");
    write(&root, "utils/stringUtils.js", "export const Upper = () => <span />;");
    write(&root, "hooks/useThing.js", "export const Thing = () => <span />;");

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(names(&records), vec!["Button"]);
}

#[test]
fn test_include_utilities_scans_index_files() {
    let root = TempDir::new().unwrap();
    write(&root, "components/index.js", "export const Barrel = () => <div />;");
    write(&root, "components/Button.test.jsx", "export const ButtonTest = () => <div />;");

    let options = SyncOptions {
        include_utilities: true,
        ..SyncOptions::default()
    };
    let records = scan(root.path(), &SyncConfig::default(), &options);
    // tests stay ignored even with utilities included
    assert_eq!(names(&records), vec!["Barrel"]);
}

#[test]
fn test_force_include_overrides_ignore() {
    let root = TempDir::new().unwrap();
    write(&root, "components/index.js", "export const Barrel = () => <div />;");

    let config = SyncConfig {
        force_include: vec!["index.js".to_string()],
        ..SyncConfig::default()
    };
    let records = scan(root.path(), &config, &SyncOptions::default());
    assert_eq!(names(&records), vec!["Barrel"]);
}

#[test]
fn test_force_include_by_stem_leaves_tests_ignored() {
    let root = TempDir::new().unwrap();
    write(&root, "components/Button.jsx", BUTTON);
    write(&root, "components/Button.test.jsx", "export const ButtonTest = () => <div />;");

    let config = SyncConfig {
        force_include: vec!["Button".to_string()],
        ..SyncConfig::default()
    };
    let records = scan(root.path(), &config, &SyncOptions::default());
    assert_eq!(names(&records), vec!["Button"]);
}

#[test]
fn test_walk_order_is_sorted_depth_first() {
    let root = TempDir::new().unwrap();
    write(&root, "pages/Zebra.jsx", "export const Zebra = () => <div />;");
    write(&root, "components/forms/Input.jsx", "export const Input = () => <input />;");
    write(&root, "components/Alert.jsx", "export const Alert = () => <div />;");
    write(&root, "App.jsx", "export default function App() { return <div />; }");

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    let paths: Vec<&str> = records.iter().map(|r| r.source_path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "App.jsx",
            "components/Alert.jsx",
            "components/forms/Input.jsx",
            "pages/Zebra.jsx",
        ]
    );
}

#[test]
fn test_hidden_scan_root_is_still_walked() {
    let parent = TempDir::new().unwrap();
    let root = parent.path().join(".storyboard-src");
    let path = root.join("pages").join("About.jsx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "export default function About() { return <div />; }").unwrap();

    let records = scan(&root, &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(names(&records), vec!["About"]);
}

#[test]
fn test_skips_node_modules_hidden_and_declarations() {
    let root = TempDir::new().unwrap();
    write(&root, "node_modules/lib/Widget.jsx", "export const Widget = () => <div />;");
    write(&root, ".cache/Cached.jsx", "export const Cached = () => <div />;");
    write(&root, "types/Props.d.ts", "export interface Props { a: string }");
    write(&root, "styles/theme.css", ".a { width: 10px }");
    write(&root, "pages/About.tsx", "export default function About() { return <div />; }");

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(names(&records), vec!["About"]);
}

// ============================================
// RECORD DETAILS
// ============================================

#[test]
fn test_non_ui_exports_are_skipped() {
    let root = TempDir::new().unwrap();
    write(&root, "data/Colors.js", "export const Colors = { primary: '#333' };");
    write(&root, "pages/Contact.jsx", "const Contact = () => <form />;\nexport default Contact;\n");

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(names(&records), vec!["Contact"]);
    assert_eq!(records[0].export_kind, ExportKind::Default);
}

#[test]
fn test_multiple_components_share_file_facts() {
    let root = TempDir::new().unwrap();
    write(
        &root,
        "components/cards/Cards.jsx",
        "export const SmallCard = (props) => <div style={props.style} />;\nexport const LargeCard = () => <div />;\n",
    );

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(names(&records), vec!["SmallCard", "LargeCard"]);
    for record in &records {
        assert!(record.accepts_style_prop);
        assert_eq!(record.inferred_size, Some(Size::new(320, 400)));
    }
}

#[test]
fn test_duplicate_names_keep_first_path() {
    let root = TempDir::new().unwrap();
    write(&root, "a/Header.jsx", "export const Header = () => <header />;");
    write(&root, "b/Header.jsx", "export const Header = () => <header />;");

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_path, "a/Header.jsx");
}

#[test]
fn test_unreadable_file_yields_default_record() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("components").join("Broken.jsx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    // invalid UTF-8 makes read_to_string fail
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let records = scan(root.path(), &SyncConfig::default(), &SyncOptions::default());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Broken");
    assert_eq!(records[0].export_kind, ExportKind::Default);
    assert_eq!(records[0].inferred_size, Some(Size::new(700, 700)));
}

#[test]
fn test_unreadable_suffixed_file_has_no_fallback_record() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("components").join("Broken.stories.jsx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let config = SyncConfig {
        force_include: vec!["Broken.stories.jsx".to_string()],
        ..SyncConfig::default()
    };
    let records = scan(root.path(), &config, &SyncOptions::default());
    assert!(records.is_empty());
}

// ============================================
// PATH HELPERS
// ============================================

#[test]
fn test_components_cluster() {
    assert_eq!(components_cluster("components/Button.jsx", "components"), Some(String::new()));
    assert_eq!(
        components_cluster("components/forms/Input.jsx", "components"),
        Some("forms".to_string())
    );
    assert_eq!(
        components_cluster("components/forms/fields/Text.jsx", "components"),
        Some("forms".to_string())
    );
    assert_eq!(components_cluster("pages/Home.jsx", "components"), None);
    // a file named like the directory is not inside it
    assert_eq!(components_cluster("components.jsx", "components"), None);
}

#[test]
fn test_relative_path_uses_forward_slashes() {
    let root = std::path::Path::new("/project/src");
    let path = root.join("components").join("Button.jsx");
    assert_eq!(relative_path(root, &path), "components/Button.jsx");
}
