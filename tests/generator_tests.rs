/// Generator integration tests — pools on disk to finished snippets.

use snippet_press::config::DataConfig;
use snippet_press::core::generator::{SnippetError, SnippetGenerator};
use snippet_press::core::mapping::FIELD_DEFAULTS;
use snippet_press::core::selector::{FirstSelector, Selector};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MISSING_DATA: &str = "Error: Missing essential data. Please check your JSON files.";

fn write_pools(dir: &Path, characters: &str, settings: &str, events: &str, templates: &str) {
    fs::write(dir.join("characters.json"), characters).unwrap();
    fs::write(dir.join("settings.json"), settings).unwrap();
    fs::write(dir.join("events.json"), events).unwrap();
    fs::write(dir.join("story_templates.json"), templates).unwrap();
}

fn gulch() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_pools(
        dir.path(),
        r#"[{"name":"Jed"}]"#,
        r#"[{"name":"Dusty Gulch"}]"#,
        r#"[{"type":"A duststorm"}]"#,
        r#"["{character_name} arrived in {setting_name}. {event_type} followed."]"#,
    );
    dir
}

#[test]
fn end_to_end_single_entry_pools() {
    let dir = gulch();
    let mut generator = SnippetGenerator::seeded(DataConfig::new(dir.path()), 1);
    assert_eq!(
        generator.generate(),
        "Jed arrived in Dusty Gulch. A duststorm followed."
    );
}

#[test]
fn each_empty_pool_yields_missing_data() {
    let files = [
        "characters.json",
        "settings.json",
        "events.json",
        "story_templates.json",
    ];
    for file in files {
        let dir = gulch();
        fs::write(dir.path().join(file), "[]").unwrap();
        let mut generator =
            SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
        assert_eq!(generator.generate(), MISSING_DATA, "empty {}", file);
    }
}

#[test]
fn missing_or_corrupt_file_yields_missing_data() {
    let dir = gulch();
    fs::remove_file(dir.path().join("settings.json")).unwrap();
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    assert_eq!(generator.try_generate(), Err(SnippetError::MissingData));

    let dir = gulch();
    fs::write(dir.path().join("events.json"), "[{\"type\": ").unwrap();
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    assert_eq!(generator.generate(), MISSING_DATA);
}

#[test]
fn every_default_shows_up_for_blank_records() {
    let dir = TempDir::new().unwrap();
    let template = FIELD_DEFAULTS
        .iter()
        .map(|d| format!("{{{}}}", d.key))
        .collect::<Vec<_>>()
        .join("|");
    write_pools(
        dir.path(),
        "[{}]",
        "[{}]",
        "[{}]",
        &serde_json::to_string(&vec![template]).unwrap(),
    );

    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    let out = generator.generate();
    let expected = FIELD_DEFAULTS
        .iter()
        .map(|d| d.default)
        .collect::<Vec<_>>()
        .join("|");
    assert_eq!(out, expected);
}

#[test]
fn unknown_placeholder_is_named() {
    let dir = gulch();
    fs::write(
        dir.path().join("story_templates.json"),
        r#"["{character_name} shot {sheriff_name}."]"#,
    )
    .unwrap();
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    let out = generator.generate();
    assert!(out.contains("Missing key: 'sheriff_name'"), "got: {}", out);
}

/// Always picks the final entry of a pool.
struct LastSelector;

impl Selector for LastSelector {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        len.checked_sub(1)
    }
}

#[test]
fn malformed_entries_only_matter_when_picked() {
    let dir = TempDir::new().unwrap();
    write_pools(
        dir.path(),
        r#"[{"name":"Jed"}, "stray string"]"#,
        r#"[{"name":"Dusty Gulch"}]"#,
        r#"[{"type":"A duststorm"}]"#,
        r#"["{character_name} arrived.", 42]"#,
    );

    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    assert_eq!(generator.generate(), "Jed arrived.");

    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), LastSelector);
    let out = generator.generate();
    assert!(
        out.starts_with("An unexpected error occurred during template formatting: "),
        "got: {}",
        out
    );
    assert!(out.contains("\"stray string\""), "got: {}", out);
}

#[test]
fn malformed_template_entry_is_formatting_error() {
    let dir = TempDir::new().unwrap();
    write_pools(
        dir.path(),
        r#"[{"name":"Jed"}]"#,
        r#"[{"name":"Dusty Gulch"}]"#,
        r#"[{"type":"A duststorm"}]"#,
        r#"["{character_name} arrived.", 42]"#,
    );
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), LastSelector);
    assert_eq!(
        generator.try_generate(),
        Err(SnippetError::Formatting(
            "template entry is not a string: 42".to_string()
        ))
    );
}

#[test]
fn format_specs_render_like_the_data_expects() {
    let dir = gulch();
    fs::write(
        dir.path().join("story_templates.json"),
        r#"["[{character_name:^9}] {setting_name!r} {event_type:.4}"]"#,
    )
    .unwrap();
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    assert_eq!(generator.generate(), "[   Jed   ] 'Dusty Gulch' A du");
}

#[test]
fn format_spec_on_unknown_placeholder_names_the_key() {
    let dir = gulch();
    fs::write(
        dir.path().join("story_templates.json"),
        r#"["{sheriff_name:>10} met {character_name}."]"#,
    )
    .unwrap();
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    assert_eq!(
        generator.generate(),
        "Error: Template formatting error. Missing key: 'sheriff_name'. Check your template and JSON data fields."
    );
}

#[test]
fn first_selection_is_deterministic() {
    let dir = TempDir::new().unwrap();
    write_pools(
        dir.path(),
        r#"[{"name":"Jed"},{"name":"Sal"}]"#,
        r#"[{"name":"Dusty Gulch"},{"name":"Fort Providence"}]"#,
        r#"[{"type":"A duststorm"},{"type":"A robbery"}]"#,
        r#"["{character_name} in {setting_name}: {event_type}.", "{event_type}!"]"#,
    );
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    let first = generator.generate();
    assert_eq!(first, "Jed in Dusty Gulch: A duststorm.");
    for _ in 0..5 {
        assert_eq!(generator.generate(), first);
    }
}

#[test]
fn same_seed_same_edition() {
    let data = DataConfig::new("data");
    let a = SnippetGenerator::seeded(data.clone(), 1881).generate_many(5);
    let b = SnippetGenerator::seeded(data, 1881).generate_many(5);
    assert_eq!(a, b);
}

#[test]
fn pools_are_reread_on_every_call() {
    let dir = gulch();
    let mut generator =
        SnippetGenerator::with_selector(DataConfig::new(dir.path()), FirstSelector);
    assert_eq!(
        generator.generate(),
        "Jed arrived in Dusty Gulch. A duststorm followed."
    );
    fs::write(dir.path().join("characters.json"), r#"[{"name":"Sal"}]"#).unwrap();
    assert_eq!(
        generator.generate(),
        "Sal arrived in Dusty Gulch. A duststorm followed."
    );
}

#[test]
fn bundled_data_renders_without_leftover_braces() {
    let mut generator = SnippetGenerator::seeded(DataConfig::new("data"), 7);
    for story in generator.generate_many(50) {
        assert!(!story.starts_with("Error"), "bundled data failed: {}", story);
        assert!(!story.contains('{') && !story.contains('}'), "unresolved: {}", story);
    }
}
