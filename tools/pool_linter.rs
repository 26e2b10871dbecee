/// Pool Linter — checks data pools for problems before they reach print.
///
/// Usage: pool_linter [--data-dir <dir>] [--config <file.ron>]
use clap::Parser;
use rustc_hash::FxHashSet;
use serde_json::Value;
use snippet_press::config::{Config, DataConfig};
use snippet_press::core::loader::{read_pool, LoadError};
use snippet_press::core::mapping::{fields_of, is_known_key, SubstitutionMapping};
use snippet_press::core::template::{Template, TemplateError};
use snippet_press::schema::record::{PoolKind, Record};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pool_linter", about = "Validate snippet-press data pools")]
struct Cli {
    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the JSON pools
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut data = match cli.config {
        Some(ref path) => match Config::load_from_ron(path) {
            Ok(config) => config.data,
            Err(e) => {
                eprintln!("ERROR: Failed to load config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => DataConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        data.data_dir = dir;
    }

    println!("Linting pools in {}", data.data_dir.display());
    let report = lint(&data);

    println!("\n=== Pool Lint Report ===\n");

    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &report.warnings {
        println!("WARNING: {}", warning);
    }

    for error in &report.errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );

    if report.errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint(data: &DataConfig) -> Report {
    let mut report = Report::default();

    for kind in [PoolKind::Characters, PoolKind::Settings, PoolKind::Events] {
        match read_pool::<Value>(&data.path_for(kind)) {
            Ok(entries) => lint_records(kind, &entries, &mut report),
            Err(e) => report.errors.push(load_failure(kind, e)),
        }
    }

    match read_pool::<Value>(&data.path_for(PoolKind::Templates)) {
        Ok(templates) => lint_templates(&templates, &mut report),
        Err(e) => report.errors.push(load_failure(PoolKind::Templates, e)),
    }

    report
}

fn load_failure(kind: PoolKind, err: LoadError) -> String {
    format!("Pool '{}' could not be loaded: {}", kind.name(), err)
}

fn lint_records(kind: PoolKind, entries: &[Value], report: &mut Report) {
    if entries.is_empty() {
        report
            .errors
            .push(format!("Pool '{}' is empty", kind.name()));
        return;
    }

    let documented: FxHashSet<&str> = fields_of(kind).collect();

    for (i, entry) in entries.iter().enumerate() {
        let Some(record) = Record::from_value(entry) else {
            report.errors.push(format!(
                "{} entry #{} is not a JSON object: {}",
                kind.name(),
                i + 1,
                entry
            ));
            continue;
        };
        let label = record
            .get("name")
            .or_else(|| record.get("type"))
            .map(|n| format!("'{}'", n))
            .unwrap_or_else(|| format!("#{}", i + 1));

        let mut missing: Vec<&str> = documented
            .iter()
            .copied()
            .filter(|field| record.get(field).is_none())
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            report.warnings.push(format!(
                "{} entry {} is missing {} (defaults will be used)",
                kind.name(),
                label,
                missing.join(", ")
            ));
        }

        let mut unused: Vec<&str> = record
            .fields()
            .filter(|field| !documented.contains(field))
            .collect();
        if !unused.is_empty() {
            unused.sort_unstable();
            report.warnings.push(format!(
                "{} entry {} has fields no template can use: {}",
                kind.name(),
                label,
                unused.join(", ")
            ));
        }
    }
}

fn lint_templates(templates: &[Value], report: &mut Report) {
    if templates.is_empty() {
        report.errors.push("Pool 'templates' is empty".to_string());
        return;
    }

    let blank = Record::new();
    let defaults_mapping = SubstitutionMapping::build(&blank, &blank, &blank);
    let defaults = defaults_mapping.as_map();

    for (i, entry) in templates.iter().enumerate() {
        let Some(text) = entry.as_str() else {
            report.errors.push(format!(
                "Template #{} is not a string: {}",
                i + 1,
                entry
            ));
            continue;
        };
        match Template::parse(text) {
            Ok(template) => {
                let mut all_known = true;
                for name in template.placeholders() {
                    if !is_known_key(name) {
                        all_known = false;
                        report.errors.push(format!(
                            "Template #{} references unknown placeholder '{}'",
                            i + 1,
                            name
                        ));
                    }
                }
                // Known names render against the defaults, which surfaces
                // bad conversions and format specs.
                if all_known {
                    if let Err(e @ TemplateError::Format(_)) = template.render(&defaults) {
                        report
                            .errors
                            .push(format!("Template #{} does not render: {}", i + 1, e));
                    }
                }
            }
            Err(e) => report
                .errors
                .push(format!("Template #{} does not parse: {}", i + 1, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_records_pass() {
        let mut report = Report::default();
        let record = json!({
            "name": "Dusty Gulch",
            "description": "a cattle town",
            "feature": "a dry well",
            "atmosphere": "heat shimmer"
        });
        lint_records(PoolKind::Settings, &[record], &mut report);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_and_unused_fields_warn() {
        let mut report = Report::default();
        let record = json!({"name": "Jed", "horse": "Biscuit"});
        lint_records(PoolKind::Characters, &[record], &mut report);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("goal, quote, trait, type"));
        assert!(report.warnings[1].contains("horse"));
    }

    #[test]
    fn empty_pool_is_error() {
        let mut report = Report::default();
        lint_records(PoolKind::Events, &[], &mut report);
        assert_eq!(report.errors, vec!["Pool 'events' is empty".to_string()]);
    }

    #[test]
    fn bad_templates_are_errors() {
        let mut report = Report::default();
        let templates = vec![
            json!("{character_name} rode in."),
            json!("{deputy_name} rode out."),
            json!("{unclosed"),
            json!("[{character_name:^9}] {setting_name!r}"),
            json!("{character_name:+5}"),
            json!(42),
        ];
        lint_templates(&templates, &mut report);
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors[0].contains("'deputy_name'"));
        assert!(report.errors[1].starts_with("Template #3 does not parse"));
        assert_eq!(
            report.errors[2],
            "Template #5 does not render: Sign not allowed in string format specifier"
        );
        assert_eq!(report.errors[3], "Template #6 is not a string: 42");
    }

    #[test]
    fn non_object_entries_are_errors() {
        let mut report = Report::default();
        let entries = vec![json!({"type": "A duststorm"}), json!("stray string")];
        lint_records(PoolKind::Events, &entries, &mut report);
        assert_eq!(
            report.errors,
            vec!["events entry #2 is not a JSON object: \"stray string\"".to_string()]
        );
    }

    #[test]
    fn missing_directory_reports_every_pool() {
        let report = lint(&DataConfig::new("no/such/dir"));
        assert_eq!(report.errors.len(), 4);
    }
}
