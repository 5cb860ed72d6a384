//! Developer tasks (schema generation, report fixture checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn report_fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures").join("reports")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(ccheck_types::CheckReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(ccheck_settings::CcheckConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "ccheck.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "ccheck.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Check that schemas in the repo match what would be generated. Key order and
/// whitespace are not significant.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serde_json::to_value((spec.generate)()).context("schema to json")?;
        match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(actual) if actual == expected => {}
                Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
                Err(_) => stale.push(format!("{} (not valid JSON)", spec.filename)),
            },
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Check that a report path is clean: relative, no `..`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Validate committed report fixtures.
///
/// Every `tests/fixtures/reports/*.json` must:
/// 1. validate against the `CheckReport` schema
/// 2. already be normalized (placeholders for version and run timing)
/// 3. use clean relative file paths
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {e}"))?;

    let dir = report_fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    let mut problems = Vec::new();
    for path in &entries {
        let name = path.display();
        let text = fs::read_to_string(path).with_context(|| format!("Failed to read {name}"))?;
        let report: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("Failed to parse {name}"))?;

        for err in validator.iter_errors(&report) {
            problems.push(format!("{name}: schema: {err}"));
        }
        if ccheck_test_util::normalize_nondeterministic(report.clone()) != report {
            problems.push(format!("{name}: not normalized"));
        }
        let files = report["files"].as_array().cloned().unwrap_or_default();
        for file in files {
            let p = file["path"].as_str().unwrap_or_default();
            if !is_clean_path(p) {
                problems.push(format!("{name}: unclean path {p:?}"));
            }
        }
    }

    if problems.is_empty() {
        println!("{} report fixture(s) conform.", entries.len());
        return Ok(());
    }
    for p in &problems {
        eprintln!("  - {p}");
    }
    bail!("{} conformance problem(s)", problems.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate report fixtures against the report schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
