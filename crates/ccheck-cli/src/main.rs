//! CLI entry point for ccheck.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and
//! exit codes. All business logic lives in the `ccheck-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ccheck_app::{
    render_output, run_check, verdict_exit_code, write_report, CheckInput, OutputFormat,
};
use ccheck_domain::CancelToken;
use ccheck_settings::{Overrides, DEFAULT_CONFIG_FILE};
use clap::{Parser, ValueEnum};
use std::io::Write;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ccheck",
    version,
    about = "Check structured configuration files against Rego policies"
)]
struct Cli {
    /// Policy file, or directory of `.rego` files [default: policies].
    #[arg(short = 'p', long)]
    policy: Option<String>,

    /// Package whose `deny*` / `warn*` rules are evaluated [default: main].
    #[arg(short = 'n', long)]
    namespace: Option<String>,

    /// Treat warnings as failures.
    #[arg(short = 's', long)]
    strict: bool,

    /// Path to ccheck config TOML. A missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: Utf8PathBuf,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write the JSON report to this path.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Abort the run on the first file that cannot be read or decoded.
    #[arg(long)]
    fail_fast: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Configuration files to check (.yaml, .yml, .json).
    #[arg(required = true)]
    files: Vec<Utf8PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
    Github,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Markdown => OutputFormat::Markdown,
            Format::Github => OutputFormat::Github,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cmd_check(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("ccheck error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(cli: &Cli) -> anyhow::Result<i32> {
    let config_text = read_config(&cli.config)?;

    let overrides = Overrides {
        policy: cli.policy.clone(),
        namespace: cli.namespace.clone(),
        strict: cli.strict.then_some(true),
        fail_fast: cli.fail_fast.then_some(true),
    };

    let output = run_check(CheckInput {
        config_text: &config_text,
        overrides,
        files: &cli.files,
        cancel: CancelToken::new(),
    })?;

    if let Some(path) = &cli.report_out {
        write_report(path, &output.report).context("write report json")?;
    }

    let rendered = render_output(&output.report, cli.format.into())?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("write output")?;

    Ok(verdict_exit_code(output.report.verdict))
}

/// Load config if present; a missing file is allowed (defaults apply).
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!(config = %path, "loaded config file");
            Ok(text)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("read config: {path}")),
    }
}
