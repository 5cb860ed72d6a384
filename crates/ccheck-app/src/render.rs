//! Output selection and artifact writing.

use anyhow::Context;
use camino::Utf8Path;
use ccheck_types::CheckReport;

use crate::report::serialize_report;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Passed:` / `Warning:` / `Failure:` / `Error:` lines.
    #[default]
    Text,
    Json,
    Markdown,
    /// GitHub Actions workflow annotations.
    Github,
}

/// Render the report for stdout in the requested format.
pub fn render_output(report: &CheckReport, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Text => join_lines(ccheck_render::render_text(report)),
        OutputFormat::Json => {
            String::from_utf8(serialize_report(report)?).context("report json is not utf-8")?
        }
        OutputFormat::Markdown => ccheck_render::render_markdown(report),
        OutputFormat::Github => join_lines(ccheck_render::render_github_annotations(report)),
    };
    Ok(text)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn write_report(path: &Utf8Path, report: &CheckReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_bytes(path, &data).with_context(|| format!("write report: {path}"))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
