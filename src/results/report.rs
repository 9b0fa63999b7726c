//! Report generation for suite runs
//!
//! Renders a [`SuiteSummary`] as plain text, Markdown or a self-contained
//! HTML page.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::{SuiteSummary, TestStatus};

/// Host details printed in every report
#[derive(Clone, Debug)]
pub struct EnvironmentInfo {
    pub os: String,
    pub arch: String,
    pub tool_version: String,
}

impl EnvironmentInfo {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Report generator
pub struct ReportGenerator {
    environment: EnvironmentInfo,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_environment(EnvironmentInfo::current())
    }

    pub fn with_environment(environment: EnvironmentInfo) -> Self {
        Self { environment }
    }

    /// Render a suite run in the requested format
    pub fn render(&self, summary: &SuiteSummary, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.format_text_report(summary),
            ReportFormat::Markdown => self.format_markdown_report(summary),
            ReportFormat::Html => self.format_html_report(summary),
        }
    }

    /// Write a report, picking the format from the file extension
    pub fn write(&self, summary: &SuiteSummary, path: &Path) -> Result<()> {
        let format = ReportFormat::from_path(path);
        let content = self.render(summary, format);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report {}", path.display()))?;

        info!("Report written to {}", path.display());
        Ok(())
    }

    fn format_text_report(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        let title = format!(" {} Test Report ", summary.suite);
        writeln!(output, "\n{:=^70}", title).unwrap();
        writeln!(output).unwrap();

        writeln!(output, "Target: {}", summary.target).unwrap();
        writeln!(output, "Run ID: {}", summary.id).unwrap();
        writeln!(output, "Started: {}", format_datetime(&summary.started_at)).unwrap();
        writeln!(
            output,
            "Completed: {}",
            format_datetime(&summary.completed_at)
        )
        .unwrap();
        writeln!(output).unwrap();

        writeln!(output, "{:-^70}", " Results ").unwrap();
        writeln!(
            output,
            "{:<32} {:<8} {:>10}  {}",
            "Case", "Status", "Time(ms)", "Message"
        )
        .unwrap();
        writeln!(output, "{:-<70}", "").unwrap();

        for result in &summary.results {
            writeln!(
                output,
                "{:<32} {:<8} {:>10}  {}",
                truncate(&result.label(), 32),
                result.status,
                result.duration_ms,
                result.message.as_deref().unwrap_or("")
            )
            .unwrap();
        }

        writeln!(output, "\n{:-^70}", " Summary ").unwrap();
        writeln!(
            output,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            summary.total, summary.passed, summary.failed, summary.skipped, summary.errors
        )
        .unwrap();
        writeln!(
            output,
            "Pass Rate: {:.1}% | Duration: {}ms",
            summary.pass_rate(),
            summary.total_duration_ms
        )
        .unwrap();

        writeln!(output, "\n{:=^70}", "").unwrap();
        output
    }

    fn format_markdown_report(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        writeln!(output, "# {} Test Report\n", summary.suite).unwrap();
        writeln!(output, "## Summary\n").unwrap();
        writeln!(output, "| Property | Value |").unwrap();
        writeln!(output, "|----------|-------|").unwrap();
        writeln!(output, "| Target | {} |", summary.target).unwrap();
        writeln!(output, "| Run ID | `{}` |", summary.id).unwrap();
        writeln!(
            output,
            "| Started | {} |",
            format_datetime(&summary.started_at)
        )
        .unwrap();
        writeln!(
            output,
            "| Completed | {} |",
            format_datetime(&summary.completed_at)
        )
        .unwrap();
        writeln!(
            output,
            "| Passed | {}/{} ({:.1}%) |",
            summary.passed,
            summary.total,
            summary.pass_rate()
        )
        .unwrap();
        writeln!(output, "| Failed | {} |", summary.failed).unwrap();
        writeln!(output, "| Skipped | {} |", summary.skipped).unwrap();
        writeln!(output, "| Errors | {} |", summary.errors).unwrap();

        writeln!(output, "\n## Results\n").unwrap();
        writeln!(output, "| Case | Name | Status | Duration | Message |").unwrap();
        writeln!(output, "|------|------|--------|----------|---------|").unwrap();

        for result in &summary.results {
            writeln!(
                output,
                "| {} | {} | {} {} | {}ms | {} |",
                result.label().replace('|', "\\|"),
                result.test_case.name(),
                result.status.symbol(),
                result.status,
                result.duration_ms,
                result
                    .message
                    .as_deref()
                    .unwrap_or("")
                    .replace('|', "\\|")
            )
            .unwrap();
        }

        output
    }

    fn format_html_report(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        writeln!(output, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} Test Report - {}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 40px; background: #f5f5f5; }}
        .container {{ max-width: 1200px; margin: 0 auto; background: white; padding: 40px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        h1 {{ color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px; }}
        h2 {{ color: #555; margin-top: 30px; }}
        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
        th, td {{ padding: 12px; text-align: left; border-bottom: 1px solid #ddd; vertical-align: top; }}
        th {{ background: #007bff; color: white; }}
        tr:hover {{ background: #f8f9fa; }}
        .pass {{ color: #28a745; font-weight: bold; }}
        .fail {{ color: #dc3545; font-weight: bold; }}
        .skip {{ color: #b8860b; font-weight: bold; }}
        .error {{ color: #8b0000; font-weight: bold; }}
        .message {{ font-family: monospace; white-space: pre-wrap; color: #555; }}
        .stat-card {{ display: inline-block; background: #f8f9fa; padding: 20px; margin: 10px; border-radius: 8px; min-width: 150px; text-align: center; }}
        .stat-value {{ font-size: 24px; font-weight: bold; color: #007bff; }}
        .stat-label {{ color: #666; font-size: 14px; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{} Test Report</h1>

        <h2>Summary</h2>
        <div class="stat-card">
            <div class="stat-value">{}</div>
            <div class="stat-label">Total</div>
        </div>
        <div class="stat-card">
            <div class="stat-value pass">{}</div>
            <div class="stat-label">Passed</div>
        </div>
        <div class="stat-card">
            <div class="stat-value fail">{}</div>
            <div class="stat-label">Failed</div>
        </div>
        <div class="stat-card">
            <div class="stat-value skip">{}</div>
            <div class="stat-label">Skipped</div>
        </div>
        <div class="stat-card">
            <div class="stat-value error">{}</div>
            <div class="stat-label">Errors</div>
        </div>
        <div class="stat-card">
            <div class="stat-value">{:.1}%</div>
            <div class="stat-label">Pass Rate</div>
        </div>

        <h2>Test Results</h2>
        <table>
            <tr>
                <th>Case</th>
                <th>Name</th>
                <th>Status</th>
                <th>Duration</th>
                <th>Message</th>
            </tr>"#,
            summary.suite,
            html_escape(&summary.target),
            summary.suite,
            summary.total,
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.errors,
            summary.pass_rate()
        )
        .unwrap();

        for result in &summary.results {
            writeln!(
                output,
                r#"            <tr>
                <td>{}</td>
                <td>{}</td>
                <td class="{}">{}</td>
                <td>{}ms</td>
                <td class="message">{}</td>
            </tr>"#,
                html_escape(&result.label()),
                html_escape(result.test_case.name()),
                status_class(result.status),
                result.status,
                result.duration_ms,
                html_escape(result.message.as_deref().unwrap_or(""))
            )
            .unwrap();
        }

        writeln!(output, "        </table>").unwrap();

        writeln!(
            output,
            r#"
        <h2>Environment</h2>
        <table>
            <tr><th>Property</th><th>Value</th></tr>
            <tr><td>Run ID</td><td><code>{}</code></td></tr>
            <tr><td>Target</td><td>{}</td></tr>
            <tr><td>Started</td><td>{}</td></tr>
            <tr><td>Completed</td><td>{}</td></tr>
            <tr><td>Duration</td><td>{}ms</td></tr>
            <tr><td>OS</td><td>{}</td></tr>
            <tr><td>Architecture</td><td>{}</td></tr>
            <tr><td>Tool Version</td><td>{}</td></tr>
        </table>
    </div>
</body>
</html>"#,
            html_escape(&summary.id),
            html_escape(&summary.target),
            format_datetime(&summary.started_at),
            format_datetime(&summary.completed_at),
            summary.total_duration_ms,
            self.environment.os,
            self.environment.arch,
            self.environment.tool_version
        )
        .unwrap();

        output
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Report output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Markdown,
    Html,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "html" | "htm" => Some(ReportFormat::Html),
            _ => None,
        }
    }

    /// Format implied by a file extension; HTML when unknown
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
            .unwrap_or(ReportFormat::Html)
    }
}

fn status_class(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "pass",
        TestStatus::Fail => "fail",
        TestStatus::Skip => "skip",
        TestStatus::Error => "error",
    }
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Suite, TestCase, TestResult};

    fn sample_summary() -> SuiteSummary {
        SuiteSummary::new(
            Suite::Ui,
            "https://qa.example.com",
            Utc::now(),
            vec![
                TestResult::pass(TestCase::ValidLogin, 2100),
                TestResult::fail(
                    TestCase::XssAttackUsername,
                    1500,
                    "XSS input allowed login for <script>",
                ),
                TestResult::error(TestCase::Logout, 10000, "Timed out after 10s"),
            ],
        )
    }

    fn generator() -> ReportGenerator {
        ReportGenerator::with_environment(EnvironmentInfo {
            os: "linux".into(),
            arch: "x86_64".into(),
            tool_version: "0.0.0".into(),
        })
    }

    #[test]
    fn test_report_format_from_str() {
        assert!(matches!(
            ReportFormat::from_str("text"),
            Some(ReportFormat::Text)
        ));
        assert!(matches!(
            ReportFormat::from_str("md"),
            Some(ReportFormat::Markdown)
        ));
        assert!(matches!(
            ReportFormat::from_str("html"),
            Some(ReportFormat::Html)
        ));
        assert!(ReportFormat::from_str("pdf").is_none());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ReportFormat::from_path(Path::new("report.html")),
            ReportFormat::Html
        );
        assert_eq!(
            ReportFormat::from_path(Path::new("out/run.md")),
            ReportFormat::Markdown
        );
        assert_eq!(
            ReportFormat::from_path(Path::new("no_extension")),
            ReportFormat::Html
        );
    }

    #[test]
    fn test_html_report_is_escaped() {
        let html = generator().render(&sample_summary(), ReportFormat::Html);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("UI Test Report"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("for <script>"));
        assert!(html.contains(r#"<td class="fail">FAIL</td>"#));
        assert!(html.contains(r#"<td class="error">ERROR</td>"#));
        assert!(html.contains("<td>linux</td>"));
    }

    #[test]
    fn test_text_report() {
        let text = generator().render(&sample_summary(), ReportFormat::Text);
        assert!(text.contains("Target: https://qa.example.com"));
        assert!(text.contains("Total: 3 | Pass: 1 | Fail: 1 | Skip: 0 | Error: 1"));
    }

    #[test]
    fn test_markdown_report() {
        let md = generator().render(&sample_summary(), ReportFormat::Markdown);
        assert!(md.starts_with("# UI Test Report"));
        assert!(md.contains("| TC-AUTH-001 |"));
        assert!(md.contains("| Passed | 1/3 (33.3%) |"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/report.html");

        generator().write(&sample_summary(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</html>"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("TC-AUTH-DDT[username=\"test\"]", 12), "TC-AUTH-D...");
    }
}
