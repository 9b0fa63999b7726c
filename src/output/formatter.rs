//! Console formatters for suite results
//!
//! Provides table, JSON, CSV and one-line summary output.

#![allow(dead_code)]

use std::io::IsTerminal;

use crate::models::{SuiteSummary, TestResult, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: std::io::stdout().is_terminal(),
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single test result
    pub fn format_result(&self, result: &TestResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Csv => self.format_result_csv(result),
            OutputFormat::Summary => self.format_result_summary(result),
        }
    }

    fn status_label(&self, status: TestStatus) -> &'static str {
        if self.colorize {
            match status {
                TestStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                TestStatus::Skip => "\x1b[33m○ SKIP\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match status {
                TestStatus::Pass => "✓ PASS",
                TestStatus::Fail => "✗ FAIL",
                TestStatus::Skip => "○ SKIP",
                TestStatus::Error => "! ERROR",
            }
        }
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        let mut line = format!(
            "{:14} {:45} {} [{:>6}ms]",
            result.label(),
            result.test_case.name(),
            self.status_label(result.status),
            result.duration_ms
        );
        if result.status != TestStatus::Pass {
            if let Some(msg) = &result.message {
                line.push_str(&format!("\n{:15}└─ {}", "", msg));
            }
        }
        line
    }

    fn format_result_csv(&self, result: &TestResult) -> String {
        format!(
            "{},\"{}\",{},{},\"{}\"",
            result.label(),
            result.test_case.name(),
            result.status,
            result.duration_ms,
            result.message.as_deref().unwrap_or("").replace('"', "\"\"")
        )
    }

    fn format_result_summary(&self, result: &TestResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.label(),
            result.duration_ms
        )
    }

    /// Format a suite summary
    pub fn format_summary(&self, summary: &SuiteSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => self.format_summary_csv(summary),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        output.push_str("\n══════════════════════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(" {} Suite - {}\n", summary.suite, summary.target));
        output.push_str(&format!(" Run {}\n", summary.id));
        output.push_str("──────────────────────────────────────────────────────────────────────────────\n");

        for result in &summary.results {
            output.push_str(&format!(" {}\n", self.format_result_table(result)));
        }

        output.push_str("──────────────────────────────────────────────────────────────────────────────\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            " Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}\n",
            summary.total, pass_str, fail_str, summary.skipped, summary.errors
        ));
        output.push_str(&format!(
            " Pass Rate: {:.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output.push_str("══════════════════════════════════════════════════════════════════════════════\n");

        output
    }

    fn format_summary_csv(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();
        output.push_str("case,name,status,duration_ms,message\n");
        for result in &summary.results {
            output.push_str(&self.format_result_csv(result));
            output.push('\n');
        }
        output
    }

    fn format_summary_brief(&self, summary: &SuiteSummary) -> String {
        format!(
            "{} Suite - {}: {}/{} passed ({:.1}%) in {}ms",
            summary.suite,
            summary.target,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Suite, TestCase};
    use chrono::Utc;

    fn sample_summary() -> SuiteSummary {
        SuiteSummary::new(
            Suite::Api,
            "https://api.example.com/v1",
            Utc::now(),
            vec![
                TestResult::pass(TestCase::GetUserById, 120),
                TestResult::fail(TestCase::CreateUser, 300, "Expected 201, got 500"),
                TestResult::skip(TestCase::RateLimitExceeded, "rate limit not reached"),
            ],
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("unknown"), None);
    }

    #[test]
    fn test_table_shows_failure_message() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output = formatter.format_summary(&sample_summary());

        assert!(output.contains("API Suite - https://api.example.com/v1"));
        assert!(output.contains("✗ FAIL"));
        assert!(output.contains("└─ Expected 201, got 500"));
        assert!(output.contains("Total: 3 | Pass: 1 | Fail: 1 | Skip: 1 | Error: 0"));
    }

    #[test]
    fn test_csv_output() {
        let formatter = ResultFormatter::new(OutputFormat::Csv);
        let output = formatter.format_summary(&sample_summary());
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "case,name,status,duration_ms,message");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("TC-API-003,"));
        assert!(lines[2].ends_with("\"Expected 201, got 500\""));
    }

    #[test]
    fn test_json_output_parses() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&sample_summary());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 3);
    }

    #[test]
    fn test_brief_summary() {
        let formatter = ResultFormatter::new(OutputFormat::Summary);
        let output = formatter.format_summary(&sample_summary());
        assert!(output.starts_with("API Suite - https://api.example.com/v1: 1/3 passed"));
    }
}
