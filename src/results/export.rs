//! Machine-readable export of suite runs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::models::SuiteSummary;

/// Export format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_str)
    }
}

/// Export a run, choosing the format from the file extension
pub fn export_summary(summary: &SuiteSummary, path: &Path) -> Result<()> {
    let Some(format) = ExportFormat::from_extension(path) else {
        bail!(
            "Cannot infer export format from {} (use .json or .csv)",
            path.display()
        );
    };
    export_as(summary, path, format)
}

pub fn export_as(summary: &SuiteSummary, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Json => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(summary, file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;

            writer.write_record([
                "run_id",
                "suite",
                "case",
                "variant",
                "name",
                "category",
                "status",
                "duration_ms",
                "message",
            ])?;

            for result in &summary.results {
                writer.write_record([
                    summary.id.clone(),
                    summary.suite.name().to_string(),
                    result.test_case.code().to_string(),
                    result.variant.clone().unwrap_or_default(),
                    result.test_case.name().to_string(),
                    result.test_case.category().to_string(),
                    result.status.to_string(),
                    result.duration_ms.to_string(),
                    result.message.clone().unwrap_or_default(),
                ])?;
            }
            writer.flush()?;
        }
    }

    info!("Exported results to {}", path.display());
    Ok(())
}

/// Write pretty JSON through a buffer, surfacing flush errors
fn write_json(summary: &SuiteSummary, sink: impl Write) -> Result<()> {
    let mut writer = BufWriter::new(sink);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Suite, TestCase, TestResult};
    use chrono::Utc;

    fn sample_summary() -> SuiteSummary {
        SuiteSummary::new(
            Suite::Ui,
            "https://qa.example.com",
            Utc::now(),
            vec![
                TestResult::pass(TestCase::ValidLogin, 900),
                TestResult::fail(
                    TestCase::MultipleInvalidInputs,
                    400,
                    "Logged in with invalid inputs: test/short",
                )
                .with_variant(Some("username=\"test\" password=\"short\"".into())),
            ],
        )
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!(ExportFormat::from_str("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_str("csv"), Some(ExportFormat::Csv));
        assert!(ExportFormat::from_str("xml").is_none());
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        export_summary(&sample_summary(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["suite"], "ui");
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_export_csv_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");

        export_summary(&sample_summary(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "TC-AUTH-DDT");
        assert_eq!(&rows[1][3], "username=\"test\" password=\"short\"");
        assert_eq!(&rows[1][6], "FAIL");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.xml");
        assert!(export_summary(&sample_summary(), &path).is_err());
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_write_errors_surface() {
        let err = write_json(&sample_summary(), FullDisk).unwrap_err();
        assert!(err.to_string().contains("no space left"));

        let mut buffer = Vec::new();
        write_json(&sample_summary(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["target"], "https://qa.example.com");
    }
}
