//! Loading manual and wearable log rows from disk
//!
//! Rows come either as CSV with a header row (an empty cell means the value
//! is absent) or as a JSON array of objects. The format is picked from the
//! file extension.

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use crate::error::{ImportError, Result};
use crate::models::{AutomaticLog, ManualLog};

/// Supported log file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFileFormat {
    Csv,
    Json,
}

impl LogFileFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> std::result::Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(LogFileFormat::Csv),
            "json" => Ok(LogFileFormat::Json),
            other => Err(ImportError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Reader for daily log files
pub struct LogImporter;

impl LogImporter {
    /// Load every row of `path` as `T`
    pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let rows = match LogFileFormat::from_path(path)? {
            LogFileFormat::Csv => Self::load_csv(path)?,
            LogFileFormat::Json => Self::load_json(path)?,
        };

        info!(path = %path.display(), rows = rows.len(), "Loaded log rows");
        Ok(rows)
    }

    fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let parse_error = |reason: String| ImportError::ParseError {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| parse_error(e.to_string()))?;

        let mut rows = Vec::new();
        for (line, record) in reader.deserialize().enumerate() {
            // +2: header row and 1-based numbering
            let row: T = record.map_err(|e| parse_error(format!("row {}: {}", line + 2, e)))?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let file = File::open(path)?;
        let rows: Vec<T> =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| ImportError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(rows)
    }
}

/// Load self-reported log rows
pub fn load_manual_logs(path: &Path) -> Result<Vec<ManualLog>> {
    LogImporter::load(path)
}

/// Load wearable log rows
pub fn load_automatic_logs(path: &Path) -> Result<Vec<AutomaticLog>> {
    LogImporter::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecoveryRsError;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            LogFileFormat::from_path(Path::new("logs.CSV")).unwrap(),
            LogFileFormat::Csv
        );
        assert_eq!(
            LogFileFormat::from_path(Path::new("logs.json")).unwrap(),
            LogFileFormat::Json
        );
        assert!(matches!(
            LogFileFormat::from_path(Path::new("logs.xlsx")),
            Err(ImportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_manual_csv_with_empty_cells() {
        let file = temp_file(
            ".csv",
            "date,sleep_hours,stress_level,energy_focus,trained_today\n\
             2024-10-01,7.5,30,4,true\n\
             2024-10-02,,45,,\n",
        );

        let rows = load_manual_logs(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(rows[0].sleep_hours, Some(7.5));
        assert_eq!(rows[0].trained_today, Some(true));
        assert_eq!(rows[1].sleep_hours, None);
        assert_eq!(rows[1].stress_level, Some(45));
        assert_eq!(rows[1].energy_focus, None);
    }

    #[test]
    fn test_automatic_json() {
        let file = temp_file(
            ".json",
            r#"[
                {"date": "2024-10-01", "sleep_minutes": 420, "steps": 9000, "resting_hr": 54.0, "hrv_ms": 61.5},
                {"date": "2024-10-02", "steps": 3100}
            ]"#,
        );

        let rows = load_automatic_logs(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sleep_minutes, Some(420));
        assert_eq!(rows[0].hrv_ms, Some(61.5));
        assert_eq!(rows[1].sleep_minutes, None);
        assert_eq!(rows[1].steps, Some(3100));
    }

    #[test]
    fn test_bad_csv_row_reports_line() {
        let file = temp_file(
            ".csv",
            "date,sleep_hours,stress_level,energy_focus,trained_today\n\
             not-a-date,7,10,3,false\n",
        );

        match load_manual_logs(file.path()) {
            Err(RecoveryRsError::Import(ImportError::ParseError { reason, .. })) => {
                assert!(reason.contains("row 2"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = load_manual_logs(Path::new("/nonexistent/manual.csv"));
        assert!(matches!(
            result,
            Err(RecoveryRsError::Import(ImportError::FileNotFound { .. }))
        ));
    }
}
