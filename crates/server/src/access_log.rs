//! Append-only access log of request records

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use forecast_facade::RequestRecord;

pub struct AccessLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AccessLog {
    /// Open `path` for appending, creating missing parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line.
    pub fn write(&self, record: &RequestRecord) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "access log lock poisoned"))?;
        writeln!(file, "{}", record)?;
        file.flush()
    }
}

impl std::fmt::Debug for AccessLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLog").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_facade::telemetry::parse_log;
    use forecast_facade::ForecastTelemetry;
    use std::io::BufReader;

    fn record(model: &str) -> RequestRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let telemetry = ForecastTelemetry {
            series_len: 12,
            horizon: 3,
            requested_model: model.to_string(),
            response_model: Some("Naive".to_string()),
            backtest: None,
        };
        RequestRecord::forecast(timestamp, "POST", "/forecast", 0.05, &telemetry)
    }

    #[test]
    fn test_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("access.log");

        let log = AccessLog::open(&path).unwrap();
        log.write(&record("naive")).unwrap();
        drop(log);

        // Reopening appends rather than truncating
        let log = AccessLog::open(&path).unwrap();
        log.write(&record("cv")).unwrap();
        assert_eq!(log.path(), path.as_path());

        let records = parse_log(BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].request_model, "naive");
        assert_eq!(records[1].request_model, "cv");
    }
}
