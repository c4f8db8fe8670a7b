//! Per-request telemetry
//!
//! [`ForecastTelemetry`] is what the forecasting pipeline surfaces about a
//! request. The serving layer turns it into a [`RequestRecord`], whose text
//! form is one access-log line:
//!
//! ```text
//! Timestamp: 2024-01-31 12:00:00 - Method: POST - Endpoint: forecast - Duration (s) 0.42 - Data Length: 100 - Horizon: 10 - Model: cv -> AutoARIMA
//! ```
//!
//! [`RequestRecord::parse_line`] reads such lines back for offline analysis.

use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use forecast_spi::BacktestOutcome;

use crate::request::ForecastRequest;

/// Timestamp layout of a record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder for a missing model name.
pub const NO_MODEL: &str = "none";

/// CSV header written by [`write_csv`].
pub const CSV_HEADER: [&str; 8] = [
    "timestamp",
    "method",
    "endpoint",
    "time_taken",
    "data_length",
    "horizon",
    "request_model",
    "response_model",
];

const RECORD_PATTERN: &str = r".*Timestamp: (\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) - Method: (\w+) - Endpoint: (\w+) - Duration \(s\) (\d+\.\d+) - Data Length: (\d+) - Horizon: (\d+) - Model: (\w+) -> (\w+)";

fn record_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RECORD_PATTERN).expect("record pattern is valid"))
}

/// Fields the forecasting pipeline surfaces for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTelemetry {
    pub series_len: usize,
    pub horizon: usize,
    /// Model name as requested
    pub requested_model: String,
    /// Kind that produced the forecast; `None` when the request failed
    pub response_model: Option<String>,
    /// Scoring table, when automatic selection ran
    pub backtest: Option<BacktestOutcome>,
}

impl ForecastTelemetry {
    /// Telemetry for a parsed request that did not produce a forecast.
    pub fn for_request(request: &ForecastRequest) -> Self {
        Self {
            series_len: request.series.len(),
            horizon: request.horizon.get(),
            requested_model: request.model.clone(),
            response_model: None,
            backtest: None,
        }
    }

    /// Telemetry for a body that could not be parsed at all.
    pub fn rejected() -> Self {
        Self {
            series_len: 0,
            horizon: 0,
            requested_model: String::new(),
            response_model: None,
            backtest: None,
        }
    }
}

/// One access-log entry
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub timestamp: NaiveDateTime,
    pub method: String,
    /// Request path without its leading slash
    pub endpoint: String,
    pub duration_secs: f64,
    pub data_length: usize,
    pub horizon: usize,
    pub request_model: String,
    pub response_model: String,
}

impl RequestRecord {
    /// Record for a forecast request.
    pub fn forecast(
        timestamp: NaiveDateTime,
        method: &str,
        path: &str,
        duration_secs: f64,
        telemetry: &ForecastTelemetry,
    ) -> Self {
        Self {
            timestamp,
            method: method.to_string(),
            endpoint: path.trim_start_matches('/').to_string(),
            duration_secs,
            data_length: telemetry.series_len,
            horizon: telemetry.horizon,
            request_model: log_token(&telemetry.requested_model),
            response_model: telemetry
                .response_model
                .as_deref()
                .map(log_token)
                .unwrap_or_else(|| NO_MODEL.to_string()),
        }
    }

    /// Parse a record out of a log line; prefixes before `Timestamp:` are
    /// ignored.
    pub fn parse_line(line: &str) -> Option<Self> {
        let caps = record_regex().captures(line)?;
        Some(Self {
            timestamp: NaiveDateTime::parse_from_str(&caps[1], TIMESTAMP_FORMAT).ok()?,
            method: caps[2].to_string(),
            endpoint: caps[3].to_string(),
            duration_secs: caps[4].parse().ok()?,
            data_length: caps[5].parse().ok()?,
            horizon: caps[6].parse().ok()?,
            request_model: caps[7].to_string(),
            response_model: caps[8].to_string(),
        })
    }

    /// Column values in [`CSV_HEADER`] order.
    pub fn csv_row(&self) -> [String; 8] {
        [
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.method.clone(),
            self.endpoint.clone(),
            format!("{:.2}", self.duration_secs),
            self.data_length.to_string(),
            self.horizon.to_string(),
            self.request_model.clone(),
            self.response_model.clone(),
        ]
    }
}

impl std::fmt::Display for RequestRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Timestamp: {} - Method: {} - Endpoint: {} - Duration (s) {:.2} - Data Length: {} - Horizon: {} - Model: {} -> {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.method,
            self.endpoint,
            self.duration_secs,
            self.data_length,
            self.horizon,
            self.request_model,
            self.response_model,
        )
    }
}

/// Model names as single word tokens: empty names become [`NO_MODEL`],
/// other non-word characters become `_`.
fn log_token(name: &str) -> String {
    if name.is_empty() {
        return NO_MODEL.to_string();
    }
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Collect every record in a log, skipping unrelated lines. Lines that are
/// not valid UTF-8 are decoded lossily rather than ending the scan.
pub fn parse_log<R: BufRead>(mut reader: R) -> io::Result<Vec<RequestRecord>> {
    let mut records = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some(record) = RequestRecord::parse_line(line.trim_end_matches(['\n', '\r'])) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Write records as CSV with a [`CSV_HEADER`] row.
pub fn write_csv<W: Write>(records: &[RequestRecord], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record(record.csv_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}
