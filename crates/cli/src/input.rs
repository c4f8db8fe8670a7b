//! Loading series and request payloads from files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context, Result};
use forecast_facade::{ForecastRequest, Horizon};
use serde_json::Value;

/// Model requested when neither the flags nor the payload name one.
pub const DEFAULT_MODEL: &str = "cv";

/// Build a forecast request from `path`.
///
/// A JSON file holding a full `{model, horizon, series}` payload is used as is,
/// with `model` and `horizon` overriding its fields. Any other file is read as a
/// bare series and `horizon` is required.
pub fn load_request(
    path: &Path,
    column: Option<&str>,
    model: Option<&str>,
    horizon: Option<usize>,
) -> Result<ForecastRequest> {
    if let Some(mut request) = load_payload(path)? {
        if let Some(model) = model {
            request.model = model.to_string();
        }
        if let Some(horizon) = horizon {
            request.horizon = Horizon::new(horizon)?;
        }
        return Ok(request);
    }

    let series = load_data(path, column)?;
    let horizon =
        horizon.context("--horizon is required unless the input is a request payload")?;
    Ok(ForecastRequest::new(
        model.unwrap_or(DEFAULT_MODEL),
        Horizon::new(horizon)?,
        series,
    ))
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn read_json(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse JSON in {}", path.display()))
}

fn load_payload(path: &Path) -> Result<Option<ForecastRequest>> {
    if extension(path) != "json" {
        return Ok(None);
    }
    let json = read_json(path)?;
    let is_payload = ["model", "horizon", "series"]
        .iter()
        .all(|key| json.get(*key).is_some());
    if !is_payload {
        return Ok(None);
    }
    Ok(Some(ForecastRequest::from_json(&json)?))
}

/// Load a series, choosing the format from the extension.
pub fn load_data(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    match extension(path).as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => load_csv_data(path, column).or_else(|_| load_json_data(path, column)),
    }
}

/// Read one column of a CSV file. Without `column`, the first column whose
/// every value is numeric is used, so `ds` or id columns are skipped.
fn load_csv_data(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read CSV records")?;

    let idx = match column {
        Some(col) => col
            .parse::<usize>()
            .ok()
            .filter(|&i| i < headers.len())
            .or_else(|| headers.iter().position(|h| h == col))
            .ok_or_else(|| anyhow!("column '{}' not found", col))?,
        None => (0..headers.len())
            .find(|&i| {
                rows.iter()
                    .all(|row| row.get(i).map_or(false, |v| v.trim().parse::<f64>().is_ok()))
            })
            .ok_or_else(|| anyhow!("no numeric column in {}", path.display()))?,
    };

    let data: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(idx))
        .filter_map(|v| v.trim().parse().ok())
        .collect();
    ensure!(!data.is_empty(), "no numeric data found in the selected column");
    Ok(data)
}

fn load_json_data(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let json = read_json(path)?;

    if let Some(arr) = json.as_array() {
        if arr.iter().all(Value::is_number) {
            return Ok(arr.iter().filter_map(Value::as_f64).collect());
        }

        let keys: Vec<&str> = match column {
            Some(col) => vec![col],
            None => vec!["value", "values", "y"],
        };
        for key in keys {
            let data: Vec<f64> = arr
                .iter()
                .filter_map(|obj| obj.get(key).and_then(Value::as_f64))
                .collect();
            if !data.is_empty() {
                return Ok(data);
            }
        }
    }

    if let Some(obj) = json.as_object() {
        for key in ["series", "data", "values", "y"] {
            if let Some(arr) = obj.get(key).and_then(Value::as_array) {
                let data: Vec<f64> = arr.iter().filter_map(Value::as_f64).collect();
                if !data.is_empty() {
                    return Ok(data);
                }
            }
        }
    }

    bail!("could not extract numeric data from {}", path.display())
}
