//! `analyze-logs`: access-log records as a table and CSV

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use forecast_facade::telemetry::{parse_log, write_csv, CSV_HEADER};
use forecast_facade::RequestRecord;

pub fn run(log: &Path, csv_out: Option<&Path>) -> Result<()> {
    let file = File::open(log).with_context(|| format!("failed to open {}", log.display()))?;
    let records = parse_log(BufReader::new(file))
        .with_context(|| format!("failed to read {}", log.display()))?;

    if records.is_empty() {
        println!("No relevant logs found.");
        return Ok(());
    }

    print!("{}", render_table(&records));

    if let Some(path) = csv_out {
        let out =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        write_csv(&records, out)?;
        println!("{} records written to {}", records.len(), path.display());
    }

    Ok(())
}

/// Bordered table with one row per record.
pub fn render_table(records: &[RequestRecord]) -> String {
    let rows: Vec<[String; 8]> = records.iter().map(RequestRecord::csv_row).collect();

    let mut widths = CSV_HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+\n", border);

    let mut table = border.clone();
    table.push_str(&table_line(CSV_HEADER.iter().copied(), &widths));
    table.push_str(&border);
    for row in &rows {
        table.push_str(&table_line(row.iter().map(String::as_str), &widths));
    }
    table.push_str(&border);
    table
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let body = cells
        .zip(widths)
        .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
        .collect::<Vec<_>>()
        .join("|");
    format!("|{}|\n", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const LOG: &str = "\
[2024-05-02 10:00:00 +0000] [42] [INFO] Booting worker
Timestamp: 2024-05-02 10:00:01 - Method: POST - Endpoint: forecast - Duration (s) 1.25 - Data Length: 100 - Horizon: 10 - Model: cv -> AutoETS
Timestamp: 2024-05-02 10:00:03 - Method: POST - Endpoint: forecast - Duration (s) 0.02 - Data Length: 100 - Horizon: 10 - Model: fast -> AutoARIMA
";

    #[test]
    fn test_render_table() {
        let records = parse_log(LOG.as_bytes()).unwrap();
        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), records.len() + 4);
        assert!(lines[1].contains("request_model"));
        assert!(lines[3].contains("AutoETS"));
        assert!(lines[4].contains("0.02"));
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_run_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("access.log");
        let out = dir.path().join("logs.csv");
        fs::write(&log, LOG).unwrap();

        run(&log, Some(&out)).unwrap();

        let csv = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(
            lines[1],
            "2024-05-02 10:00:01,POST,forecast,1.25,100,10,cv,AutoETS"
        );
    }

    #[test]
    fn test_run_without_records() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("access.log");
        let out = dir.path().join("logs.csv");
        fs::write(&log, "nothing to see\n").unwrap();

        run(&log, Some(&out)).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("absent.log"), None).is_err());
    }
}
