//! `forecast`: run one request locally, without the server

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use forecast_facade::{
    BacktestOutcome, ForecastConfig, ForecastRequest, ForecastResponse, ForecastService,
};

pub fn run(request: ForecastRequest, parallel: bool, output: Option<&Path>) -> Result<()> {
    let config = ForecastConfig::from_env();
    let config = if parallel {
        config.parallel_backtest(true)
    } else {
        config
    };
    let service = ForecastService::new(config);

    println!(
        "Forecasting {} steps from {} observations (model '{}')",
        request.horizon,
        request.series.len(),
        request.model
    );
    let outcome = service.forecast(&request)?;

    if let Some(backtest) = &outcome.telemetry.backtest {
        print!("{}", backtest_summary(backtest));
    }
    println!("Model: {}", outcome.result.model);
    for (i, value) in outcome.result.predictions.iter().enumerate() {
        println!("  Step {}: {:.4}", i + 1, value);
    }

    let response = ForecastResponse::from(outcome.result);
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &response)?;
            println!("Forecast written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

/// One line per candidate in catalog order, champion starred.
pub fn backtest_summary(outcome: &BacktestOutcome) -> String {
    let mut out = format!(
        "Backtest (train {}, holdout {}):\n",
        outcome.train_len, outcome.holdout_len
    );
    for report in &outcome.candidates {
        let name = report.kind.name();
        let line = match (&report.mse, &report.error) {
            (Some(mse), _) => {
                let marker = if report.kind == outcome.champion { " *" } else { "" };
                format!("  {:<16} {:>14.4}{}\n", name, mse, marker)
            }
            (None, Some(error)) => format!("  {:<16} failed: {}\n", name, error),
            (None, None) => format!("  {:<16} failed\n", name),
        };
        out.push_str(&line);
    }
    out
}
