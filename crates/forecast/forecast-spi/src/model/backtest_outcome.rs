//! Backtest scoring table.

use serde::{Deserialize, Serialize};

use super::ModelKind;

/// Score of one catalog entry against the holdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub kind: ModelKind,
    /// Holdout MSE; `None` when the candidate failed
    pub mse: Option<f64>,
    /// Failure message of an isolated candidate
    pub error: Option<String>,
}

impl CandidateReport {
    pub fn scored(kind: ModelKind, mse: f64) -> Self {
        Self {
            kind,
            mse: Some(mse),
            error: None,
        }
    }

    pub fn failed(kind: ModelKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            mse: None,
            error: Some(error.into()),
        }
    }

    /// Score used for ranking; failures rank last.
    pub fn score(&self) -> f64 {
        self.mse.unwrap_or(f64::INFINITY)
    }
}

/// Every candidate's score in catalog order, plus the selected champion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutcome {
    pub train_len: usize,
    pub holdout_len: usize,
    pub candidates: Vec<CandidateReport>,
    pub champion: ModelKind,
    pub champion_mse: f64,
}

impl BacktestOutcome {
    /// Candidates that failed and were excluded from selection.
    pub fn failures(&self) -> impl Iterator<Item = &CandidateReport> {
        self.candidates.iter().filter(|c| c.mse.is_none())
    }

    /// Report for a given kind, if it was evaluated.
    pub fn report(&self, kind: ModelKind) -> Option<&CandidateReport> {
        self.candidates.iter().find(|c| c.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> BacktestOutcome {
        BacktestOutcome {
            train_len: 7,
            holdout_len: 3,
            candidates: vec![
                CandidateReport::scored(ModelKind::AutoArima, 0.0),
                CandidateReport::failed(ModelKind::SeasonalNaive, "too short"),
                CandidateReport::scored(ModelKind::Naive, 5.0),
            ],
            champion: ModelKind::AutoArima,
            champion_mse: 0.0,
        }
    }

    #[test]
    fn test_failed_candidates_rank_last() {
        let failed = CandidateReport::failed(ModelKind::AutoCes, "diverged");
        assert_eq!(failed.score(), f64::INFINITY);
        assert_eq!(CandidateReport::scored(ModelKind::Naive, 2.5).score(), 2.5);
    }

    #[test]
    fn test_failures_and_lookup() {
        let outcome = outcome();
        let failures: Vec<_> = outcome.failures().map(|c| c.kind).collect();
        assert_eq!(failures, vec![ModelKind::SeasonalNaive]);
        assert_eq!(outcome.report(ModelKind::Naive).and_then(|c| c.mse), Some(5.0));
        assert!(outcome.report(ModelKind::Theta).is_none());
    }
}
