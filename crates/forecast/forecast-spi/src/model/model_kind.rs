//! Model kind identifiers.

use serde::{Deserialize, Serialize};

/// Explicit tag for every algorithm the catalog can hold.
///
/// The tag, not the concrete predictor type, is what gets reported back as
/// the response model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "AutoARIMA")]
    AutoArima,
    SimpleExponentialSmoothing,
    Theta,
    #[serde(rename = "AutoETS")]
    AutoEts,
    #[serde(rename = "AutoCES")]
    AutoCes,
    AutoTheta,
    Naive,
    SeasonalNaive,
    WindowAverage,
    #[serde(rename = "ADIDA")]
    Adida,
}

impl ModelKind {
    /// Every kind, in default catalog order.
    pub const ALL: [ModelKind; 10] = [
        ModelKind::AutoArima,
        ModelKind::SimpleExponentialSmoothing,
        ModelKind::Theta,
        ModelKind::AutoEts,
        ModelKind::AutoCes,
        ModelKind::AutoTheta,
        ModelKind::Naive,
        ModelKind::SeasonalNaive,
        ModelKind::WindowAverage,
        ModelKind::Adida,
    ];

    /// Canonical identifier, as reported in responses.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::AutoArima => "AutoARIMA",
            ModelKind::SimpleExponentialSmoothing => "SimpleExponentialSmoothing",
            ModelKind::Theta => "Theta",
            ModelKind::AutoEts => "AutoETS",
            ModelKind::AutoCes => "AutoCES",
            ModelKind::AutoTheta => "AutoTheta",
            ModelKind::Naive => "Naive",
            ModelKind::SeasonalNaive => "SeasonalNaive",
            ModelKind::WindowAverage => "WindowAverage",
            ModelKind::Adida => "ADIDA",
        }
    }

    /// Case-insensitive exact match on the identifier.
    pub fn from_name(name: &str) -> Option<ModelKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Hyperparameter keys the kind accepts.
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::SimpleExponentialSmoothing => &["alpha"],
            ModelKind::SeasonalNaive => &["season_length"],
            ModelKind::WindowAverage => &["window_size"],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
