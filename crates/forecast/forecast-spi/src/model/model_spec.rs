//! Catalog entry: a model kind with its default hyperparameters.

use serde::{Deserialize, Serialize};

use super::{Hyperparameters, ModelKind};

/// Immutable template from which model instances are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub kind: ModelKind,
    pub params: Hyperparameters,
}

impl ModelSpec {
    /// A spec with no hyperparameters.
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            params: Hyperparameters::new(),
        }
    }

    /// Builder-style hyperparameter insert.
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params = self.params.with(name, value);
        self
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}{}", self.kind, self.params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ModelSpec::new(ModelKind::Naive).to_string(), "Naive");
        let spec = ModelSpec::new(ModelKind::SeasonalNaive).with_param("season_length", 7.0);
        assert_eq!(spec.to_string(), "SeasonalNaive{season_length=7}");
    }
}
