//! Inbound forecast request.

use serde::Serialize;
use serde_json::Value;

use forecast_spi::{ForecastError, Horizon, Result, Series};

use crate::MAX_HORIZON;

/// A validated `{ model, horizon, series }` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    /// Requested model name as sent; resolution lowercases it
    pub model: String,
    pub horizon: Horizon,
    pub series: Series,
}

impl ForecastRequest {
    pub fn new(model: impl Into<String>, horizon: Horizon, series: impl Into<Series>) -> Self {
        Self {
            model: model.into(),
            horizon,
            series: series.into(),
        }
    }

    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ForecastError::InvalidInput(format!("malformed JSON body: {}", e)))?;
        Self::from_json(&value)
    }

    /// Validate a decoded JSON body.
    ///
    /// Every missing or wrong-typed field is `InvalidInput`, as is a horizon
    /// above [`MAX_HORIZON`].
    pub fn from_json(value: &Value) -> Result<Self> {
        let body = value
            .as_object()
            .ok_or_else(|| invalid("request body must be a JSON object"))?;

        let model = match body.get("model") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(invalid("field 'model' must be a string")),
            None => return Err(invalid("missing field 'model'")),
        };

        let horizon = match body.get("horizon") {
            Some(v) => v
                .as_u64()
                .filter(|h| *h >= 1)
                .ok_or_else(|| invalid("field 'horizon' must be a positive integer"))?,
            None => return Err(invalid("missing field 'horizon'")),
        };
        let horizon = usize::try_from(horizon)
            .ok()
            .filter(|h| *h <= MAX_HORIZON)
            .ok_or_else(|| {
                invalid(format!("field 'horizon' must not exceed {}", MAX_HORIZON))
            })
            .and_then(Horizon::new)?;

        let values = match body.get("series") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.as_f64().filter(|v| v.is_finite()).ok_or_else(|| {
                        invalid(format!("series[{}] must be a finite number", i))
                    })
                })
                .collect::<Result<Vec<f64>>>()?,
            Some(_) => return Err(invalid("field 'series' must be an array of numbers")),
            None => return Err(invalid("missing field 'series'")),
        };

        Ok(Self {
            model,
            horizon,
            series: Series::new(values),
        })
    }

    /// Serialized body, as accepted by [`ForecastRequest::from_slice`].
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "model": self.model,
            "horizon": self.horizon.get(),
            "series": self.series.values(),
        })
    }
}

fn invalid(message: impl Into<String>) -> ForecastError {
    ForecastError::InvalidInput(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_invalid(value: Value) {
        let result = ForecastRequest::from_json(&value);
        assert!(
            matches!(result, Err(ForecastError::InvalidInput(_))),
            "expected InvalidInput for {}, got {:?}",
            value,
            result
        );
    }

    #[test]
    fn test_parse_valid_request() {
        let request = ForecastRequest::from_json(&json!({
            "model": "AutoARIMA",
            "horizon": 3,
            "series": [1, 2.5, 3]
        }))
        .unwrap();

        assert_eq!(request.model, "AutoARIMA");
        assert_eq!(request.horizon.get(), 3);
        assert_eq!(request.series.values(), &[1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_horizon_limit() {
        let at_limit = ForecastRequest::from_json(&json!({
            "model": "naive",
            "horizon": MAX_HORIZON,
            "series": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(at_limit.horizon.get(), MAX_HORIZON);

        assert_invalid(json!({"model": "naive", "horizon": MAX_HORIZON + 1, "series": [1, 2, 3]}));
        let err = ForecastRequest::from_slice(
            br#"{"model":"naive","horizon":100000000000000,"series":[1,2,3]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_fields() {
        assert_invalid(json!({"horizon": 3, "series": [1]}));
        assert_invalid(json!({"model": "cv", "series": [1]}));
        assert_invalid(json!({"model": "cv", "horizon": 3}));
    }

    #[test]
    fn test_wrong_types() {
        assert_invalid(json!([1, 2, 3]));
        assert_invalid(json!({"model": 5, "horizon": 3, "series": [1]}));
        assert_invalid(json!({"model": "cv", "horizon": "3", "series": [1]}));
        assert_invalid(json!({"model": "cv", "horizon": 2.5, "series": [1]}));
        assert_invalid(json!({"model": "cv", "horizon": 3, "series": "1,2"}));
        assert_invalid(json!({"model": "cv", "horizon": 3, "series": [1, "x"]}));
        assert_invalid(json!({"model": "cv", "horizon": 3, "series": [1, null]}));
    }

    #[test]
    fn test_horizon_must_be_positive() {
        assert_invalid(json!({"model": "cv", "horizon": 0, "series": [1]}));
        assert_invalid(json!({"model": "cv", "horizon": -2, "series": [1]}));
    }

    #[test]
    fn test_malformed_body() {
        let result = ForecastRequest::from_slice(b"{\"model\": ");
        assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_series_is_accepted_by_parser() {
        let request =
            ForecastRequest::from_slice(br#"{"model": "", "horizon": 1, "series": []}"#).unwrap();
        assert!(request.series.is_empty());
    }

    #[test]
    fn test_to_json_parses_back() {
        let request = ForecastRequest::new("fast", Horizon::new(2).unwrap(), vec![1.0, 2.0]);
        let body = serde_json::to_vec(&request.to_json()).unwrap();
        assert_eq!(ForecastRequest::from_slice(&body).unwrap(), request);
    }
}
