//! Weather forecast demo tool
//!
//! Fetches the hourly temperature forecast from the open-meteo API and
//! reduces it to a min/max summary for one date.

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};
use tracing::debug;

use toolbridge_domain::tool::DATE_FORMAT;
use toolbridge_domain::{ParamType, Tool, ToolError, ToolParameter, ToolSignature};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DOCSTRING: &str = "\
Returns the weather and temperature forecast for a specified date

lat: Latitude for the location. ex: 37.7749
lon: Longitude for the location. ex: -122.4194
forecast_date: Date to forecast weather in YYYY-MM-DD format. ex: 2007-01-09 (defaults to current date)
";

/// `get_weather_forecast(lat: float, lon: float, forecast_date: date) -> dict`
pub struct WeatherForecastTool {
    http: reqwest::Client,
    base_url: String,
    signature: ToolSignature,
}

impl WeatherForecastTool {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            signature: ToolSignature::new("get_weather_forecast")
                .with_parameter(ToolParameter::new("lat", ParamType::Float))
                .with_parameter(ToolParameter::new("lon", ParamType::Float))
                .with_parameter(
                    ToolParameter::new("forecast_date", ParamType::Date).with_default(),
                )
                .with_return_type(),
        }
    }
}

impl Default for WeatherForecastTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WeatherForecastTool {
    fn signature(&self) -> &ToolSignature {
        &self.signature
    }

    fn docstring(&self) -> &str {
        DOCSTRING
    }

    async fn invoke(
        &self,
        arguments: &serde_json::Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let lat = number_arg(arguments, "lat")?;
        let lon = number_arg(arguments, "lon")?;
        let forecast_date = match arguments.get("forecast_date") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ToolError::InvalidArgument(format!(
                    "forecast_date must be a YYYY-MM-DD string, got {other}"
                )));
            }
            None => Local::now().format(DATE_FORMAT).to_string(),
        };

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("hourly", "temperature_2m".to_string()),
                ("start_date", forecast_date.clone()),
                ("end_date", forecast_date.clone()),
            ])
            .send()
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ToolError::UnexpectedResponse(e.to_string()))?;
        debug!(%body, "forecast response");

        summarize_hourly(&body, &forecast_date)
    }
}

/// Read a numeric argument, accepting a stringly-typed number the coercion
/// layer may have passed through.
fn number_arg(arguments: &serde_json::Map<String, Value>, name: &str) -> Result<f64, ToolError> {
    match arguments.get(name) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ToolError::InvalidArgument(format!("{name} is not a finite number"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ToolError::InvalidArgument(format!("{name} is not a number: `{s}`"))),
        Some(other) => Err(ToolError::InvalidArgument(format!(
            "{name} must be a number, got {other}"
        ))),
        None => Err(ToolError::InvalidArgument(format!(
            "missing required argument `{name}`"
        ))),
    }
}

/// Reduce the hourly temperature series to the day's min/max.
fn summarize_hourly(body: &Value, forecast_date: &str) -> Result<Value, ToolError> {
    let temperatures: Vec<f64> = body
        .pointer("/hourly/temperature_2m")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();

    if temperatures.is_empty() {
        return Err(ToolError::UnexpectedResponse(format!(
            "no hourly temperatures returned for {forecast_date}"
        )));
    }

    let min_temp = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
    let max_temp = temperatures
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(json!({
        "forecast": {
            "date": forecast_date,
            "min_temp": min_temp,
            "max_temp": max_temp,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_required_params() {
        let tool = WeatherForecastTool::new();
        assert_eq!(tool.signature().required_parameters(), vec!["lat", "lon"]);
        assert!(tool.signature().has_return_type);
    }

    #[test]
    fn test_number_arg_accepts_string_numbers() {
        let mut args = serde_json::Map::new();
        args.insert("lat".to_string(), json!("48.86"));
        args.insert("lon".to_string(), json!(2.36));

        assert_eq!(number_arg(&args, "lat").unwrap(), 48.86);
        assert_eq!(number_arg(&args, "lon").unwrap(), 2.36);
        assert!(number_arg(&args, "missing").is_err());
    }

    #[test]
    fn test_summarize_hourly() {
        let body = json!({
            "hourly": { "temperature_2m": [71.3, 69.9, 80.1, 75.0] }
        });

        let summary = summarize_hourly(&body, "2024-07-29").unwrap();
        assert_eq!(summary["forecast"]["date"], "2024-07-29");
        assert_eq!(summary["forecast"]["min_temp"], 69.9);
        assert_eq!(summary["forecast"]["max_temp"], 80.1);
    }

    #[test]
    fn test_summarize_hourly_empty_series() {
        let body = json!({ "hourly": { "temperature_2m": [] } });
        assert!(summarize_hourly(&body, "2024-07-29").is_err());

        let body = json!({ "error": true });
        assert!(summarize_hourly(&body, "2024-07-29").is_err());
    }
}
