//! Tool implementations

pub mod weather;

pub use weather::WeatherForecastTool;
