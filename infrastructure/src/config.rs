//! Configuration loading
//!
//! Merges configuration from multiple sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. Global config: `~/.config/toolbridge/config.toml` (XDG aware)
//! 3. Project root: `./toolbridge.toml`
//! 4. Environment: `TOOLBRIDGE_*` variables (`__` separates sections,
//!    e.g. `TOOLBRIDGE_ENDPOINT__MODEL`)
//! 5. `--config <path>` specified file
//!
//! The API key additionally falls back to the `GROQ_API_KEY` environment
//! variable when no source provides one.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Chat completions URL
    pub url: String,
    /// Model answering the conversation
    pub model: String,
    /// Model used for docstring extraction
    pub extractor_model: String,
    /// Sampling temperature for both models
    pub temperature: f64,
    /// Bearer token; falls back to `GROQ_API_KEY`
    pub api_key: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
            extractor_model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.1,
            api_key: None,
        }
    }
}

/// Dispatch loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Bound on consecutive tool turns per conversation
    pub max_turns: usize,
    /// Per-call deadline for endpoint sends and tool invocations
    pub request_timeout_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_turns: 8,
            request_timeout_secs: 60,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub dispatch: DispatchConfig,
}

/// Configuration loader handling file discovery and merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority.
    pub fn load(config_path: Option<&PathBuf>) -> Result<AppConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = PathBuf::from("toolbridge.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        figment = figment.merge(Env::prefixed("TOOLBRIDGE_").split("__"));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        let mut config: AppConfig = figment.extract().map_err(Box::new)?;
        if config.endpoint.api_key.is_none() {
            config.endpoint.api_key = std::env::var("GROQ_API_KEY").ok();
        }
        Ok(config)
    }

    /// The global config file path (XDG aware).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("toolbridge").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.endpoint.url,
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(config.endpoint.temperature, 0.1);
        assert_eq!(config.dispatch.max_turns, 8);
        assert_eq!(config.dispatch.request_timeout_secs, 60);
        assert!(config.endpoint.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_merges_over_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(figment::providers::Toml::string(
                r#"
                [endpoint]
                model = "llama-3.3-70b-versatile"

                [dispatch]
                max_turns = 3
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.endpoint.model, "llama-3.3-70b-versatile");
        // Untouched fields keep their defaults
        assert_eq!(config.endpoint.extractor_model, "llama-3.1-8b-instant");
        assert_eq!(config.dispatch.max_turns, 3);
        assert_eq!(config.dispatch.request_timeout_secs, 60);
    }
}
