//! Environment-driven configuration.
//!
//! All knobs come from environment variables (a `.env` file is honored when
//! the binary loads it via `dotenvy`). Only the extractor API key is
//! mandatory; everything else has a default.

use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Connection settings for the OpenAI-compatible extraction service.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Settings for one router instance.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub extractor: ExtractorConfig,
    /// Root directory for request-scoped upload staging.
    pub staging_dir: PathBuf,
}

impl RouterConfig {
    /// Read configuration from the environment.
    ///
    /// * `ASKROUTE_API_KEY` (falls back to `OPENAI_API_KEY`) - required
    /// * `ASKROUTE_MODEL` - extraction model name
    /// * `ASKROUTE_BASE_URL` - OpenAI-compatible endpoint base
    /// * `ASKROUTE_STAGING_DIR` - upload staging root
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ASKROUTE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| ConfigError::MissingVar("ASKROUTE_API_KEY"))?;
        let model = std::env::var("ASKROUTE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("ASKROUTE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let staging_dir = std::env::var("ASKROUTE_STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("askroute-uploads"));

        Ok(Self {
            extractor: ExtractorConfig {
                api_key,
                model,
                base_url,
            },
            staging_dir,
        })
    }
}
