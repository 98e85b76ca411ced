use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::analysis::openai::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::clustering::DEFAULT_SIMILARITY_THRESHOLD;
use crate::output::DEFAULT_MIN_FREQUENCY;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded at startup via
/// dotenvy; CLI flags override the numeric settings per run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completions API key (OPENAI_API_KEY). Only `analyze` needs it.
    pub api_key: String,
    /// API base URL, without the `/chat/completions` suffix
    pub api_url: String,
    pub model: String,
    /// Clustering threshold in [0, 100]
    pub similarity_threshold: f64,
    /// Report cutoff on aggregate frequency (inclusive)
    pub min_frequency: u64,
    /// Where report CSVs are written
    pub output_dir: PathBuf,
    /// Pacing for API calls; 0 disables it
    pub requests_per_second: f64,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any variable lookup.
    ///
    /// Unset or empty variables take their defaults; set but unparseable
    /// numeric values are an error naming the variable.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            api_key: get("OPENAI_API_KEY").unwrap_or_default(),
            api_url: get("LITSYNTH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: get("LITSYNTH_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            similarity_threshold: parse_var(
                "LITSYNTH_SIMILARITY_THRESHOLD",
                get("LITSYNTH_SIMILARITY_THRESHOLD"),
                DEFAULT_SIMILARITY_THRESHOLD,
            )?,
            min_frequency: parse_var(
                "LITSYNTH_MIN_FREQUENCY",
                get("LITSYNTH_MIN_FREQUENCY"),
                DEFAULT_MIN_FREQUENCY,
            )?,
            output_dir: get("LITSYNTH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            requests_per_second: parse_var(
                "LITSYNTH_REQUESTS_PER_SECOND",
                get("LITSYNTH_REQUESTS_PER_SECOND"),
                1.0,
            )?,
        };

        if !(0.0..=100.0).contains(&config.similarity_threshold) {
            anyhow::bail!(
                "LITSYNTH_SIMILARITY_THRESHOLD must be between 0 and 100, got {}",
                config.similarity_threshold
            );
        }

        Ok(config)
    }

    /// Check that the API key is configured.
    /// Call this before any operation that talks to the language model.
    pub fn require_api_key(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!(
                "OPENAI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: {value:?}")),
    }
}
