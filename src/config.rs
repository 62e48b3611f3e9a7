use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB v3 API key
    #[serde(default)]
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language passed to the discovery endpoint
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Number of consecutive discovery pages sampled per mood
    #[serde(default = "default_sample_size")]
    pub sample_size: u32,

    /// Base URL for poster and avatar images
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Base URL for embedded trailers
    #[serde(default = "default_trailer_base_url")]
    pub trailer_base_url: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "tr-TR".to_string()
}

fn default_sample_size() -> u32 {
    5
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_trailer_base_url() -> String {
    "https://www.youtube.com/embed".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails fast when the API key is absent: no upstream call can succeed
    /// without it.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::InvalidInput(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants `from_env` cannot express through serde defaults
    pub fn validate(&self) -> AppResult<()> {
        if self.tmdb_api_key.trim().is_empty() {
            return Err(AppError::ConfigurationMissing(
                "TMDB_API_KEY is not set".to_string(),
            ));
        }

        if self.sample_size == 0 {
            return Err(AppError::InvalidInput(
                "SAMPLE_SIZE must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
