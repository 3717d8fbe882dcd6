//! Configuration management for the NOVA career analyzer

use crate::error::{NovaError, Result};
use crate::processing::roadmap::Timeframe;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const OPENAI_KEY_PLACEHOLDER: &str = "your-openai-api-key-here";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub services: ServiceConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub openai_base_url: String,
    pub analysis_model: String,
    pub roadmap_model: String,
    pub job_api_base_url: String,
    pub job_api_host: String,
    pub telegram_api_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Hourly rate used when none is given on the command line
    pub default_target_salary: f64,
    pub default_timeframe: Timeframe,
    pub max_job_matches: usize,
    pub job_location: String,
    /// Artificial delay applied to mock analysis, in milliseconds
    pub mock_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServiceConfig {
                openai_base_url: "https://api.openai.com/v1".to_string(),
                analysis_model: "gpt-4-turbo-preview".to_string(),
                roadmap_model: "gpt-4".to_string(),
                job_api_base_url: "https://jobs-api14.p.rapidapi.com".to_string(),
                job_api_host: "jobs-api14.p.rapidapi.com".to_string(),
                telegram_api_url: "https://api.telegram.org".to_string(),
                request_timeout_secs: 60,
            },
            analysis: AnalysisConfig {
                default_target_salary: 75.0,
                default_timeframe: Timeframe::SixMonth,
                max_job_matches: 3,
                job_location: "remote".to_string(),
                mock_delay_ms: 0,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, creating it with defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| NovaError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NovaError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("nova")
            .join("config.toml")
    }
}

/// API credentials, read from the environment only
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub rapidapi_key: Option<String>,
    pub telegram_bot_token: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment, loading `.env` first if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            rapidapi_key: non_empty_var("RAPIDAPI_KEY"),
            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
        }
    }

    /// No credentials at all; every service takes its mock path
    pub fn offline() -> Self {
        Self::default()
    }

    /// The OpenAI key, if it looks like a real one
    pub fn usable_openai_key(&self) -> Option<&str> {
        match self.openai_api_key.as_deref() {
            Some(key) if is_usable_openai_key(key) => Some(key),
            Some(_) => {
                warn!("OpenAI API key not properly configured. Using mock analysis.");
                None
            }
            None => None,
        }
    }
}

pub fn is_usable_openai_key(key: &str) -> bool {
    !key.is_empty() && key != OPENAI_KEY_PLACEHOLDER && key.starts_with("sk-")
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_key_validation() {
        assert!(is_usable_openai_key("sk-abc123"));
        assert!(!is_usable_openai_key(""));
        assert!(!is_usable_openai_key(OPENAI_KEY_PLACEHOLDER));
        assert!(!is_usable_openai_key("pk-abc123"));
    }

    #[test]
    fn test_offline_credentials_have_no_keys() {
        let creds = Credentials::offline();
        assert!(creds.usable_openai_key().is_none());
        assert!(creds.rapidapi_key.is_none());
        assert!(creds.telegram_bot_token.is_none());
    }

    #[test]
    fn test_config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.analysis.max_job_matches, 3);

        let mut changed = created.clone();
        changed.analysis.default_target_salary = 90.0;
        changed.output.format = OutputFormat::Markdown;
        changed.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.analysis.default_target_salary, 90.0);
        assert_eq!(reloaded.output.format, OutputFormat::Markdown);
        assert_eq!(reloaded.analysis.default_timeframe, Timeframe::SixMonth);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, NovaError::Configuration(_)));
    }
}
