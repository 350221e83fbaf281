// src/config.rs
//! Configuration: optional `config.yaml` with one section per environment,
//! built-in defaults for anything missing, credentials from the environment.

use crate::job_scraping::RuleTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
const CONFIG_PATH_VAR: &str = "JOB_ASSISTANT_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub batch_concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            batch_concurrency: 4,
        }
    }
}

/// Sampling knobs sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 2048,
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesettingConfig {
    pub command: String,
    pub args: Vec<String>,
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for TypesettingConfig {
    fn default() -> Self {
        Self {
            command: "xelatex".to_string(),
            args: vec!["-interaction=batchmode".to_string()],
            template_path: PathBuf::from("templates/template.tex"),
            output_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    pub generation: GenerationConfig,
    pub typesetting: TypesettingConfig,
    pub profile_path: PathBuf,
    pub extraction_rules: Option<RuleTable>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            scraper: ScraperConfig::default(),
            generation: GenerationConfig::default(),
            typesetting: TypesettingConfig::default(),
            profile_path: PathBuf::from("profile.toml"),
            extraction_rules: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<AppConfig>,
    production: Option<AppConfig>,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub app: AppConfig,
    api_key: Option<String>,
}

impl ConfigManager {
    /// Load configuration for the current `ENVIRONMENT` (default `local`).
    pub fn load() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let config_path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));

        let app = if config_path.exists() {
            Self::load_from_file(&config_path, &environment)?
        } else {
            info!(
                "{} not found, using built-in defaults",
                config_path.display()
            );
            AppConfig::default()
        };

        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.trim().is_empty());

        let manager = Self {
            environment,
            app,
            api_key,
        };
        manager.extraction_rules()?;
        Ok(manager)
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Pick the section for `environment`; anything but `production` is local.
    pub fn parse(content: &str, environment: &str) -> Result<AppConfig> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section.unwrap_or_else(|| {
            warn!("No '{}' section in configuration, using defaults", environment);
            AppConfig::default()
        }))
    }

    pub fn with_app(app: AppConfig, api_key: Option<String>) -> Self {
        Self {
            environment: "local".to_string(),
            app,
            api_key,
        }
    }

    /// Rule table from configuration or the built-in one, validated.
    pub fn extraction_rules(&self) -> Result<Arc<RuleTable>> {
        let rules = self.app.extraction_rules.clone().unwrap_or_default();
        rules
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid extraction rules: {}", e))?;
        Ok(Arc::new(rules))
    }

    pub fn require_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .with_context(|| format!("{} environment variable not set", API_KEY_VAR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = AppConfig::default();
        assert_eq!(app.scraper.timeout_seconds, 10);
        assert_eq!(app.generation.top_k, 40);
        assert_eq!(app.generation.max_output_tokens, 2048);
        assert!((app.generation.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(app.typesetting.command, "xelatex");
    }

    #[test]
    fn test_parse_picks_environment_section() {
        let yaml = r#"
local:
  server:
    port: 9000
production:
  server:
    port: 80
  generation:
    model: gemini-pro
"#;
        let local = ConfigManager::parse(yaml, "local").unwrap();
        assert_eq!(local.server.port, 9000);
        assert_eq!(local.generation.model, "gemini-2.0-flash");

        let production = ConfigManager::parse(yaml, "production").unwrap();
        assert_eq!(production.server.port, 80);
        assert_eq!(production.generation.model, "gemini-pro");
        assert_eq!(production.scraper.timeout_seconds, 10);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let app = ConfigManager::parse("local:\n  profile_path: me.toml\n", "production").unwrap();
        assert_eq!(app.profile_path, PathBuf::from("profile.toml"));
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut app = AppConfig::default();
        let mut rules = RuleTable::default();
        rules.description.push(":::".to_string());
        app.extraction_rules = Some(rules);

        let manager = ConfigManager::with_app(app, None);
        assert!(manager.extraction_rules().is_err());
        assert!(manager.require_api_key().is_err());
    }
}
