use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::edit_type::{CardParams, EditType};
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub card: CardConfig,
}

/// Endpoints and transport settings for the Wikimedia provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base of the Wikidata REST recommendation endpoints.
    #[serde(default = "default_recommendation_base_url")]
    pub recommendation_base_url: String,
    /// Commons action API (`api.php`), used for image info and extmetadata.
    #[serde(default = "default_commons_api_url")]
    pub commons_api_url: String,
    /// Wikipedia origin; `{lang}` is replaced with the language code.
    #[serde(default = "default_wikipedia_host_template")]
    pub wikipedia_host_template: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout. Expiry surfaces as an ordinary transport error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default = "default_edit_type")]
    pub edit_type: EditType,
    #[serde(default = "default_lang_from")]
    pub lang_from: String,
    #[serde(default = "default_lang_to")]
    pub lang_to: String,
    /// How many times the host re-invokes `retry()` after an error.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

impl CardConfig {
    pub fn params(&self) -> CardParams {
        CardParams::new(self.edit_type, &self.lang_from, &self.lang_to)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            recommendation_base_url: default_recommendation_base_url(),
            commons_api_url: default_commons_api_url(),
            wikipedia_host_template: default_wikipedia_host_template(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            thumbnail_width: default_thumbnail_width(),
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            edit_type: default_edit_type(),
            lang_from: default_lang_from(),
            lang_to: default_lang_to(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

fn default_recommendation_base_url() -> String {
    "https://www.wikidata.org/api/rest_v1/data/recommendation".to_string()
}

fn default_commons_api_url() -> String {
    "https://commons.wikimedia.org/w/api.php".to_string()
}

fn default_wikipedia_host_template() -> String {
    "https://{lang}.wikipedia.org".to_string()
}

fn default_user_agent() -> String {
    format!("edit-cards/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_thumbnail_width() -> u32 {
    320
}

fn default_edit_type() -> EditType {
    EditType::AddDescription
}

fn default_lang_from() -> String {
    "en".to_string()
}

fn default_lang_to() -> String {
    "de".to_string()
}

fn default_retry_attempts() -> u32 {
    2
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Wikipedia origin for a language, e.g. `https://en.wikipedia.org`.
    pub fn wikipedia_host(&self, lang: &str) -> String {
        self.api.wikipedia_host_template.replace("{lang}", lang)
    }
}
