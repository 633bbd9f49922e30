use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the environment variable holding the Gemini API credential.
/// The credential is never written back to the config file.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct LlmProfile {
    #[serde(default, skip_serializing)]
    pub api_key: String,
    pub model: String,
    pub image_model: String,
    pub endpoint: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LlmProfile {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-3-pro-preview".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            temperature: Some(0.2),
            max_tokens: Some(2048),
        }
    }
}

impl LlmProfile {
    /// URL of a model endpoint without the trailing API method.
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), model)
    }

    pub fn masked_key(&self) -> String {
        if self.api_key.len() > 6 {
            format!(
                "{}...{}",
                &self.api_key[..3],
                &self.api_key[self.api_key.len() - 3..]
            )
        } else if self.api_key.is_empty() {
            "(not set)".to_string()
        } else {
            "***".to_string()
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: LlmProfile,
    #[serde(default)]
    pub prompts: crate::prompts::PromptConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: LlmProfile::default(),
            prompts: crate::prompts::PromptConfig::default(),
        }
    }
}

impl AppConfig {
    fn config_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cosmic_nexus")
    }

    fn config_file_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_file_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let config = Config::builder()
            .add_source(File::from(config_path))
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.apply_env();
        Ok(config)
    }

    /// Load the on-disk config, falling back to defaults when the file is
    /// missing or malformed. The API key always comes from the environment.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| {
            let mut config = Self::default();
            config.apply_env();
            config
        })
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.profile.api_key = key;
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        use std::fs;

        let config_path = Self::config_file_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(config_path, toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_targets_gemini() {
        let profile = LlmProfile::default();
        assert!(profile.endpoint.contains("generativelanguage"));
        assert_eq!(
            profile.model_url(&profile.model),
            format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}",
                profile.model
            )
        );
    }

    #[test]
    fn masked_key_never_reveals_short_keys() {
        let mut profile = LlmProfile::default();
        assert_eq!(profile.masked_key(), "(not set)");
        profile.api_key = "abc".to_string();
        assert_eq!(profile.masked_key(), "***");
        profile.api_key = "abcdefghij".to_string();
        assert_eq!(profile.masked_key(), "abc...hij");
    }

    #[test]
    fn api_key_is_not_serialized() {
        let mut config = AppConfig::default();
        config.profile.api_key = "secret".to_string();
        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_string.contains("secret"));
    }
}
