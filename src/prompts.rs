use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Fixed persona sent with every chat completion request.
const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert Site Reliability Engineering (SRE) Agent connected to Ab Initio ETL and PagerDuty via MCP.

Your goals are:
1. Monitor Ab Initio graph execution and identify failures.
2. Triage and manage PagerDuty incidents related to data pipelines.

When a user asks about a job, check its status. If it failed, try to correlate it with PagerDuty incidents.
Be concise, technical, and precise. Do not simulate capabilities outside of ETL and Incident Management.";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptConfig {
    pub system_prompt_file: Option<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("cosmic_nexus");

        Self {
            system_prompt_file: Some(
                data_dir.join("system_prompt.md").to_string_lossy().to_string(),
            ),
        }
    }
}

#[derive(Clone)]
pub struct PromptManager {
    system_prompt: String,
    overridden: bool,
}

impl PromptManager {
    pub fn load_from_config(config: &PromptConfig) -> Result<Self> {
        let override_prompt = if let Some(path) = &config.system_prompt_file {
            match std::fs::read_to_string(path) {
                Ok(content) if !content.trim().is_empty() => {
                    debug!("Loaded system prompt override from: {}", path);
                    Some(content.trim().to_string())
                }
                Ok(_) => None,
                Err(e) => {
                    warn!("No system prompt override at {}: {}", path, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(match override_prompt {
            Some(prompt) => Self {
                system_prompt: prompt,
                overridden: true,
            },
            None => Self::default(),
        })
    }

    pub fn get_system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Whether the prompt came from an override file rather than the built-in.
    pub fn is_overridden(&self) -> bool {
        self.overridden
    }
}

impl Default for PromptManager {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            overridden: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_prompt_names_both_backends() {
        let manager = PromptManager::default();
        let prompt = manager.get_system_prompt();
        assert!(prompt.contains("Ab Initio"));
        assert!(prompt.contains("PagerDuty"));
        assert!(!manager.is_overridden());
    }

    #[test]
    fn missing_override_file_falls_back_to_built_in() {
        let config = PromptConfig {
            system_prompt_file: Some("/nonexistent/system_prompt.md".to_string()),
        };
        let manager = PromptManager::load_from_config(&config).unwrap();
        assert_eq!(manager.get_system_prompt(), DEFAULT_SYSTEM_PROMPT);
    }
}
