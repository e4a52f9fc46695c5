use crate::core::completion::{CompletionConfig, PLACEHOLDER_API_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.venice.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["CHEFBOT_API_KEY", "VENICE_AI_API_KEY"];
pub const API_URL_ENV_VAR: &str = "CHEFBOT_API_URL";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Bearer token for the completion endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Full URL of the chat-completions endpoint
    pub api_url: String,
    pub model: String,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Replaces the built-in chef persona
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Where the transcript is kept; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_dir: Option<PathBuf>,
    /// Verbose logging; errors are always logged
    pub enable_logging: bool,
    pub log_api_requests: bool,
    pub log_api_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            system_prompt: None,
            history_dir: None,
            enable_logging: true,
            log_api_requests: true,
            log_api_responses: true,
        }
    }
}

impl Config {
    /// Starting point written by `chefbot init`.
    pub fn template() -> Self {
        Self {
            api_key: Some(PLACEHOLDER_API_KEY.to_string()),
            ..Self::default()
        }
    }

    /// Applies environment overrides. `lookup` stands in for `std::env::var`
    /// so tests do not have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = API_KEY_ENV_VARS.iter().find_map(|name| non_blank(*name)) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_blank(API_URL_ENV_VAR) {
            self.api_url = url;
        }
    }

    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            endpoint: self.api_url.trim().to_string(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            log_requests: self.enable_logging && self.log_api_requests,
            log_responses: self.enable_logging && self.log_api_responses,
        }
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref().map(str::trim) {
            None | Some("") => "(unset)".to_string(),
            Some(PLACEHOLDER_API_KEY) => "(placeholder)".to_string(),
            Some(key) => {
                let chars: Vec<char> = key.chars().collect();
                if chars.len() <= 4 {
                    "****".to_string()
                } else {
                    let tail: String = chars[chars.len() - 4..].iter().collect();
                    format!("****{tail}")
                }
            }
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/chefbot/config.toml` → `~/.config/chefbot/config.toml`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
