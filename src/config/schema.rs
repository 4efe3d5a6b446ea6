/// Configuration schema for the activation client
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api-web.kunqiongai.com";
pub const DEFAULT_SOFT_NUMBER: &str = "10019";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Licensing API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Software identifier registered with the licensing service
    #[serde(default = "default_soft_number")]
    pub soft_number: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_soft_number() -> String {
    DEFAULT_SOFT_NUMBER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            soft_number: default_soft_number(),
        }
    }
}

impl Config {
    /// Get the effective API base URL.
    ///
    /// Precedence: compile-time ACTIVATOR_API_BASE_URL (baked in via build.rs
    /// from .env) > runtime environment variable > configured value.
    pub fn effective_base_url(&self) -> String {
        if let Some(compile_time_url) = option_env!("ACTIVATOR_API_BASE_URL") {
            if !compile_time_url.is_empty() {
                return compile_time_url.to_string();
            }
        }

        if let Ok(env_url) = std::env::var("ACTIVATOR_API_BASE_URL") {
            if !env_url.is_empty() {
                return env_url;
            }
        }

        self.api_base_url.clone()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.soft_number.is_empty() {
            return Err("soft_number cannot be empty".to_string());
        }

        let effective_url = self.effective_base_url();

        if effective_url.is_empty() {
            return Err("api_base_url cannot be empty".to_string());
        }

        if !effective_url.starts_with("http://") && !effective_url.starts_with("https://") {
            return Err("api_base_url must start with http:// or https://".to_string());
        }

        Ok(())
    }
}
