/// Configuration loader
use super::schema::Config;
use std::fs;

/// Load configuration from the adjacent .config file, falling back to
/// built-in defaults when no file exists.
/// Config file should be in the same directory as the executable,
/// named: <executable>.config (e.g., "kq-activator.config")
pub fn load_config() -> Result<Config, String> {
    let exe_path = std::env::current_exe()
        .map_err(|e| format!("Failed to get executable path: {}", e))?;

    let config_path = format!("{}.config", exe_path.display());

    let config = match fs::read_to_string(&config_path) {
        Ok(config_content) => serde_json::from_str(&config_content)
            .map_err(|e| format!("Failed to parse config file {}: {}", config_path, e))?,
        // No config file is not an error; defaults apply
        Err(_) => Config::default(),
    };

    // Validate config
    config.validate()?;

    Ok(config)
}
