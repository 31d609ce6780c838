use crate::config::types::{
    ArchiveConfig, CheckerConfig, Config, OutputConfig, ScreenshotConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_checker_config(&config.checker)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_archive_config(&config.archive)?;
    validate_screenshot_config(&config.screenshot)?;
    Ok(())
}

/// Validates link resolution settings
fn validate_checker_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 600, got {}",
            config.timeout_secs
        )));
    }

    if config.max_redirects > 100 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 100, got {}",
            config.max_redirects
        )));
    }

    if !config.proxy_suffix.is_empty() && !config.proxy_suffix.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "proxy-suffix must be empty or start with '.', got '{}'",
            config.proxy_suffix
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters, '-' and '_', got '{}'",
            config.name
        )));
    }

    if !config.contact_url.is_empty() {
        Url::parse(&config.contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates output file names
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let names = [
        ("all-json", &config.all_json),
        ("broken-json", &config.broken_json),
        ("all-csv", &config.all_csv),
        ("broken-csv", &config.broken_csv),
        ("redirects-csv", &config.redirects_csv),
        ("screenshots-dir", &config.screenshots_dir),
    ];

    for (key, value) in names {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}

/// Validates the archive endpoint
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid archive endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Archive endpoint must use http or https, got '{}'",
            config.endpoint
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "archive timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the screenshot command template
fn validate_screenshot_config(config: &ScreenshotConfig) -> Result<(), ConfigError> {
    let Some(command) = &config.command else {
        return Ok(());
    };

    if command.is_empty() || command[0].trim().is_empty() {
        return Err(ConfigError::Validation(
            "screenshot command cannot be empty".to_string(),
        ));
    }

    for placeholder in ["{url}", "{path}"] {
        if !command.iter().any(|arg| arg.contains(placeholder)) {
            return Err(ConfigError::Validation(format!(
                "screenshot command must contain a {} placeholder",
                placeholder
            )));
        }
    }

    Ok(())
}
