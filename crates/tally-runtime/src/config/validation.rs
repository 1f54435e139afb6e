//! Configuration validation.

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, ProvidersConfig, TallyConfig, TikTokSettings};

/// Validates the entire configuration.
pub fn validate_config(config: &TallyConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_providers_config(&config.providers)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    for module in logging.filters.keys() {
        if module.trim().is_empty() || module.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Invalid logging filter target: {module:?}"
            )));
        }
    }

    Ok(())
}

fn validate_providers_config(providers: &ProvidersConfig) -> ConfigResult<()> {
    if let Some(tiktok) = &providers.tiktok {
        validate_tiktok_settings(tiktok)?;
    }
    Ok(())
}

/// Applies the provider's own check, so `tt_app_id` passes unchecked.
fn validate_tiktok_settings(tiktok: &TikTokSettings) -> ConfigResult<()> {
    tiktok
        .config
        .validate()
        .map_err(|e| ConfigError::validation(format!("providers.tiktok: {e}")))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tally_provider_tiktok::TikTokConfig;

    use super::*;
    use crate::config::schema::LogLevel;

    fn tiktok(app_id: &str, tt_app_id: &str, access_token: &str) -> TikTokSettings {
        TikTokSettings {
            config: TikTokConfig::new(app_id, tt_app_id, access_token),
            auto_init: false,
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&TallyConfig::default()).is_ok());
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = TallyConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { field }) if field == "logging.file_path"
        ));

        config.logging.file_path = Some(PathBuf::from("/var/log/tally.log"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_blank_filter_target() {
        let mut config = TallyConfig::default();
        config.logging.filters.insert(" ".into(), LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_tiktok_credentials() {
        let mut config = TallyConfig::default();
        config.providers.tiktok = Some(tiktok("com.omega.planeats", "7301234567890", "token"));
        assert!(validate_config(&config).is_ok());

        config.providers.tiktok = Some(tiktok("com.omega.planeats", "7301234567890", "   "));
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { message }) if message.contains("access_token")
        ));

        config.providers.tiktok = Some(tiktok("", "7301234567890", "token"));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_tt_app_id_allowed() {
        let mut config = TallyConfig::default();
        config.providers.tiktok = Some(tiktok("com.omega.planeats", "", "token"));
        assert!(validate_config(&config).is_ok());
    }
}
