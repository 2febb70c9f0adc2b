use crate::config::types::CheckCacheConfig;
use crate::errors::ConfigError;

/// Validate the configuration.
pub fn validate_config(config: &CheckCacheConfig) -> Result<(), ConfigError> {
    if config.check.timeout == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "check.timeout must be greater than 0".to_string(),
        });
    }

    if let Some(expire) = config.check.expire
        && expire < 0
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("check.expire must not be negative, got {}", expire),
        });
    }

    if let Some(interval) = config.check.interval
        && interval < 0
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("check.interval must not be negative, got {}", interval),
        });
    }

    if let Some(cache_dir) = &config.cache_dir
        && cache_dir.as_os_str().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "cache_dir must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CheckConfig;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CheckCacheConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = CheckCacheConfig {
            check: CheckConfig {
                timeout: Some(0),
                ..CheckConfig::default()
            },
            ..CheckCacheConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_negative_expire_is_invalid() {
        let config = CheckCacheConfig {
            check: CheckConfig {
                expire: Some(-5),
                ..CheckConfig::default()
            },
            ..CheckCacheConfig::default()
        };
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("-5"));
    }

    #[test]
    fn test_negative_interval_is_invalid() {
        let config = CheckCacheConfig {
            check: CheckConfig {
                interval: Some(-1),
                ..CheckConfig::default()
            },
            ..CheckCacheConfig::default()
        };
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("check.interval"));
    }

    #[test]
    fn test_zero_interval_is_valid() {
        let config = CheckCacheConfig {
            check: CheckConfig {
                interval: Some(0),
                ..CheckConfig::default()
            },
            ..CheckCacheConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_cache_dir_is_invalid() {
        let config = CheckCacheConfig {
            cache_dir: Some(PathBuf::new()),
            ..CheckCacheConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
