//! Configuration validation
//!
//! Validates configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use mediahub_core::Config;

/// Validate configuration, failing fast on values the service cannot run with.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.public_base_url().is_empty() {
        tracing::warn!("PUBLIC_BASE_URL not set - media listing will return relative URLs");
    }

    if config.max_upload_size_bytes() < 1024 * 1024 {
        tracing::warn!(
            max_upload_size_bytes = config.max_upload_size_bytes(),
            "Upload limit is below 1 MB"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
