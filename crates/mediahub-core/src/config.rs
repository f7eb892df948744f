//! Configuration module
//!
//! Process configuration read once from the environment (and an optional `.env`
//! file) at startup.

use std::env;
use std::path::{Path, PathBuf};

use crate::models::{ContentTypeRegistry, RegistryError};

const SERVER_PORT: u16 = 4000;
const MEDIA_BASE_DIR: &str = "./media";
const MAX_UPLOAD_SIZE_MB: usize = 2048;
const REQUEST_TIMEOUT_SECS: u64 = 600;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Base directory holding the `videos/`, `trailers/` and `thumbnails/` roots
    pub base_dir: PathBuf,
    /// Prefix for URLs in media listings, e.g. "https://media.example.com"
    pub public_base_url: String,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    pub request_timeout_secs: u64,
    pub http_concurrency_limit: usize,
    /// `mime=ext` overrides for the image table; `None` keeps the built-in table
    pub image_content_types: Option<Vec<(String, String)>>,
    /// `mime=ext` overrides for the video table; `None` keeps the built-in table
    pub video_content_types: Option<Vec<(String, String)>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            base_dir: PathBuf::from(MEDIA_BASE_DIR),
            public_base_url: String::new(),
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            image_content_types: None,
            video_content_types: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?;

        let image_content_types = env::var("IMAGE_CONTENT_TYPES")
            .ok()
            .map(|s| ContentTypeRegistry::parse_table(&s))
            .transpose()
            .map_err(|e| anyhow::anyhow!("IMAGE_CONTENT_TYPES is invalid: {}", e))?;

        let video_content_types = env::var("VIDEO_CONTENT_TYPES")
            .ok()
            .map(|s| ContentTypeRegistry::parse_table(&s))
            .transpose()
            .map_err(|e| anyhow::anyhow!("VIDEO_CONTENT_TYPES is invalid: {}", e))?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            base_dir: env::var("MEDIA_BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(MEDIA_BASE_DIR)),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            environment,
            cors_origins,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            image_content_types,
            video_content_types,
        };

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.http_concurrency_limit
    }

    /// Build the content-type registry, falling back to the built-in table for
    /// whichever side has no override.
    pub fn content_type_registry(&self) -> Result<ContentTypeRegistry, RegistryError> {
        if self.image_content_types.is_none() && self.video_content_types.is_none() {
            return Ok(ContentTypeRegistry::default());
        }

        let defaults = ContentTypeRegistry::default();
        let image: Vec<(String, String)> = match &self.image_content_types {
            Some(table) => table.clone(),
            None => defaults
                .image_types()
                .map(|(m, e)| (m.to_string(), e.to_string()))
                .collect(),
        };
        let video: Vec<(String, String)> = match &self.video_content_types {
            Some(table) => table.clone(),
            None => defaults
                .video_types()
                .map(|(m, e)| (m.to_string(), e.to_string()))
                .collect(),
        };

        ContentTypeRegistry::new(image, video)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("MEDIA_BASE_DIR cannot be empty"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB cannot be 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS cannot be 0"));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        self.content_type_registry()
            .map_err(|e| anyhow::anyhow!("Content type tables are invalid: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaCategory;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let config = Config {
            environment: "production".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn video_override_keeps_default_images() {
        let config = Config {
            video_content_types: Some(vec![("video/ogg".to_string(), "ogv".to_string())]),
            ..Config::default()
        };
        let registry = config.content_type_registry().unwrap();
        assert_eq!(
            registry.extension_for(MediaCategory::Video, "video/ogg"),
            Ok("ogv")
        );
        assert!(registry
            .extension_for(MediaCategory::Video, "video/mp4")
            .is_err());
        assert_eq!(
            registry.extension_for(MediaCategory::Thumbnail, "image/png"),
            Ok("png")
        );
    }

    #[test]
    fn overlapping_override_fails_validation() {
        let config = Config {
            video_content_types: Some(vec![("image/png".to_string(), "png".to_string())]),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
