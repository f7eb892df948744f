//! Storage setup and initialization

use anyhow::{Context, Result};
use mediahub_core::{Config, ContentTypeRegistry};
use mediahub_storage::MediaStore;
use std::sync::Arc;

/// Build the content-type registry and create the category roots.
///
/// Any failure here aborts startup.
pub async fn setup_storage(config: &Config) -> Result<(Arc<ContentTypeRegistry>, MediaStore)> {
    tracing::info!("Initializing media storage...");

    let registry = config
        .content_type_registry()
        .context("Failed to build content type registry")?;
    tracing::info!(
        image_types = registry.image_types().count(),
        video_types = registry.video_types().count(),
        "Content type registry loaded"
    );

    let store = MediaStore::init(config.base_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to initialize storage under {}",
                config.base_dir().display()
            )
        })?;

    Ok((Arc::new(registry), store))
}
