use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use mediahub_core::MediaCategory;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaEntry {
    pub media: MediaCategory,
    pub url: String,
}

/// Retrieval URL for a stored file, under `prefix`.
fn media_url(prefix: &str, category: MediaCategory, file_name: &str) -> String {
    match category {
        MediaCategory::Thumbnail => format!("{}/media/thumbnails/{}", prefix, file_name),
        MediaCategory::Video | MediaCategory::Trailer => format!(
            "{}/media/streaming/{}?source={}",
            prefix,
            file_name,
            category.dir_name()
        ),
    }
}

/// List every stored file with the URL it is served from.
#[utoipa::path(
    get,
    path = "/media",
    tag = "media",
    responses(
        (status = 200, description = "Stored media", body = Vec<MediaEntry>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_media"))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MediaEntry>>, HttpAppError> {
    let prefix = state.config.public_base_url();
    let mut entries = Vec::new();

    for category in MediaCategory::ALL {
        for file_name in state.store.list(category).await? {
            entries.push(MediaEntry {
                media: category,
                url: media_url(prefix, category, &file_name),
            });
        }
    }

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_urls() {
        assert_eq!(
            media_url("http://cdn", MediaCategory::Thumbnail, "a.jpg"),
            "http://cdn/media/thumbnails/a.jpg"
        );
        assert_eq!(
            media_url("", MediaCategory::Trailer, "a.mov"),
            "/media/streaming/a.mov?source=trailers"
        );
    }
}
