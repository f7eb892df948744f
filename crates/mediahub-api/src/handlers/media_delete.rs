use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use mediahub_storage::DeleteRequest;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Files to delete, at most one per category. Missing or empty names are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMediaRequest {
    pub thumbnail_file: Option<String>,
    #[serde(alias = "videoFile")]
    pub content_file: Option<String>,
    pub trailer_file: Option<String>,
}

impl From<DeleteMediaRequest> for DeleteRequest {
    fn from(request: DeleteMediaRequest) -> Self {
        DeleteRequest {
            thumbnail: request.thumbnail_file,
            video: request.content_file,
            trailer: request.trailer_file,
        }
    }
}

/// Delete stored files
///
/// All names are validated before anything is removed. Files that are already gone
/// count as deleted; other failures are reported after every category was attempted.
#[utoipa::path(
    delete,
    path = "/media",
    tag = "media",
    request_body = DeleteMediaRequest,
    responses(
        (status = 200, description = "Files deleted (or already absent)"),
        (status = 400, description = "Invalid file name or body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "delete_media"))]
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<DeleteMediaRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = DeleteRequest::from(request);
    if request.is_empty() {
        tracing::debug!("Delete request names no files");
        return Ok(StatusCode::OK);
    }

    state.deleter.delete(&request).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_file_alias() {
        let request: DeleteMediaRequest =
            serde_json::from_str(r#"{"videoFile": "a.mp4", "thumbnailFile": "a.jpg"}"#).unwrap();
        let request = DeleteRequest::from(request);
        assert_eq!(request.video.as_deref(), Some("a.mp4"));
        assert_eq!(request.thumbnail.as_deref(), Some("a.jpg"));
        assert_eq!(request.trailer, None);

        let request: DeleteMediaRequest =
            serde_json::from_str(r#"{"contentFile": "b.webm"}"#).unwrap();
        assert_eq!(request.content_file.as_deref(), Some("b.webm"));
    }
}
