use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use mediahub_core::{AppError, MediaCategory};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

/// Serve a stored thumbnail with the content type implied by its extension.
#[utoipa::path(
    get,
    path = "/media/thumbnails/{fileName}",
    tag = "media",
    params(
        ("fileName" = String, Path, description = "Stored thumbnail file name")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes", content_type = "image/*"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "Thumbnail not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_thumbnail"))]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Result<Response, HttpAppError> {
    let opened = state
        .store
        .open(MediaCategory::Thumbnail, &file_name)
        .await?;

    let content_length = opened.content_length;
    let content_type = state.content_type_for(&file_name);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .body(Body::from_stream(ReaderStream::new(opened.file)))
        .map_err(|e| {
            HttpAppError(AppError::Internal(format!(
                "Failed to build thumbnail response: {}",
                e
            )))
        })
}
