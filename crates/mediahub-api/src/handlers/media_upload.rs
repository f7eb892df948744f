use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mediahub_core::{constants::OCTET_STREAM, AppError};
use serde_json::{Map, Value};
use tokio_util::io::StreamReader;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

fn multipart_error(err: MultipartError) -> HttpAppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HttpAppError(AppError::PayloadTooLarge(err.body_text()))
    } else {
        HttpAppError(AppError::InvalidInput(format!(
            "Malformed multipart body: {}",
            err.body_text()
        )))
    }
}

/// Merge plain form fields into the stored-name map.
///
/// A field sent once becomes a string, a repeated field an array. Stored file names
/// win when a form field reuses a file tag.
fn merge_metadata(
    stored: BTreeMap<String, String>,
    metadata: BTreeMap<String, Vec<String>>,
) -> Map<String, Value> {
    let mut response = Map::new();

    for (key, mut values) in metadata {
        let value = if values.len() == 1 {
            Value::String(values.remove(0))
        } else {
            Value::Array(values.into_iter().map(Value::String).collect())
        };
        response.insert(key, value);
    }

    for (tag, file_name) in stored {
        response.insert(tag, Value::String(file_name));
    }

    response
}

/// Upload media handler
///
/// Every part with a file name is stored under one identifier shared by the whole
/// request; other fields are echoed back in the response. Parts are written as they
/// arrive and the first rejected part aborts the request, leaving earlier parts on disk.
///
/// # Errors
/// - `AppError::UnsupportedFormat` - declared content type not allowed for the tag
/// - `AppError::UnsupportedTag` - file part under an unknown field name
/// - `AppError::PayloadTooLarge` - body exceeds the configured limit
/// - `AppError::IoFailure` - copy to storage failed
#[utoipa::path(
    post,
    path = "/media/upload",
    tag = "media",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Field tag to stored file name, merged with form fields", body = Object),
        (status = 400, description = "Unknown file tag or malformed body", body = ErrorResponse),
        (status = 413, description = "Body too large", body = ErrorResponse),
        (status = 415, description = "Unsupported content type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut batch = state.uploads.begin();
    let mut metadata: BTreeMap<String, Vec<String>> = BTreeMap::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_none() {
            let value = field.text().await.map_err(multipart_error)?;
            metadata.entry(name).or_default().push(value);
            continue;
        }

        let content_type = field.content_type().unwrap_or(OCTET_STREAM).to_string();
        let reader = StreamReader::new(field.map_err(|e| io::Error::other(e.to_string())));
        tokio::pin!(reader);

        batch.write_part(&name, &content_type, &mut reader).await?;
    }

    tracing::info!(
        unique_id = %batch.unique_id(),
        parts = batch.stored().len(),
        metadata_fields = metadata.len(),
        "Upload stored"
    );

    let response = merge_metadata(batch.finish(), metadata);
    Ok((StatusCode::OK, Json(Value::Object(response))))
}
