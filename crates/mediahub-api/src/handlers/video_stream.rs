use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::range::requested_range;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use mediahub_core::{AppError, MediaCategory};
use mediahub_storage::RangeStreamer;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StreamQuery {
    /// `videos` (default) or `trailers`
    source: Option<String>,
}

impl StreamQuery {
    fn category(&self) -> Result<MediaCategory, AppError> {
        let Some(source) = self.source.as_deref() else {
            return Ok(MediaCategory::Video);
        };

        match source.parse::<MediaCategory>() {
            Ok(category @ (MediaCategory::Video | MediaCategory::Trailer)) => Ok(category),
            _ => Err(AppError::InvalidInput(format!(
                "Invalid source '{}': expected videos or trailers",
                source
            ))),
        }
    }
}

/// Stream one region of a stored video or trailer.
///
/// Non-empty files always answer `206 Partial Content`; without a `Range` header the
/// first region of the file is returned. Regions are capped at `MAX_CHUNK` bytes.
#[utoipa::path(
    get,
    path = "/media/streaming/{fileName}",
    tag = "media",
    params(
        ("fileName" = String, Path, description = "Stored video or trailer file name"),
        StreamQuery
    ),
    responses(
        (status = 200, description = "Empty file"),
        (status = 206, description = "Partial content", content_type = "video/*"),
        (status = 400, description = "Invalid file name or source", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 416, description = "Range not satisfiable", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers), fields(operation = "stream_video"))]
pub async fn stream_video(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let category = query.category()?;
    let opened = state.streamer.open(category, &file_name).await?;
    let total = opened.content_length;
    let content_type = state.content_type_for(&file_name);

    if total == 0 {
        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, 0)
            .header(header::ACCEPT_RANGES, "bytes")
            .body(Body::empty())
            .map_err(build_error);
    }

    let requested = requested_range(&headers, total)?;
    let region = RangeStreamer::plan(total, requested);
    let reader = state.streamer.region_reader(opened, region).await?;

    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, region.length)
        .header(header::CONTENT_RANGE, region.content_range(total))
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from_stream(ReaderStream::new(reader)))
        .map_err(build_error)
}

fn build_error(e: axum::http::Error) -> HttpAppError {
    HttpAppError(AppError::Internal(format!(
        "Failed to build streaming response: {}",
        e
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(source: Option<&str>) -> StreamQuery {
        StreamQuery {
            source: source.map(String::from),
        }
    }

    #[test]
    fn test_source_selection() {
        assert_eq!(query(None).category().unwrap(), MediaCategory::Video);
        assert_eq!(
            query(Some("videos")).category().unwrap(),
            MediaCategory::Video
        );
        assert_eq!(
            query(Some("trailers")).category().unwrap(),
            MediaCategory::Trailer
        );
        assert!(query(Some("thumbnails")).category().is_err());
        assert!(query(Some("../etc")).category().is_err());
    }
}
