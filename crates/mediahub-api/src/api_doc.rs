//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use mediahub_core::MediaCategory;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mediahub API",
        version = "0.1.0",
        description = "Upload, serve, stream and delete videos, trailers and thumbnails. Videos and trailers are streamed as byte ranges of at most 1,000,000 bytes per response."
    ),
    paths(
        handlers::media_upload::upload_media,
        handlers::thumbnail_get::get_thumbnail,
        handlers::video_stream::stream_video,
        handlers::media_delete::delete_media,
        handlers::media_list::list_media,
    ),
    components(
        schemas(
            error::ErrorResponse,
            handlers::media_delete::DeleteMediaRequest,
            handlers::media_list::MediaEntry,
            MediaCategory,
        )
    ),
    tags(
        (name = "media", description = "Media upload, retrieval and deletion")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
