pub mod media_delete;
pub mod media_list;
pub mod media_upload;
pub mod thumbnail_get;
pub mod video_stream;
