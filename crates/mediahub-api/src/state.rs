//! Application state shared by all handlers.

use mediahub_core::{Config, ContentTypeRegistry};
use mediahub_storage::{
    DeletionCoordinator, FileNamer, IdGenerator, MediaStore, RangeStreamer, UploadWriter,
};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub store: MediaStore,
    pub uploads: UploadWriter,
    pub streamer: RangeStreamer,
    pub deleter: DeletionCoordinator,
}

impl AppState {
    /// Wire the storage components around one store and one registry.
    pub fn new(
        config: Config,
        registry: Arc<ContentTypeRegistry>,
        store: MediaStore,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let namer = FileNamer::new(registry, store.clone());

        Self {
            uploads: UploadWriter::new(namer, ids),
            streamer: RangeStreamer::new(store.clone()),
            deleter: DeletionCoordinator::new(store.clone()),
            config,
            store,
        }
    }

    /// Content type guessed from a stored file name's extension.
    pub fn content_type_for(&self, file_name: &str) -> String {
        mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediahub_core::constants::OCTET_STREAM;
    use mediahub_storage::UuidGenerator;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_content_type_guessed_from_extension() {
        let dir = tempdir().unwrap();
        let store = MediaStore::init(dir.path()).await.unwrap();
        let state = AppState::new(
            Config::default(),
            Arc::new(ContentTypeRegistry::default()),
            store,
            Arc::new(UuidGenerator),
        );

        assert_eq!(state.content_type_for("a.mp4"), "video/mp4");
        assert_eq!(state.content_type_for("a.png"), "image/png");
        // Extensions outside the upload tables still get a real type
        assert_eq!(state.content_type_for("a.m4v"), "video/x-m4v");
        assert_eq!(state.content_type_for("a.ogv"), "video/ogg");
        assert_eq!(state.content_type_for("a.unknownext"), OCTET_STREAM);
        assert_eq!(state.content_type_for("noextension"), OCTET_STREAM);
    }
}
