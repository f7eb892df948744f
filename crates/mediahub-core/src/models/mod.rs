//! Domain models

pub mod content_type;
pub mod media;

pub use content_type::{normalize_mime, ContentTypeRegistry, NotSupported, RegistryError};
pub use media::{ByteRegion, ContentTable, MediaCategory, RequestedRange, StoredFile};
