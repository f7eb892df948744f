//! Mediahub Storage Library
//!
//! Filesystem side of the media service: category roots, file naming, batch upload
//! writes, partial-content region reads and coordinated deletion.
//!
//! # Layout
//!
//! A configured base directory holds three flat category roots:
//!
//! - `videos/`
//! - `trailers/`
//! - `thumbnails/`
//!
//! Every stored file is named `{unique_id}.{extension}`. Client-supplied names are
//! validated by [`MediaStore::resolve`] before they touch the filesystem.

pub mod delete;
pub mod error;
pub mod naming;
pub mod range;
pub mod store;
pub mod upload;

// Re-export commonly used types
pub use delete::{DeleteRequest, DeletionCoordinator};
pub use error::{StorageError, StorageResult};
pub use naming::{FileNamer, IdGenerator, UuidGenerator};
pub use range::RangeStreamer;
pub use store::{validate_file_name, MediaStore, OpenedFile};
pub use upload::{UploadBatch, UploadPart, UploadWriter};
