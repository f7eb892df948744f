//! Mediahub Core Library
//!
//! This crate provides the domain types, content-type registry, error types and
//! configuration shared by the storage and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use constants::MAX_CHUNK;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    normalize_mime, ByteRegion, ContentTable, ContentTypeRegistry, MediaCategory, NotSupported,
    RegistryError, RequestedRange, StoredFile,
};
