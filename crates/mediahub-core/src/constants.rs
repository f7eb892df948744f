//! Fixed constants shared across crates.

/// Upper bound on the number of bytes returned by a single partial-content response.
///
/// Clients streaming larger files are expected to follow up with further range requests.
pub const MAX_CHUNK: u64 = 1_000_000;

/// Content type used when nothing better is known about a stored file.
pub const OCTET_STREAM: &str = "application/octet-stream";
