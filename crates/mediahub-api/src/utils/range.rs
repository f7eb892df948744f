//! `Range` request header parsing
//!
//! Accepts `bytes=a-b`, `bytes=a-` and `bytes=-n`. When a header lists several
//! ranges only the first is used. The end is clamped to the last byte of the
//! resource; a start at or past the end, or a header that cannot be parsed, is
//! reported as not satisfiable.

use axum::http::{header, HeaderMap};
use mediahub_core::{AppError, RequestedRange};

/// Resolve the request's `Range` header against a resource of `content_length` bytes.
///
/// `Ok(None)` means no header was sent.
pub fn requested_range(
    headers: &HeaderMap,
    content_length: u64,
) -> Result<Option<RequestedRange>, AppError> {
    let Some(value) = headers.get(header::RANGE) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|value| parse_range(value, content_length))
        .map(Some)
        .ok_or(AppError::RangeNotSatisfiable { content_length })
}

fn parse_range(value: &str, content_length: u64) -> Option<RequestedRange> {
    let ranges = value.trim().strip_prefix("bytes=")?;
    let first = ranges.split(',').next()?.trim();
    let (start, end) = first.split_once('-')?;
    let (start, end) = (start.trim(), end.trim());

    if content_length == 0 {
        return None;
    }
    let last = content_length - 1;

    if start.is_empty() {
        // Suffix form: the final `n` bytes
        let suffix: u64 = end.parse().ok()?;
        if suffix == 0 {
            return None;
        }
        let start = content_length.saturating_sub(suffix);
        return Some(RequestedRange::new(start, Some(last)));
    }

    let start: u64 = start.parse().ok()?;
    if start > last {
        return None;
    }

    if end.is_empty() {
        return Some(RequestedRange::new(start, None));
    }

    let end: u64 = end.parse().ok()?;
    if end < start {
        return None;
    }

    Some(RequestedRange::new(start, Some(end.min(last))))
}
