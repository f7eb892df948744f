//! Mediahub API Library
//!
//! This crate provides the HTTP handlers and application setup.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
