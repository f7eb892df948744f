//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Storage and core errors
//! convert into `HttpAppError` with `?` and render as a JSON `ErrorResponse`.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mediahub_core::{AppError, ErrorMetadata, LogLevel};
use mediahub_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always "Error"
    pub status: String,
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    pub details: BTreeMap<String, String>,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(error: &AppError, include_details: bool) -> Self {
        let mut details = BTreeMap::new();
        if include_details {
            details.insert("details".to_string(), error.detailed_message());
            details.insert("error_type".to_string(), error.error_type().to_string());
        }

        Self {
            status: "Error".to_string(),
            message: error.client_message(),
            code: error.error_code().to_string(),
            details,
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that answers with `ErrorResponse` on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Sensitive errors never carry details in production
        let include_details = !(is_production && app_error.is_sensitive());
        let body = Json(ErrorResponse::from_app_error(app_error, include_details));

        let mut response = (status, body).into_response();

        if let AppError::RangeNotSatisfiable { content_length } = app_error {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{}", content_length)) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
        }

        response
    }
}

// Convert storage errors to HttpAppError (orphan rule: impl on the local newtype)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let not_found = err.is_not_found();
        let app = match err {
            StorageError::UnsupportedFormat { mime, category } => AppError::UnsupportedFormat(
                format!("Unsupported {} format: {}", category, mime),
            ),
            StorageError::UnsupportedTag(tag) => AppError::UnsupportedTag(tag),
            StorageError::InvalidFileName(msg) => AppError::InvalidFileName(msg),
            StorageError::ResourceUnavailable { name, .. } if not_found => {
                AppError::NotFound(format!("File not found: {}", name))
            }
            StorageError::ResourceUnavailable { name, source } => {
                AppError::ResourceUnavailable(format!("{}: {}", name, source))
            }
            StorageError::IoError(e) if not_found => AppError::NotFound(e.to_string()),
            StorageError::IoError(e) => AppError::IoFailure(e.to_string()),
            StorageError::UploadFailed(msg) => AppError::IoFailure(msg),
            StorageError::DeleteFailed(msg) => AppError::IoFailure(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}
