use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// Result type for operations that fail with an [`ApiError`]
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Trait for domain errors that can be rendered as HTTP responses
///
/// The boundary layer reads these three capabilities to build a response
/// for any failure, keeping domain errors decoupled from the HTTP
/// framework. A new error type joins the taxonomy by implementing this
/// with a unique code/status pairing.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error code (e.g. `BAD_REQUEST`)
    fn error_code(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Closed set of error kinds in the taxonomy
///
/// Each named kind pins the code/status pair the boundary layer will
/// render; `Custom` covers direct construction with a caller-chosen pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Something went wrong internally
    Internal,
    /// Too many requests are being made in total or by an individual caller
    TooManyRequests,
    /// There is something wrong with the request
    BadRequest,
    /// The item asked for does not exist
    NotFound,
    /// An upstream dependency returned a strange response
    Upstream,
    /// Caller-supplied code/status pair
    Custom {
        /// Machine-readable code
        code: String,
        /// HTTP status
        status: StatusCode,
    },
}

impl ErrorKind {
    /// Machine-readable code for this kind
    pub fn code(&self) -> &str {
        match self {
            Self::Internal => "INTERNAL_ERROR",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Upstream => "UPSTREAM_ERROR",
            Self::Custom { code, .. } => code,
        }
    }

    /// HTTP status code for this kind
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Internal | Self::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Custom { status, .. } => *status,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Uniform error value for the relay request path
///
/// Carries a machine-readable code, an HTTP status, and a human-readable
/// message. An instance is constructed where a failure is detected,
/// returned as the `Err` arm, and consumed once by the layer that turns
/// it into a response or log entry. Code and status are fixed at
/// construction and never change.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    /// Construct an error with a caller-chosen code/status pair
    ///
    /// No shape is enforced on `code`; the taxonomy trusts its callers.
    pub fn new(code: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Custom { code: code.into(), status },
            message: message.into(),
        }
    }

    /// Something went wrong internally (`INTERNAL_ERROR`, 500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Internal, message)
    }

    /// Too many requests in total or by an individual caller
    /// (`TOO_MANY_REQUESTS`, 429)
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::TooManyRequests, message)
    }

    /// There is something wrong with the request (`BAD_REQUEST`, 400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::BadRequest, message)
    }

    /// The item asked for does not exist (`NOT_FOUND`, 404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::NotFound, message)
    }

    /// An upstream API returned a strange response (`UPSTREAM_ERROR`, 500)
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Upstream, message)
    }

    fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Kind tag carrying the code/status pair
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Human-readable message, safe to show to an end user
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic display name, e.g. `ApiError.BAD_REQUEST`
    pub fn name(&self) -> String {
        format!("ApiError.{}", self.kind.code())
    }

    /// HTTP status to use for an arbitrary caught failure
    ///
    /// Failures that never passed through the taxonomy fall back to 500,
    /// so the boundary can always compute a status line.
    pub fn status_of(error: &anyhow::Error) -> StatusCode {
        error
            .downcast_ref::<Self>()
            .map_or(StatusCode::INTERNAL_SERVER_ERROR, HttpError::status_code)
    }

    /// Machine-readable code for an arbitrary caught failure
    ///
    /// Foreign failures fall back to `UNKNOWN`.
    pub fn code_of(error: &anyhow::Error) -> &str {
        error.downcast_ref::<Self>().map_or("UNKNOWN", HttpError::error_code)
    }

    /// User-facing message for an arbitrary caught failure
    ///
    /// Returns the taxonomy error's message when it is non-empty;
    /// otherwise the display rendering of the whole value. An empty
    /// message counts as absent and falls through.
    pub fn message_of(error: &anyhow::Error) -> String {
        match error.downcast_ref::<Self>() {
            Some(api) if !api.message.is_empty() => api.message.clone(),
            _ => error.to_string(),
        }
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.kind.status()
    }

    fn error_code(&self) -> &str {
        self.kind.code()
    }

    fn client_message(&self) -> String {
        self.message.clone()
    }
}
