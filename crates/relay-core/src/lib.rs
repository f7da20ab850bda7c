#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod error;

pub use error::{ApiError, ApiResult, ErrorKind, HttpError};
