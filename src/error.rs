/*
 * src/error.rs
 *
 * File for application error types
 *
 * Purpose:
 *   Split errors into a public surface (safe to show the caller, with a
 *   meaningful status code) and a private surface (logged, always reported
 *   as a generic 500). The optimizer pipeline itself never fails on bad POI
 *   data - it degrades gracefully per the error-handling table - so
 *   `AppError` only ever gets constructed at the HTTP/JSON boundary.
 *
 * Include:
 *   PublicError  - caller-facing error with its own status code
 *   PrivateError - internal error, never echoed to the caller
 *   AppError     - the union IntoResponse is implemented for
 *   ApiResult<T> - the result alias handlers return
 */

use axum::{
	Json,
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum PublicError {
	BadRequest(String),
	Validation(String),
	NotFound(String),
}

impl PublicError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			PublicError::BadRequest(_) => StatusCode::BAD_REQUEST,
			PublicError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
			PublicError::NotFound(_) => StatusCode::NOT_FOUND,
		}
	}

	fn message(&self) -> &str {
		match self {
			PublicError::BadRequest(m) | PublicError::Validation(m) | PublicError::NotFound(m) => m,
		}
	}
}

#[derive(Debug)]
pub enum PrivateError {
	Internal(String),
}

#[derive(Debug)]
pub enum AppError {
	Public(PublicError),
	Private(PrivateError),
}

impl AppError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			AppError::Public(e) => e.status_code(),
			AppError::Private(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<PublicError> for AppError {
	fn from(e: PublicError) -> Self {
		AppError::Public(e)
	}
}

impl From<PrivateError> for AppError {
	fn from(e: PrivateError) -> Self {
		AppError::Private(e)
	}
}

impl From<JsonRejection> for AppError {
	fn from(rejection: JsonRejection) -> Self {
		AppError::Public(PublicError::BadRequest(rejection.body_text()))
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		match self {
			AppError::Public(e) => {
				let status = e.status_code();
				let body = Json(json!({ "error": e.message() }));
				(status, body).into_response()
			}
			AppError::Private(PrivateError::Internal(msg)) => {
				error!("internal error: {msg}");
				let body = Json(json!({ "error": "internal error" }));
				(StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
			}
		}
	}
}

pub type ApiResult<T> = std::result::Result<T, AppError>;
