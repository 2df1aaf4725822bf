//! Custom extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json<T>` whose rejections render as 400 `{"error": ...}` like every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
