//! Request extractors that fail with [`AppError`] instead of axum's
//! plain-text rejections.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection is rendered as the 400 error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
