//! Shared response envelope for API handlers.
//!
//! Every successful response is `{ "success": true, "data": ... }`. Errors use
//! the matching `{ "success": false, ... }` shape built in [`crate::error`].

use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(course)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
