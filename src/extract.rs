//! Extractors whose rejections render through [`ApiError`], keeping every
//! response body JSON.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `axum::Json` with a JSON error body on rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path`; a non-integer id answers 404 like an unknown route.
///
/// Handlers take ids as `u64` so any non-negative integer reaches them, and
/// narrow it with [`row_id`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// Narrows a path id to the primary key type. `None` means no row can have it.
pub fn row_id(path_id: u64) -> Option<i32> {
    i32::try_from(path_id).ok()
}
