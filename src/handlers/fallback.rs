use axum::{
    extract::{MatchedPath, State},
    http::{Method, StatusCode, Uri},
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::schemas::AppState;

/// Answer for paths no route matches.
pub async fn not_found(uri: Uri) -> ApiError {
    debug!("No route for {}", uri);
    ApiError::new(StatusCode::NOT_FOUND, "Not Found")
}

/// Answer for a known path hit with a method it does not serve. The body
/// lists the methods the path does accept.
pub async fn method_not_allowed(
    method: Method,
    matched: Option<MatchedPath>,
    State(state): State<AppState>,
) -> ApiError {
    let allowed = matched
        .as_ref()
        .and_then(|path| state.routes.methods_for(path.as_str()))
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    debug!("{} not allowed, route accepts {:?}", method, allowed);

    let mut extra = Map::new();
    extra.insert("allowed".to_string(), Value::from(allowed));
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").with_payload(extra)
}
