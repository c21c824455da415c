use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised by handlers and the favorites service.
///
/// Every variant renders as a JSON object with at least a `message` field,
/// so clients never see a plain-text error body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The referenced row does not exist. Holds the entity label used in the
    /// message, e.g. `"Character"` renders as `"Character not found"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A create request lacked `user_id` or the favorited entity's id.
    #[error("Missing required fields")]
    MissingFields,

    /// The database rejected a favorite because a reference does not resolve.
    #[error("Invalid user_id or {kind}_id")]
    InvalidReference { kind: &'static str },

    /// Explicitly raised application error with its own status code.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        payload: Option<Map<String, Value>>,
    },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            payload: None,
        }
    }

    /// Attaches extra fields that are merged next to `message` in the body.
    pub fn with_payload(self, extra: Map<String, Value>) -> Self {
        match self {
            Self::Api {
                status, message, ..
            } => Self::Api {
                status,
                message,
                payload: Some(extra),
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingFields | Self::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            Self::Api { status, .. } => *status,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, payload) = match self {
            Self::Database(err) => {
                error!("Internal server error: {}", err);
                ("Internal server error".to_string(), None)
            }
            Self::Api {
                message, payload, ..
            } => {
                debug!("Application error ({}): {}", status, message);
                (message, payload)
            }
            other => {
                debug!("Request failed ({}): {}", status, other);
                (other.to_string(), None)
            }
        };

        let mut body = payload.unwrap_or_default();
        body.insert("message".to_string(), Value::String(message));

        (status, Json(Value::Object(body))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // Ids are integers; anything else addresses no resource at all.
            PathRejection::FailedToDeserializePathParams(inner) => {
                debug!("Unroutable path parameter: {}", inner.body_text());
                Self::new(StatusCode::NOT_FOUND, "Not Found")
            }
            other => Self::new(other.status(), other.body_text()),
        }
    }
}
