use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use planner_core::error::PlannerError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(PlannerError::InvalidQuery(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<PlannerError>() {
            match e {
                PlannerError::NotInitialized
                | PlannerError::InvalidTask(_)
                | PlannerError::InvalidQuery(_)
                | PlannerError::InvalidWeekKey(_) => StatusCode::BAD_REQUEST,
                PlannerError::TaskNotFound(_) => StatusCode::NOT_FOUND,
                // Stored data the summary cannot represent: fail the view outright.
                PlannerError::DateParse { .. } | PlannerError::Io(_) | PlannerError::Yaml(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
