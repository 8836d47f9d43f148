use axum::{
    http::{header::ALLOW, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::report::{ErrorReport, HealthStatus};

/// Failure while assembling a health report.
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Environment variable {var} is not valid unicode: {value:?}")]
    Environment { var: String, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed(Method),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Health(#[from] HealthError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, report) = match &self {
            AppError::MethodNotAllowed(method) => {
                tracing::debug!(%method, "Rejected request method");
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    ErrorReport::new(HealthStatus::Error, self.to_string()),
                )
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorReport::new(HealthStatus::Error, self.to_string()),
            ),
            AppError::Health(_) => {
                tracing::error!("Health check failed: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorReport::unhealthy(self.to_string()),
                )
            }
        };

        let mut response = (status, Json(report)).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}
