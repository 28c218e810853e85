use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use configs::Environment;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::views;

/// Failure rendered as an HTML page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    /// `detail` is shown on the page outside production.
    #[error("internal error: {message}")]
    Internal { message: String, detail: bool },
}

impl PageError {
    pub fn internal(message: impl ToString, env: Environment) -> Self {
        let message = message.to_string();
        error!(error = %message, "request failed");
        PageError::Internal { message, detail: !env.is_production() }
    }

    /// Map a service outcome that has no page of its own.
    pub fn from_service(err: ServiceError, env: Environment) -> Self {
        match err {
            ServiceError::NotFound(_) => PageError::NotFound,
            ServiceError::Validation(errors) => PageError::BadRequest(errors.to_string()),
            other => PageError::internal(other, env),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, Html(views::pages::not_found())).into_response(),
            PageError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Html(views::pages::error("Bad request", Some(&msg)))).into_response()
            }
            PageError::Internal { message, detail } => {
                let shown = detail.then_some(message.as_str());
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::pages::error("Something went wrong", shown))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_pick_status() {
        let env = Environment::Production;
        let cases = [
            (ServiceError::not_found("entry"), StatusCode::NOT_FOUND),
            (ServiceError::Validation(Default::default()), StatusCode::BAD_REQUEST),
            (ServiceError::from(ModelError::Db("locked".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(PageError::from_service(err, env).into_response().status(), status);
        }
    }

    #[test]
    fn detail_hidden_in_production() {
        match PageError::internal("boom", Environment::Production) {
            PageError::Internal { detail, .. } => assert!(!detail),
            other => panic!("unexpected {other:?}"),
        }
        match PageError::internal("boom", Environment::Development) {
            PageError::Internal { detail, .. } => assert!(detail),
            other => panic!("unexpected {other:?}"),
        }
    }
}
