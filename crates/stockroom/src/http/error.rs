//! Maps domain errors onto HTTP responses.
//!
//! The body is always the error's text. Status codes stay coarse: a body that cannot be decoded
//! is `400`, a missing product or order is `404`, and every other failure is `500`.

use crate::error::ErrorKind;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Failed to render page: {0}")]
    Template(#[from] tera::Error),
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Product(e) => status_for(e.kind()),
            ApiError::Order(e) => status_for(e.kind()),
            ApiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_entities_are_404() {
        let missing = ApiError::from(OrderError::Product(ProductError::NotFound("W-1".into())));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let short = ApiError::from(OrderError::Product(ProductError::InsufficientStock {
            requested: 3,
            available: 1,
        }));
        assert_eq!(short.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(short.to_string(), "Insufficient stock: requested 3, available 1");

        let duplicate = ApiError::from(ProductError::DuplicateKey("W-1".into()));
        assert_eq!(duplicate.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
