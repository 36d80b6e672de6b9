//! HTTP error mapping
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use langcat_core::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::Store(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Catalog(CatalogError::Cancelled(_)) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(%status, error = %self, "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
