//! API Handlers
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use langcat_core::{CatalogEntry, QueryContext, Resolution, ResultFilter};
use serde::Deserialize;
use serde_json::{json, Value};

/// Optional `?platform=&arch=` post-filters.
///
/// Kept as raw pairs so a repeated key takes its first value instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct FilterParams(Vec<(String, String)>);

impl FilterParams {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn to_filter(&self) -> ResultFilter {
        ResultFilter::from_query(self.first("platform"), self.first("arch"))
    }
}

fn context(state: &AppState) -> QueryContext {
    QueryContext::with_timeout(state.request_timeout)
}

/// `GET /language`
pub async fn list_languages(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.engine.language_names(&context(&state)).await?;
    Ok(Json(names))
}

/// `GET /language/{name}`
pub async fn get_language(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let entries = state
        .engine
        .entries_for_name(&context(&state), &name, &params.to_filter())
        .await?;
    Ok(Json(entries))
}

/// `GET /language/{name}/{version}`
pub async fn get_version(
    State(state): State<AppState>,
    Path((name, version)): Path<(String, String)>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Resolution>, ApiError> {
    let resolution = state
        .engine
        .resolve_version(&context(&state), &name, &version, &params.to_filter())
        .await?;
    Ok(Json(resolution))
}

/// `GET /language/{name}/{version}/{platform}`
pub async fn get_platform(
    State(state): State<AppState>,
    Path((name, version, platform)): Path<(String, String, String)>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let entries = state
        .engine
        .entries_for_platform(&context(&state), &name, &version, &platform)
        .await?;
    Ok(Json(entries))
}

/// `GET /language/{name}/{version}/{platform}/{arch}`
pub async fn get_artifact(
    State(state): State<AppState>,
    Path((name, version, platform, arch)): Path<(String, String, String, String)>,
) -> Result<Json<Resolution>, ApiError> {
    let resolution = state
        .engine
        .resolve_exact(&context(&state), &name, &version, &platform, &arch)
        .await?;
    Ok(Json(resolution))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": langcat_core::LANGCAT_VERSION })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            tracing::error!(error = %e, "metrics encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                e.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> FilterParams {
        FilterParams(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_first_value_wins() {
        let filter = params(&[("platform", "linux"), ("platform", "darwin"), ("arch", "x64")])
            .to_filter();
        assert_eq!(filter.platform.as_deref(), Some("linux"));
        assert_eq!(filter.arch.as_deref(), Some("x64"));
    }

    #[test]
    fn test_unrelated_and_empty_keys() {
        let filter = params(&[("page", "2"), ("platform", "")]).to_filter();
        assert!(filter.is_empty());
    }
}
