//! HTTP handlers for the course search API

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::Uri;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::{PageRequest, SearchCriteria, SearchResponse, SortSpec, SuggestionResponse};
use crate::server::AppState;
use crate::server::error::{ApiError, ApiResult};

/// Query parameters for `GET /api/search`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub next_session_date: Option<DateTime<Utc>>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchParams {
    pub fn into_request(self) -> (SearchCriteria, SortSpec, PageRequest) {
        let sort = SortSpec::from_keyword(self.sort.as_deref());
        let page = PageRequest::new(self.page, self.size);
        let criteria = SearchCriteria {
            term: self.q,
            min_age: self.min_age,
            max_age: self.max_age,
            min_price: self.min_price,
            max_price: self.max_price,
            category: self.category,
            course_type: self.course_type,
            min_session_date: self.next_session_date,
        };
        (criteria, sort, page)
    }
}

/// Query parameters for `GET /api/allCourses`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Query parameters for `GET /api/search/suggest`
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: String,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_docs: u64,
    pub segments: usize,
}

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(params) = params?;
    let (criteria, sort, page) = params.into_request();
    tracing::debug!("Search request: {:?} sort={} page={:?}", criteria, sort, page);

    let service = state.search.clone();
    let response =
        tokio::task::spawn_blocking(move || service.search(&criteria, sort, page)).await?;
    Ok(Json(response))
}

/// GET /api/allCourses
pub async fn all_courses(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(params) = params?;
    let sort = SortSpec::from_keyword(params.sort.as_deref());
    let page = PageRequest::new(params.page, params.size);

    let service = state.search.clone();
    let response = tokio::task::spawn_blocking(move || service.list_all(sort, page)).await?;
    Ok(Json(response))
}

/// GET /api/search/suggest
pub async fn suggest(
    State(state): State<AppState>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> ApiResult<Json<SuggestionResponse>> {
    let Query(params) = params?;

    let service = state.suggestions.clone();
    let response =
        tokio::task::spawn_blocking(move || service.suggest(&params.q, params.size)).await?;
    Ok(Json(response))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let stats = state
        .catalog
        .stats()
        .map_err(|e| ApiError::Unavailable(format!("{e:#}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_docs: stats.total_docs,
        segments: stats.segments,
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
