use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::api::error::parse_id;
use crate::api::session::CurrentUser;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::movie::{CatalogMovieDetail, CatalogPage, format_thousands};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search text
    #[serde(default)]
    q: String,
    /// Result page, defaults to 1
    page: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    page: Option<String>,
}

/// Unparseable page numbers fall back to the first page
fn page_or_first(raw: Option<&str>) -> i32 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(1)
}

/// Catalog detail plus display-formatted money figures
#[derive(Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: CatalogMovieDetail,
    pub budget_display: String,
    pub revenue_display: String,
}

#[utoipa::path(
    get,
    path = "/api/movies/search",
    responses(
        (status = 200, description = "One page of matching movies"),
        (status = 400, description = "Missing query"),
        (status = 502, description = "Catalog unavailable")
    ),
    tag = "movies"
)]
pub async fn search(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<CatalogPage>, DomainError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(DomainError::validation("Query parameter 'q' is required"));
    }

    let page = state
        .catalog
        .search_movies(q, page_or_first(query.page.as_deref()))
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/movies/popular",
    responses((status = 200, description = "Popular movies")),
    tag = "movies"
)]
pub async fn popular(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<CatalogPage>, DomainError> {
    let page = state
        .catalog
        .popular_movies(page_or_first(query.page.as_deref()))
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/movies/trending",
    responses((status = 200, description = "Movies trending this week")),
    tag = "movies"
)]
pub async fn trending(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<CatalogPage>, DomainError> {
    let page = state
        .catalog
        .trending_movies(page_or_first(query.page.as_deref()))
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(("id" = i32, Path, description = "TMDB movie id")),
    responses(
        (status = 200, description = "Full movie detail"),
        (status = 400, description = "Invalid id"),
        (status = 502, description = "Catalog unavailable")
    ),
    tag = "movies"
)]
pub async fn detail(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MovieDetailResponse>, DomainError> {
    let id = parse_id(&id)?;
    let movie = state.catalog.movie_detail(id).await?;

    Ok(Json(MovieDetailResponse {
        budget_display: format_thousands(movie.budget),
        revenue_display: format_thousands(movie.revenue),
        movie,
    }))
}
