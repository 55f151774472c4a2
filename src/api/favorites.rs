use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::error::parse_id;
use crate::api::session::CurrentUser;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::favorite_movie::{FavoriteMovie, WatchStatus};
use crate::services::AddFavorite;
use crate::services::favorites_service::parse_rating;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// por_ver, vista or recomendada
    status: Option<String>,
    offset: Option<String>,
    /// Page size, 0 for all
    limit: Option<String>,
}

#[derive(Deserialize)]
pub struct AddFavoriteForm {
    #[serde(default)]
    tmdb_id: String,
    status: Option<String>,
    rating: Option<String>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    recommended_by: String,
}

#[derive(Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    status: String,
}

#[derive(Deserialize)]
pub struct RatingForm {
    #[serde(default)]
    rating: String,
}

#[derive(Deserialize)]
pub struct NotesForm {
    notes: Option<String>,
    recommended_by: Option<String>,
}

/// Blank means "not given"
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_status(raw: Option<&str>) -> Result<Option<WatchStatus>, DomainError> {
    non_blank(raw).map(str::parse).transpose()
}

fn parse_count(raw: Option<&str>, field: &str) -> Result<u64, DomainError> {
    match non_blank(raw) {
        None => Ok(0),
        Some(v) => v
            .parse()
            .map_err(|_| DomainError::validation(format!("Invalid {}", field))),
    }
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "Favorites, most recently added first, with per-status counts"),
        (status = 400, description = "Invalid filter")
    ),
    tag = "favorites"
)]
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, DomainError> {
    let user_id = current.user.id;
    let status = parse_status(query.status.as_deref())?;
    let offset = parse_count(query.offset.as_deref(), "offset")?;
    let limit = parse_count(query.limit.as_deref(), "limit")?;

    let favorites = state.favorites.list(user_id, status, offset, limit).await?;

    let stats = state.favorites.stats(user_id).await.unwrap_or_else(|e| {
        tracing::warn!("Could not compute stats for user {}: {}", user_id, e);
        Default::default()
    });

    Ok(Json(json!({
        "favorites": favorites,
        "total": favorites.len(),
        "stats": stats,
    })))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    responses(
        (status = 201, description = "Movie added to favorites"),
        (status = 400, description = "Invalid tmdb_id, status or rating"),
        (status = 409, description = "Movie already tracked"),
        (status = 502, description = "Catalog unavailable")
    ),
    tag = "favorites"
)]
pub async fn add(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<AddFavoriteForm>,
) -> Result<impl IntoResponse, DomainError> {
    let tmdb_id = form
        .tmdb_id
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| DomainError::validation("Invalid tmdb_id"))?;
    let status = parse_status(form.status.as_deref())?.unwrap_or_default();
    let rating = non_blank(form.rating.as_deref())
        .map(parse_rating)
        .transpose()?;

    // Validate everything before spending a catalog round trip
    let movie = state.catalog.movie_summary(tmdb_id).await?;

    let favorite = state
        .favorites
        .add(
            current.user.id,
            &movie,
            AddFavorite {
                status,
                rating,
                notes: form.notes.trim().to_string(),
                recommended_by: form.recommended_by.trim().to_string(),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(favorite)))
}

#[utoipa::path(
    get,
    path = "/api/favorites/{id}",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "The favorite"),
        (status = 404, description = "No such favorite for this user")
    ),
    tag = "favorites"
)]
pub async fn get_favorite(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<FavoriteMovie>, DomainError> {
    let id = parse_id(&id)?;
    Ok(Json(state.favorites.get(id, current.user.id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/favorites/{id}/status",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "No such favorite for this user")
    ),
    tag = "favorites"
)]
pub async fn update_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Json<FavoriteMovie>, DomainError> {
    let id = parse_id(&id)?;
    let status: WatchStatus = form.status.trim().parse()?;

    Ok(Json(
        state
            .favorites
            .update_status(id, current.user.id, status)
            .await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/favorites/{id}/rating",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "Rating updated"),
        (status = 400, description = "Rating outside 1..=10"),
        (status = 404, description = "No such favorite for this user")
    ),
    tag = "favorites"
)]
pub async fn update_rating(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<RatingForm>,
) -> Result<Json<FavoriteMovie>, DomainError> {
    let id = parse_id(&id)?;
    let rating = parse_rating(&form.rating)?;

    Ok(Json(
        state
            .favorites
            .update_rating(id, current.user.id, rating)
            .await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/favorites/{id}/notes",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "Notes updated"),
        (status = 404, description = "No such favorite for this user")
    ),
    tag = "favorites"
)]
pub async fn update_notes(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<NotesForm>,
) -> Result<Json<FavoriteMovie>, DomainError> {
    let id = parse_id(&id)?;

    Ok(Json(
        state
            .favorites
            .update_notes(
                id,
                current.user.id,
                form.notes.map(|n| n.trim().to_string()),
                form.recommended_by.map(|r| r.trim().to_string()),
            )
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    params(("id" = i32, Path, description = "Favorite id")),
    responses(
        (status = 200, description = "Favorite removed"),
        (status = 404, description = "No such favorite for this user")
    ),
    tag = "favorites"
)]
pub async fn delete_favorite(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let id = parse_id(&id)?;
    state.favorites.delete(id, current.user.id).await?;

    Ok(Json(json!({ "message": "Favorite removed" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_status_means_unset() {
        assert_eq!(parse_status(None), Ok(None));
        assert_eq!(parse_status(Some("  ")), Ok(None));
        assert_eq!(parse_status(Some("vista")), Ok(Some(WatchStatus::Watched)));
        assert!(parse_status(Some("seen")).is_err());
    }

    #[test]
    fn counts_default_to_zero() {
        assert_eq!(parse_count(None, "limit"), Ok(0));
        assert_eq!(parse_count(Some("25"), "limit"), Ok(25));
        assert_eq!(
            parse_count(Some("-1"), "offset"),
            Err(DomainError::validation("Invalid offset"))
        );
    }
}
