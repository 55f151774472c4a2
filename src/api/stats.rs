use axum::{Json, extract::State};

use crate::api::session::CurrentUser;
use crate::domain::{DomainError, FavoriteStats};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Counts of favorites per status"),
        (status = 401, description = "Not signed in")
    ),
    tag = "favorites"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<FavoriteStats>, DomainError> {
    Ok(Json(state.favorites.stats(current.user.id).await?))
}
