use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::register,
        api::auth::login,
        api::auth::logout,
        api::auth::me,
        api::movies::search,
        api::movies::popular,
        api::movies::trending,
        api::movies::detail,
        api::favorites::list,
        api::favorites::add,
        api::favorites::get_favorite,
        api::favorites::update_status,
        api::favorites::update_rating,
        api::favorites::update_notes,
        api::favorites::delete_favorite,
        api::stats::get_stats,
    ),
    tags(
        (name = "auth", description = "Accounts and cookie sessions"),
        (name = "movies", description = "TMDB catalog lookups"),
        (name = "favorites", description = "Per-user favorites ledger")
    )
)]
pub struct ApiDoc;
