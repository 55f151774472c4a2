pub mod favorite_movie;
pub mod movie;
pub mod session;
pub mod user;

pub use favorite_movie::{FavoriteMovie, WatchStatus};
pub use movie::{CatalogMovie, CatalogMovieDetail, CatalogPage};
pub use user::User;
