//! Repository implementations using SeaORM

pub mod favorite_repository;
pub mod session_repository;
pub mod user_repository;

pub use favorite_repository::SeaOrmFavoriteRepository;
pub use session_repository::SeaOrmSessionRepository;
pub use user_repository::SeaOrmUserRepository;
