//! Movie catalog contract
//!
//! The catalog is an external, read-only provider. Failures surface as
//! `DomainError::Upstream` and are never retried at this layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::movie::{CatalogMovie, CatalogMovieDetail, CatalogPage};

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search_movies(&self, query: &str, page: i32) -> Result<CatalogPage, DomainError>;

    async fn popular_movies(&self, page: i32) -> Result<CatalogPage, DomainError>;

    /// Weekly trending movies
    async fn trending_movies(&self, page: i32) -> Result<CatalogPage, DomainError>;

    /// Snapshot fields for a single movie (used when adding a favorite)
    async fn movie_summary(&self, id: i32) -> Result<CatalogMovie, DomainError>;

    async fn movie_detail(&self, id: i32) -> Result<CatalogMovieDetail, DomainError>;
}
