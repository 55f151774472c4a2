//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;
use crate::models::favorite_movie::{FavoriteMovie, WatchStatus};
use crate::models::session;
use crate::models::user;

/// Input for creating a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; `Duplicate` if username or email is taken
    async fn create(&self, input: NewUser) -> Result<user::Model, DomainError>;

    /// Find a non-deleted user whose username OR email equals `identifier`
    async fn find_active_by_login(
        &self,
        identifier: &str,
    ) -> Result<Option<user::Model>, DomainError>;

    /// Find a non-deleted user by ID
    async fn find_active_by_id(&self, id: i32) -> Result<Option<user::Model>, DomainError>;

    /// Soft-delete a user together with their favorites and sessions
    async fn soft_delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Session entity
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(
        &self,
        id: String,
        user_id: i32,
        expires_at: String,
    ) -> Result<session::Model, DomainError>;

    /// Find a session that has not expired as of `now`
    async fn find_active(
        &self,
        id: &str,
        now: &str,
    ) -> Result<Option<session::Model>, DomainError>;

    /// Delete a session; deleting an unknown ID is not an error
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// Delete every session that expired before `now`
    async fn purge_expired(&self, now: &str) -> Result<u64, DomainError>;
}

/// Snapshot of a catalog movie to be stored as a favorite
#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub user_id: i32,
    pub tmdb_id: i32,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub genre_ids: Vec<i32>,
    pub status: WatchStatus,
    pub rating: Option<i32>,
    pub notes: String,
    pub recommended_by: String,
    pub added_at: String,
    pub watched_at: Option<String>,
}

/// Filter criteria for favorite queries
#[derive(Debug, Default, Clone)]
pub struct FavoriteFilter {
    pub status: Option<WatchStatus>,
    pub offset: u64,
    /// Zero means no pagination
    pub limit: u64,
}

/// One allowed mutation of a favorite entry
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteUpdate {
    /// `watched_at` is written only if the stored value is still NULL
    Status {
        status: WatchStatus,
        watched_at: Option<String>,
    },
    Rating(i32),
    Notes {
        notes: String,
        recommended_by: String,
    },
}

/// Per-status counts; the three partitions always sum to `total`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStats {
    pub total: u64,
    #[serde(rename = "por_ver")]
    pub to_watch: u64,
    #[serde(rename = "vista")]
    pub watched: u64,
    #[serde(rename = "recomendada")]
    pub recommended: u64,
}

/// Repository trait for FavoriteMovie entity. Every call is scoped by owner.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Insert an entry; `Duplicate` if the user already tracks this movie
    async fn create(&self, input: NewFavorite) -> Result<FavoriteMovie, DomainError>;

    /// Entries for a user, most recently added first
    async fn find_all(
        &self,
        user_id: i32,
        filter: FavoriteFilter,
    ) -> Result<Vec<FavoriteMovie>, DomainError>;

    async fn find_by_id(&self, id: i32, user_id: i32)
    -> Result<Option<FavoriteMovie>, DomainError>;

    /// Apply one update; `NotFound` if no owned, non-deleted row matched
    async fn update(
        &self,
        id: i32,
        user_id: i32,
        update: FavoriteUpdate,
        now: String,
    ) -> Result<FavoriteMovie, DomainError>;

    /// Soft delete; `NotFound` if no owned, non-deleted row matched
    async fn delete(&self, id: i32, user_id: i32, now: String) -> Result<(), DomainError>;

    async fn stats(&self, user_id: i32) -> Result<FavoriteStats, DomainError>;
}
