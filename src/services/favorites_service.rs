//! Favorites Ledger - per-user tracked movies
//!
//! Every operation is scoped by the owning user id. An entry owned by someone
//! else is reported exactly like a missing one.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    DomainError, FavoriteFilter, FavoriteRepository, FavoriteStats, FavoriteUpdate, NewFavorite,
};
use crate::models::favorite_movie::{FavoriteMovie, WatchStatus};
use crate::models::movie::CatalogMovie;
use crate::utils::time::now_timestamp;

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 10;

pub fn validate_rating(rating: i32) -> Result<i32, DomainError> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(rating)
    } else {
        Err(DomainError::validation("Rating must be between 1 and 10"))
    }
}

/// Parses user-supplied rating text; non-numeric input is a validation error
pub fn parse_rating(raw: &str) -> Result<i32, DomainError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DomainError::validation("Rating must be between 1 and 10"))
        .and_then(validate_rating)
}

/// Keeps a catalog release date only if it is a real `YYYY-MM-DD` date
pub fn parse_release_date(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// User-supplied fields of a new favorite
#[derive(Debug, Clone, Default)]
pub struct AddFavorite {
    pub status: WatchStatus,
    pub rating: Option<i32>,
    pub notes: String,
    pub recommended_by: String,
}

#[derive(Clone)]
pub struct FavoritesService {
    favorites: Arc<dyn FavoriteRepository>,
}

impl FavoritesService {
    pub fn new(favorites: Arc<dyn FavoriteRepository>) -> Self {
        Self { favorites }
    }

    pub async fn add(
        &self,
        user_id: i32,
        movie: &CatalogMovie,
        input: AddFavorite,
    ) -> Result<FavoriteMovie, DomainError> {
        let rating = input.rating.map(validate_rating).transpose()?;
        let now = now_timestamp();
        let watched_at = (input.status == WatchStatus::Watched).then(|| now.clone());

        let favorite = self
            .favorites
            .create(NewFavorite {
                user_id,
                tmdb_id: movie.id,
                title: movie.title.clone(),
                overview: movie.overview.clone(),
                release_date: parse_release_date(movie.release_date.as_deref()),
                poster_path: movie.poster_path.clone(),
                genre_ids: movie.all_genre_ids(),
                status: input.status,
                rating,
                notes: input.notes,
                recommended_by: input.recommended_by,
                added_at: now,
                watched_at,
            })
            .await?;

        tracing::info!(
            "User {} added movie {} ({}) as {}",
            user_id,
            favorite.tmdb_id,
            favorite.title,
            favorite.status
        );
        Ok(favorite)
    }

    /// Most recently added first; `limit == 0` returns everything
    pub async fn list(
        &self,
        user_id: i32,
        status: Option<WatchStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FavoriteMovie>, DomainError> {
        self.favorites
            .find_all(
                user_id,
                FavoriteFilter {
                    status,
                    offset,
                    limit,
                },
            )
            .await
    }

    pub async fn get(&self, id: i32, user_id: i32) -> Result<FavoriteMovie, DomainError> {
        self.favorites
            .find_by_id(id, user_id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Entering `vista` stamps `watched_at` the first time only
    pub async fn update_status(
        &self,
        id: i32,
        user_id: i32,
        status: WatchStatus,
    ) -> Result<FavoriteMovie, DomainError> {
        let now = now_timestamp();
        let watched_at = (status == WatchStatus::Watched).then(|| now.clone());

        let favorite = self
            .favorites
            .update(id, user_id, FavoriteUpdate::Status { status, watched_at }, now)
            .await?;

        tracing::info!("User {} set favorite {} to {}", user_id, id, status);
        Ok(favorite)
    }

    pub async fn update_rating(
        &self,
        id: i32,
        user_id: i32,
        rating: i32,
    ) -> Result<FavoriteMovie, DomainError> {
        let rating = validate_rating(rating)?;

        let favorite = self
            .favorites
            .update(id, user_id, FavoriteUpdate::Rating(rating), now_timestamp())
            .await?;

        tracing::info!("User {} rated favorite {} with {}", user_id, id, rating);
        Ok(favorite)
    }

    /// Replaces whichever free-text fields are given; `None` keeps the current value
    pub async fn update_notes(
        &self,
        id: i32,
        user_id: i32,
        notes: Option<String>,
        recommended_by: Option<String>,
    ) -> Result<FavoriteMovie, DomainError> {
        let current = self.get(id, user_id).await?;

        self.favorites
            .update(
                id,
                user_id,
                FavoriteUpdate::Notes {
                    notes: notes.unwrap_or(current.notes),
                    recommended_by: recommended_by.unwrap_or(current.recommended_by),
                },
                now_timestamp(),
            )
            .await
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), DomainError> {
        self.favorites.delete(id, user_id, now_timestamp()).await?;
        tracing::info!("User {} removed favorite {}", user_id, id);
        Ok(())
    }

    pub async fn stats(&self, user_id: i32) -> Result<FavoriteStats, DomainError> {
        self.favorites.stats(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert_eq!(validate_rating(1), Ok(1));
        assert_eq!(validate_rating(10), Ok(10));
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(11).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn rating_text_must_be_numeric() {
        assert_eq!(parse_rating(" 7 "), Ok(7));
        assert!(matches!(parse_rating("seven"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_rating(""), Err(DomainError::Validation(_))));
        assert!(matches!(parse_rating("7.5"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_rating("11"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn release_date_parsing_is_lenient() {
        assert_eq!(
            parse_release_date(Some("1999-10-15")),
            Some("1999-10-15".to_string())
        );
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(Some("1999")), None);
        assert_eq!(parse_release_date(Some("1999-02-30")), None);
        assert_eq!(parse_release_date(None), None);
    }
}
