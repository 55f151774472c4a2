use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Watch status of a tracked movie.
///
/// The persisted and serialized literals are the legacy Spanish labels and
/// must not change: existing rows and clients depend on them.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum WatchStatus {
    #[default]
    #[sea_orm(string_value = "por_ver")]
    #[serde(rename = "por_ver")]
    ToWatch,
    #[sea_orm(string_value = "vista")]
    #[serde(rename = "vista")]
    Watched,
    #[sea_orm(string_value = "recomendada")]
    #[serde(rename = "recomendada")]
    Recommended,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::ToWatch => "por_ver",
            WatchStatus::Watched => "vista",
            WatchStatus::Recommended => "recomendada",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "por_ver" => Ok(WatchStatus::ToWatch),
            "vista" => Ok(WatchStatus::Watched),
            "recomendada" => Ok(WatchStatus::Recommended),
            _ => Err(DomainError::validation("Invalid status")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite_movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub tmdb_id: i32,
    pub title: String,
    pub overview: String,
    /// `YYYY-MM-DD`, or NULL when the catalog date was missing or malformed
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub genre_ids: String, // JSON array
    pub status: WatchStatus,
    pub rating: Option<i32>,
    pub notes: String,
    pub recommended_by: String,
    pub added_at: String,
    pub watched_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub id: i32,
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for FavoriteMovie {
    fn from(model: Model) -> Self {
        let genre_ids: Vec<i32> = serde_json::from_str(&model.genre_ids).unwrap_or_default();

        Self {
            id: model.id,
            user_id: model.user_id,
            tmdb_id: model.tmdb_id,
            title: model.title,
            overview: model.overview,
            release_date: model.release_date,
            poster_path: model.poster_path,
            genre_ids,
            status: model.status,
            rating: model.rating,
            notes: model.notes,
            recommended_by: model.recommended_by,
            added_at: model.added_at,
            watched_at: model.watched_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_literals_round_trip_through_from_str() {
        for status in [
            WatchStatus::ToWatch,
            WatchStatus::Watched,
            WatchStatus::Recommended,
        ] {
            assert_eq!(status.as_str().parse::<WatchStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "watched".parse::<WatchStatus>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!("".parse::<WatchStatus>().is_err());
        assert!("VISTA".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn status_serializes_to_legacy_labels() {
        let json = serde_json::to_string(&WatchStatus::Recommended).unwrap();
        assert_eq!(json, "\"recomendada\"");
        let back: WatchStatus = serde_json::from_str("\"por_ver\"").unwrap();
        assert_eq!(back, WatchStatus::ToWatch);
        assert_eq!(WatchStatus::default(), WatchStatus::ToWatch);
    }

    #[test]
    fn malformed_genre_json_decodes_to_empty_list() {
        let model = Model {
            id: 1,
            user_id: 1,
            tmdb_id: 550,
            title: "Fight Club".to_string(),
            overview: String::new(),
            release_date: None,
            poster_path: None,
            genre_ids: "not json".to_string(),
            status: WatchStatus::ToWatch,
            rating: None,
            notes: String::new(),
            recommended_by: String::new(),
            added_at: "2024-01-01T00:00:00.000000Z".to_string(),
            watched_at: None,
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000000Z".to_string(),
            deleted_at: None,
        };
        assert!(FavoriteMovie::from(model).genre_ids.is_empty());
    }
}
