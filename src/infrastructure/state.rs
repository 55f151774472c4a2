//! Application state containing services and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{DomainError, MovieCatalog};
use crate::infrastructure::config::Config;
use crate::infrastructure::tmdb_client::TmdbClient;
use crate::infrastructure::{
    SeaOrmFavoriteRepository, SeaOrmSessionRepository, SeaOrmUserRepository,
};
use crate::services::{CredentialService, FavoritesService, SessionService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub credentials: CredentialService,
    pub sessions: SessionService,
    pub favorites: FavoritesService,
    pub catalog: Arc<dyn MovieCatalog>,
    /// Adds the `Secure` attribute to session cookies
    pub secure_cookies: bool,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(
        db: DatabaseConnection,
        catalog: Arc<dyn MovieCatalog>,
        session_secret: &str,
        secure_cookies: bool,
    ) -> Self {
        let credentials = CredentialService::new(Arc::new(SeaOrmUserRepository::new(db.clone())));
        let sessions = SessionService::new(
            Arc::new(SeaOrmSessionRepository::new(db.clone())),
            session_secret,
        );
        let favorites = FavoritesService::new(Arc::new(SeaOrmFavoriteRepository::new(db.clone())));

        Self {
            db,
            credentials,
            sessions,
            favorites,
            catalog,
            secure_cookies,
        }
    }

    /// Wire the production collaborators described by `config`
    pub fn from_config(db: DatabaseConnection, config: &Config) -> Result<Self, DomainError> {
        let catalog = TmdbClient::new(
            &config.tmdb_base_url,
            &config.tmdb_api_key,
            config.catalog_timeout,
        )?;

        Ok(Self::new(
            db,
            Arc::new(catalog),
            &config.session_secret,
            config.is_production(),
        ))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
