//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.
//! Services hold their repositories explicitly; handlers reach them through `AppState`.

pub mod credential_service;
pub mod favorites_service;
pub mod session_service;

// Re-export for convenience
pub use credential_service::CredentialService;
pub use favorites_service::{AddFavorite, FavoritesService};
pub use session_service::SessionService;
