//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and migrations (db)
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Password hashing and session tokens (auth)
//! - Repository implementations (repositories)
//! - TMDB catalog client (tmdb_client)
//! - Application state (state)

pub mod auth;
pub mod config;
pub mod db;
pub mod repositories;
pub mod server;
pub mod state;
pub mod tmdb_client;

pub use repositories::*;
pub use state::AppState;
