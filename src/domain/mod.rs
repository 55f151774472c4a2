//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no reqwest).
//! Only trait definitions and domain error types.

pub mod catalog;
pub mod errors;
pub mod repositories;

pub use catalog::MovieCatalog;
pub use errors::DomainError;
pub use repositories::*;
