//! Credential Store - registration, login and account lookup

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{DomainError, NewUser, UserRepository};
use crate::infrastructure::auth::{hash_password, verify_password};
use crate::models::User;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").expect("valid email regex")
});

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Checks registration input before anything touches the store
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), DomainError> {
    let username_len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username_len) {
        return Err(DomainError::validation(
            "username must be between 3 and 50 characters",
        ));
    }

    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(DomainError::validation(
            "password must be at least 8 characters long",
        ));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(DomainError::validation("invalid email format"));
    }

    Ok(())
}

#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        validate_registration(username, email, password)?;

        let password_hash = hash_password(password).map_err(DomainError::Internal)?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {} (id {})", user.username, user.id);
        Ok(User::from(user))
    }

    /// Missing user and wrong password produce the same error
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, DomainError> {
        if identifier.is_empty() || password.is_empty() {
            return Err(DomainError::validation("username and password are required"));
        }

        let Some(user) = self.users.find_active_by_login(identifier).await? else {
            tracing::warn!("Login failed: no matching account");
            return Err(DomainError::InvalidCredentials);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {
                tracing::info!("Login succeeded for user {}", user.username);
                Ok(User::from(user))
            }
            Ok(false) => {
                tracing::warn!("Password verification failed for user {}", user.username);
                Err(DomainError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!("Stored hash for user {} is unreadable: {}", user.id, e);
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<User, DomainError> {
        self.users
            .find_active_by_id(id)
            .await?
            .map(User::from)
            .ok_or(DomainError::NotFound)
    }

    /// Soft-deletes the account; favorites follow it, sessions are dropped
    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        self.users.soft_delete(id).await?;
        tracing::info!("Soft-deleted user {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_registration() {
        assert!(validate_registration("ana", "ana@example.com", "12345678").is_ok());
        assert!(validate_registration(&"x".repeat(50), "a.b+c@mail.example.org", "longenough").is_ok());
    }

    #[test]
    fn rejects_username_length_out_of_range() {
        assert!(validate_registration("ab", "ana@example.com", "12345678").is_err());
        assert!(validate_registration(&"x".repeat(51), "ana@example.com", "12345678").is_err());
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_registration("ana", "ana@example.com", "1234567").unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("password must be at least 8 characters long")
        );
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["", "ana", "ana@example", "ana@example.c", "@example.com", "ana@@example.com"] {
            assert!(
                validate_registration("ana", email, "12345678").is_err(),
                "{} should be rejected",
                email
            );
        }
    }
}
