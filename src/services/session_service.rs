//! Session Store - signed cookie tokens backed by a session table

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{DomainError, SessionRepository};
use crate::infrastructure::auth::{SessionClaims, decode_session_token, encode_session_token};
use crate::utils::time::{format_timestamp, now_timestamp};

/// Fixed lifetime of a session, counted from login
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    secret: Arc<str>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionRepository>, secret: &str) -> Self {
        Self {
            sessions,
            secret: Arc::from(secret),
        }
    }

    pub fn ttl_seconds() -> i64 {
        Duration::days(SESSION_TTL_DAYS).num_seconds()
    }

    /// Issue a new session for `user_id` and return its signed token
    pub async fn create_session(&self, user_id: i32) -> Result<String, DomainError> {
        let now = Utc::now();
        let expires_at = now + Duration::days(SESSION_TTL_DAYS);

        let purged = self.sessions.purge_expired(&format_timestamp(now)).await?;
        if purged > 0 {
            tracing::debug!("Purged {} expired sessions", purged);
        }

        let session = self
            .sessions
            .create(
                Uuid::new_v4().to_string(),
                user_id,
                format_timestamp(expires_at),
            )
            .await?;

        encode_session_token(
            &self.secret,
            &SessionClaims {
                sid: session.id,
                uid: user_id,
                exp: expires_at.timestamp() as usize,
            },
        )
        .map_err(DomainError::Internal)
    }

    /// The bound user id, or `None` for a missing, expired, revoked or tampered token
    pub async fn resolve_session(&self, token: &str) -> Result<Option<i32>, DomainError> {
        let claims = match decode_session_token(&self.secret, token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                return Ok(None);
            }
        };

        let session = self
            .sessions
            .find_active(&claims.sid, &now_timestamp())
            .await?;

        Ok(session
            .filter(|s| s.user_id == claims.uid)
            .map(|s| s.user_id))
    }

    /// Revoke the session behind `token`; unknown or invalid tokens are ignored
    pub async fn destroy_session(&self, token: &str) -> Result<(), DomainError> {
        match decode_session_token(&self.secret, token) {
            Ok(claims) => self.sessions.delete(&claims.sid).await,
            Err(_) => Ok(()),
        }
    }
}
