//! Session cookie handling and the authenticated-user extractor

use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::User;
use crate::services::SessionService;

pub const SESSION_COOKIE: &str = "movie_tracker_session";

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SessionService::ttl_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie from the browser
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Session token from the request's `Cookie` headers, if any
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn unauthenticated(clear_cookie: Option<bool>) -> Response {
    let body = Json(json!({ "error": "Authentication required" }));
    match clear_cookie {
        Some(secure) => (
            StatusCode::UNAUTHORIZED,
            [(header::SET_COOKIE, clear_session_cookie(secure))],
            body,
        )
            .into_response(),
        None => (StatusCode::UNAUTHORIZED, body).into_response(),
    }
}

/// The signed-in user behind the request's session cookie.
///
/// A session that still resolves but points at a user who no longer exists
/// is destroyed on the spot and the request is treated as anonymous.
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = read_session_cookie(&parts.headers).ok_or_else(|| unauthenticated(None))?;

        let user_id = match state.sessions.resolve_session(&token).await {
            Ok(Some(user_id)) => user_id,
            Ok(None) => return Err(unauthenticated(Some(state.secure_cookies))),
            Err(e) => return Err(e.into_response()),
        };

        match state.credentials.get_user_by_id(user_id).await {
            Ok(user) => Ok(CurrentUser { user, token }),
            Err(DomainError::NotFound) => {
                tracing::warn!("Session bound to missing user {}; destroying it", user_id);
                if let Err(e) = state.sessions.destroy_session(&token).await {
                    tracing::error!("Failed to destroy stale session: {}", e);
                }
                Err(unauthenticated(Some(state.secure_cookies)))
            }
            Err(e) => Err(e.into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; movie_tracker_session=abc.def.ghi; lang=es"),
        );
        assert_eq!(read_session_cookie(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(read_session_cookie(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("movie_tracker_session="));
        assert_eq!(read_session_cookie(&headers), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert!(cookie.starts_with("movie_tracker_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("tok", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }
}
