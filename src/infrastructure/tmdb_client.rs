//! TMDB implementation of the movie catalog.
//!
//! One GET per operation, authenticated with the `api_key` query parameter.
//! Every call is bounded by the client timeout; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{DomainError, MovieCatalog};
use crate::models::movie::{CatalogMovie, CatalogMovieDetail, CatalogPage};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const USER_AGENT: &str = concat!("movie-tracker/", env!("CARGO_PKG_VERSION"));

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, DomainError> {
        Url::parse(base_url)
            .map_err(|e| DomainError::Internal(format!("Invalid catalog URL {}: {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, DomainError> {
        let url = format!("{}/{}", self.base_url, path);

        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("TMDB request to /{} failed: {}", path, e);
                DomainError::Upstream(format!("error making request to TMDB: {}", e))
            })?;

        if !resp.status().is_success() {
            tracing::warn!("TMDB /{} returned {}", path, resp.status());
            return Err(DomainError::Upstream(format!(
                "TMDB API returned status code: {}",
                resp.status().as_u16()
            )));
        }

        resp.json::<T>().await.map_err(|e| {
            tracing::warn!("TMDB /{} returned malformed JSON: {}", path, e);
            DomainError::Upstream(format!("error decoding TMDB response: {}", e))
        })
    }
}

fn page_param(page: i32) -> (&'static str, String) {
    ("page", page.max(1).to_string())
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_movies(&self, query: &str, page: i32) -> Result<CatalogPage, DomainError> {
        self.get_json(
            "search/movie",
            &[("query", query.to_string()), page_param(page)],
        )
        .await
    }

    async fn popular_movies(&self, page: i32) -> Result<CatalogPage, DomainError> {
        self.get_json("movie/popular", &[page_param(page)]).await
    }

    async fn trending_movies(&self, page: i32) -> Result<CatalogPage, DomainError> {
        self.get_json("trending/movie/week", &[page_param(page)])
            .await
    }

    async fn movie_summary(&self, id: i32) -> Result<CatalogMovie, DomainError> {
        self.get_json(&format!("movie/{}", id), &[]).await
    }

    async fn movie_detail(&self, id: i32) -> Result<CatalogMovieDetail, DomainError> {
        self.get_json(&format!("movie/{}", id), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> TmdbClient {
        TmdbClient::new(&server.uri(), "test-key", timeout).unwrap()
    }

    #[tokio::test]
    async fn search_sends_query_key_and_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("query", "fight club"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 2,
                "results": [{"id": 550, "title": "Fight Club", "genre_ids": [18]}],
                "total_pages": 3,
                "total_results": 41
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server, Duration::from_secs(5))
            .search_movies("fight club", 2)
            .await
            .unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.results[0].id, 550);
        assert_eq!(page.results[0].genre_ids, vec![18]);
        assert_eq!(page.total_results, 41);
    }

    #[tokio::test]
    async fn non_positive_page_is_sent_as_first_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trending/movie/week"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"page": 1, "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server, Duration::from_secs(5))
            .trending_movies(0)
            .await
            .unwrap();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .popular_movies(1)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Upstream("TMDB API returned status code: 401".to_string())
        );
    }

    #[tokio::test]
    async fn malformed_json_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .movie_detail(550)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream(_)));
    }

    #[tokio::test]
    async fn slow_provider_hits_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 550, "title": "Fight Club"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_millis(50))
            .movie_summary(550)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upstream(_)));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(TmdbClient::new("not a url", "k", Duration::from_secs(1)).is_err());
    }
}
