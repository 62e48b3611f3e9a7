/// TMDB (The Movie Database) v3 provider
///
/// API Flow:
/// 1. Discovery: /discover/movie → one page of popularity-ranked movies plus `total_pages`
/// 2. Trailer: /movie/{id}/videos → video keys, first one is used
/// 3. Reviews: /movie/{id}/reviews → user reviews
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ApiListResponse, ApiReview, ApiVideo, DiscoverResponse, GenreId, Review},
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::instrument;

const SORT_BY: &str = "popularity.desc";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Query parameters for a discovery page request
    fn discover_query(&self, genre: &GenreId, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.api_key.clone()),
            ("with_genres", genre.as_str().to_string()),
            ("sort_by", SORT_BY.to_string()),
            ("language", self.language.clone()),
            ("page", page.to_string()),
        ]
    }

    /// Turns a non-2xx response into an error, otherwise decodes the body
    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn discover_page(&self, genre: &GenreId, page: u32) -> AppResult<DiscoverResponse> {
        let response = self
            .http_client
            .get(self.endpoint("/discover/movie"))
            .query(&self.discover_query(genre, page))
            .send()
            .await?;

        let discovered: DiscoverResponse = Self::decode(response).await?;

        tracing::debug!(
            results = discovered.results.len(),
            total_pages = discovered.total_pages,
            "Discovery page fetched"
        );

        Ok(discovered)
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn fetch_videos(&self, movie_id: u64) -> AppResult<Vec<String>> {
        let response = self
            .http_client
            .get(self.endpoint(&format!("/movie/{}/videos", movie_id)))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let videos: ApiListResponse<ApiVideo> = Self::decode(response).await?;

        Ok(videos.results.into_iter().map(|v| v.key).collect())
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn fetch_reviews(&self, movie_id: u64) -> AppResult<Vec<Review>> {
        let response = self
            .http_client
            .get(self.endpoint(&format!("/movie/{}/reviews", movie_id)))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let reviews: ApiListResponse<ApiReview> = Self::decode(response).await?;

        Ok(reviews.results.into_iter().map(Review::from).collect())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> TmdbProvider {
        TmdbProvider::new(
            "test_key".to_string(),
            "http://test.local/3/".to_string(),
            "tr-TR".to_string(),
        )
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let provider = create_test_provider();
        assert_eq!(
            provider.endpoint("/discover/movie"),
            "http://test.local/3/discover/movie"
        );
    }

    #[test]
    fn test_discover_query_parameters() {
        let provider = create_test_provider();
        let query = provider.discover_query(&GenreId::new("35"), 7);

        assert_eq!(
            query,
            vec![
                ("api_key", "test_key".to_string()),
                ("with_genres", "35".to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("language", "tr-TR".to_string()),
                ("page", "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_discover_query_without_genre() {
        let provider = create_test_provider();
        let query = provider.discover_query(&GenreId::NONE, 1);
        assert_eq!(query[1], ("with_genres", String::new()));
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(create_test_provider().name(), "tmdb");
    }

    #[test]
    fn test_video_list_deserialization() {
        let json = r#"{
            "id": 550,
            "results": [
                { "iso_639_1": "en", "name": "Trailer", "key": "SUXWAEX2jlg", "site": "YouTube", "type": "Trailer" },
                { "iso_639_1": "en", "name": "Teaser", "key": "BdJKm16Co6M", "site": "YouTube", "type": "Teaser" }
            ]
        }"#;

        let videos: ApiListResponse<ApiVideo> = serde_json::from_str(json).unwrap();
        assert_eq!(videos.results.len(), 2);
        assert_eq!(videos.results[0].key, "SUXWAEX2jlg");
        assert_eq!(videos.results[0].video_type, Some("Trailer".to_string()));
    }

    #[test]
    fn test_empty_list_deserialization() {
        let videos: ApiListResponse<ApiVideo> = serde_json::from_str(r#"{ "id": 1 }"#).unwrap();
        assert!(videos.results.is_empty());
    }

    #[tokio::test]
    async fn test_discover_page_surfaces_connection_errors() {
        let provider = TmdbProvider::new(
            "test_key".to_string(),
            "http://127.0.0.1:1/3".to_string(),
            "tr-TR".to_string(),
        );

        let result = provider.discover_page(&GenreId::new("35"), 1).await;
        assert!(matches!(result, Err(AppError::HttpClient(_))));
    }
}
