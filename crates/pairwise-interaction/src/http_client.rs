//! HttpScoringClient - REST implementation of [`ScoringApi`].
//!
//! Every request carries JSON `Accept`/`Content-Type` headers and, when the
//! credential provider holds a token, `Authorization: Bearer <token>`. A
//! per-request timeout from [`ClientConfig`] applies; expiry surfaces as
//! `PairwiseError::Timeout`.

use async_trait::async_trait;
use pairwise_core::api::{Paginated, ScoringApi, VideoFilter};
use pairwise_core::comparison::{Comparison, ComparisonUpdate};
use pairwise_core::config::ClientConfig;
use pairwise_core::credential::CredentialProvider;
use pairwise_core::rate_later::RateLaterEntry;
use pairwise_core::rating::ContributorRating;
use pairwise_core::video::Video;
use pairwise_core::{PairwiseError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const JSON: &str = "application/json";

/// Client for the scoring service's REST API.
#[derive(Clone)]
pub struct HttpScoringClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct VideoCreateRequest<'a> {
    video_id: &'a str,
}

#[derive(Debug, Serialize)]
struct RatingCreateRequest<'a> {
    video_id: &'a str,
    is_public: bool,
}

#[derive(Debug, Serialize)]
struct RatingVisibilityRequest {
    is_public: bool,
}

#[derive(Debug, Serialize)]
struct RateLaterCreateRequest<'a> {
    video: VideoCreateRequest<'a>,
}

impl HttpScoringClient {
    /// Creates a client for `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the URL cannot be used as a base.
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        config.validate()?;
        let mut base_url = Url::parse(&config.api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PairwiseError::config(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            credentials,
            timeout: config.timeout(),
        })
    }

    /// Replaces the underlying reqwest client (proxy settings, TLS roots...).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments...>/` with each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| PairwiseError::config("API URL cannot be used as a base"))?;
            path.pop_if_empty();
            path.extend(segments);
            path.push("");
        }
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("[HttpScoringClient] {} {}", method, url);
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .timeout(self.timeout);

        if let Some(token) = self.credentials.get().await {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }

    /// Sends and maps non-success statuses onto the error taxonomy.
    async fn send(
        &self,
        request: RequestBuilder,
        entity_type: &'static str,
        id: &str,
    ) -> Result<Response> {
        let response = request.send().await.map_err(PairwiseError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let err = PairwiseError::from_status(status.as_u16(), entity_type, id, body);
        if err.is_unauthenticated() {
            tracing::warn!(
                "[HttpScoringClient] {} '{}' rejected: not logged in or token expired",
                entity_type,
                id
            );
        }
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity_type: &'static str,
        id: &str,
    ) -> Result<T> {
        let response = self.send(request, entity_type, id).await?;
        response.json::<T>().await.map_err(PairwiseError::from)
    }
}

#[async_trait]
impl ScoringApi for HttpScoringClient {
    async fn get_comparison(&self, video_a: &str, video_b: &str) -> Result<Comparison> {
        let url = self.endpoint(&["users", "me", "comparisons", video_a, video_b])?;
        let request = self.request(Method::GET, url).await;
        self.send_json(request, "comparison", &format!("{}/{}", video_a, video_b))
            .await
    }

    async fn create_comparison(&self, comparison: &Comparison) -> Result<Comparison> {
        let url = self.endpoint(&["users", "me", "comparisons"])?;
        let request = self.request(Method::POST, url).await.json(comparison);
        self.send_json(request, "comparison", &comparison.pair().to_string())
            .await
    }

    async fn update_comparison(
        &self,
        video_a: &str,
        video_b: &str,
        update: &ComparisonUpdate,
    ) -> Result<Comparison> {
        let url = self.endpoint(&["users", "me", "comparisons", video_a, video_b])?;
        let request = self.request(Method::PUT, url).await.json(update);
        self.send_json(request, "comparison", &format!("{}/{}", video_a, video_b))
            .await
    }

    async fn list_comparisons(&self, video_id: Option<&str>) -> Result<Paginated<Comparison>> {
        let url = match video_id {
            Some(video_id) => self.endpoint(&["users", "me", "comparisons", video_id])?,
            None => self.endpoint(&["users", "me", "comparisons"])?,
        };
        let request = self.request(Method::GET, url).await;
        self.send_json(request, "comparison", video_id.unwrap_or("*"))
            .await
    }

    async fn get_video(&self, video_id: &str) -> Result<Video> {
        let url = self.endpoint(&["video", video_id])?;
        let request = self.request(Method::GET, url).await;
        self.send_json(request, "video", video_id).await
    }

    async fn find_videos(&self, filter: &VideoFilter) -> Result<Paginated<Video>> {
        let url = self.endpoint(&["video"])?;
        let request = self
            .request(Method::GET, url)
            .await
            .query(&filter.to_query());
        let id = filter.video_id.clone().unwrap_or_default();
        self.send_json(request, "video", &id).await
    }

    async fn create_video(&self, video_id: &str) -> Result<Video> {
        let url = self.endpoint(&["video"])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&VideoCreateRequest { video_id });
        self.send_json(request, "video", video_id).await
    }

    async fn get_contributor_rating(&self, video_id: &str) -> Result<ContributorRating> {
        let url = self.endpoint(&["users", "me", "contributor_ratings", video_id])?;
        let request = self.request(Method::GET, url).await;
        self.send_json(request, "contributor_rating", video_id).await
    }

    async fn create_contributor_rating(
        &self,
        video_id: &str,
        is_public: bool,
    ) -> Result<ContributorRating> {
        let url = self.endpoint(&["users", "me", "contributor_ratings"])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&RatingCreateRequest {
                video_id,
                is_public,
            });
        self.send_json(request, "contributor_rating", video_id).await
    }

    async fn set_rating_visibility(
        &self,
        video_id: &str,
        is_public: bool,
    ) -> Result<ContributorRating> {
        let url = self.endpoint(&["users", "me", "contributor_ratings", video_id])?;
        let request = self
            .request(Method::PATCH, url)
            .await
            .json(&RatingVisibilityRequest { is_public });
        self.send_json(request, "contributor_rating", video_id).await
    }

    async fn set_all_ratings_visibility(&self, is_public: bool) -> Result<()> {
        let url = self.endpoint(&["users", "me", "contributor_ratings", "_all"])?;
        let request = self
            .request(Method::PATCH, url)
            .await
            .json(&RatingVisibilityRequest { is_public });
        self.send(request, "contributor_rating", "_all").await?;
        Ok(())
    }

    async fn list_rate_later(&self) -> Result<Paginated<RateLaterEntry>> {
        let url = self.endpoint(&["users", "me", "video_rate_later"])?;
        let request = self.request(Method::GET, url).await;
        self.send_json(request, "rate_later", "*").await
    }

    async fn add_rate_later(&self, video_id: &str) -> Result<RateLaterEntry> {
        let url = self.endpoint(&["users", "me", "video_rate_later"])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&RateLaterCreateRequest {
                video: VideoCreateRequest { video_id },
            });
        self.send_json(request, "rate_later", video_id).await
    }

    async fn remove_rate_later(&self, video_id: &str) -> Result<()> {
        let url = self.endpoint(&["users", "me", "video_rate_later", video_id])?;
        let request = self.request(Method::DELETE, url).await;
        self.send(request, "rate_later", video_id).await?;
        Ok(())
    }
}
