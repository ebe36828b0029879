use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use storage::dto::{
    account::SessionResponse,
    athlete::{AthleteDetailResponse, AthleteProfileResponse, VerificationEntry},
    common::SearchPage,
    search::SearchFilters,
};
use uuid::Uuid;

use crate::location;
use crate::traits::DirectoryBackend;
use crate::{ClientError, Result};

/// HTTP client for the directory API.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "API response");

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => {
                let message = match response.json::<ErrorBody>().await {
                    Ok(body) => body.error,
                    Err(_) => status
                        .canonical_reason()
                        .unwrap_or("Unexpected response")
                        .to_string(),
                };
                Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl DirectoryBackend for ApiClient {
    async fn search(&self, filters: &SearchFilters) -> Result<SearchPage<AthleteProfileResponse>> {
        let path = format!("/api/athletes?{}", location::to_query_string(filters));
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    async fn profile(&self, id: Uuid) -> Result<AthleteDetailResponse> {
        let path = format!("/api/athletes/{}", id);
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    async fn verification_queue(&self) -> Result<Vec<VerificationEntry>> {
        let response = self
            .send(self.request(Method::GET, "/api/admin/athletes"))
            .await?;
        Ok(response.json().await?)
    }

    async fn toggle_verification(&self, id: Uuid, current: bool) -> Result<VerificationEntry> {
        let path = format!("/api/admin/athletes/{}/verification", id);
        let request = self
            .request(Method::PATCH, &path)
            .json(&json!({ "is_verified": current }));
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn current_session(&self) -> Result<SessionResponse> {
        let response = self.send(self.request(Method::GET, "/api/session")).await?;
        Ok(response.json().await?)
    }

    async fn sign_out(&self) -> Result<()> {
        self.send(self.request(Method::DELETE, "/api/session"))
            .await?;
        Ok(())
    }
}
