// Fitness API repository implementation
use crate::application::auth_service::AuthorizationServer;
use crate::application::errors::ApiError;
use crate::application::metrics_repository::{MetricsSource, TokenStore};
use crate::domain::metric::MetricCategory;
use crate::domain::token::TokenSet;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct WhoopApiClient {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthorizationServer>,
    tokens: Arc<dyn TokenStore>,
}

enum Attempt {
    Done(Value),
    Unauthorized(String),
}

impl WhoopApiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        auth: Arc<dyn AuthorizationServer>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            tokens,
        }
    }

    fn build_url(&self, category: MetricCategory) -> String {
        format!("{}/{}", self.base_url, category.endpoint())
    }

    async fn send(&self, category: MetricCategory, limit: u32, access_token: &str) -> Result<Attempt, ApiError> {
        let endpoint = category.endpoint().to_string();
        let mut request = self.client.get(self.build_url(category)).bearer_auth(access_token);
        if category.is_collection() {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Ok(Attempt::Unauthorized(body));
        }
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let document = response
            .json::<Value>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })?;
        Ok(Attempt::Done(document))
    }

    /// Refresh with the stored refresh token, merge and persist the result.
    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let mut tokens = self.load_tokens().await?;
        let response = self.auth.refresh(&tokens.refresh_token).await?;
        tokens.merge(response);
        self.tokens
            .save_tokens(&tokens)
            .await
            .map_err(|e| ApiError::TokenStore(format!("{:#}", e)))?;
        Ok(tokens.access_token)
    }

    async fn load_tokens(&self) -> Result<TokenSet, ApiError> {
        self.tokens
            .load_tokens()
            .await
            .map_err(|e| ApiError::TokenStore(format!("{:#}", e)))
    }
}

#[async_trait]
impl MetricsSource for WhoopApiClient {
    /// A 401 triggers exactly one refresh and one retry.
    async fn fetch(&self, category: MetricCategory, limit: u32) -> Result<Value, ApiError> {
        let tokens = self.load_tokens().await?;

        match self.send(category, limit, &tokens.access_token).await? {
            Attempt::Done(document) => Ok(document),
            Attempt::Unauthorized(_) => {
                tracing::info!("Access token rejected for {}, refreshing", category);
                let access_token = self.refresh_access_token().await?;

                match self.send(category, limit, &access_token).await? {
                    Attempt::Done(document) => Ok(document),
                    Attempt::Unauthorized(body) => Err(ApiError::Status {
                        endpoint: category.endpoint().to_string(),
                        status: StatusCode::UNAUTHORIZED.as_u16(),
                        body,
                    }),
                }
            }
        }
    }
}
