// Auth service - authorization-code grant use case
use crate::application::errors::AuthError;
use crate::application::metrics_repository::TokenStore;
use crate::domain::token::{TokenResponse, TokenSet};
use anyhow::Context;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::sync::Arc;

/// The OAuth 2.0 authorization server as seen by the use cases.
#[async_trait]
pub trait AuthorizationServer: Send + Sync {
    /// Redirect target for the user's browser, carrying `state`.
    fn authorization_url(&self, state: &str) -> String;

    async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthError>;

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError>;
}

/// One in-flight authorization: the URL to visit and the state it must echo.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// 32 random bytes, URL-safe base64 without padding (43 characters).
pub fn generate_state() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Clone)]
pub struct AuthService {
    server: Arc<dyn AuthorizationServer>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthService {
    pub fn new(server: Arc<dyn AuthorizationServer>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { server, tokens }
    }

    pub fn begin(&self) -> AuthorizationRequest {
        let state = generate_state();
        let url = self.server.authorization_url(&state);
        AuthorizationRequest { url, state }
    }

    /// Exchange the callback's code and persist the resulting tokens.
    pub async fn complete(&self, code: &str) -> anyhow::Result<TokenSet> {
        let tokens = self.server.exchange_code(code).await?;
        self.tokens
            .save_tokens(&tokens)
            .await
            .context("Failed to persist tokens")?;
        tracing::info!("Stored new token set (expires in {}s)", tokens.expires_in);
        Ok(tokens)
    }
}
