// OAuth 2.0 token endpoint client
use crate::application::auth_service::AuthorizationServer;
use crate::application::errors::AuthError;
use crate::domain::token::{TokenResponse, TokenSet};
use crate::infrastructure::config::OAuthSettings;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct OAuthClient {
    client: reqwest::Client,
    settings: OAuthSettings,
}

impl OAuthClient {
    pub fn new(client: reqwest::Client, settings: OAuthSettings) -> Self {
        Self { client, settings }
    }

    /// Form-encoded POST to the token endpoint; any non-200 is a failure.
    async fn request_tokens(&self, grant: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let mut form: Vec<(&str, &str)> = grant.to_vec();
        form.extend([
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
        ]);

        let response = self
            .client
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenEndpoint { status, body });
        }

        Ok(response.json::<TokenResponse>().await?)
    }
}

#[async_trait]
impl AuthorizationServer for OAuthClient {
    fn authorization_url(&self, state: &str) -> String {
        let scope = self.settings.scopes.join(" ");
        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", state),
        ];
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();

        format!("{}?{}", self.settings.authorization_url, query.join("&"))
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthError> {
        let response = self
            .request_tokens(&[("grant_type", "authorization_code"), ("code", code)])
            .await?;
        TokenSet::try_from(response).map_err(AuthError::InvalidTokenResponse)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        tracing::info!("Refreshing access token");
        self.request_tokens(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .await
    }
}
