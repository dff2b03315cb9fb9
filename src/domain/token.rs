// OAuth token domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token set persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    /// Anything else the token endpoint returned (scope, token_type, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenSet {
    /// Overlay a refresh response; fields it omits keep their stored value.
    pub fn merge(&mut self, response: TokenResponse) {
        self.access_token = response.access_token;
        if let Some(refresh_token) = response.refresh_token {
            self.refresh_token = refresh_token;
        }
        if let Some(expires_in) = response.expires_in {
            self.expires_in = expires_in;
        }
        self.extra.extend(response.extra);
    }

    /// Shortened token text safe to print on a terminal.
    pub fn preview(token: &str) -> String {
        let head: String = token.chars().take(20).collect();
        format!("{}...", head)
    }
}

impl TryFrom<TokenResponse> for TokenSet {
    type Error = String;

    fn try_from(response: TokenResponse) -> Result<Self, Self::Error> {
        let refresh_token = response
            .refresh_token
            .ok_or_else(|| "token response carried no refresh_token (is the offline scope granted?)".to_string())?;

        Ok(Self {
            access_token: response.access_token,
            refresh_token,
            expires_in: response.expires_in.unwrap_or_default(),
            extra: response.extra,
        })
    }
}
