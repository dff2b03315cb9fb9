// Error taxonomy for the authorization flow and the data API
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The callback's `state` did not match the one issued for this flow.
    #[error("state validation failed, the callback may be forged")]
    StateMismatch,

    #[error("authorization failed: {error} {description}")]
    AuthorizationDenied { error: String, description: String },

    #[error("token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("token endpoint response was unusable: {0}")]
    InvalidTokenResponse(String),

    #[error("failed to reach token endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("callback listener stopped before receiving a callback")]
    ListenerClosed,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request to {endpoint} failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("access token refresh failed: {0}")]
    Refresh(#[from] AuthError),

    #[error("token store unavailable: {0}")]
    TokenStore(String),
}
