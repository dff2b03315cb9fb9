// HTTP request handlers
use crate::application::errors::AuthError;
use crate::infrastructure::http_response::{
    already_handled_page, authorized_page, denied_page, state_mismatch_page,
};
use crate::presentation::app_state::CallbackSession;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// OAuth redirect target. State is checked before anything else.
pub async fn oauth_callback(
    State(session): State<Arc<CallbackSession>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if query.state.as_deref() != Some(session.expected_state.as_str()) {
        tracing::warn!("Callback rejected: state mismatch");
        return if session.resolve(Err(AuthError::StateMismatch)) {
            state_mismatch_page()
        } else {
            already_handled_page()
        };
    }

    if let Some(code) = query.code {
        tracing::info!("Authorization code received");
        return if session.resolve(Ok(code)) {
            authorized_page()
        } else {
            already_handled_page()
        };
    }

    let error = query.error.unwrap_or_else(|| "Unknown error".to_string());
    let description = query.error_description.unwrap_or_default();
    tracing::warn!("Authorization denied: {} {}", error, description);

    let page = denied_page(&error, &description);
    if session.resolve(Err(AuthError::AuthorizationDenied { error, description })) {
        page
    } else {
        already_handled_page()
    }
}
