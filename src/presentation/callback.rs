// Local HTTP listener that receives the OAuth redirect
use crate::application::errors::AuthError;
use crate::presentation::app_state::CallbackSession;
use crate::presentation::handlers::oauth_callback;
use anyhow::Context;
use axum::{Router, routing::get};
use reqwest::Url;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::trace::TraceLayer;

pub struct CallbackListener {
    listener: TcpListener,
    path: String,
}

/// Host and port to bind for a redirect URI; `localhost` binds the loopback address.
pub fn bind_addr(redirect_uri: &Url) -> anyhow::Result<String> {
    let host = match redirect_uri.host_str() {
        Some("localhost") | None => "127.0.0.1",
        Some(host) => host,
    };
    let port = redirect_uri
        .port_or_known_default()
        .with_context(|| format!("Redirect URI {} has no port", redirect_uri))?;
    Ok(format!("{}:{}", host, port))
}

impl CallbackListener {
    /// Binds before the browser is sent anywhere, so the redirect cannot race the listener.
    pub async fn bind(redirect_uri: &str) -> anyhow::Result<Self> {
        let url = Url::parse(redirect_uri).with_context(|| format!("Invalid redirect URI {}", redirect_uri))?;
        let addr = bind_addr(&url)?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to listen on {}", addr))?;

        Ok(Self {
            listener,
            path: url.path().to_string(),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves the callback route until the first callback arrives, then shuts down.
    pub async fn wait_for_code(self, expected_state: String) -> Result<String, AuthError> {
        let (session, outcome) = CallbackSession::new(expected_state);
        let router = Router::new()
            .route(&self.path, get(oauth_callback))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::new(session));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(self.listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let result = outcome.await.unwrap_or(Err(AuthError::ListenerClosed));

        let _ = shutdown_tx.send(());
        match server.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Callback listener stopped with error: {}", e),
            Err(e) => tracing::warn!("Callback listener task failed: {}", e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let url = Url::parse("http://localhost:8080/callback").unwrap();
        assert_eq!(bind_addr(&url).unwrap(), "127.0.0.1:8080");

        let url = Url::parse("http://0.0.0.0:9000/cb").unwrap();
        assert_eq!(bind_addr(&url).unwrap(), "0.0.0.0:9000");

        let url = Url::parse("http://127.0.0.1/cb").unwrap();
        assert_eq!(bind_addr(&url).unwrap(), "127.0.0.1:80");
    }

    async fn run_flow(query: &str) -> (u16, Result<String, AuthError>) {
        let listener = CallbackListener::bind("http://127.0.0.1:0/callback").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let waiting = tokio::spawn(listener.wait_for_code("expected".to_string()));

        let response = reqwest::get(format!("http://{}/callback?{}", addr, query))
            .await
            .unwrap();
        let status = response.status().as_u16();

        (status, waiting.await.unwrap())
    }

    #[tokio::test]
    async fn test_listener_returns_code() {
        let (status, result) = run_flow("code=abc&state=expected").await;
        assert_eq!(status, 200);
        assert_eq!(result.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_listener_rejects_forged_state() {
        let (status, result) = run_flow("code=abc&state=forged").await;
        assert_eq!(status, 400);
        assert!(matches!(result, Err(AuthError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_other_paths_are_not_found() {
        let listener = CallbackListener::bind("http://127.0.0.1:0/callback").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let waiting = tokio::spawn(listener.wait_for_code("s".to_string()));

        let response = reqwest::get(format!("http://{}/favicon.ico", addr)).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);

        reqwest::get(format!("http://{}/callback?code=c&state=s", addr))
            .await
            .unwrap();
        assert_eq!(waiting.await.unwrap().unwrap(), "c");
    }
}
