// Per-flow state shared with the OAuth callback handler
use crate::application::errors::AuthError;
use std::sync::Mutex;
use tokio::sync::oneshot;

pub type CallbackResult = Result<String, AuthError>;

/// Lives for exactly one authorization attempt; the first callback consumes it.
pub struct CallbackSession {
    pub expected_state: String,
    outcome: Mutex<Option<oneshot::Sender<CallbackResult>>>,
}

impl CallbackSession {
    pub fn new(expected_state: String) -> (Self, oneshot::Receiver<CallbackResult>) {
        let (tx, rx) = oneshot::channel();
        let session = Self {
            expected_state,
            outcome: Mutex::new(Some(tx)),
        };
        (session, rx)
    }

    /// Delivers the outcome once. Returns false if a callback was already handled.
    pub fn resolve(&self, result: CallbackResult) -> bool {
        let sender = match self.outcome.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                // Receiver gone means the listener already gave up
                let _ = tx.send(result);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_only_once() {
        let (session, rx) = CallbackSession::new("state".to_string());

        assert!(session.resolve(Ok("code-1".to_string())));
        assert!(!session.resolve(Ok("code-2".to_string())));
        assert_eq!(rx.await.unwrap().unwrap(), "code-1");
    }
}
