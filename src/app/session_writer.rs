//! Ordered session store writes.
//!
//! Logout clears the store and login saves to it, both from spawned tasks.
//! All writes go through one worker so they land in the order they were
//! queued: a clear queued by logout always finishes before the save of a
//! login submitted afterwards.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::api::TokenPair;
use crate::auth::{end_session, establish_session, Session, SessionError};
use crate::traits::{SessionStore, SessionStoreError};

enum StoreOp {
    Clear,
    Establish {
        tokens: TokenPair,
        reply: oneshot::Sender<Result<Session, SessionError>>,
    },
}

/// Handle to the store worker. Clones share the same queue.
#[derive(Clone)]
pub struct SessionWriter {
    tx: mpsc::UnboundedSender<StoreOp>,
}

impl SessionWriter {
    /// Start the worker on the current runtime.
    pub fn spawn(store: Arc<dyn SessionStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<StoreOp>();

        tokio::spawn(async move {
            while let Some(op) = rx.recv().await {
                match op {
                    StoreOp::Clear => {
                        if let Err(e) = end_session(store.as_ref()).await {
                            tracing::warn!("Failed to clear session on logout: {}", e);
                        }
                    }
                    StoreOp::Establish { tokens, reply } => {
                        let result = establish_session(store.as_ref(), tokens).await;
                        let _ = reply.send(result);
                    }
                }
            }
            tracing::debug!("Session writer stopped");
        });

        Self { tx }
    }

    /// Queue a clear without waiting for it.
    pub fn clear(&self) {
        if self.tx.send(StoreOp::Clear).is_err() {
            tracing::warn!("Session writer is gone, store not cleared");
        }
    }

    /// Queue a save of `tokens` behind any pending writes and wait for it.
    pub async fn establish(&self, tokens: TokenPair) -> Result<Session, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(StoreOp::Establish { tokens, reply })
            .map_err(|_| writer_stopped())?;
        response.await.map_err(|_| writer_stopped())?
    }
}

fn writer_stopped() -> SessionError {
    SessionError::Store(SessionStoreError::SaveFailed(
        "session writer stopped".to_string(),
    ))
}
