//! Client-initiated fetching.
//!
//! A mount starts in `Loading` and a single task moves it to either
//! `Loaded` or `Error` exactly once. Dropping the handle unmounts and
//! cancels the task if it is still running.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::models::{now_iso, TimeSample};
use crate::services::TimeSource;

/// What a client-rendered page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientState {
    Loading,
    Error(String),
    Loaded(TimeSample),
}

impl ClientState {
    /// Whether the fetch has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Loaded(_) => "loaded",
        }
    }
}

/// A mounted client fetch
pub struct ClientFetch {
    state: watch::Receiver<ClientState>,
    rendered_at: String,
    task: JoinHandle<()>,
}

impl ClientFetch {
    /// Render immediately in `Loading`, then fetch in the background
    pub fn mount(source: Arc<dyn TimeSource>) -> Self {
        let rendered_at = now_iso();
        let (tx, rx) = watch::channel(ClientState::Loading);

        let task = tokio::spawn(async move {
            let next = match source.fetch().await {
                Ok(sample) => ClientState::Loaded(sample),
                Err(e) => {
                    tracing::debug!(error = %e, "Client fetch failed");
                    ClientState::Error(e.to_string())
                }
            };
            tx.send_replace(next);
        });

        Self {
            state: rx,
            rendered_at,
            task,
        }
    }

    /// Current state
    pub fn state(&self) -> ClientState {
        self.state.borrow().clone()
    }

    /// When the initial (loading) render happened
    pub fn rendered_at(&self) -> &str {
        &self.rendered_at
    }

    /// Wait until the fetch leaves `Loading`
    pub async fn settled(&mut self) -> ClientState {
        let settled = self
            .state
            .wait_for(ClientState::is_settled)
            .await
            .map(|state| (*state).clone());
        match settled {
            Ok(state) => state,
            // Sender gone without settling: the task was cancelled or panicked
            Err(_) => self.state(),
        }
    }

    /// Stream of state transitions: `Loading`, then the settled state.
    ///
    /// `Loading` is always yielded first, even when the fetch settled before
    /// the stream was polled.
    pub fn updates(&self) -> impl Stream<Item = ClientState> + Send + Unpin {
        let settled = WatchStream::new(self.state.clone()).filter(ClientState::is_settled);
        tokio_stream::once(ClientState::Loading).chain(settled)
    }
}

impl Drop for ClientFetch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
