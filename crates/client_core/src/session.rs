//! Generation session controller: owns the form parameters, the in-flight
//! flag, the current result or error, and the accumulated result history.
//!
//! Each submission runs `idle -> submitting -> idle`. The state lock is
//! released while the request is awaited; a second `submit` during that
//! window is refused with [`GenerationError::SubmissionInFlight`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::protocol::{GenerationParams, GenerationResult, HealthResponse};
use tokio::{
    sync::{broadcast, Mutex},
    time::Instant,
};
use tracing::{info, warn};

use crate::{
    clipboard::{ClipboardSink, CopyAcknowledgement, NoopClipboard},
    error::{GenerationError, ValidationError},
    transport::GenerationService,
    view::SessionView,
};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub params: GenerationParams,
    pub result: GenerationResult,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub params: GenerationParams,
    pub result: Option<GenerationResult>,
    pub error: Option<String>,
    pub in_flight: bool,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
    pub copy_ack: CopyAcknowledgement,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    SubmissionStarted(GenerationParams),
    SubmissionSucceeded(GenerationResult),
    SubmissionFailed(String),
    Cleared,
    ErrorDismissed,
    Copied,
}

pub struct GenerationSession {
    service: Arc<dyn GenerationService>,
    clipboard: Arc<dyn ClipboardSink>,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl GenerationSession {
    pub fn new(service: Arc<dyn GenerationService>) -> Arc<Self> {
        Self::new_with_clipboard(service, Arc::new(NoopClipboard))
    }

    pub fn new_with_clipboard(
        service: Arc<dyn GenerationService>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            clipboard,
            state: Mutex::new(SessionState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn params(&self) -> GenerationParams {
        self.state.lock().await.params.clone()
    }

    pub async fn update_params(&self, edit: impl FnOnce(&mut GenerationParams)) {
        let mut guard = self.state.lock().await;
        edit(&mut guard.params);
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> SessionView {
        let guard = self.state.lock().await;
        let copied = guard.copy_ack.is_active(Instant::now());
        SessionView::from_state(&guard, copied)
    }

    /// Submits `params`, which also become the session's current parameters.
    ///
    /// Blank topics and overlapping submissions are refused before anything
    /// is sent. On failure the previous result and history are kept and the
    /// error banner is set; on success the result replaces the current one
    /// and is prepended to the history.
    pub async fn submit(
        &self,
        params: GenerationParams,
    ) -> Result<GenerationResult, GenerationError> {
        {
            let mut guard = self.state.lock().await;
            if guard.in_flight {
                return Err(GenerationError::SubmissionInFlight);
            }
            if !params.has_topic() {
                return Err(ValidationError::EmptyTopic.into());
            }
            guard.params = params.clone();
            guard.in_flight = true;
            guard.error = None;
        }
        let _ = self
            .events
            .send(SessionEvent::SubmissionStarted(params.clone()));
        info!(
            tone = %params.tone,
            length = %params.length,
            max_iterations = params.max_iterations.get(),
            uncensored = params.uncensored,
            "submitting generation request"
        );

        let outcome = self.service.generate(&params).await;

        let mut guard = self.state.lock().await;
        guard.in_flight = false;
        match outcome {
            Ok(result) => {
                guard.result = Some(result.clone());
                guard.history.insert(
                    0,
                    HistoryEntry {
                        params,
                        result: result.clone(),
                        received_at: Utc::now(),
                    },
                );
                let history_len = guard.history.len();
                drop(guard);
                info!(
                    evaluation = ?result.evaluation,
                    iterations = result.iterations,
                    history_len,
                    "generation succeeded"
                );
                let _ = self
                    .events
                    .send(SessionEvent::SubmissionSucceeded(result.clone()));
                Ok(result)
            }
            Err(err) => {
                let message = err.banner_message();
                guard.error = Some(message.clone());
                drop(guard);
                warn!(error = %message, "generation failed");
                let _ = self.events.send(SessionEvent::SubmissionFailed(message));
                Err(err)
            }
        }
    }

    /// Drops the current result and the accumulated history.
    pub async fn clear(&self) {
        {
            let mut guard = self.state.lock().await;
            guard.result = None;
            guard.history.clear();
        }
        let _ = self.events.send(SessionEvent::Cleared);
    }

    pub async fn dismiss_error(&self) {
        let had_error = self.state.lock().await.error.take().is_some();
        if had_error {
            let _ = self.events.send(SessionEvent::ErrorDismissed);
        }
    }

    /// Writes `text` to the clipboard and raises the copy acknowledgment.
    /// Clipboard failures are logged and reported only through the return value.
    pub async fn copy(&self, text: &str) -> bool {
        if let Err(reason) = self.clipboard.set_text(text) {
            warn!(%reason, "clipboard write failed");
            return false;
        }
        self.state.lock().await.copy_ack.trigger(Instant::now());
        let _ = self.events.send(SessionEvent::Copied);
        true
    }

    pub async fn copy_current_tweet(&self) -> bool {
        let tweet = self
            .state
            .lock()
            .await
            .result
            .as_ref()
            .map(|result| result.tweet.clone());
        match tweet {
            Some(tweet) => self.copy(&tweet).await,
            None => false,
        }
    }

    pub async fn copy_acknowledged(&self) -> bool {
        self.state.lock().await.copy_ack.is_active(Instant::now())
    }

    pub async fn health(&self) -> Result<HealthResponse, GenerationError> {
        self.service.health().await
    }
}
