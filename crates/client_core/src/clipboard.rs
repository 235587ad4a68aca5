use std::time::Duration;

use tokio::time::Instant;

/// How long the "copied" acknowledgment stays up after the latest copy.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), String>;
}

/// Clipboard for headless sessions; every write fails.
pub struct NoopClipboard;

impl ClipboardSink for NoopClipboard {
    fn set_text(&self, _text: &str) -> Result<(), String> {
        Err("no clipboard available".to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyAcknowledgement {
    deadline: Option<Instant>,
}

impl CopyAcknowledgement {
    /// Raises the flag, restarting the window if it is already up.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + COPY_ACK_WINDOW);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }
}
