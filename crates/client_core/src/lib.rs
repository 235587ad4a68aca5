pub mod clipboard;
pub mod error;
pub mod session;
pub mod transport;
pub mod view;

pub use clipboard::{ClipboardSink, NoopClipboard, COPY_ACK_WINDOW};
pub use error::{GenerationError, ValidationError};
pub use session::{GenerationSession, HistoryEntry, SessionEvent, SessionState};
pub use transport::{GenerationService, HttpGenerationService, DEFAULT_REQUEST_TIMEOUT};
pub use view::SessionView;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod view_tests;
