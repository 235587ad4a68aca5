use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("max_iterations must be between 1 and 5, got {value}")]
    MaxIterationsOutOfRange { value: i64 },
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
