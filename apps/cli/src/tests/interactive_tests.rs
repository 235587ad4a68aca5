use super::{parse_command, run, Command};

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use client_core::{GenerationError, GenerationService, GenerationSession};
use shared::{
    domain::{Evaluation, MaxIterations, Tone, TweetLength},
    protocol::{GenerationParams, GenerationResult, HealthResponse},
};
use tokio::sync::Mutex;

struct RecordingService {
    outcomes: Mutex<VecDeque<Result<GenerationResult, GenerationError>>>,
    requests: Mutex<Vec<GenerationParams>>,
}

impl RecordingService {
    fn new(outcomes: Vec<Result<GenerationResult, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl GenerationService for RecordingService {
    async fn generate(
        &self,
        params: &GenerationParams,
    ) -> Result<GenerationResult, GenerationError> {
        self.requests.lock().await.push(params.clone());
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Transport("no more outcomes".into())))
    }

    async fn health(&self) -> Result<HealthResponse, GenerationError> {
        Ok(HealthResponse {
            status: "ok".into(),
            api_key_configured: true,
        })
    }
}

fn tweet(text: &str) -> GenerationResult {
    GenerationResult {
        tweet: text.into(),
        evaluation: Evaluation::Approved,
        iterations: 1,
        tweet_history: vec![text.into()],
        feedback_history: vec!["ok".into()],
        feedback: None,
    }
}

#[test]
fn parses_commands_and_topics() {
    assert_eq!(parse_command("  "), Command::Empty);
    assert_eq!(
        parse_command("  rust lifetimes "),
        Command::Submit("rust lifetimes".into())
    );
    assert_eq!(parse_command(":tone serious"), Command::SetTone(Tone::Serious));
    assert_eq!(
        parse_command(":length  long"),
        Command::SetLength(TweetLength::Long)
    );
    assert_eq!(
        parse_command(":iterations 4"),
        Command::SetIterations(MaxIterations::new(4).expect("in range"))
    );
    assert_eq!(parse_command(":uncensored on"), Command::SetUncensored(true));
    assert_eq!(parse_command(":q"), Command::Quit);
    assert!(matches!(parse_command(":iterations 9"), Command::Invalid(_)));
    assert!(matches!(parse_command(":tone grumpy"), Command::Invalid(_)));
    assert!(matches!(parse_command(":frobnicate"), Command::Invalid(_)));
}

#[tokio::test]
async fn interactive_session_applies_settings_and_tracks_history() {
    let service = RecordingService::new(vec![
        Ok(tweet("first tweet")),
        Err(GenerationError::Service {
            status: Some(429),
            message: "rate limited".into(),
        }),
        Ok(tweet("second tweet")),
    ]);
    let session = GenerationSession::new(service.clone());

    let input = b":tone professional\n:iterations 3\ncats\ndogs\nbirds\n:history\n:clear\n:history\n:quit\nignored\n";
    let mut output = Vec::new();
    run(&session, &input[..], &mut output).await.expect("run");
    let output = String::from_utf8(output).expect("utf8");

    let requests = service.requests.lock().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].topic, "cats");
    assert_eq!(requests[0].tone, Tone::Professional);
    assert_eq!(requests[0].max_iterations.get(), 3);
    assert_eq!(requests[2].topic, "birds");

    assert!(output.contains("Error: rate limited"), "{output}");
    assert!(output.contains("1. ["), "{output}");
    assert!(output.contains("\"second tweet\""), "{output}");
    assert!(output.contains("No tweets generated yet."), "{output}");

    let state = session.snapshot().await;
    assert!(state.history.is_empty());
    assert!(state.result.is_none());
}

#[tokio::test]
async fn copy_without_result_and_unknown_commands_send_nothing() {
    let service = RecordingService::new(Vec::new());
    let session = GenerationSession::new(service.clone());

    let mut output = Vec::new();
    run(&session, &b"   \n:copy\n:bogus\n"[..], &mut output)
        .await
        .expect("run");

    assert!(service.requests.lock().await.is_empty());
    let output = String::from_utf8(output).expect("utf8");
    assert!(!output.contains("Copied"), "{output}");
    assert!(output.contains("unknown command ':bogus'"), "{output}");
}
