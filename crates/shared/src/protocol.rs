use serde::{Deserialize, Serialize};

use crate::domain::{tweet_char_count, Evaluation, MaxIterations, Tone, TweetLength};

pub const GENERATE_TWEET_ROUTE: &str = "/api/generate-tweet";
pub const HEALTH_ROUTE: &str = "/api/health";

/// Form parameters of one generation request; serialized as the POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GenerationParams {
    pub topic: String,
    pub tone: Tone,
    pub length: TweetLength,
    pub max_iterations: MaxIterations,
    #[serde(default)]
    pub uncensored: bool,
}

impl GenerationParams {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub tweet: String,
    pub evaluation: Evaluation,
    pub iterations: u32,
    #[serde(default)]
    pub tweet_history: Vec<String>,
    #[serde(default)]
    pub feedback_history: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl GenerationResult {
    pub fn char_count(&self) -> usize {
        tweet_char_count(&self.tweet)
    }
}

/// Envelope returned by the generate endpoint for both outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTweetResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    #[serde(default)]
    pub tweet_history: Vec<String>,
    #[serde(default)]
    pub feedback_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFailure {
    /// `success: false`, with the server's `error` field when present.
    Unsuccessful { error: Option<String> },
    /// `success: true` but the payload lacks the tweet.
    MissingTweet,
}

impl GenerateTweetResponse {
    pub fn succeeded(result: GenerationResult) -> Self {
        Self {
            success: true,
            error: None,
            tweet: Some(result.tweet),
            evaluation: Some(result.evaluation),
            feedback: result.feedback,
            iterations: Some(result.iterations),
            tweet_history: result.tweet_history,
            feedback_history: result.feedback_history,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            tweet: None,
            evaluation: None,
            feedback: None,
            iterations: None,
            tweet_history: Vec::new(),
            feedback_history: Vec::new(),
        }
    }

    pub fn into_result(self) -> Result<GenerationResult, ResponseFailure> {
        if !self.success {
            return Err(ResponseFailure::Unsuccessful {
                error: self.error.filter(|e| !e.trim().is_empty()),
            });
        }
        let tweet = self.tweet.ok_or(ResponseFailure::MissingTweet)?;
        Ok(GenerationResult {
            tweet,
            evaluation: self.evaluation.unwrap_or(Evaluation::Unknown),
            iterations: self.iterations.unwrap_or_default(),
            tweet_history: self.tweet_history,
            feedback_history: self.feedback_history,
            feedback: self.feedback,
        })
    }
}

/// Lenient view of an error body; used for non-2xx responses whose shape is unknown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub api_key_configured: bool,
}
