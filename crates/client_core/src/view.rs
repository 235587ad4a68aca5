//! Render-ready projection of a [`SessionState`].

use shared::domain::{exceeds_tweet_limit, tweet_char_count, Tone, TweetLength, TWEET_CHAR_LIMIT};

use crate::session::SessionState;

pub const COPY_LABEL: &str = "Copy Tweet";
pub const COPIED_LABEL: &str = "✓ Copied!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub tweet: String,
    pub badge: &'static str,
    pub char_count: usize,
    pub char_counter: String,
    pub over_limit: bool,
    pub iterations: u32,
    pub tone: Tone,
    pub length: TweetLength,
    pub copy_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationEntry {
    pub index: usize,
    pub text: String,
    pub char_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub can_submit: bool,
    pub loading: bool,
    pub error_banner: Option<String>,
    pub result_card: Option<ResultCard>,
    pub tweet_evolution: Vec<IterationEntry>,
    pub feedback_history: Vec<FeedbackEntry>,
    pub history_len: usize,
}

impl SessionView {
    pub fn from_state(state: &SessionState, copy_acknowledged: bool) -> Self {
        let result = state.result.as_ref();

        // The card is hidden while a request is pending; the panels are not.
        let result_card = result.filter(|_| !state.in_flight).map(|result| {
            let char_count = tweet_char_count(&result.tweet);
            ResultCard {
                tweet: result.tweet.clone(),
                badge: result.evaluation.badge_label(),
                char_count,
                char_counter: format!("{char_count}/{TWEET_CHAR_LIMIT}"),
                over_limit: exceeds_tweet_limit(&result.tweet),
                iterations: result.iterations,
                tone: state.params.tone,
                length: state.params.length,
                copy_label: if copy_acknowledged {
                    COPIED_LABEL
                } else {
                    COPY_LABEL
                },
            }
        });

        let tweet_evolution = result
            .map(|result| {
                result
                    .tweet_history
                    .iter()
                    .enumerate()
                    .map(|(i, text)| IterationEntry {
                        index: i + 1,
                        text: text.clone(),
                        char_count: tweet_char_count(text),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let feedback_history = result
            .map(|result| {
                result
                    .feedback_history
                    .iter()
                    .enumerate()
                    .map(|(i, text)| FeedbackEntry {
                        index: i + 1,
                        text: text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            can_submit: state.params.has_topic() && !state.in_flight,
            loading: state.in_flight,
            error_banner: state.error.clone(),
            result_card,
            tweet_evolution,
            feedback_history,
            history_len: state.history.len(),
        }
    }
}
