use shared::{
    domain::{Evaluation, Tone, TweetLength},
    protocol::{GenerationParams, GenerationResult},
};

use crate::{
    session::SessionState,
    view::{SessionView, COPIED_LABEL, COPY_LABEL},
};

fn result(tweet: &str, evaluation: Evaluation) -> GenerationResult {
    GenerationResult {
        tweet: tweet.into(),
        evaluation,
        iterations: 2,
        tweet_history: vec!["draft".into(), tweet.into()],
        feedback_history: vec!["weak hook".into(), "better".into()],
        feedback: Some("better".into()),
    }
}

#[test]
fn empty_session_has_nothing_to_render() {
    let view = SessionView::from_state(&SessionState::default(), false);
    assert!(!view.can_submit);
    assert!(!view.loading);
    assert!(view.error_banner.is_none());
    assert!(view.result_card.is_none());
    assert!(view.tweet_evolution.is_empty());
    assert!(view.feedback_history.is_empty());
    assert_eq!(view.history_len, 0);
}

#[test]
fn result_card_reflects_result_and_current_form() {
    let state = SessionState {
        params: GenerationParams {
            topic: "coffee".into(),
            tone: Tone::Serious,
            length: TweetLength::Long,
            ..GenerationParams::default()
        },
        result: Some(result("Coffee first. ☕", Evaluation::NeedsImprovement)),
        ..SessionState::default()
    };

    let view = SessionView::from_state(&state, false);
    assert!(view.can_submit);
    let card = view.result_card.expect("card");
    assert_eq!(card.badge, "⚠️ Needs Improvement");
    assert_eq!(card.char_count, 15);
    assert_eq!(card.char_counter, "15/280");
    assert!(!card.over_limit);
    assert_eq!(card.iterations, 2);
    assert_eq!(card.tone, Tone::Serious);
    assert_eq!(card.length, TweetLength::Long);
    assert_eq!(card.copy_label, COPY_LABEL);

    assert_eq!(view.tweet_evolution.len(), 2);
    assert_eq!(view.tweet_evolution[0].index, 1);
    assert_eq!(view.tweet_evolution[0].text, "draft");
    assert_eq!(view.tweet_evolution[0].char_count, 5);
    assert_eq!(view.tweet_evolution[1].index, 2);
    assert_eq!(view.feedback_history[0].text, "weak hook");
    assert_eq!(view.feedback_history[1].index, 2);
}

#[test]
fn loading_hides_card_and_disables_submit() {
    let state = SessionState {
        params: GenerationParams::new("coffee"),
        result: Some(result("old", Evaluation::Approved)),
        in_flight: true,
        ..SessionState::default()
    };

    let view = SessionView::from_state(&state, false);
    assert!(view.loading);
    assert!(!view.can_submit);
    assert!(view.result_card.is_none());
    assert_eq!(view.tweet_evolution.len(), 2);
}

#[test]
fn over_limit_tweets_are_flagged() {
    let long = "x".repeat(300);
    let state = SessionState {
        result: Some(result(&long, Evaluation::Rejected)),
        error: Some("previous failure".into()),
        ..SessionState::default()
    };

    let view = SessionView::from_state(&state, true);
    let card = view.result_card.expect("card");
    assert!(card.over_limit);
    assert_eq!(card.char_counter, "300/280");
    assert_eq!(card.badge, "🚫 Rejected");
    assert_eq!(card.copy_label, COPIED_LABEL);
    assert_eq!(view.error_banner.as_deref(), Some("previous failure"));
}
