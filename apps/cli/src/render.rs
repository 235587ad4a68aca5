//! Plain-text rendering of session views for the terminal.

use std::fmt::Write as _;

use client_core::{view::ResultCard, HistoryEntry, SessionView};
use shared::{domain::tweet_char_count, protocol::HealthResponse};

pub const LOADING_MESSAGE: &str = "🤖 AI is crafting your perfect tweet...";

pub fn render_view(view: &SessionView) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error_banner {
        let _ = writeln!(out, "Error: {error}");
    }
    if view.loading {
        let _ = writeln!(out, "{LOADING_MESSAGE}");
    }
    if let Some(card) = &view.result_card {
        render_card(&mut out, card);
    }
    if !view.tweet_evolution.is_empty() {
        let _ = writeln!(out, "\nTweet Evolution");
        for entry in &view.tweet_evolution {
            let _ = writeln!(out, "  Iteration {}: {}", entry.index, entry.text);
            let _ = writeln!(out, "    📝 {} characters", entry.char_count);
        }
    }
    if !view.feedback_history.is_empty() {
        let _ = writeln!(out, "\nFeedback History");
        for entry in &view.feedback_history {
            let _ = writeln!(out, "  Feedback {}: {}", entry.index, entry.text);
        }
    }

    out
}

fn render_card(out: &mut String, card: &ResultCard) {
    let _ = writeln!(out, "🎯 Generated Tweet  [{}]", card.badge);
    let _ = writeln!(out, "\n  {}\n", card.tweet);
    let _ = write!(
        out,
        "  📝 {}  🔄 {} iterations  🎭 {}  📏 {}",
        card.char_counter, card.iterations, card.tone, card.length
    );
    if card.over_limit {
        let _ = write!(out, "  (over limit)");
    }
    let _ = writeln!(out);
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No tweets generated yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] {} \"{}\" ({} chars, topic: {})",
            i + 1,
            entry.received_at.format("%H:%M:%S"),
            entry.result.evaluation.badge_label(),
            entry.result.tweet,
            tweet_char_count(&entry.result.tweet),
            entry.params.topic.trim(),
        );
    }
    out
}

pub fn render_health(health: &HealthResponse) -> String {
    let key = if health.api_key_configured {
        "configured"
    } else {
        "missing"
    };
    format!("status: {}\napi key: {key}\n", health.status)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
