//! Line-oriented session: plain lines are topics, `:`-prefixed lines are commands.

use anyhow::{Context, Result};
use client_core::{GenerationError, GenerationSession};
use shared::domain::{MaxIterations, Tone, TweetLength};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::render::{render_history, render_view, LOADING_MESSAGE};

pub const HELP: &str = "\
Type a topic to generate a tweet, or a command:
  :tone humorous|serious|professional
  :length short|medium|long
  :iterations 1-5
  :uncensored on|off
  :copy      copy the current tweet
  :clear     clear result and history
  :history   list generated tweets, newest first
  :dismiss   hide the error banner
  :show      redraw the current result
  :quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    SetTone(Tone),
    SetLength(TweetLength),
    SetIterations(MaxIterations),
    SetUncensored(bool),
    Copy,
    Clear,
    History,
    Dismiss,
    Show,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Submit(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "tone" => arg
            .parse()
            .map(Command::SetTone)
            .unwrap_or_else(|err| Command::Invalid(err.to_string())),
        "length" => arg
            .parse()
            .map(Command::SetLength)
            .unwrap_or_else(|err| Command::Invalid(err.to_string())),
        "iterations" => arg
            .parse()
            .map(Command::SetIterations)
            .unwrap_or_else(|err| Command::Invalid(err.to_string())),
        "uncensored" => match arg {
            "on" | "true" | "yes" => Command::SetUncensored(true),
            "off" | "false" | "no" => Command::SetUncensored(false),
            other => Command::Invalid(format!("expected on or off, got '{other}'")),
        },
        "copy" => Command::Copy,
        "clear" => Command::Clear,
        "history" => Command::History,
        "dismiss" => Command::Dismiss,
        "show" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command ':{other}'")),
    }
}

pub async fn run<R, W>(session: &GenerationSession, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(HELP.as_bytes()).await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };

        let reply = match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Submit(topic) => {
                session.update_params(|params| params.topic = topic).await;
                let params = session.params().await;
                output
                    .write_all(format!("{LOADING_MESSAGE}\n").as_bytes())
                    .await?;
                output.flush().await?;
                match session.submit(params).await {
                    Err(GenerationError::Validation(err)) => format!("{err}\n"),
                    _ => render_view(&session.view().await),
                }
            }
            Command::SetTone(tone) => {
                session.update_params(|params| params.tone = tone).await;
                format!("tone: {tone}\n")
            }
            Command::SetLength(length) => {
                session.update_params(|params| params.length = length).await;
                format!("length: {}\n", length.guide())
            }
            Command::SetIterations(max) => {
                session
                    .update_params(|params| params.max_iterations = max)
                    .await;
                format!("max improvement cycles: {max}\n")
            }
            Command::SetUncensored(enabled) => {
                session
                    .update_params(|params| params.uncensored = enabled)
                    .await;
                if enabled {
                    "uncensored mode on (content safety filters removed)\n".to_string()
                } else {
                    "uncensored mode off\n".to_string()
                }
            }
            Command::Copy => {
                if session.copy_current_tweet().await {
                    "✓ Copied!\n".to_string()
                } else {
                    String::new()
                }
            }
            Command::Clear => {
                session.clear().await;
                "history cleared\n".to_string()
            }
            Command::History => render_history(&session.snapshot().await.history),
            Command::Dismiss => {
                session.dismiss_error().await;
                String::new()
            }
            Command::Show => render_view(&session.view().await),
            Command::Help => HELP.to_string(),
            Command::Invalid(message) => format!("{message}\n"),
        };
        output.write_all(reply.as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/interactive_tests.rs"]
mod tests;
