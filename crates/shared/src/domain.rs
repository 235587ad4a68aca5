use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const TWEET_CHAR_LIMIT: usize = 280;
pub const MIN_ITERATIONS: u8 = 1;
pub const MAX_ITERATIONS: u8 = 5;

/// Declares a lowercase wire enum with `Display`/`FromStr` bound to its serde names.
macro_rules! wire_enum {
    ($name:ident, $label:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(DomainError::UnknownVariant {
                        kind: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum!(Tone, "tone" {
    Humorous => "humorous",
    Serious => "serious",
    Professional => "professional",
});

wire_enum!(TweetLength, "length" {
    Short => "short",
    Medium => "medium",
    Long => "long",
});

impl Default for Tone {
    fn default() -> Self {
        Tone::Humorous
    }
}

impl Default for TweetLength {
    fn default() -> Self {
        TweetLength::Medium
    }
}

impl TweetLength {
    pub fn guide(self) -> &'static str {
        match self {
            TweetLength::Short => "Short (<100 chars)",
            TweetLength::Medium => "Medium (100-200 chars)",
            TweetLength::Long => "Long (up to 280 chars)",
        }
    }
}

/// Reviewer verdict attached to a generated tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Approved,
    NeedsImprovement,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl Evaluation {
    pub fn badge_label(self) -> &'static str {
        match self {
            Evaluation::Approved => "✅ Approved",
            Evaluation::NeedsImprovement => "⚠️ Needs Improvement",
            Evaluation::Rejected => "🚫 Rejected",
            Evaluation::Unknown => "Unrated",
        }
    }
}

/// Improvement-cycle cap, always within `MIN_ITERATIONS..=MAX_ITERATIONS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MaxIterations(u8);

impl MaxIterations {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (MIN_ITERATIONS..=MAX_ITERATIONS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::MaxIterationsOutOfRange {
                value: i64::from(value),
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for MaxIterations {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for MaxIterations {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaxIterations> for u8 {
    fn from(value: MaxIterations) -> Self {
        value.0
    }
}

impl FromStr for MaxIterations {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| DomainError::UnknownVariant {
                kind: "max_iterations",
                value: value.to_string(),
            })?;
        u8::try_from(parsed)
            .map_err(|_| DomainError::MaxIterationsOutOfRange { value: parsed })
            .and_then(Self::new)
    }
}

impl fmt::Display for MaxIterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Length of a tweet as the web client displays it (UTF-16 code units).
pub fn tweet_char_count(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn exceeds_tweet_limit(text: &str) -> bool {
    tweet_char_count(text) > TWEET_CHAR_LIMIT
}
