use std::{fs, io::ErrorKind, path::Path, str::FromStr, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::{
    domain::{MaxIterations, Tone, TweetLength},
    protocol::GenerationParams,
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "tweetgen.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub timeout_secs: u64,
    pub default_tone: Tone,
    pub default_length: TweetLength,
    pub default_max_iterations: MaxIterations,
    pub uncensored: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            timeout_secs: client_core::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            default_tone: Tone::default(),
            default_length: TweetLength::default(),
            default_max_iterations: MaxIterations::default(),
            uncensored: false,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Form state a fresh session starts from.
    pub fn default_params(&self) -> GenerationParams {
        GenerationParams {
            topic: String::new(),
            tone: self.default_tone,
            length: self.default_length,
            max_iterations: self.default_max_iterations,
            uncensored: self.uncensored,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    timeout_secs: Option<u64>,
    default_tone: Option<Tone>,
    default_length: Option<TweetLength>,
    default_max_iterations: Option<MaxIterations>,
    uncensored: Option<bool>,
}

pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` if it exists, then environment
/// variables. The `APP__*` spelling wins over the `TWEETGEN_*` one.
pub fn load_settings_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file(&mut settings, file_cfg);
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    }

    if let Some((_, v)) = env_value(&env, "TWEETGEN_SERVER_URL", "APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env_parsed(&env, "TWEETGEN_TIMEOUT_SECS", "APP__TIMEOUT_SECS") {
        settings.timeout_secs = v;
    }
    if let Some(v) = env_parsed(&env, "TWEETGEN_DEFAULT_TONE", "APP__DEFAULT_TONE") {
        settings.default_tone = v;
    }
    if let Some(v) = env_parsed(&env, "TWEETGEN_DEFAULT_LENGTH", "APP__DEFAULT_LENGTH") {
        settings.default_length = v;
    }
    if let Some(v) = env_parsed(
        &env,
        "TWEETGEN_DEFAULT_MAX_ITERATIONS",
        "APP__DEFAULT_MAX_ITERATIONS",
    ) {
        settings.default_max_iterations = v;
    }
    if let Some(v) = env_parsed(&env, "TWEETGEN_UNCENSORED", "APP__UNCENSORED") {
        settings.uncensored = v;
    }

    anyhow::ensure!(
        settings.timeout_secs > 0,
        "timeout_secs must be at least 1 second"
    );
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.timeout_secs {
        settings.timeout_secs = v;
    }
    if let Some(v) = file_cfg.default_tone {
        settings.default_tone = v;
    }
    if let Some(v) = file_cfg.default_length {
        settings.default_length = v;
    }
    if let Some(v) = file_cfg.default_max_iterations {
        settings.default_max_iterations = v;
    }
    if let Some(v) = file_cfg.uncensored {
        settings.uncensored = v;
    }
}

/// First non-blank value among `app` and `short`, with the key that supplied it.
fn env_value<'k>(
    env: &impl Fn(&str) -> Option<String>,
    short: &'k str,
    app: &'k str,
) -> Option<(&'k str, String)> {
    [app, short]
        .into_iter()
        .find_map(|key| env(key).filter(|v| !v.trim().is_empty()).map(|v| (key, v)))
}

fn env_override<'k, T: FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    short: &'k str,
    app: &'k str,
) -> Option<(&'k str, String, Result<T, T::Err>)> {
    let (key, raw) = env_value(env, short, app)?;
    let parsed = raw.trim().parse();
    Some((key, raw, parsed))
}

fn env_parsed<T>(env: &impl Fn(&str) -> Option<String>, short: &str, app: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (key, raw, parsed) = env_override(env, short, app)?;
    match parsed {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(variable = key, value = %raw, error = %err, "ignoring invalid environment override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
