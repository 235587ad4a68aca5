use super::{env_override, load_settings_with, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use shared::domain::{Tone, TweetLength};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn temp_config(contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let seq = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
    let temp_root = env::temp_dir().join(format!("tweetgen_config_test_{suffix}_{seq}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("tweetgen.toml");
    fs::write(&path, contents).expect("write config");
    (temp_root, path)
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn missing_file_yields_defaults() {
    let path = env::temp_dir().join("tweetgen_definitely_missing.toml");
    let settings = load_settings_with(&path, env_from(&[])).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_url, "http://127.0.0.1:5000");
    assert_eq!(settings.timeout_secs, 120);
}

#[test]
fn file_values_override_defaults() {
    let (root, path) = temp_config(
        r#"
server_url = "https://tweets.example.com"
timeout_secs = 30
default_tone = "professional"
default_length = "short"
default_max_iterations = 4
uncensored = true
"#,
    );

    let settings = load_settings_with(&path, env_from(&[])).expect("load");
    assert_eq!(settings.server_url, "https://tweets.example.com");
    assert_eq!(settings.timeout_secs, 30);
    assert_eq!(settings.default_tone, Tone::Professional);
    assert_eq!(settings.default_length, TweetLength::Short);
    assert_eq!(settings.default_max_iterations.get(), 4);

    let params = settings.default_params();
    assert!(params.uncensored);
    assert!(params.topic.is_empty());

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let (root, path) = temp_config("server_url = \"http://from-file:5000\"\n");

    let settings = load_settings_with(
        &path,
        env_from(&[
            ("TWEETGEN_SERVER_URL", "http://short:1"),
            ("APP__SERVER_URL", "http://app:2"),
            ("TWEETGEN_TIMEOUT_SECS", "15"),
            ("APP__DEFAULT_TONE", "serious"),
        ]),
    )
    .expect("load");
    assert_eq!(settings.server_url, "http://app:2");
    assert_eq!(settings.timeout_secs, 15);
    assert_eq!(settings.default_tone, Tone::Serious);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn invalid_env_values_are_ignored() {
    let path = env::temp_dir().join("tweetgen_definitely_missing.toml");
    let settings = load_settings_with(
        &path,
        env_from(&[
            ("APP__TIMEOUT_SECS", "soon"),
            ("APP__DEFAULT_MAX_ITERATIONS", "9"),
        ]),
    )
    .expect("load");
    assert_eq!(settings.timeout_secs, 120);
    assert_eq!(settings.default_max_iterations.get(), 2);
}

#[test]
fn malformed_file_is_an_error() {
    let (root, path) = temp_config("default_max_iterations = 7\n");

    let err = load_settings_with(&path, env_from(&[])).expect_err("out of range");
    assert!(
        format!("{err:#}").contains("failed to parse config file"),
        "{err:#}"
    );

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn zero_timeout_is_rejected_from_file_and_env() {
    let (root, path) = temp_config("timeout_secs = 0\n");
    let err = load_settings_with(&path, env_from(&[])).expect_err("zero from file");
    assert!(format!("{err:#}").contains("timeout_secs"), "{err:#}");
    fs::remove_dir_all(root).expect("cleanup");

    let path = env::temp_dir().join("tweetgen_definitely_missing.toml");
    let err = load_settings_with(&path, env_from(&[("TWEETGEN_TIMEOUT_SECS", "0")]))
        .expect_err("zero from env");
    assert!(format!("{err:#}").contains("timeout_secs"), "{err:#}");
}

#[test]
fn uncensored_can_be_set_from_env() {
    let (root, path) = temp_config("uncensored = true\n");

    let settings = load_settings_with(&path, env_from(&[("APP__UNCENSORED", "false")]))
        .expect("load");
    assert!(!settings.uncensored);

    let settings = load_settings_with(&path, env_from(&[("TWEETGEN_UNCENSORED", "maybe")]))
        .expect("load");
    assert!(settings.uncensored, "invalid override leaves the file value");

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn env_override_reports_the_supplying_variable() {
    let env = env_from(&[("TWEETGEN_TIMEOUT_SECS", "soon"), ("APP__TIMEOUT_SECS", "  ")]);
    let (key, raw, parsed) =
        env_override::<u64>(&env, "TWEETGEN_TIMEOUT_SECS", "APP__TIMEOUT_SECS").expect("set");
    assert_eq!(key, "TWEETGEN_TIMEOUT_SECS");
    assert_eq!(raw, "soon");
    assert!(parsed.is_err());

    let env = env_from(&[("TWEETGEN_TIMEOUT_SECS", "5"), ("APP__TIMEOUT_SECS", "7")]);
    let (key, _, parsed) =
        env_override::<u64>(&env, "TWEETGEN_TIMEOUT_SECS", "APP__TIMEOUT_SECS").expect("set");
    assert_eq!(key, "APP__TIMEOUT_SECS");
    assert_eq!(parsed.expect("number"), 7);

    assert!(env_override::<u64>(&env_from(&[]), "TWEETGEN_X", "APP__X").is_none());
}
