use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::llm_client::{
    ClientOptions, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_temperature: f64,
    pub llm_timeout_secs: u64,
    /// Completion calls in flight per submission. 1 = one post after another.
    pub generation_concurrency: usize,
    /// Pass unrecognized output kinds through as preamble-only prompts instead of rejecting them.
    pub allow_unknown_kinds: bool,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generation_concurrency = parse_env("GENERATION_CONCURRENCY", 1usize)?;
        ensure!(
            generation_concurrency >= 1,
            "GENERATION_CONCURRENCY must be at least 1"
        );

        let allow_unknown_kinds = match std::env::var("ALLOW_UNKNOWN_KINDS") {
            Ok(raw) => parse_flag(&raw).with_context(|| {
                format!("ALLOW_UNKNOWN_KINDS must be true or false, got '{raw}'")
            })?,
            Err(_) => false,
        };

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            openai_temperature: parse_env("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            generation_concurrency,
            allow_unknown_kinds,
            max_upload_bytes: parse_env("MAX_UPLOAD_MB", 25usize)? * 1024 * 1024,
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
            temperature: self.openai_temperature,
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
