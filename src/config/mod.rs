// * Explicit pipeline configuration.
// * The original tracker leaned on ambient environment globals; here every
// * knob is handed to the constructor by the caller.

use std::time::Duration;

// * Hard cap on characters submitted to the extraction call.
// * Bounds cost/latency, not semantic completeness.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 28_000;

// * A content landmark shorter than this is treated as a teaser and skipped.
pub const DEFAULT_MIN_LANDMARK_CHARS: usize = 50;

// * Per-hop request timeouts; expiry surfaces as a transport/request error.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;

// * Default port for the bundled HTML fetch proxy daemon.
pub const DEFAULT_PROXY_PORT: u16 = 8787;

// * Environment variable names the binary wires config from. The library
// * itself only reads the environment when `from_env` is called.
pub const ENV_PROXY_PORT: &str = "JOBDRAFT_PROXY_PORT";
pub const ENV_PROXY_ENDPOINT: &str = "JOBDRAFT_PROXY_ENDPOINT";
pub const ENV_EXTRACTION_ENDPOINT: &str = "JOBDRAFT_EXTRACTION_ENDPOINT";
pub const ENV_EXTRACTION_API_KEY: &str = "JOBDRAFT_EXTRACTION_API_KEY";
pub const ENV_MAX_TEXT_CHARS: &str = "JOBDRAFT_MAX_TEXT_CHARS";
pub const ENV_MIN_LANDMARK_CHARS: &str = "JOBDRAFT_MIN_LANDMARK_CHARS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "JOBDRAFT_FETCH_TIMEOUT_SECS";
pub const ENV_EXTRACTION_TIMEOUT_SECS: &str = "JOBDRAFT_EXTRACTION_TIMEOUT_SECS";

/// Configuration for one [`Pipeline`](crate::Pipeline) instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the HTML fetch proxy, e.g. `http://127.0.0.1:8787`.
    pub proxy_endpoint: String,
    /// Full URL of the structured-extraction endpoint.
    pub extraction_endpoint: String,
    /// API key sent with each extraction request.
    pub extraction_api_key: String,
    /// Character cap applied to normalized text before extraction.
    pub max_text_chars: usize,
    /// Minimum landmark text length before falling back to full-body text.
    pub min_landmark_chars: usize,
    pub fetch_timeout: Duration,
    pub extraction_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            proxy_endpoint: format!("http://127.0.0.1:{DEFAULT_PROXY_PORT}"),
            extraction_endpoint: String::new(),
            extraction_api_key: String::new(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            min_landmark_chars: DEFAULT_MIN_LANDMARK_CHARS,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            extraction_timeout: Duration::from_secs(DEFAULT_EXTRACTION_TIMEOUT_SECS),
        }
    }
}

impl PipelineConfig {
    /// Builds a config from `JOBDRAFT_*` environment variables, falling back
    /// to the defaults for anything unset or unparseable. Intended for the
    /// binary; embedders pass an explicit config instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let parse_usize =
            |key: &str, fallback: usize| get(key).and_then(|v| v.parse().ok()).unwrap_or(fallback);
        let parse_secs = |key: &str, fallback: Duration| {
            get(key)
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Self {
            proxy_endpoint: get(ENV_PROXY_ENDPOINT).unwrap_or(defaults.proxy_endpoint),
            extraction_endpoint: get(ENV_EXTRACTION_ENDPOINT).unwrap_or(defaults.extraction_endpoint),
            extraction_api_key: get(ENV_EXTRACTION_API_KEY).unwrap_or(defaults.extraction_api_key),
            max_text_chars: parse_usize(ENV_MAX_TEXT_CHARS, defaults.max_text_chars),
            min_landmark_chars: parse_usize(ENV_MIN_LANDMARK_CHARS, defaults.min_landmark_chars),
            fetch_timeout: parse_secs(ENV_FETCH_TIMEOUT_SECS, defaults.fetch_timeout),
            extraction_timeout: parse_secs(ENV_EXTRACTION_TIMEOUT_SECS, defaults.extraction_timeout),
        }
    }
}
