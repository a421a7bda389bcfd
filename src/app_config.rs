use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Voice catalog key to narrate with (e.g. "en-jenny")
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speech synthesis gateway config
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Timeline engine tunables
    #[serde(default)]
    pub engine: EngineConfig,

    /// Optional text shortener config
    #[serde(default)]
    pub shortener: ShortenerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Policy applied when a cue exhausts its synthesis retries
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Substitute a fixed-duration silent segment and keep going
    #[default]
    FailSoft,
    /// Abort the whole job
    FailHard,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailSoft => write!(f, "failsoft"),
            Self::FailHard => write!(f, "failhard"),
        }
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "failsoft" | "fail-soft" | "soft" => Ok(Self::FailSoft),
            "failhard" | "fail-hard" | "hard" => Ok(Self::FailHard),
            _ => Err(anyhow!("Invalid failure policy: {}", s)),
        }
    }
}

/// Speech synthesis gateway configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Gateway endpoint URL
    #[serde(default = "default_synthesis_endpoint")]
    pub endpoint: String,

    /// API key, if the gateway requires one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Send cue text to the gateway as SSML markup instead of plain prose
    #[serde(default)]
    pub ssml: bool,

    /// What to do when retries are exhausted
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Duration of the silent substitute under fail-soft, in milliseconds
    #[serde(default = "default_failure_silence_ms")]
    pub failure_silence_ms: u64,

    /// PCM sample rate the job works at
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_synthesis_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            ssml: false,
            failure_policy: FailurePolicy::default(),
            failure_silence_ms: default_failure_silence_ms(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Timeline engine tunables
///
/// The merge gap, compression cap, and breathing bounds are empirical
/// constants; they are configuration rather than invariants.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Maximum speed-up factor the synthesis rate adjustment may reach
    #[serde(default = "default_max_speed_factor")]
    pub max_speed_factor: f64,

    /// Maximum gap to the next cue that still allows merging, in ms
    #[serde(default = "default_merge_gap_threshold_ms")]
    pub merge_gap_threshold_ms: u64,

    /// Maximum post-hoc waveform compression ratio
    #[serde(default = "default_max_compression_ratio")]
    pub max_compression_ratio: f64,

    /// Upper bound on inserted breathing silence, in ms
    #[serde(default = "default_breath_cap_ms")]
    pub breath_cap_ms: u64,

    /// Lower bound on inserted breathing silence, in ms
    #[serde(default = "default_breath_floor_ms")]
    pub breath_floor_ms: u64,

    /// Floor of the synthesis-free duration estimate, in seconds
    #[serde(default = "default_min_estimate_secs")]
    pub min_estimate_secs: f64,

    /// Speaking rate assumed by the duration estimate, in characters per second
    #[serde(default = "default_chars_per_second")]
    pub chars_per_second: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_speed_factor: default_max_speed_factor(),
            merge_gap_threshold_ms: default_merge_gap_threshold_ms(),
            max_compression_ratio: default_max_compression_ratio(),
            breath_cap_ms: default_breath_cap_ms(),
            breath_floor_ms: default_breath_floor_ms(),
            min_estimate_secs: default_min_estimate_secs(),
            chars_per_second: default_chars_per_second(),
        }
    }
}

/// Text shortener configuration
///
/// The shortener is opportunistic: when disabled or failing it never blocks
/// the pipeline.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShortenerConfig {
    /// Whether to consult the shortener for over-capacity cues
    #[serde(default)]
    pub enabled: bool,

    /// Shortener service endpoint URL
    #[serde(default = "default_shortener_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_shortener_model")]
    pub model: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_shortener_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_shortener_endpoint(),
            model: default_shortener_model(),
            api_key: String::new(),
            timeout_secs: default_shortener_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_voice() -> String {
    "my-thiha".to_string()
}

fn default_synthesis_endpoint() -> String {
    "http://localhost:5500".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_failure_silence_ms() -> u64 {
    1000
}

fn default_sample_rate() -> u32 {
    24_000
}

fn default_max_speed_factor() -> f64 {
    1.5
}

fn default_merge_gap_threshold_ms() -> u64 {
    500
}

fn default_max_compression_ratio() -> f64 {
    2.0
}

fn default_breath_cap_ms() -> u64 {
    800
}

fn default_breath_floor_ms() -> u64 {
    300
}

fn default_min_estimate_secs() -> f64 {
    0.4
}

fn default_chars_per_second() -> f64 {
    14.0
}

fn default_shortener_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_shortener_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_shortener_timeout_secs() -> u64 {
    20
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Voice key must exist in the catalog before any synthesis work begins
        crate::voice_catalog::resolve(&self.voice)?;

        // Endpoint must at least parse as a URL
        let endpoint = &self.synthesis.endpoint;
        if endpoint.is_empty() {
            return Err(anyhow!("Synthesis endpoint cannot be empty"));
        }
        let candidate = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.clone()
        } else {
            format!("http://{}", endpoint)
        };
        url::Url::parse(&candidate)
            .map_err(|e| anyhow!("Invalid synthesis endpoint '{}': {}", endpoint, e))?;

        if self.engine.max_speed_factor < 1.0 {
            return Err(anyhow!(
                "max_speed_factor must be >= 1.0, got {}",
                self.engine.max_speed_factor
            ));
        }

        if self.engine.max_compression_ratio < 1.0 {
            return Err(anyhow!(
                "max_compression_ratio must be >= 1.0, got {}",
                self.engine.max_compression_ratio
            ));
        }

        if self.engine.breath_floor_ms > self.engine.breath_cap_ms {
            return Err(anyhow!(
                "breath_floor_ms ({}) must not exceed breath_cap_ms ({})",
                self.engine.breath_floor_ms,
                self.engine.breath_cap_ms
            ));
        }

        if self.engine.chars_per_second <= 0.0 {
            return Err(anyhow!("chars_per_second must be positive"));
        }

        if self.shortener.enabled && self.shortener.api_key.is_empty() {
            return Err(anyhow!("Shortener API key is required when the shortener is enabled"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            voice: default_voice(),
            synthesis: SynthesisConfig::default(),
            engine: EngineConfig::default(),
            shortener: ShortenerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
