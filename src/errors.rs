/*!
 * Error types for the yasnai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the speech gateway or shortener APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service returned an empty or unusable audio payload
    #[error("Empty audio payload: {0}")]
    EmptyAudio(String),
}

/// Errors that can occur while parsing or validating subtitle input
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The cue list could not be parsed at all
    #[error("Failed to parse subtitle content: {0}")]
    Parse(String),

    /// A timestamp line was malformed
    #[error("Invalid timestamp at line {line}: {text}")]
    InvalidTimestamp {
        /// Line number in the source
        line: usize,
        /// The offending text
        text: String,
    },

    /// A cue had an invalid time range
    #[error("Invalid time range for entry {seq_num}: end {end_ms} <= start {start_ms}")]
    InvalidTimeRange {
        /// Sequence number of the entry
        seq_num: usize,
        /// Start time in ms
        start_ms: u64,
        /// End time in ms
        end_ms: u64,
    },
}

/// Errors related to voice selection
#[derive(Error, Debug)]
pub enum VoiceError {
    /// The requested voice key is not in the catalog
    #[error("Voice not found: {0}")]
    NotFound(String),
}

/// Errors that can occur during speech synthesis
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// All retry attempts were exhausted
    #[error("Synthesis failed after {attempts} attempts: {message}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        message: String,
    },
}

/// Errors that can occur while processing or exporting audio
#[derive(Error, Debug)]
pub enum AudioError {
    /// Decoding synthesized bytes into PCM failed
    #[error("Audio decoding failed: {0}")]
    Decode(String),

    /// Waveform time-compression failed; callers fall back to hard truncation
    #[error("Time compression failed: {0}")]
    Compression(String),

    /// Writing the final output container failed
    #[error("Audio export failed: {0}")]
    Export(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from voice selection
    #[error("Voice error: {0}")]
    Voice(#[from] VoiceError),

    /// Error from speech synthesis
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Error from audio processing or export
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// The job was cancelled before completion
    #[error("Job cancelled")]
    Cancelled,

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
