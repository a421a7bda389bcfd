/*!
 * # YASNAI - Yet Another Subtitle Narrator with AI
 *
 * A Rust library for narrating timestamped subtitle files into one
 * continuous speech track through an external voice-synthesis service.
 *
 * ## Features
 *
 * - Parse SRT subtitle files into validated, sorted cue collections
 * - Per-cue fitting strategy: natural rate, bounded speed-up, merge with
 *   the next cue, split at punctuation, and post-hoc time compression
 * - Monotonic timeline assembly against the original timestamps
 * - Per-job synthesis cache and bounded retries with exponential backoff
 * - Optional AI-backed text shortening for over-capacity cues
 * - Configurable failure policy (silent substitute or hard abort)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and engine tunables
 * - `subtitle_processor`: Subtitle file handling and processing
 * - `text_normalizer`: Markup stripping and sentence-boundary hints
 * - `voice_catalog`: Human-readable voice keys to engine voice ids
 * - `audio`: PCM segments, WAV I/O, time compression, container export
 * - `narration`: The synchronization engine:
 *   - `narration::estimate`: Synthesis-free duration estimation
 *   - `narration::planner`: Rate/compression planning per cue
 *   - `narration::cache`: Per-job synthesis caching
 *   - `narration::synthesizer`: Retries and failure policy
 *   - `narration::timeline`: Timeline assembly
 *   - `narration::progress`: Throttled progress reporting
 * - `providers`: Client implementations for external services:
 *   - `providers::edge`: Edge-tts compatible synthesis gateway client
 *   - `providers::gemini`: Gemini-backed text shortener
 *   - `providers::mock`: Deterministic provider for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod audio;
pub mod errors;
pub mod file_utils;
pub mod narration;
pub mod providers;
pub mod subtitle_processor;
pub mod text_normalizer;
pub mod voice_catalog;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{CancellationToken, Controller};
pub use audio::AudioSegment;
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
