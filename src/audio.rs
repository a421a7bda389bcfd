/*!
 * Audio segment handling.
 *
 * Segments are mono f32 PCM at a fixed job sample rate. WAV I/O goes through
 * hound; format conversion and pitch-preserving time compression shell out to
 * ffmpeg with scoped temporary files.
 */

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use tokio::process::Command;

use crate::errors::AudioError;

/// Timeout for any single ffmpeg invocation
const FFMPEG_TIMEOUT: Duration = Duration::from_secs(120);

/// A decoded audio buffer plus its sample rate.
///
/// Always mono; duration is derived from the sample count.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    /// PCM samples in [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioSegment {
    /// Create a segment from raw samples
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Create a silent segment of the given duration
    pub fn silence(duration_ms: u64, sample_rate: u32) -> Self {
        let count = (duration_ms as u128 * sample_rate as u128 / 1000) as usize;
        Self {
            samples: vec![0.0; count],
            sample_rate,
        }
    }

    /// Duration of the segment in milliseconds
    pub fn duration_ms(&self) -> u64 {
        (self.samples.len() as u128 * 1000 / self.sample_rate as u128) as u64
    }

    /// Hard-trim the segment to at most the given duration
    pub fn truncate_to_ms(&mut self, duration_ms: u64) {
        let max_samples = (duration_ms as u128 * self.sample_rate as u128 / 1000) as usize;
        if self.samples.len() > max_samples {
            self.samples.truncate(max_samples);
        }
    }

    /// Whether the segment contains no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Read a WAV file into mono f32 samples
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioSegment, AudioError> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path)
        .map_err(|e| AudioError::Decode(format!("Failed to open WAV {}: {}", path.display(), e)))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = if spec.sample_format == hound::SampleFormat::Int {
        match spec.bits_per_sample {
            16 => reader
                .into_samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<Vec<_>, _>>(),
            24 => reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / (1 << 23) as f32))
                .collect::<Result<Vec<_>, _>>(),
            32 => reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / i32::MAX as f32))
                .collect::<Result<Vec<_>, _>>(),
            other => {
                return Err(AudioError::Decode(format!(
                    "Unsupported WAV bit depth: {}",
                    other
                )))
            }
        }
        .map_err(|e| AudioError::Decode(format!("Failed to read WAV samples: {}", e)))?
    } else {
        reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioError::Decode(format!("Failed to read WAV samples: {}", e)))?
    };

    if samples.is_empty() {
        return Err(AudioError::Decode("Decoded WAV contains no samples".to_string()));
    }

    // Mono is guaranteed by our own ffmpeg invocations; fold channels if a
    // caller hands us something else
    let samples = if spec.channels > 1 {
        samples
            .chunks(spec.channels as usize)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    } else {
        samples
    };

    Ok(AudioSegment::new(samples, sample_rate))
}

/// Write mono f32 samples to a 16-bit WAV file
pub fn write_wav<P: AsRef<Path>>(segment: &AudioSegment, path: P) -> Result<(), AudioError> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: segment.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| AudioError::Export(format!("Failed to create WAV {}: {}", path.display(), e)))?;

    for &sample in &segment.samples {
        let s = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(s)
            .map_err(|e| AudioError::Export(format!("Failed to write WAV sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| AudioError::Export(format!("Failed to finalize WAV: {}", e)))?;

    Ok(())
}

/// Decode compressed audio bytes (mp3 and friends) into a mono segment at
/// the requested sample rate.
///
/// The bytes are written to a scoped temporary file and converted by ffmpeg;
/// both intermediates are released when this function returns, on every path.
pub async fn decode_bytes(data: &[u8], sample_rate: u32) -> Result<AudioSegment, AudioError> {
    if data.is_empty() {
        return Err(AudioError::Decode("Received empty audio payload".to_string()));
    }

    let mut input = tempfile::NamedTempFile::new()
        .map_err(|e| AudioError::Decode(format!("Failed to create temp file: {}", e)))?;
    input
        .write_all(data)
        .map_err(|e| AudioError::Decode(format!("Failed to write temp file: {}", e)))?;

    let output = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .map_err(|e| AudioError::Decode(format!("Failed to create temp file: {}", e)))?;

    run_ffmpeg(&[
        "-y",
        "-i",
        input.path().to_str().unwrap_or_default(),
        "-ac",
        "1",
        "-ar",
        &sample_rate.to_string(),
        "-sample_fmt",
        "s16",
        "-f",
        "wav",
        output.path().to_str().unwrap_or_default(),
    ])
    .await
    .map_err(AudioError::Decode)?;

    let segment = read_wav(output.path())?;
    debug!(
        "Decoded {} bytes into {} samples at {} Hz",
        data.len(),
        segment.samples.len(),
        segment.sample_rate
    );

    Ok(segment)
}

/// Time-compress a segment by the given ratio (> 1.0 speeds up), preserving
/// pitch via ffmpeg's atempo filter.
pub async fn time_compress(segment: &AudioSegment, ratio: f64) -> Result<AudioSegment, AudioError> {
    if ratio <= 1.0 {
        return Ok(segment.clone());
    }
    if segment.is_empty() {
        return Err(AudioError::Compression("Cannot compress an empty segment".to_string()));
    }

    let input = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .map_err(|e| AudioError::Compression(format!("Failed to create temp file: {}", e)))?;
    write_wav(segment, input.path())
        .map_err(|e| AudioError::Compression(e.to_string()))?;

    let output = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .map_err(|e| AudioError::Compression(format!("Failed to create temp file: {}", e)))?;

    let filter = atempo_filter(ratio);
    run_ffmpeg(&[
        "-y",
        "-i",
        input.path().to_str().unwrap_or_default(),
        "-af",
        &filter,
        "-ar",
        &segment.sample_rate.to_string(),
        "-f",
        "wav",
        output.path().to_str().unwrap_or_default(),
    ])
    .await
    .map_err(AudioError::Compression)?;

    read_wav(output.path()).map_err(|e| AudioError::Compression(e.to_string()))
}

/// Fit a synthesized segment into its slot.
///
/// Compresses up to `max_ratio`, then hard-trims whatever still exceeds the
/// slot. Compression failure is non-fatal and falls back to truncation.
pub async fn fit_to_slot(
    mut segment: AudioSegment,
    slot_ms: u64,
    max_ratio: f64,
) -> AudioSegment {
    let duration = segment.duration_ms();
    if duration <= slot_ms || slot_ms == 0 {
        return segment;
    }

    let ratio = duration as f64 / slot_ms as f64;
    let capped = ratio.min(max_ratio);

    match time_compress(&segment, capped).await {
        Ok(compressed) => {
            debug!(
                "Compressed segment from {} ms to {} ms (ratio {:.2}, cap {:.2})",
                duration,
                compressed.duration_ms(),
                ratio,
                max_ratio
            );
            segment = compressed;
        }
        Err(e) => {
            warn!("{}; falling back to hard trim", e);
        }
    }

    segment.truncate_to_ms(slot_ms);
    segment
}

/// Serialize a segment to the output container.
///
/// `.wav` is written directly; any other extension goes through a scoped
/// temporary WAV re-encoded by ffmpeg.
pub async fn export<P: AsRef<Path>>(segment: &AudioSegment, path: P) -> Result<(), AudioError> {
    let path = path.as_ref();

    let is_wav = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);

    if is_wav {
        return write_wav(segment, path);
    }

    let temp_wav = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .map_err(|e| AudioError::Export(format!("Failed to create temp file: {}", e)))?;
    write_wav(segment, temp_wav.path())?;

    run_ffmpeg(&[
        "-y",
        "-i",
        temp_wav.path().to_str().unwrap_or_default(),
        path.to_str().unwrap_or_default(),
    ])
    .await
    .map_err(AudioError::Export)?;

    Ok(())
}

/// Build an atempo filter chain for the given ratio.
///
/// A single atempo stage accepts at most 2.0, so larger ratios are factored
/// into chained stages.
fn atempo_filter(ratio: f64) -> String {
    let mut remaining = ratio;
    let mut stages = Vec::new();
    while remaining > 2.0 {
        stages.push("atempo=2.0".to_string());
        remaining /= 2.0;
    }
    stages.push(format!("atempo={:.4}", remaining));
    stages.join(",")
}

/// Run ffmpeg with a timeout, returning a filtered error message on failure
async fn run_ffmpeg(args: &[&str]) -> Result<(), String> {
    let ffmpeg_future = Command::new("ffmpeg").args(args).output();

    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| format!("Failed to execute ffmpeg: {}", e))?
        },
        _ = tokio::time::sleep(FFMPEG_TIMEOUT) => {
            return Err("ffmpeg command timed out".to_string());
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(format!("ffmpeg failed: {}", filter_ffmpeg_stderr(&stderr)));
    }

    Ok(())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
