use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app_config::Config;
use crate::audio::{self, AudioSegment};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::narration::{
    timeline, CuePlanner, ProgressReporter, SynthesisCache, Synthesizer, Timeline,
};
use crate::providers::edge::EdgeSpeechClient;
use crate::providers::gemini::GeminiShortener;
use crate::providers::{SpeechMode, SpeechProvider, SynthesisRequest, TextShortener};
use crate::subtitle_processor::SubtitleCollection;
use crate::voice_catalog;

// @module: Application controller for subtitle narration

/// Cooperative cancellation token checked between synthesis calls
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Main application controller for subtitle narration
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the main workflow: parse the subtitle file, narrate it, and write
    /// the audio track next to the requested output path.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_file: PathBuf,
        force_overwrite: bool,
        cancel: CancellationToken,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        if output_file.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite)");
            return Ok(());
        }
        FileManager::ensure_parent_dir(&output_file)?;

        let collection = SubtitleCollection::parse_srt_file(&input_file)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", input_file))?;
        let total = collection.entries.len();
        if total == 0 {
            return Err(anyhow!("Subtitle file contains no usable cues"));
        }
        info!("Narrating {} cues with voice '{}'", total, self.config.voice);

        let provider = EdgeSpeechClient::new(
            &self.config.synthesis.endpoint,
            &self.config.synthesis.api_key,
            self.config.synthesis.timeout_secs,
            self.config.synthesis.sample_rate,
        )?;

        let shortener: Option<GeminiShortener> = if self.config.shortener.enabled {
            Some(GeminiShortener::new(
                &self.config.shortener.endpoint,
                &self.config.shortener.model,
                &self.config.shortener.api_key,
                self.config.shortener.timeout_secs,
            )?)
        } else {
            None
        };

        let progress_bar = ProgressBar::new(total as u64);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cues",
            )
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
        );
        let bar_handle = progress_bar.clone();
        let reporter = ProgressReporter::new(total, move |processed, _total| {
            bar_handle.set_position(processed as u64);
        });

        let track = self
            .narrate_collection(
                collection,
                &provider,
                shortener.as_ref().map(|s| s as &dyn TextShortener),
                Some(&reporter),
                &cancel,
            )
            .await?;

        progress_bar.finish_with_message("narration complete");

        audio::export(&track, &output_file)
            .await
            .map_err(AppError::from)?;

        info!(
            "Wrote {} ms of audio to {:?} in {:.1} s",
            track.duration_ms(),
            output_file,
            start_time.elapsed().as_secs_f64()
        );

        Ok(())
    }

    /// Narrate a parsed collection into one continuous audio segment.
    ///
    /// Cache, planner, and timeline are constructed here per call, so
    /// concurrent jobs never share state.
    pub async fn narrate_collection(
        &self,
        collection: SubtitleCollection,
        provider: &dyn SpeechProvider,
        shortener: Option<&dyn TextShortener>,
        progress: Option<&ProgressReporter>,
        cancel: &CancellationToken,
    ) -> Result<AudioSegment, AppError> {
        let voice_id = voice_catalog::resolve(&self.config.voice)?;
        let schedule_end_ms = collection.schedule_end_ms();
        let mode = if self.config.synthesis.ssml {
            SpeechMode::SsmlMarkup
        } else {
            SpeechMode::PlainText
        };

        let cache = SynthesisCache::new();
        let synthesizer = Synthesizer::new(provider, &cache, &self.config.synthesis);
        let mut planner = CuePlanner::new(collection.entries, &self.config.engine, shortener);
        let mut track = Timeline::new(self.config.synthesis.sample_rate);

        while let Some(unit) = planner.next_unit().await {
            if cancel.is_cancelled() {
                warn!("Narration cancelled, discarding partial track");
                return Err(AppError::Cancelled);
            }

            debug!(
                "Planned unit at {} ms: slot {} ms, rate +{}%, {} chars",
                unit.start_ms,
                unit.slot_ms,
                unit.rate_percent,
                unit.text.chars().count()
            );

            let request =
                SynthesisRequest::new(unit.text.clone(), voice_id, unit.rate_percent).with_mode(mode);
            let segment = synthesizer.synthesize_with_policy(&request).await?;
            let fitted = audio::fit_to_slot(
                segment,
                unit.slot_ms,
                self.config.engine.max_compression_ratio,
            )
            .await;

            let breath_ms = timeline::adaptive_breath_ms(&unit.text, &self.config.engine);
            track.place(unit.start_ms, &fitted, breath_ms);

            if let Some(reporter) = progress {
                reporter.update(planner.processed_sources());
            }
        }

        cache.log_stats();
        if let Some(reporter) = progress {
            reporter.finish(planner.processed_sources());
        }

        // The track must last at least until the final cue's scheduled end
        track.pad_to_ms(schedule_end_ms);

        Ok(track.into_segment())
    }
}
