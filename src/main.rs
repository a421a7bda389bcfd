// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::{CancellationToken, Controller};

mod app_config;
mod app_controller;
mod audio;
mod errors;
mod file_utils;
mod narration;
mod providers;
mod subtitle_processor;
mod text_normalizer;
mod voice_catalog;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Narrate a subtitle file into an audio track (default command)
    #[command(alias = "narrate")]
    Narrate(NarrateArgs),

    /// List the available voice catalog keys
    Voices,

    /// Generate shell completions for yasnai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct NarrateArgs {
    /// Input subtitle file (.srt)
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output audio file; defaults to the input path with an .mp3 extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Voice catalog key (e.g. 'en-jenny'); see `yasnai voices`
    #[arg(short, long)]
    voice: Option<String>,

    /// Synthesis gateway endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Send cue text to the gateway as SSML markup
    #[arg(long)]
    ssml: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// YASNAI - Yet Another Subtitle Narrator with AI
///
/// Narrates timestamped subtitle files through an external voice-synthesis
/// gateway, keeping the speech aligned with the original timestamps.
#[derive(Parser, Debug)]
#[command(name = "yasnai")]
#[command(author = "YASNAI Team")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered subtitle narration tool")]
#[command(long_about = "YASNAI turns subtitle files into continuous narrated audio tracks.

EXAMPLES:
    yasnai movie.srt                        # Narrate using default config
    yasnai movie.srt -o movie.wav           # Choose the output container
    yasnai -v en-jenny movie.srt            # Pick a catalog voice
    yasnai -f movie.srt                     # Force overwrite existing output
    yasnai voices                           # List available voices
    yasnai completions bash > yasnai.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file (.srt)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output audio file; defaults to the input path with an .mp3 extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Voice catalog key (e.g. 'en-jenny'); see `yasnai voices`
    #[arg(short, long)]
    voice: Option<String>,

    /// Synthesis gateway endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Send cue text to the gateway as SSML markup
    #[arg(long)]
    ssml: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yasnai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Voices) => {
            for key in voice_catalog::keys() {
                println!("{}", key);
            }
            Ok(())
        }
        Some(Commands::Narrate(args)) => run_narrate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let narrate_args = NarrateArgs {
                input_path,
                output: cli.output,
                voice: cli.voice,
                endpoint: cli.endpoint,
                force_overwrite: cli.force_overwrite,
                ssml: cli.ssml,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_narrate(narrate_args).await
        }
    }
}

async fn run_narrate(options: NarrateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(voice) = &options.voice {
            config.voice = voice.clone();
        }

        if let Some(endpoint) = &options.endpoint {
            config.synthesis.endpoint = endpoint.clone();
        }

        if options.ssml {
            config.synthesis.ssml = true;
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(voice) = &options.voice {
            config.voice = voice.clone();
        }

        if let Some(endpoint) = &options.endpoint {
            config.synthesis.endpoint = endpoint.clone();
        }

        if options.ssml {
            config.synthesis.ssml = true;
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let output_file = options.output.clone().unwrap_or_else(|| {
        file_utils::FileManager::generate_output_path(&options.input_path, "mp3")
    });

    // Create controller
    let controller = Controller::with_config(config)?;

    // Ctrl-C cancels the job between synthesis calls
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling narration");
            signal_token.cancel();
        }
    });

    controller
        .run(options.input_path, output_file, options.force_overwrite, cancel)
        .await
}
