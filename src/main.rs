// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use tubescript::app_config::{self, Config};
use tubescript::app_controller::{Controller, JobOutcome, RenderJob};
use tubescript::render::OutputFormat;
use tubescript::summary::SummaryKind;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a transcript JSON file into a document
    Render(RenderArgs),

    /// Print the word-frequency index of a transcript as JSON
    Words {
        /// JSON array of transcript segments
        #[arg(value_name = "INPUT_JSON")]
        input_path: PathBuf,

        /// Number of words to keep
        #[arg(short, long)]
        max_words: Option<usize>,
    },

    /// Summarize a transcript with the configured chat model
    Summarize {
        /// JSON array of transcript segments
        #[arg(value_name = "INPUT_JSON")]
        input_path: PathBuf,

        /// Print a bulleted list of key points instead of a summary
        #[arg(short, long)]
        key_points: bool,
    },

    /// List the supported output formats
    Formats,

    /// Generate shell completions for tubescript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// JSON array of transcript segments
    #[arg(value_name = "INPUT_JSON")]
    input_path: PathBuf,

    /// Output format (txt, srt, vtt, html, pdf, docx)
    #[arg(short, long)]
    format: String,

    /// Video URL or id used to name the output file
    #[arg(short, long)]
    video: Option<String>,

    /// Document title (HTML, PDF, DOCX)
    #[arg(short, long)]
    title: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Label speakers with the configured chat model before rendering
    #[arg(short, long)]
    speakers: bool,

    /// TrueType font for PDF text outside Latin-1
    #[arg(long, value_name = "TTF")]
    pdf_font: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(long)]
    force: bool,

    /// Write the document to stdout instead of a file
    #[arg(long, conflicts_with_all = ["output_dir", "force"])]
    stdout: bool,
}

/// tubescript - video transcript export
///
/// Renders the timed segments of a video transcript as text, subtitles,
/// HTML, PDF or Word documents.
#[derive(Parser, Debug)]
#[command(name = "tubescript")]
#[command(version)]
#[command(about = "Export video transcripts as TXT, SRT, VTT, HTML, PDF or DOCX")]
#[command(long_about = "tubescript reads a JSON array of transcript segments ({\"start\", \"text\", \"duration\"?, \"speaker_id\"?}) and renders it in the requested format.

EXAMPLES:
    tubescript render talk.json -f srt                          # Write transcript_talk.srt
    tubescript render talk.json -f pdf -v https://youtu.be/ID   # Name the file after the video id
    tubescript render talk.json -f html --speakers              # Label speakers first
    tubescript render talk.json -f vtt --stdout                 # Print to stdout
    tubescript render talk.json -f pdf --pdf-font font.ttf      # Embed a font for non-Latin text
    tubescript summarize talk.json --key-points                 # Bulleted key points
    tubescript words talk.json -m 50                            # Word cloud data as JSON
    tubescript completions bash > tubescript.bash               # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    file with --config-path. When the file is missing, defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()), now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at trace so the filter set below is the only gate
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tubescript", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level.into();
    }
    log::set_max_level((&config.log_level).into());

    match cli.command {
        Commands::Render(args) => run_render(config, args).await,
        Commands::Words { input_path, max_words } => {
            if let Some(max_words) = max_words {
                config.words.max_words = max_words;
            }
            run_words(config, input_path)
        }
        Commands::Summarize { input_path, key_points } => {
            let kind = if key_points { SummaryKind::KeyPoints } else { SummaryKind::Summary };
            run_summarize(config, input_path, kind).await
        }
        Commands::Formats => {
            for format in OutputFormat::all() {
                println!("{:<5} .{:<5} {}", format.to_string(), format.extension(), format.mime_type());
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_render(mut config: Config, args: RenderArgs) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;

    if args.speakers {
        config.speakers.enabled = true;
    }
    if let Some(font) = &args.pdf_font {
        config.pdf_font = Some(font.to_string_lossy().to_string());
    }

    config.validate()
        .context("Configuration validation failed")?;

    let output_dir = args.output_dir.clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    let controller = Controller::with_config(config)?;

    if args.stdout {
        let mut segments = Controller::load_segments(&args.input_path)?;
        if controller.config().speakers.enabled {
            match controller.speaker_annotator()?.annotate(&segments).await {
                Ok(annotated) => segments = annotated,
                Err(e) => warn!("Speaker annotation failed, rendering without speakers: {}", e),
            }
        }
        let document = controller.render_segments(&segments, format, args.title.as_deref())?;
        std::io::stdout().write_all(&document.bytes)
            .context("Failed to write document to stdout")?;
        return Ok(());
    }

    let job = RenderJob {
        input_file: args.input_path,
        format,
        video: args.video,
        title: args.title,
        output_dir,
        annotate_speakers: args.speakers,
        force_overwrite: args.force,
    };

    match controller.run(job).await? {
        JobOutcome::Written(path) => info!("Success: {:?}", path),
        JobOutcome::Skipped(path) => info!("Unchanged: {:?}", path),
    }

    Ok(())
}

async fn run_summarize(config: Config, input_path: PathBuf, kind: SummaryKind) -> Result<()> {
    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let answer = controller.summarize(&input_path, kind).await?;

    println!("{}", answer);
    Ok(())
}

fn run_words(config: Config, input_path: PathBuf) -> Result<()> {
    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let raw = tubescript::file_utils::FileManager::read_to_string(&input_path)?;
    let index = controller.word_index(&raw)?;

    println!("{}", serde_json::to_string_pretty(index.entries())?);
    Ok(())
}
