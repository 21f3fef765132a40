use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::providers::openai::{ChatRequest, ChatResponse, OpenAI};
use crate::providers::Provider;
use crate::render::{self, EmbeddedFont, OutputFormat, RenderedDocument};
use crate::segment::{parse_segments, Segment};
use crate::speakers::SpeakerAnnotator;
use crate::summary::{SummaryKind, Summarizer};
use crate::video_id::extract_video_id;
use crate::word_index::WordIndex;

// @module: Application controller for transcript rendering

/// One file-to-file render request
#[derive(Debug, Clone)]
pub struct RenderJob {
    // @field: JSON segment array on disk
    pub input_file: PathBuf,
    // @field: Target format
    pub format: OutputFormat,
    // @field: Video URL or id used for the output name
    pub video: Option<String>,
    // @field: Document title, config default when absent
    pub title: Option<String>,
    // @field: Where the document is written
    pub output_dir: PathBuf,
    // @field: Ask the model for speaker labels first
    pub annotate_speakers: bool,
    // @field: Replace an existing output file
    pub force_overwrite: bool,
}

impl RenderJob {
    pub fn new<P: Into<PathBuf>>(input_file: P, format: OutputFormat) -> Self {
        Self {
            input_file: input_file.into(),
            format,
            video: None,
            title: None,
            output_dir: PathBuf::from("."),
            annotate_speakers: false,
            force_overwrite: false,
        }
    }
}

/// What happened to a render job
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Document written to this path
    Written(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Font loaded from `pdf_font`, read once
    pdf_font: Option<EmbeddedFont>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let pdf_font = match &config.pdf_font {
            Some(path) => {
                let font = EmbeddedFont::from_file(path)
                    .with_context(|| format!("Failed to read PDF font: {}", path))?;
                debug!("Loaded PDF font {} ({} bytes)", path, font.as_bytes().len());
                Some(font)
            }
            None => None,
        };
        Ok(Self { config, pdf_font })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a JSON segment array and render it in memory.
    ///
    /// Returns the document together with its download filename.
    pub fn render_from_json(&self, raw: &str, format_id: &str, video_id: &str) -> Result<(RenderedDocument, String), AppError> {
        let segments = parse_segments(raw)?;
        let format: OutputFormat = format_id.parse()?;
        let document = self.render_segments(&segments, format, None)?;
        let filename = document.suggested_filename(video_id);
        Ok((document, filename))
    }

    /// Render already parsed segments with the configured defaults
    pub fn render_segments(&self, segments: &[Segment], format: OutputFormat, title: Option<&str>) -> Result<RenderedDocument, AppError> {
        let options = self.config.render_options(title).with_pdf_font(self.pdf_font.clone());
        Ok(render::render_format(segments, format, &options)?)
    }

    /// Word frequencies of a JSON segment array
    pub fn word_index(&self, raw: &str) -> Result<WordIndex, AppError> {
        let segments = parse_segments(raw)?;
        Ok(WordIndex::build(&segments, &(&self.config.words).into()))
    }

    // Client for the configured OpenAI-compatible endpoint
    fn chat_provider(&self) -> Result<OpenAI> {
        let speakers = &self.config.speakers;
        let api_key = speakers.get_api_key();
        if api_key.trim().is_empty() {
            return Err(anyhow!("The chat model needs an API key (speakers.api_key or OPENAI_API_KEY)"));
        }

        Ok(OpenAI::new(api_key, speakers.endpoint.clone(), speakers.timeout_secs)
            .with_retries(speakers.max_retries, speakers.retry_backoff_ms))
    }

    /// Speaker annotator backed by the configured OpenAI-compatible endpoint
    pub fn speaker_annotator(&self) -> Result<SpeakerAnnotator<OpenAI>> {
        let speakers = &self.config.speakers;
        Ok(SpeakerAnnotator::new(self.chat_provider()?, speakers.model.clone(), speakers.temperature))
    }

    /// Summarizer backed by the configured OpenAI-compatible endpoint
    pub fn summarizer(&self) -> Result<Summarizer<OpenAI>> {
        Ok(Summarizer::new(self.chat_provider()?, self.config.summary.model.clone()))
    }

    /// Summary or key points of a segment file, using the configured provider
    pub async fn summarize(&self, input_file: &Path, kind: SummaryKind) -> Result<String> {
        let summarizer = self.summarizer()?;
        self.summarize_with(input_file, kind, &summarizer).await
    }

    /// Summary or key points of a segment file with an explicit summarizer
    pub async fn summarize_with<P>(&self, input_file: &Path, kind: SummaryKind, summarizer: &Summarizer<P>) -> Result<String>
    where
        P: Provider<Request = ChatRequest, Response = ChatResponse>,
    {
        let start_time = Instant::now();
        let segments = Self::load_segments(input_file)?;

        let answer = summarizer.run(kind, &segments).await
            .with_context(|| format!("Failed to summarize {:?}", input_file))?;

        info!("Summarized {:?} ({:?}) in {:.2?}", input_file, kind, start_time.elapsed());
        Ok(answer)
    }

    /// Run a render job, using the configured provider when speakers are requested
    pub async fn run(&self, job: RenderJob) -> Result<JobOutcome> {
        if job.annotate_speakers || self.config.speakers.enabled {
            let annotator = self.speaker_annotator()?;
            self.run_with(job, Some(&annotator)).await
        } else {
            self.run_with::<OpenAI>(job, None).await
        }
    }

    /// Run a render job with an explicit annotator
    pub async fn run_with<P>(&self, job: RenderJob, annotator: Option<&SpeakerAnnotator<P>>) -> Result<JobOutcome>
    where
        P: Provider<Request = ChatRequest, Response = ChatResponse>,
    {
        let start_time = Instant::now();

        if !FileManager::file_exists(&job.input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", job.input_file));
        }

        let video_id = Self::resolve_video_id(&job)?;
        let output_path = job.output_dir.join(crate::video_id::transcript_filename(&video_id, job.format));

        if output_path.exists() && !job.force_overwrite {
            warn!("Skipping {:?}, output already exists (use --force to overwrite)", output_path);
            return Ok(JobOutcome::Skipped(output_path));
        }

        let raw = FileManager::read_to_string(&job.input_file)?;
        let mut segments = parse_segments(&raw)
            .with_context(|| format!("Failed to parse segments from {:?}", job.input_file))?;
        debug!("Parsed {} segments from {:?}", segments.len(), job.input_file);

        if let Some(annotator) = annotator {
            match annotator.annotate(&segments).await {
                Ok(annotated) => segments = annotated,
                Err(e) => warn!("Speaker annotation failed, rendering without speakers: {}", e),
            }
        }

        let document = self.render_segments(&segments, job.format, job.title.as_deref())
            .with_context(|| format!("Failed to render {} document", job.format))?;

        FileManager::ensure_dir(&job.output_dir)?;
        FileManager::write_bytes(&output_path, &document.bytes)?;

        info!("Wrote {:?} ({} bytes) in {:.2?}", output_path, document.bytes.len(), start_time.elapsed());
        Ok(JobOutcome::Written(output_path))
    }

    // Id from --video, else the input file stem
    fn resolve_video_id(job: &RenderJob) -> Result<String> {
        if let Some(video) = &job.video {
            return extract_video_id(video)
                .ok_or_else(|| anyhow!("Could not find a video id in '{}'", video));
        }

        job.input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("Cannot derive a video id from {:?}", job.input_file))
    }

    /// Read and parse a segment file
    pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>> {
        let raw = FileManager::read_to_string(&path)?;
        parse_segments(&raw)
            .with_context(|| format!("Failed to parse segments from {:?}", path.as_ref()))
    }
}
