/*!
 * Transcript summaries and key points through a chat model.
 *
 * Both requests send the transcript as one paragraph of text. The summary is
 * returned as the model wrote it; the key point answer is a bulleted list
 * that gets split into items.
 */

use log::debug;

use crate::errors::SummaryError;
use crate::providers::openai::{ChatMessage, ChatRequest, ChatResponse};
use crate::providers::Provider;
use crate::render::normalize_inline;
use crate::segment::Segment;

const SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates concise summaries of video transcripts.";

const KEY_POINTS_SYSTEM_PROMPT: &str =
    "Extract the main points and insights from this video transcript. Format as a bulleted list.";

/// Token limit for a summary
pub const SUMMARY_MAX_TOKENS: u32 = 300;

/// Token limit for a key point list
pub const KEY_POINTS_MAX_TOKENS: u32 = 500;

/// What to ask the model for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// A short prose summary
    Summary,
    /// A list of main points
    KeyPoints,
}

/// Segment texts joined into one paragraph
pub fn transcript_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| normalize_inline(&seg.text))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Chat request for a concise summary
pub fn summary_request(model: &str, segments: &[Segment]) -> ChatRequest {
    ChatRequest::new(model)
        .max_tokens(SUMMARY_MAX_TOKENS)
        .message(ChatMessage::system(SUMMARY_SYSTEM_PROMPT))
        .message(ChatMessage::user(format!(
            "Please provide a concise summary of this video transcript:\n\n{}",
            transcript_text(segments)
        )))
}

/// Chat request for a bulleted key point list
pub fn key_points_request(model: &str, segments: &[Segment]) -> ChatRequest {
    ChatRequest::new(model)
        .max_tokens(KEY_POINTS_MAX_TOKENS)
        .message(ChatMessage::system(KEY_POINTS_SYSTEM_PROMPT))
        .message(ChatMessage::user(format!(
            "Please extract the key points from this transcript:\n\n{}",
            transcript_text(segments)
        )))
}

/// Items of a bulleted or numbered list.
///
/// Markers (`-`, `*`, `+`, `•`, `1.`, `1)`) are stripped, code fences and
/// blank lines skipped; unmarked lines are kept as items.
pub fn parse_key_points(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("```"))
        .map(strip_list_marker)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    for bullet in ['-', '*', '+', '•'] {
        if let Some(rest) = line.strip_prefix(bullet) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim();
            }
        }
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim();
            }
        }
    }

    line
}

/// Summarizes transcripts using a chat provider
#[derive(Debug)]
pub struct Summarizer<P> {
    provider: P,
    model: String,
}

impl<P> Summarizer<P>
where
    P: Provider<Request = ChatRequest, Response = ChatResponse>,
{
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Concise prose summary of `segments`
    pub async fn summarize(&self, segments: &[Segment]) -> Result<String, SummaryError> {
        ensure_text(segments)?;

        let response = self.provider.complete(summary_request(&self.model, segments)).await?;
        let summary = P::extract_text(&response).trim().to_string();
        if summary.is_empty() {
            return Err(SummaryError::EmptyResponse("summary"));
        }

        debug!("Summarized {} segments into {} characters", segments.len(), summary.len());
        Ok(summary)
    }

    /// Main points of `segments`, one item per list entry
    pub async fn key_points(&self, segments: &[Segment]) -> Result<Vec<String>, SummaryError> {
        ensure_text(segments)?;

        let response = self.provider.complete(key_points_request(&self.model, segments)).await?;
        let points = parse_key_points(&P::extract_text(&response));
        if points.is_empty() {
            return Err(SummaryError::EmptyResponse("key point list"));
        }

        debug!("Extracted {} key points from {} segments", points.len(), segments.len());
        Ok(points)
    }

    /// Printable answer for `kind`; key points come back as `- item` lines
    pub async fn run(&self, kind: SummaryKind, segments: &[Segment]) -> Result<String, SummaryError> {
        match kind {
            SummaryKind::Summary => self.summarize(segments).await,
            SummaryKind::KeyPoints => Ok(self
                .key_points(segments)
                .await?
                .iter()
                .map(|point| format!("- {}", point))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

fn ensure_text(segments: &[Segment]) -> Result<(), SummaryError> {
    if segments.iter().all(|seg| seg.text.trim().is_empty()) {
        return Err(SummaryError::EmptyTranscript);
    }
    Ok(())
}
