/*!
 * Speaker annotation through a chat model.
 *
 * The transcript is sent as numbered lines and the model answers with a JSON
 * array of `{"index", "speaker"}` objects. Labels are merged back into a copy
 * of the segments; the input is never modified.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::AnnotationError;
use crate::providers::openai::{ChatMessage, ChatRequest, ChatResponse};
use crate::providers::Provider;
use crate::render::normalize_inline;
use crate::segment::Segment;

const SYSTEM_PROMPT: &str = "You label speakers in video transcripts. \
Each line of the transcript starts with its index in square brackets. \
Answer only with a JSON array of objects of the form {\"index\": <number>, \"speaker\": \"<label>\"}, \
one object per line. Use names when the transcript reveals them, otherwise \"Speaker 1\", \"Speaker 2\" and so on.";

/// Speaker assigned to one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerLabel {
    /// Position of the segment in the transcript
    pub index: usize,
    /// Label to show
    #[serde(alias = "speaker_id")]
    pub speaker: String,
}

/// Numbered transcript lines, `[i] text`
pub fn build_speaker_prompt(segments: &[Segment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| format!("[{}] {}", i, normalize_inline(&seg.text)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Chat request asking `model` to label `segments`
pub fn speaker_request(model: &str, temperature: f32, segments: &[Segment]) -> ChatRequest {
    ChatRequest::new(model)
        .temperature(temperature)
        .message(ChatMessage::system(SYSTEM_PROMPT))
        .message(ChatMessage::user(build_speaker_prompt(segments)))
}

/// Pull the first JSON label array out of a model answer.
///
/// Code fences and prose around the array are tolerated.
pub fn parse_speaker_labels(response: &str) -> Result<Vec<SpeakerLabel>, AnnotationError> {
    for (pos, _) in response.match_indices('[') {
        let mut stream = serde_json::Deserializer::from_str(&response[pos..])
            .into_iter::<Vec<SpeakerLabel>>();
        if let Some(Ok(labels)) = stream.next() {
            return Ok(labels);
        }
    }

    let preview: String = response.chars().take(80).collect();
    Err(AnnotationError::InvalidResponse(format!("no speaker label array found in: {:?}", preview)))
}

/// Copy of `segments` with the labels applied
pub fn apply_speaker_labels(segments: &[Segment], labels: &[SpeakerLabel]) -> Vec<Segment> {
    let mut annotated = segments.to_vec();

    for label in labels {
        let speaker = label.speaker.trim();
        if speaker.is_empty() {
            continue;
        }
        match annotated.get_mut(label.index) {
            Some(seg) => seg.speaker_id = Some(speaker.to_string()),
            None => warn!("Ignoring speaker label for segment {} (transcript has {} segments)",
                          label.index, segments.len()),
        }
    }

    annotated
}

/// Labels segments with speakers using a chat provider
#[derive(Debug)]
pub struct SpeakerAnnotator<P> {
    provider: P,
    model: String,
    temperature: f32,
}

impl<P> SpeakerAnnotator<P>
where
    P: Provider<Request = ChatRequest, Response = ChatResponse>,
{
    pub fn new(provider: P, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ask the model for speakers and return annotated copies of `segments`
    pub async fn annotate(&self, segments: &[Segment]) -> Result<Vec<Segment>, AnnotationError> {
        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let request = speaker_request(&self.model, self.temperature, segments);
        let response = self.provider.complete(request).await?;
        let text = P::extract_text(&response);
        let labels = parse_speaker_labels(&text)?;

        debug!("Received {} speaker labels for {} segments", labels.len(), segments.len());
        Ok(apply_speaker_labels(segments, &labels))
    }
}
