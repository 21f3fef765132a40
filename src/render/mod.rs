/*!
 * Transcript renderers.
 *
 * Each output format lives in its own submodule; this module owns the closed
 * set of formats, the options shared by the document formats and the single
 * dispatch entry point. Rendering is pure: no I/O, no logging, no shared state.
 *
 * - `text`: plain `[MM:SS] text` lines
 * - `subtitle`: SRT and WebVTT cues
 * - `html`: standalone HTML document
 * - `pdf`: paginated PDF via printpdf, Helvetica or an embedded TrueType font
 * - `docx`: WordprocessingML package via zip
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::RenderError;
use crate::segment::Segment;

pub mod docx;
pub mod html;
pub mod pdf;
pub mod subtitle;
pub mod text;
pub mod timecode;

/// Title used by the document formats when none is given
pub const DEFAULT_TITLE: &str = "Transcript";

/// Language written into HTML and DOCX output when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Txt,
    Srt,
    Vtt,
    Html,
    Pdf,
    Docx,
}

impl OutputFormat {
    /// Every supported format, in display order
    pub fn all() -> [OutputFormat; 6] {
        [Self::Txt, Self::Srt, Self::Vtt, Self::Html, Self::Pdf, Self::Docx]
    }

    // @returns: File extension, identical to the format identifier
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    // @returns: MIME type for HTTP delivery
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Txt | Self::Srt | Self::Vtt => "text/plain",
            Self::Html => "text/html",
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }

    /// Whether the format is binary rather than UTF-8 text
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Pdf | Self::Docx)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            "html" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// TrueType font data embedded into PDF output
#[derive(Clone, PartialEq)]
pub struct EmbeddedFont(Arc<[u8]>);

impl EmbeddedFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        EmbeddedFont(bytes.into())
    }

    /// Read a `.ttf` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        std::fs::read(path).map(Self::from_bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmbeddedFont({} bytes)", self.0.len())
    }
}

/// Options for the document formats (HTML, PDF, DOCX)
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Document title, defaults to [`DEFAULT_TITLE`]
    pub title: Option<String>,
    /// ISO 639-1 language code, defaults to [`DEFAULT_LANGUAGE`]
    pub language: Option<String>,
    /// Font for PDF text; built-in Helvetica (WinAnsi only) when absent
    pub pdf_font: Option<EmbeddedFont>,
}

impl RenderOptions {
    /// Options with only a title set
    pub fn with_title(title: Option<&str>) -> Self {
        RenderOptions {
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    /// Set the PDF font
    pub fn with_pdf_font(mut self, font: Option<EmbeddedFont>) -> Self {
        self.pdf_font = font;
        self
    }

    /// Effective title
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Effective language code
    pub fn language(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// A finished document ready for download delivery
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Encoded document
    pub bytes: Vec<u8>,
    /// Format the bytes are in
    pub format: OutputFormat,
}

impl RenderedDocument {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `transcript_{video_id}.{ext}`
    pub fn suggested_filename(&self, video_id: &str) -> String {
        crate::video_id::transcript_filename(video_id, self.format)
    }

    /// Value for a `Content-Disposition` header
    pub fn content_disposition(&self, video_id: &str) -> String {
        format!("attachment; filename={}", self.suggested_filename(video_id))
    }

    /// The document as text, for the text formats
    pub fn as_text(&self) -> Option<&str> {
        if self.format.is_binary() {
            return None;
        }
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Render `segments` into the format named by `format_id`.
///
/// Unknown identifiers are an error; nothing falls back to plain text.
pub fn render(segments: &[Segment], format_id: &str, title: Option<&str>) -> Result<RenderedDocument, RenderError> {
    let format: OutputFormat = format_id.parse()?;
    render_format(segments, format, &RenderOptions::with_title(title))
}

/// Render `segments` into `format`.
///
/// All segments are validated first so a malformed one never yields partial output.
pub fn render_format(segments: &[Segment], format: OutputFormat, options: &RenderOptions) -> Result<RenderedDocument, RenderError> {
    for (index, segment) in segments.iter().enumerate() {
        segment.validate(index)?;
    }

    let bytes = match format {
        OutputFormat::Txt => text::render_txt(segments).into_bytes(),
        OutputFormat::Srt => subtitle::render_srt(segments).into_bytes(),
        OutputFormat::Vtt => subtitle::render_vtt(segments).into_bytes(),
        OutputFormat::Html => html::render_html(segments, options).into_bytes(),
        OutputFormat::Pdf => pdf::render_pdf(segments, options)?,
        OutputFormat::Docx => docx::render_docx(segments, options)?,
    };

    Ok(RenderedDocument { bytes, format })
}

/// Collapse every whitespace run to a single space and trim
pub(crate) fn normalize_inline(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `[MM:SS] {speaker: }text` used by the PDF and DOCX paragraphs
pub(crate) fn compose_paragraph(segment: &Segment) -> String {
    let mut line = format!("[{}] ", timecode::format_clock(segment.start));
    if let Some(speaker) = segment.speaker() {
        line.push_str(speaker);
        line.push_str(": ");
    }
    line.push_str(&normalize_inline(&segment.text));
    line
}

/// Escape the five XML/HTML special characters
pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
