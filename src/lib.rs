/*!
 * # tubescript - video transcript export
 *
 * A Rust library that turns the timed segments of a video transcript into
 * downloadable documents.
 *
 * ## Features
 *
 * - Parse transcript segments from a JSON array
 * - Render them as plain text, SRT, WebVTT, HTML, PDF or DOCX
 * - Infer cue end times from the next segment start
 * - Extract video ids from watch, short and embed URLs
 * - Build the word-frequency index behind a clickable word cloud
 * - Label speakers through an OpenAI-compatible chat model
 * - Summarize a transcript or list its key points with the same model
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segment`: Segment model, JSON parsing and end-time inference
 * - `render`: Format renderers:
 *   - `render::timecode`: Clock and subtitle timestamps
 *   - `render::text`, `render::subtitle`, `render::html`: Text formats
 *   - `render::pdf`, `render::docx`: Binary document formats
 * - `video_id`: Video id extraction and download filenames
 * - `word_index`: Word frequencies with per-word timestamps
 * - `speakers`: Speaker annotation through a chat provider
 * - `summary`: Summaries and key points through a chat provider
 * - `providers`: Client implementations for chat providers
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
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
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod render;
pub mod segment;
pub mod speakers;
pub mod summary;
pub mod video_id;
pub mod word_index;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, JobOutcome, RenderJob};
pub use errors::{AnnotationError, AppError, ParseError, ProviderError, RenderError, SummaryError};
pub use render::{render, render_format, EmbeddedFont, OutputFormat, RenderOptions, RenderedDocument};
pub use segment::{parse_segments, Segment};
pub use video_id::extract_video_id;
pub use word_index::{WordEntry, WordIndex, WordIndexOptions};
