/*!
 * Error types for the tubescript application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::render::OutputFormat;

/// Errors raised while turning caller-supplied JSON into segments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The payload is not valid JSON at all
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    /// The payload is valid JSON but not an array
    #[error("Segment payload must be a JSON array")]
    NotAnArray,

    /// An array element is not a JSON object
    #[error("Segment {index} is not a JSON object")]
    NotAnObject {
        /// Position in the input array
        index: usize,
    },

    /// A required field is absent
    #[error("Segment {index} is missing required field '{field}'")]
    MissingField {
        /// Position in the input array
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A field is present but has the wrong type or an out-of-range value
    #[error("Segment {index} has invalid field '{field}': {reason}")]
    InvalidField {
        /// Position in the input array
        index: usize,
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// Errors raised while rendering segments into an output document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The requested format identifier is not one of the supported formats
    #[error("Unsupported format: '{0}'")]
    UnsupportedFormat(String),

    /// A segment cannot be formatted
    #[error("Malformed segment {index}: invalid '{field}'")]
    MalformedSegment {
        /// Position of the segment
        index: usize,
        /// Field that failed validation
        field: &'static str,
    },

    /// The document library failed to produce a binary document.
    ///
    /// Only the kind is part of the message; `cause` keeps the library detail
    /// for diagnostics.
    #[error("Failed to encode {format} document")]
    EncodingFailure {
        /// Format being encoded
        format: OutputFormat,
        /// Underlying library error
        cause: String,
    },
}

impl RenderError {
    /// Internal detail of an encoding failure, if any
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::EncodingFailure { cause, .. } => Some(cause.as_str()),
            _ => None,
        }
    }
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while annotating segments with speaker labels
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The model answered with something that is not a label list
    #[error("Invalid speaker label response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while summarizing a transcript
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Nothing to send to the model
    #[error("Transcript has no text to summarize")]
    EmptyTranscript,

    /// The model answered with nothing usable
    #[error("Model returned an empty {0}")]
    EmptyResponse(&'static str),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from segment parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from rendering
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from speaker annotation
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Error from summarization
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
