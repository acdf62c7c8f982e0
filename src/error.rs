//! Error types for rs-readability.
//!
//! This module defines the error types returned by the parsing pipeline.
//! Recoverable problems (bad URLs, undecodable entities, malformed JSON-LD)
//! never surface here; they are logged and worked around locally.

/// Error type for parse operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTML source string was empty.
    #[error("first argument to the Readability constructor should be an HTML document")]
    EmptyInput,

    /// The parser collaborator produced a document without a `<body>`.
    #[error("cannot parse document: no body element")]
    ParseFailure,

    /// The document exceeds the configured element budget.
    #[error("aborting parsing document: {found} elements found, limit is {limit}")]
    DocumentTooLarge {
        /// Number of elements in the document.
        found: usize,
        /// Configured `max_elems_to_parse`.
        limit: usize,
    },

    /// No candidate subtree could be found, even after every retry.
    #[error("cannot grab article: no readable content found")]
    ExtractionFailed,
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
