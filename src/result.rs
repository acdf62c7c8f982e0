//! The extraction result record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A successfully extracted article.
///
/// `content` holds the sanitized article HTML, `text_content` the same
/// content with all tags removed. Optional fields are absent when the
/// document did not provide them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Article {
    /// Article title.
    pub title: String,

    /// HTML string of the processed article content.
    pub content: String,

    /// Text content of the article, with all the HTML tags removed.
    pub text_content: String,

    /// Length of the article, in characters.
    pub length: usize,

    /// Article description, or short excerpt from the content.
    pub excerpt: Option<String>,

    /// Author metadata.
    pub byline: Option<String>,

    /// Content direction (`ltr` / `rtl`).
    pub dir: Option<String>,

    /// Name of the site.
    pub site_name: Option<String>,

    /// Content language, from `<html lang>`.
    pub lang: Option<String>,

    /// Published time, as found in the document.
    pub published_time: Option<String>,

    /// Published time parsed into a timestamp, when the document's value is
    /// machine-readable.
    pub date: Option<DateTime<Utc>>,
}
