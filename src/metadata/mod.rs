//! Metadata extraction.
//!
//! Two sources feed the final metadata record: Schema.org JSON-LD scripts and
//! `<meta>` tags, merged in that priority order. When neither yields a title,
//! the document-title heuristic supplies one.

mod json_ld;
mod meta_tags;
mod title;

pub use json_ld::extract_json_ld;
pub use meta_tags::examine_meta;
pub use title::get_article_title;

use chrono::{DateTime, Utc};

use crate::text;

/// Metadata extracted from an HTML document. All fields are optional; a
/// missing field is simply absent from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Article title.
    pub title: Option<String>,
    /// Author metadata.
    pub byline: Option<String>,
    /// Article description or short excerpt.
    pub excerpt: Option<String>,
    /// Name of the site.
    pub site_name: Option<String>,
    /// Published time, as found in the document.
    pub published_time: Option<String>,
}

impl Metadata {
    /// Unescape HTML entities in every field. Many sites ship their meta
    /// values pre-escaped.
    #[must_use]
    pub fn unescaped(self) -> Self {
        let decode = |v: Option<String>| v.map(|s| text::unescape_html_entities(&s));
        Self {
            title: decode(self.title),
            byline: decode(self.byline),
            excerpt: decode(self.excerpt),
            site_name: decode(self.site_name),
            published_time: decode(self.published_time),
        }
    }
}

/// Best-effort parse of a published-time string. Unparseable values are
/// simply dropped; the raw string is always kept alongside.
#[must_use]
pub fn parse_published_date(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}
