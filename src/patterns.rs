//! Compiled regex patterns for the extraction heuristics.
//!
//! All patterns are compiled once at startup using `LazyLock` so they are
//! never rebuilt inside the per-node loops. Patterns are organized by their
//! purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Classification Patterns
// =============================================================================

/// Matches class/id combinations that almost always mark chrome, not content.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Whitelist that can rescue a node matched by [`UNLIKELY_CANDIDATES`].
pub static OK_MAYBE_ITS_A_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|shadow").expect("OK_MAYBE regex")
});

/// Class/id names that indicate content; contributes +25 to the class weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story")
        .expect("POSITIVE regex")
});

/// Class/id names that indicate chrome; contributes -25 to the class weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footer|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE regex")
});

/// Matches class/id names of byline containers.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Matches class/id names of share widgets (word-boundary or underscore delimited).
pub static SHARE_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b|_)(share|sharedaddy)(\b|_)").expect("SHARE_ELEMENTS regex")
});

/// Embeds whose attributes match this pattern are videos people want to keep.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

// =============================================================================
// Text Measurement Patterns
// =============================================================================

/// Runs of whitespace, for space normalization.
pub static NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("NORMALIZE regex"));

/// Any whitespace run; used for word counting and class-list splitting.
pub static MULTIPLE_WHITESPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("MULTIPLE_WHITESPACES regex"));

/// A single whitespace character.
pub static SINGLE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("SINGLE_WHITESPACE regex"));

/// A literal dot, for meta-key canonicalization (`dc.title` -> `dc:title`).
pub static SINGLE_DOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.").expect("SINGLE_DOT regex"));

/// Entirely-whitespace text.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").expect("WHITESPACE regex"));

/// Text that ends in a non-whitespace character.
pub static HAS_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S$").expect("HAS_CONTENT regex"));

/// Word splitter for the similarity metric.
pub static TOKENIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("TOKENIZE regex"));

/// Comma variants across scripts (Latin, Arabic, CJK, and friends).
pub static COMMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{002C}|\u{060C}|\u{FE50}|\u{FE10}|\u{FE11}|\u{2E41}|\u{2E34}|\u{2E32}|\u{FF0C}")
        .expect("COMMAS regex")
});

/// A sentence-terminating dot followed by a space or end of text.
pub static DOT_SPACE_OR_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("DOT_SPACE_OR_END regex"));

// =============================================================================
// Title Heuristic Patterns
// =============================================================================

/// A spaced hierarchical separator anywhere in the title.
pub static TITLE_FINAL_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [\|\-\\/>»] ").expect("TITLE_FINAL_PART regex"));

/// The strictly hierarchical separators (`\`, `/`, `>`, `»`).
pub static TITLE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [\\/>»] ").expect("TITLE_SEPARATORS regex"));

/// Everything before the last separator (capture 1).
pub static OTHER_TITLE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.*)[\|\-\\/>»] .*").expect("OTHER_TITLE_SEPARATORS regex"));

/// Everything after the first separator (capture 1).
pub static TITLE_FIRST_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^\|\-\\/>»]*[\|\-\\/>»](.*)").expect("TITLE_FIRST_PART regex"));

/// Any run of separator characters, for the word-count revert check.
pub static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\|\-\\/>»]+").expect("SEPARATORS regex"));

// =============================================================================
// Metadata Patterns
// =============================================================================

/// CDATA wrapper around JSON-LD payloads.
pub static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<!\[CDATA\[|\]\]>\s*$").expect("CDATA regex"));

/// The schema.org context URL.
pub static SCHEMA_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://schema\.org/?$").expect("SCHEMA_URL regex"));

/// Schema.org article types accepted for JSON-LD metadata.
pub static JSONLD_ARTICLE_TYPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|AskPublicNewsArticle|BackgroundNewsArticle|OpinionNewsArticle|ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|BlogPosting|LiveBlogPosting|DiscussionForumPosting|TechArticle|APIReference$",
    )
    .expect("JSONLD_ARTICLE_TYPES regex")
});

/// `<meta property=...>` keys we understand (space-separated list of values).
pub static PROPERTY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(article|dc|dcterm|og|twitter)\s*:\s*(author|creator|description|published_time|title|site_name)\s*")
        .expect("PROPERTY_PATTERN regex")
});

/// `<meta name=...>` keys we understand (a single value).
pub static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(dc|dcterm|og|twitter|weibo:(article|webpage))\s*[\.:]\s*)?(author|creator|description|title|site_name)\s*$",
    )
    .expect("NAME_PATTERN regex")
});

/// Named entity references handled by the fallback decoder.
pub static ENTITY_REFERENCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(quot|amp|apos|lt|gt);").expect("ENTITY_REFERENCES regex"));

/// Numeric character references, hex or decimal.
pub static HTML_CHAR_CODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&#(?:x([0-9a-fA-F]{1,4})|([0-9]{1,5}));").expect("HTML_CHAR_CODES regex")
});

// =============================================================================
// Media Patterns
// =============================================================================

/// A fragment-only URL.
pub static HASH_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#.+").expect("HASH_URL regex"));

/// One srcset entry: URL, optional density/width descriptor, trailing comma.
pub static SRCSET_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)(\s+[\d.]+[xw])?(\s*(?:,|$))").expect("SRCSET_URL regex"));

/// A base64 data URI prefix, capturing the MIME type.
pub static B64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*([^\s;,]+)\s*;\s*base64\s*,").expect("B64_DATA_URL regex")
});

/// Position of the `base64` marker inside a data URI.
pub static BASE64_STARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"base64\s*").expect("BASE64_STARTS regex"));

/// An image file extension anywhere in an attribute value.
pub static IMG_EXTENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(jpg|jpeg|png|webp)").expect("IMG_EXTENSIONS regex"));

/// An image URL followed by a srcset-style descriptor number.
pub static IMG_EXT_WITH_SPACES_AND_NUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(jpg|jpeg|png|webp)\s+\d").expect("IMG_EXT_WITH_SPACES_AND_NUM regex"));

/// An attribute value that is exactly one image URL.
pub static IMG_EXT_AMONG_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("IMG_EXT_AMONG_TEXT regex")
});
