//! # rs-readability
//!
//! Reader-view content extractor: given an HTML document and its URL, pulls
//! out the primary article (title, byline, sanitized body, metadata) with
//! navigation, advertisements, comment widgets, and other chrome removed.
//! This is the engine behind "reader mode" views.
//!
//! The pipeline recovers images hidden in `<noscript>` fallbacks, merges
//! JSON-LD and `<meta>` metadata, scores paragraph-like nodes into their
//! ancestors, grafts related siblings onto the winning candidate, cleans the
//! result, and retries with progressively weaker filters when the extracted
//! text comes up short.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability::parse;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>Main content, long enough to matter, sits here.</p>
//! </article></body></html>"#;
//!
//! let article = parse(html, "https://example.com/post")?;
//! println!("Title: {}", article.title);
//! println!("Text: {}", article.text_content);
//! # Ok::<(), rs_readability::Error>(())
//! ```
//!
//! A cheap pre-flight, [`is_probably_readerable`], estimates whether a
//! document contains readable prose without running the pipeline.

mod error;
mod grabber;
mod postprocess;
mod preprocess;
mod readerable;
mod result;

/// DOM operations adapter over the `dom_query` tree.
pub mod dom;

/// Link and text density measurements.
pub mod link_density;

/// Metadata extraction (JSON-LD, meta tags, title heuristics).
pub mod metadata;

/// Configuration options and pluggable collaborators.
pub mod options;

/// Compiled regex patterns for the extraction heuristics.
pub mod patterns;

/// Text helpers: normalization, similarity, entity decoding.
pub mod text;

/// URL resolution utilities.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{HtmlToText, Options, Serializer, VisibilityChecker};
pub use readerable::is_probably_readerable;
pub use result::Article;

use dom::Document;
use grabber::GrabState;
use metadata::Metadata;
use tracing::debug;
use url::Url;

/// The reader-view parser.
///
/// Owns the parsed document for the duration of a single [`parse`](Self::parse)
/// call. The tree is mutated in place; a parser instance is single-use.
pub struct Readability {
    doc: Document,
    options: Options,
    document_uri: String,
}

impl Readability {
    /// Construct a parser from an HTML source string and its document URI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for an empty source string and
    /// [`Error::ParseFailure`] when the parsed document has no `<body>`.
    pub fn new(html_source: &str, document_uri: &str, options: Options) -> Result<Self> {
        if html_source.is_empty() {
            return Err(Error::EmptyInput);
        }

        let doc = Document::from(html_source);
        if doc.select("body").is_empty() {
            return Err(Error::ParseFailure);
        }

        Ok(Self {
            doc,
            options,
            document_uri: document_uri.to_string(),
        })
    }

    /// Run the extraction pipeline.
    ///
    /// Workflow:
    /// 1. Unwrap real images out of `<noscript>` fallbacks.
    /// 2. Extract JSON-LD metadata, then strip scripts and styles.
    /// 3. Normalize the markup (`<br>` runs, `<font>` tags).
    /// 4. Merge metadata and grab the article content.
    /// 5. Absolutize URIs, simplify containers, strip classes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentTooLarge`] when `max_elems_to_parse` is
    /// exceeded and [`Error::ExtractionFailed`] when no candidate subtree
    /// with any text could be found.
    pub fn parse(&mut self) -> Result<Article> {
        // Avoid parsing documents over the configured element budget.
        if self.options.max_elems_to_parse > 0 {
            let num_tags = self.doc.select("*").length();
            if num_tags > self.options.max_elems_to_parse {
                return Err(Error::DocumentTooLarge {
                    found: num_tags,
                    limit: self.options.max_elems_to_parse,
                });
            }
        }

        preprocess::unwrap_noscript_images(&self.doc);

        // JSON-LD has to be read before the scripts are removed.
        let json_ld = if self.options.disable_json_ld {
            None
        } else {
            metadata::extract_json_ld(&self.doc)
        };

        preprocess::remove_scripts(&self.doc);
        preprocess::prep_document(&self.doc);

        let meta = metadata::examine_meta(&self.doc, json_ld);
        let mut state = GrabState {
            article_title: meta.title.clone().unwrap_or_default(),
            ..GrabState::default()
        };

        let article_content = grabber::grab_article(&self.doc, &self.options, &mut state)
            .ok_or(Error::ExtractionFailed)?;
        debug!("article content grabbed");

        let base_uri = self.base_uri();
        postprocess::post_process_content(
            &self.doc,
            &article_content,
            &base_uri,
            &self.document_uri,
            &self.options,
        );

        // Without a metadata excerpt, the first paragraph serves as the
        // article preview.
        let excerpt = meta.excerpt.clone().filter(|e| !e.is_empty()).or_else(|| {
            dom::get_all_nodes_with_tag(&article_content, &["p"])
                .first()
                .map(|p| dom::text_content(p).trim().to_string())
                .filter(|text| !text.is_empty())
        });

        let content = self.options.serializer.serialize(&article_content);
        let text_content = match &self.options.html_to_text {
            Some(converter) => converter.convert(&content),
            None => dom::text_content(&article_content).to_string(),
        };

        Ok(assemble_article(meta, state, content, text_content, excerpt))
    }

    /// The URI all relative references resolve against: the first
    /// `<base href>` when present, the document URI otherwise.
    fn base_uri(&self) -> String {
        let Some(href) = self.doc.select("base[href]").attr("href") else {
            return self.document_uri.clone();
        };

        match Url::parse(&self.document_uri).and_then(|base| base.join(href.trim())) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => self.document_uri.clone(),
        }
    }
}

fn assemble_article(
    meta: Metadata,
    state: GrabState,
    content: String,
    text_content: String,
    excerpt: Option<String>,
) -> Article {
    let length = text_content.chars().count();
    let date = meta
        .published_time
        .as_deref()
        .and_then(metadata::parse_published_date);

    Article {
        title: meta.title.unwrap_or_default(),
        byline: meta.byline.filter(|b| !b.is_empty()).or(state.article_byline),
        dir: state.article_dir,
        lang: state.article_lang,
        content,
        text_content,
        length,
        excerpt,
        site_name: meta.site_name,
        published_time: meta.published_time,
        date,
    }
}

/// Extract the primary article from `html_source` using default options.
///
/// # Errors
///
/// See [`Readability::new`] and [`Readability::parse`].
pub fn parse(html_source: &str, document_uri: &str) -> Result<Article> {
    parse_with_options(html_source, document_uri, Options::default())
}

/// Extract the primary article from `html_source` with custom options.
///
/// # Errors
///
/// See [`Readability::new`] and [`Readability::parse`].
pub fn parse_with_options(
    html_source: &str,
    document_uri: &str,
    options: Options,
) -> Result<Article> {
    Readability::new(html_source, document_uri, options)?.parse()
}
