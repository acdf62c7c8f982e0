//! Configuration options for the parser.
//!
//! The `Options` struct controls parsing behavior. All plain fields are
//! public for easy configuration; the pluggable collaborators (serializer,
//! HTML-to-text converter, visibility checker) are trait objects with
//! default implementations.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::dom::{self, NodeRef};

/// Number of top candidates considered when analysing how tight the
/// competition among candidates is.
pub const DEFAULT_N_TOP_CANDIDATES: usize = 5;

/// Number of chars an article must have for the grab loop to accept it.
pub const DEFAULT_CHAR_THRESHOLD: usize = 500;

/// Minimum node text length counted by the readerable pre-flight.
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 140;

/// Cumulated score the readerable pre-flight must reach.
pub const DEFAULT_MIN_SCORE: f64 = 20.0;

/// Serializes the extracted article subtree to the `content` string.
pub trait Serializer {
    /// Produce the HTML string for the article container node.
    fn serialize(&self, article: &NodeRef) -> String;
}

/// Converts the serialized article HTML into plain text.
pub trait HtmlToText {
    /// Produce the plain-text rendition of `html`.
    fn convert(&self, html: &str) -> String;
}

/// Decides whether an element is visible to a reader.
pub trait VisibilityChecker {
    /// `true` when the node would be rendered.
    fn is_visible(&self, node: &NodeRef) -> bool;
}

/// Default serializer: the inner HTML of the article container.
#[derive(Debug, Default)]
pub struct InnerHtmlSerializer;

impl Serializer for InnerHtmlSerializer {
    fn serialize(&self, article: &NodeRef) -> String {
        dom::inner_html(article).to_string()
    }
}

/// Default visibility check: inline style, the `hidden` attribute, and
/// `aria-hidden` (with an exemption for `fallback-image` placeholders).
#[derive(Debug, Default)]
pub struct StyleVisibilityChecker;

impl VisibilityChecker for StyleVisibilityChecker {
    fn is_visible(&self, node: &NodeRef) -> bool {
        if dom::style_property(node, "display").as_deref() == Some("none") {
            return false;
        }
        if dom::style_property(node, "visibility").as_deref() == Some("hidden") {
            return false;
        }
        if dom::has_attribute(node, "hidden") {
            return false;
        }
        if dom::get_attribute(node, "aria-hidden").as_deref() == Some("true")
            && !dom::class_name(node).contains("fallback-image")
        {
            return false;
        }
        true
    }
}

/// Configuration options for parsing.
///
/// # Example
///
/// ```rust
/// use rs_readability::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     char_threshold: 250,
///     keep_classes: true,
///     ..Options::default()
/// };
/// ```
#[derive(Clone)]
pub struct Options {
    /// Maximum number of elements in the document. `0` means unlimited.
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// How many top candidates to track during scoring.
    ///
    /// Default: `5`
    pub n_top_candidates: usize,

    /// Minimum extracted text length (chars) before the grab loop retries
    /// with relaxed flags.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// `class` values kept by the class cleanup. The engine's own `page`
    /// class is always preserved.
    ///
    /// Default: `["page"]`
    pub classes_to_preserve: Vec<String>,

    /// Keep all `class` attributes instead of stripping them.
    ///
    /// Default: `false`
    pub keep_classes: bool,

    /// Skip JSON-LD metadata extraction.
    ///
    /// Default: `false`
    pub disable_json_ld: bool,

    /// Pattern matched against embed attributes to decide which videos
    /// survive cleaning. `None` uses the built-in host list.
    ///
    /// Default: `None`
    pub allowed_video_regex: Option<Regex>,

    /// Serializer for the article subtree.
    pub serializer: Arc<dyn Serializer>,

    /// Optional HTML-to-text converter for the `text_content` field.
    /// `None` uses the raw text of the article subtree.
    ///
    /// Default: `None`
    pub html_to_text: Option<Arc<dyn HtmlToText>>,

    /// Pre-flight: minimum node content length.
    ///
    /// Default: `140`
    pub min_content_length: usize,

    /// Pre-flight: minimum cumulated score.
    ///
    /// Default: `20.0`
    pub min_score: f64,

    /// Visibility predicate used by both the grab loop and the pre-flight.
    pub visibility_checker: Arc<dyn VisibilityChecker>,
}

impl Options {
    /// The effective video whitelist pattern.
    #[must_use]
    pub fn video_pattern(&self) -> &Regex {
        self.allowed_video_regex
            .as_ref()
            .unwrap_or_else(|| &crate::patterns::VIDEOS)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_elems_to_parse: 0,
            n_top_candidates: DEFAULT_N_TOP_CANDIDATES,
            char_threshold: DEFAULT_CHAR_THRESHOLD,
            classes_to_preserve: vec!["page".to_string()],
            keep_classes: false,
            disable_json_ld: false,
            allowed_video_regex: None,
            serializer: Arc::new(InnerHtmlSerializer),
            html_to_text: None,
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            min_score: DEFAULT_MIN_SCORE,
            visibility_checker: Arc::new(StyleVisibilityChecker),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("max_elems_to_parse", &self.max_elems_to_parse)
            .field("n_top_candidates", &self.n_top_candidates)
            .field("char_threshold", &self.char_threshold)
            .field("classes_to_preserve", &self.classes_to_preserve)
            .field("keep_classes", &self.keep_classes)
            .field("disable_json_ld", &self.disable_json_ld)
            .field("allowed_video_regex", &self.allowed_video_regex)
            .field("html_to_text", &self.html_to_text.is_some())
            .field("min_content_length", &self.min_content_length)
            .field("min_score", &self.min_score)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn default_thresholds() {
        let opts = Options::default();

        assert_eq!(opts.max_elems_to_parse, 0);
        assert_eq!(opts.n_top_candidates, 5);
        assert_eq!(opts.char_threshold, 500);
        assert_eq!(opts.classes_to_preserve, vec!["page".to_string()]);
        assert!(!opts.keep_classes);
        assert!(!opts.disable_json_ld);
        assert!(opts.allowed_video_regex.is_none());
        assert!(opts.html_to_text.is_none());
        assert_eq!(opts.min_content_length, 140);
        assert!((opts.min_score - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn video_pattern_falls_back_to_builtin() {
        let opts = Options::default();
        assert!(opts.video_pattern().is_match("//www.youtube.com/embed/x"));

        let opts = Options {
            allowed_video_regex: Some(Regex::new("example\\.com/videos").unwrap()),
            ..Options::default()
        };
        assert!(opts.video_pattern().is_match("https://example.com/videos/1"));
        assert!(!opts.video_pattern().is_match("//www.youtube.com/embed/x"));
    }

    #[test]
    fn default_visibility_checker() {
        let doc = Document::from(concat!(
            r#"<div id="plain">a</div>"#,
            r#"<div id="none" style="display:none">b</div>"#,
            r#"<div id="hid" hidden>c</div>"#,
            r#"<div id="aria" aria-hidden="true">d</div>"#,
            r#"<div id="fallback" aria-hidden="true" class="fallback-image">e</div>"#,
        ));
        let checker = StyleVisibilityChecker;
        let visible = |sel: &str| {
            let node = doc.select(sel).nodes().first().unwrap().clone();
            checker.is_visible(&node)
        };

        assert!(visible("#plain"));
        assert!(!visible("#none"));
        assert!(!visible("#hid"));
        assert!(!visible("#aria"));
        assert!(visible("#fallback"));
    }

    #[test]
    fn options_are_cloneable() {
        let opts = Options::default();
        let cloned = opts.clone();
        assert_eq!(cloned.char_threshold, opts.char_threshold);
    }
}
