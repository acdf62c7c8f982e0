//! Pre-flight readability check.
//!
//! Decides whether a document is worth running through the full pipeline,
//! without parsing more than necessary: visible paragraph-like nodes
//! accumulate a score based on their text length until a threshold is
//! reached.

use crate::dom::{self, Document, NodeRef};
use crate::options::Options;
use crate::patterns;

/// Decide whether the document probably contains readable prose.
///
/// Considers every `<p>`, `<pre>` and `<article>`, plus any `<div>` with a
/// direct `<br>` child (some articles are just sentences separated by
/// breaks). Each visible node with at least `min_content_length` chars of
/// text adds `sqrt(length - min_content_length)` to a running score; the
/// document passes as soon as the score exceeds `min_score`.
#[must_use]
pub fn is_probably_readerable(html_source: &str, options: &Options) -> bool {
    let doc = Document::from(html_source);

    let mut nodes: Vec<NodeRef> = doc.select("p, pre, article").nodes().to_vec();
    for br in doc.select("div > br").nodes() {
        if let Some(parent) = br.parent() {
            nodes.push(parent);
        }
    }

    let mut score = 0.0;
    for node in nodes {
        if !options.visibility_checker.is_visible(&node) {
            continue;
        }

        let match_string = format!("{} {}", dom::class_name(&node), dom::id(&node));
        if patterns::UNLIKELY_CANDIDATES.is_match(&match_string)
            && !patterns::OK_MAYBE_ITS_A_CANDIDATE.is_match(&match_string)
        {
            continue;
        }

        // List items carry their own short paragraphs; skip them.
        if dom::has_tag(&node, "p") && dom::has_ancestor_tag(&node, "li", -1, None) {
            continue;
        }

        let text_length = dom::text_content(&node).trim().chars().count();
        if text_length < options.min_content_length {
            continue;
        }

        score += ((text_length - options.min_content_length) as f64).sqrt();
        if score > options.min_score {
            return true;
        }
    }

    false
}
