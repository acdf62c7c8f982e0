//! JSON-LD metadata parsing.
//!
//! Extracts article metadata from Schema.org JSON-LD embedded in the
//! document. Only `Article` and its subtypes are considered; a `@graph` array
//! is searched for the first article-typed object.

use serde_json::Value;
use tracing::warn;

use super::{title, Metadata};
use crate::dom::{self, Document};
use crate::patterns;
use crate::text;

/// Try to extract metadata from the document's JSON-LD scripts.
///
/// The first script that parses into a schema.org article wins. Malformed
/// payloads are skipped.
#[must_use]
pub fn extract_json_ld(doc: &Document) -> Option<Metadata> {
    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        // Strip CDATA markers if present.
        let content = patterns::CDATA.replace_all(&dom::text_content(script), "").to_string();

        let parsed: Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(err) => {
                warn!(%err, "cannot decode JSON-LD payload, skipping");
                continue;
            }
        };

        let context_matches = parsed
            .get("@context")
            .and_then(Value::as_str)
            .is_some_and(|ctx| patterns::SCHEMA_URL.is_match(ctx));
        if !context_matches {
            continue;
        }

        // No @type on the root object: look for the first article-typed
        // entry of a @graph array instead.
        let article = if object_is_article(&parsed) {
            &parsed
        } else if let Some(graph) = parsed.get("@graph").and_then(Value::as_array) {
            match graph.iter().find(|el| object_is_article(el)) {
                Some(el) => el,
                None => continue,
            }
        } else {
            continue;
        };

        return Some(extract_from_article(doc, article));
    }
    None
}

fn object_is_article(value: &Value) -> bool {
    value
        .get("@type")
        .and_then(Value::as_str)
        .is_some_and(|t| patterns::JSONLD_ARTICLE_TYPES.is_match(t))
}

fn extract_from_article(doc: &Document, article: &Value) -> Metadata {
    let mut meta = Metadata::default();

    let name = article.get("name").and_then(Value::as_str);
    let headline = article.get("headline").and_then(Value::as_str);

    meta.title = match (name, headline) {
        (Some(name), Some(headline)) if name != headline => {
            // Both are present but disagree. Some sites put their own name
            // into "name" and the article title into "headline"; prefer
            // whichever closely matches the HTML title, defaulting to "name".
            let html_title = title::get_article_title(doc);
            let name_matches = text::text_similarity(name, &html_title) > 0.75;
            let headline_matches = text::text_similarity(headline, &html_title) > 0.75;

            if headline_matches && !name_matches {
                Some(headline.to_string())
            } else {
                Some(name.to_string())
            }
        }
        (Some(name), _) => Some(name.trim().to_string()),
        (None, Some(headline)) => Some(headline.trim().to_string()),
        (None, None) => None,
    };

    meta.byline = extract_byline(article.get("author"));

    meta.excerpt = article
        .get("description")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string());

    meta.site_name = article
        .get("publisher")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string());

    meta.published_time = article
        .get("datePublished")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string());

    meta
}

/// `author` is either an object with a `name`, or an array of such objects
/// whose names get joined.
fn extract_byline(author: Option<&Value>) -> Option<String> {
    match author? {
        Value::Object(obj) => obj
            .get("name")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string()),
        Value::Array(authors) => {
            let names: Vec<String> = authors
                .iter()
                .filter_map(|a| a.get("name").and_then(Value::as_str))
                .map(|s| s.trim().to_string())
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(", "))
            }
        }
        _ => None,
    }
}
