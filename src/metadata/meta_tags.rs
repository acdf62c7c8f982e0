//! `<meta>` tag extraction.
//!
//! Collects the recognized `name`/`property` keys into a value map, then
//! fills each metadata field from the highest-priority key present. JSON-LD
//! values always win over meta tags.

use std::collections::HashMap;

use super::{title, Metadata};
use crate::dom::{self, Document};
use crate::patterns;

/// Extract metadata from the document's `<meta>` elements, merging on top of
/// whatever JSON-LD already produced. The title falls back to the
/// document-title heuristic when no source provides one.
#[must_use]
pub fn examine_meta(doc: &Document, json_ld: Option<Metadata>) -> Metadata {
    let mut values: HashMap<String, String> = HashMap::new();

    for element in doc.select("meta").nodes() {
        let element_name = dom::get_attribute(element, "name").unwrap_or_default();
        let element_property = dom::get_attribute(element, "property").unwrap_or_default();
        let content = dom::get_attribute(element, "content").unwrap_or_default();
        if content.is_empty() {
            continue;
        }

        let mut matched_property = false;
        if !element_property.is_empty() {
            // property is a space-separated list of values; take the first
            // recognized one.
            if let Some(m) = patterns::PROPERTY_PATTERN.find(&element_property) {
                matched_property = true;
                let name = patterns::SINGLE_WHITESPACE
                    .replace_all(&m.as_str().to_lowercase(), "")
                    .to_string();
                values.insert(name, content.trim().to_string());
            }
        }

        if !matched_property
            && !element_name.is_empty()
            && patterns::NAME_PATTERN.is_match(&element_name)
        {
            // Lowercase, remove whitespace, and convert dots to colons so
            // `dc.title` and `dc:title` land on the same key.
            let name = patterns::SINGLE_WHITESPACE
                .replace_all(&element_name.to_lowercase(), "")
                .to_string();
            let name = patterns::SINGLE_DOT.replace_all(&name, ":").to_string();
            values.insert(name, content.trim().to_string());
        }
    }

    let json_ld = json_ld.unwrap_or_default();
    let pick = |own: Option<String>, keys: &[&str]| -> Option<String> {
        own.filter(|s| !s.is_empty()).or_else(|| {
            keys.iter()
                .find_map(|key| values.get(*key).filter(|v| !v.is_empty()).cloned())
        })
    };

    let mut meta = Metadata {
        title: pick(
            json_ld.title,
            &[
                "dc:title",
                "dcterm:title",
                "og:title",
                "weibo:article:title",
                "weibo:webpage:title",
                "title",
                "twitter:title",
            ],
        ),
        byline: pick(json_ld.byline, &["dc:creator", "dcterm:creator", "author"]),
        excerpt: pick(
            json_ld.excerpt,
            &[
                "dc:description",
                "dcterm:description",
                "og:description",
                "weibo:article:description",
                "weibo:webpage:description",
                "description",
                "twitter:description",
            ],
        ),
        site_name: pick(json_ld.site_name, &["og:site_name"]),
        published_time: pick(json_ld.published_time, &["article:published_time"]),
    };

    if meta.title.as_deref().unwrap_or_default().is_empty() {
        let fallback = title::get_article_title(doc);
        meta.title = if fallback.is_empty() { None } else { Some(fallback) };
    }

    meta.unescaped()
}
