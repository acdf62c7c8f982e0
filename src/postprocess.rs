//! Post-processing of the extracted article.
//!
//! The reader view cannot resolve relative URIs, so every link and media
//! reference gets absolutized. Trivially nested containers left over from the
//! extraction are collapsed, and class attributes are stripped down to the
//! preserved set.

use crate::dom::{self, Document, NodeRef};
use crate::options::Options;
use crate::patterns;
use crate::url_utils;

/// Run any post-process modifications to article content as necessary.
pub fn post_process_content(
    doc: &Document,
    article_content: &NodeRef,
    base_uri: &str,
    document_uri: &str,
    options: &Options,
) {
    fix_relative_uris(doc, article_content, base_uri, document_uri);
    simplify_nested_elements(article_content);

    if !options.keep_classes {
        clean_classes(article_content, options);
    }
}

/// Convert each `<a>` and media URI in the subtree to an absolute URI.
/// `javascript:` links are replaced by their content, since scripts are gone
/// from the page.
fn fix_relative_uris(doc: &Document, article_content: &NodeRef, base_uri: &str, document_uri: &str) {
    let resolve = |uri: &str| url_utils::to_absolute_uri(uri, base_uri, document_uri);

    for link in dom::get_all_nodes_with_tag(article_content, &["a"]) {
        let href = dom::get_attribute(&link, "href").unwrap_or_default();
        if href.is_empty() {
            continue;
        }

        if href.starts_with("javascript:") {
            let children = dom::child_nodes(&link);
            if children.len() == 1 && children[0].is_text() {
                // A plain text link becomes a text node.
                let text = dom::create_text_node(doc, &dom::text_content(&link));
                dom::replace_node(&link, &text);
            } else {
                // Multiple children are all preserved inside a <span>.
                let container = dom::create_element(doc, "span");
                while let Some(child) = link.first_child() {
                    dom::append_child(&container, &child);
                }
                dom::replace_node(&link, &container);
            }
        } else if href.contains(",%20") {
            // Multi-URL hrefs: resolve every part.
            let hrefs: Vec<String> = href.split(",%20").map(|part| resolve(part)).collect();
            dom::set_attribute(&link, "href", &hrefs.join(",%20"));
        } else {
            dom::set_attribute(&link, "href", &resolve(&href));
        }
    }

    for media in dom::get_all_nodes_with_tag(
        article_content,
        &["img", "picture", "figure", "video", "audio", "source"],
    ) {
        if let Some(src) = dom::get_attribute(&media, "src").filter(|s| !s.is_empty()) {
            dom::set_attribute(&media, "src", &resolve(&src));
        }
        if let Some(poster) = dom::get_attribute(&media, "poster").filter(|s| !s.is_empty()) {
            dom::set_attribute(&media, "poster", &resolve(&poster));
        }
        if let Some(srcset) = dom::get_attribute(&media, "srcset").filter(|s| !s.is_empty()) {
            let mut new_srcset: Vec<String> = Vec::new();
            for caps in patterns::SRCSET_URL.captures_iter(&srcset) {
                let url = resolve(&caps[1]);
                let descriptor = caps.get(2).map_or("", |m| m.as_str());
                let separator = caps.get(3).map_or("", |m| m.as_str());
                new_srcset.push(format!("{url}{descriptor}{separator}"));
            }
            let joined = if srcset.contains(", ") {
                new_srcset.join(" ")
            } else {
                new_srcset.concat()
            };
            dom::set_attribute(&media, "srcset", &joined);
        }
    }
}

/// Collapse `DIV`/`SECTION` wrappers that hold nothing, or exactly one other
/// `DIV`/`SECTION`, hoisting the child and merging the parent's attributes
/// onto it. Containers created by the engine are skipped.
fn simplify_nested_elements(article_content: &NodeRef) {
    let mut node_opt = Some(article_content.clone());
    while let Some(node) = node_opt {
        let is_container = dom::tag_name(&node)
            .is_some_and(|tag| tag == "div" || tag == "section");
        if node.parent().is_some()
            && is_container
            && !dom::id(&node).starts_with("readability")
        {
            if dom::is_element_without_content(&node) {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }
            if dom::has_single_tag_inside_element(&node, "div")
                || dom::has_single_tag_inside_element(&node, "section")
            {
                let child = dom::element_children(&node)[0].clone();
                for (name, value) in dom::attributes(&node) {
                    dom::set_attribute(&child, &name, &value);
                }
                dom::replace_node(&node, &child);
                node_opt = Some(child);
                continue;
            }
        }
        node_opt = dom::get_next_node(&node, false);
    }
}

/// Remove the `class` attribute from every element, except for the values
/// the caller asked to preserve. The engine's own `page` class always stays.
fn clean_classes(node: &NodeRef, options: &Options) {
    let class_name = dom::class_name(node);
    if !class_name.is_empty() {
        let kept: Vec<&str> = patterns::MULTIPLE_WHITESPACES
            .split(&class_name)
            .filter(|class| {
                *class == "page" || options.classes_to_preserve.iter().any(|keep| keep == class)
            })
            .collect();

        if kept.is_empty() {
            dom::remove_attribute(node, "class");
        } else {
            dom::set_attribute(node, "class", &kept.join(" "));
        }
    } else if dom::has_attribute(node, "class") {
        dom::remove_attribute(node, "class");
    }

    for child in dom::element_children(node) {
        clean_classes(&child, options);
    }
}
