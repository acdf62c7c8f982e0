//! DOM operations adapter.
//!
//! Thin layer over the `dom_query` tree that exposes the operations the
//! extraction pipeline relies on: attribute access, element-only traversal,
//! the depth-first walk used by the pruning passes, and the structural
//! predicates (phrasing content, whitespace, empty containers).
//!
//! The pipeline is node-centric, so most functions here take a
//! [`NodeRef`] rather than a [`Selection`]; `Selection::from(node)` is used
//! internally where `dom_query` only offers an operation at selection level.

pub use dom_query::{Document, NodeId, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::patterns;
use crate::text;

/// Block-level tags that stop a `<div>` from being treated as a paragraph.
const DIV_TO_P_ELEMS: &[&str] = &[
    "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul",
];

/// Phrasing content: inline-level tags that can legally live inside a `<p>`.
///
/// A few tags that technically qualify (canvas, iframe, svg, video) are left
/// out because wrapping them in paragraphs tends to get them cleaned away.
const PHRASING_ELEMS: &[&str] = &[
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data",
    "datalist", "dfn", "em", "embed", "i", "img", "input", "kbd", "label",
    "mark", "math", "meter", "noscript", "object", "output", "progress", "q",
    "ruby", "samp", "script", "select", "small", "span", "strong", "sub",
    "sup", "textarea", "time", "var", "wbr",
];

// === Attribute Operations ===

/// Element tag name (lowercase), or `None` for non-element nodes.
#[inline]
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_string())
}

/// `true` when the node is an element with the given (lowercase) tag name.
#[inline]
#[must_use]
pub fn has_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().as_deref() == Some(tag)
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// `class` attribute, defaulting to the empty string.
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    get_attribute(node, "class").unwrap_or_default()
}

/// `id` attribute, defaulting to the empty string.
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> String {
    get_attribute(node, "id").unwrap_or_default()
}

/// Set an attribute value.
#[inline]
pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    Selection::from(node.clone()).set_attr(name, value);
}

/// Check if an attribute exists.
#[inline]
#[must_use]
pub fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.has_attr(name)
}

/// Remove an attribute.
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    Selection::from(node.clone()).remove_attr(name);
}

/// All attributes as name/value pairs, in document order.
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Look up a property of the inline `style` attribute (case-insensitive).
#[must_use]
pub fn style_property(node: &NodeRef, property: &str) -> Option<String> {
    let style = get_attribute(node, "style")?;
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let name = parts.next()?.trim();
        if name.eq_ignore_ascii_case(property) {
            return parts.next().map(|v| v.trim().to_string());
        }
    }
    None
}

// === Text and HTML Content ===

/// Concatenated text of the node and its descendants.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Trimmed text content, optionally with whitespace runs collapsed.
#[must_use]
pub fn inner_text(node: &NodeRef, normalize_spaces: bool) -> String {
    let tendril = node.text();
    let trimmed = tendril.trim();
    if normalize_spaces {
        text::normalize_spaces(trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Serialized inner HTML.
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> StrTendril {
    node.inner_html()
}

/// Serialized outer HTML.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> StrTendril {
    node.html()
}

/// Re-parse `html` and replace the node's children with the result.
#[inline]
pub fn set_inner_html(node: &NodeRef, html: &str) {
    Selection::from(node.clone()).set_html(html);
}

// === Tree Navigation ===

/// Element children only, in order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// All child nodes (elements, text, comments), in order.
#[inline]
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
}

/// First child element, skipping text and comment nodes.
#[must_use]
pub fn first_element_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.children().into_iter().find(NodeRef::is_element)
}

/// Ancestor chain, nearest first. `max_depth` 0 means unbounded.
#[must_use]
pub fn node_ancestors<'a>(node: &NodeRef<'a>, max_depth: usize) -> Vec<NodeRef<'a>> {
    let mut ancestors = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        current = parent.parent();
        ancestors.push(parent);
        if max_depth > 0 && ancestors.len() == max_depth {
            break;
        }
    }
    ancestors
}

/// Descendant elements matching any of `tags`, in document order.
#[must_use]
pub fn get_all_nodes_with_tag<'a>(node: &NodeRef<'a>, tags: &[&str]) -> Vec<NodeRef<'a>> {
    let selector = tags.join(", ");
    Selection::from(node.clone()).select(&selector).nodes().to_vec()
}

/// Finds the next node, starting from `node`, ignoring whitespace in between.
/// If the given node is already an element, it is returned as-is.
#[must_use]
pub fn next_significant_node<'a>(node: Option<NodeRef<'a>>) -> Option<NodeRef<'a>> {
    let mut next = node;
    while let Some(n) = next {
        if n.is_element() || !patterns::WHITESPACE.is_match(&n.text()) {
            return Some(n);
        }
        next = n.next_sibling();
    }
    None
}

/// Depth-first traversal over elements. Pass `ignore_self_and_kids` when the
/// current node (and its subtree) is being removed and the walk should step
/// over it.
#[must_use]
pub fn get_next_node<'a>(node: &NodeRef<'a>, ignore_self_and_kids: bool) -> Option<NodeRef<'a>> {
    if !ignore_self_and_kids {
        if let Some(first) = first_element_child(node) {
            return Some(first);
        }
    }

    if let Some(sibling) = node.next_element_sibling() {
        return Some(sibling);
    }

    // Walk up until an ancestor has a next sibling. The parents themselves
    // were already visited on the way down.
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(sibling) = parent.next_element_sibling() {
            return Some(sibling);
        }
        current = parent.parent();
    }
    None
}

/// Remove the node and return the next node of the depth-first walk.
#[must_use]
pub fn remove_and_get_next<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let next = get_next_node(node, true);
    node.remove_from_parent();
    next
}

// === Structural Predicates ===

/// Whether the node is a text node or an inline element whose content is
/// itself phrasing (anchors and ins/del are transparent).
#[must_use]
pub fn is_phrasing_content(node: &NodeRef) -> bool {
    if node.is_text() {
        return true;
    }
    let Some(tag) = node.node_name() else {
        return false;
    };
    if PHRASING_ELEMS.contains(&tag.as_ref()) {
        return true;
    }
    matches!(tag.as_ref(), "a" | "del" | "ins")
        && node.children().iter().all(is_phrasing_content)
}

/// Whitespace-only text node, or a `<br>`.
#[must_use]
pub fn is_whitespace(node: &NodeRef) -> bool {
    (node.is_text() && node.text().trim().is_empty()) || has_tag(node, "br")
}

/// Whether any child subtree contains a block-level element.
#[must_use]
pub fn has_child_block_element(node: &NodeRef) -> bool {
    node.children().iter().any(|child| {
        child
            .node_name()
            .is_some_and(|tag| DIV_TO_P_ELEMS.contains(&tag.as_ref()))
            || has_child_block_element(child)
    })
}

/// Exactly one element child with the given tag, and no text with content.
#[must_use]
pub fn has_single_tag_inside_element(node: &NodeRef, tag: &str) -> bool {
    let children = element_children(node);
    if children.len() != 1 || !has_tag(&children[0], tag) {
        return false;
    }

    !node
        .children()
        .iter()
        .any(|child| child.is_text() && patterns::HAS_CONTENT.is_match(&child.text()))
}

/// Element with no text and no children besides `<br>`/`<hr>`.
#[must_use]
pub fn is_element_without_content(node: &NodeRef) -> bool {
    if !node.is_element() || !node.text().trim().is_empty() {
        return false;
    }
    let children = element_children(node);
    let breaks = get_all_nodes_with_tag(node, &["br", "hr"]);
    children.is_empty() || children.len() == breaks.len()
}

/// Whether the node is an `<img>`, or wraps exactly one image through a
/// single-child chain with no stray text.
#[must_use]
pub fn is_single_image(node: &NodeRef) -> bool {
    if has_tag(node, "img") {
        return true;
    }
    let children = element_children(node);
    if children.len() != 1 || !node.text().trim().is_empty() {
        return false;
    }
    is_single_image(&children[0])
}

/// Whether one of the node's ancestors has the given tag name, within
/// `max_depth` levels (negative or zero for unbounded), optionally filtered.
#[must_use]
pub fn has_ancestor_tag(
    node: &NodeRef,
    tag: &str,
    max_depth: i32,
    filter: Option<&dyn Fn(&NodeRef) -> bool>,
) -> bool {
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        if max_depth > 0 && depth > max_depth {
            return false;
        }
        if has_tag(&parent, tag) && filter.map_or(true, |f| f(&parent)) {
            return true;
        }
        current = parent.parent();
        depth += 1;
    }
    false
}

// === Mutation ===

/// Change an element's tag name in place.
#[inline]
pub fn set_node_tag(node: &NodeRef, tag: &str) {
    Selection::from(node.clone()).rename(tag);
}

/// Create a detached element in the document's arena.
#[inline]
#[must_use]
pub fn create_element<'a>(doc: &'a Document, tag: &str) -> NodeRef<'a> {
    doc.tree.new_element(tag)
}

/// Create a detached text node in the document's arena.
#[inline]
#[must_use]
pub fn create_text_node<'a>(doc: &'a Document, text: &str) -> NodeRef<'a> {
    doc.tree.new_text(text)
}

/// Move `child` to the end of `parent`'s children, detaching it first if it
/// already has a parent.
#[inline]
pub fn append_child(parent: &NodeRef, child: &NodeRef) {
    parent.append_child(child);
}

/// Replace `old` with `new` at the same position in the tree.
#[inline]
pub fn replace_node(old: &NodeRef, new: &NodeRef) {
    old.replace_with(new);
}

/// Detach the node (and its subtree) from the tree.
#[inline]
pub fn remove_node(node: &NodeRef) {
    node.remove_from_parent();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_is_lowercase() {
        let doc = Document::from("<DIV id='x'>content</DIV>");
        let node = doc.select("#x").nodes().first().unwrap().clone();
        assert_eq!(tag_name(&node).as_deref(), Some("div"));
        assert!(has_tag(&node, "div"));
    }

    #[test]
    fn style_property_lookup() {
        let doc = Document::from(r#"<div id="x" style="display : none; color:red">hi</div>"#);
        let node = doc.select("#x").nodes().first().unwrap().clone();
        assert_eq!(style_property(&node, "display").as_deref(), Some("none"));
        assert_eq!(style_property(&node, "color").as_deref(), Some("red"));
        assert_eq!(style_property(&node, "visibility"), None);
    }

    #[test]
    fn element_children_skips_text() {
        let doc = Document::from("<div id='x'>text<p>a</p>more<span>b</span></div>");
        let node = doc.select("#x").nodes().first().unwrap().clone();
        let children = element_children(&node);
        assert_eq!(children.len(), 2);
        assert!(has_tag(&children[0], "p"));
        assert_eq!(child_nodes(&node).len(), 4);
    }

    #[test]
    fn depth_first_walk_covers_all_elements() {
        let doc = Document::from("<div id='a'><p id='b'><span id='c'></span></p><p id='d'></p></div>");
        let mut node = doc.select("#a").nodes().first().cloned();
        let mut seen = Vec::new();
        while let Some(n) = node {
            seen.push(id(&n));
            node = get_next_node(&n, false);
        }
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn walk_skips_removed_subtree() {
        let doc = Document::from("<div><p id='b'><span id='c'></span></p><p id='d'></p></div>");
        let b = doc.select("#b").nodes().first().unwrap().clone();
        let next = remove_and_get_next(&b).unwrap();
        assert_eq!(id(&next), "d");
        assert!(doc.select("#c").is_empty());
    }

    #[test]
    fn phrasing_content_classification() {
        let doc = Document::from("<div><span id='s'>x</span><a id='a'><b>y</b></a><p id='p'>z</p><a id='block'><div>w</div></a></div>");
        let span = doc.select("#s").nodes().first().unwrap().clone();
        let a = doc.select("#a").nodes().first().unwrap().clone();
        let p = doc.select("#p").nodes().first().unwrap().clone();
        let block_a = doc.select("#block").nodes().first().unwrap().clone();
        assert!(is_phrasing_content(&span));
        assert!(is_phrasing_content(&a));
        assert!(!is_phrasing_content(&p));
        assert!(!is_phrasing_content(&block_a));
    }

    #[test]
    fn single_tag_inside_element() {
        let doc = Document::from("<div id='a'><p>only</p></div><div id='b'>text<p>x</p></div>");
        let a = doc.select("#a").nodes().first().unwrap().clone();
        let b = doc.select("#b").nodes().first().unwrap().clone();
        assert!(has_single_tag_inside_element(&a, "p"));
        assert!(!has_single_tag_inside_element(&a, "div"));
        assert!(!has_single_tag_inside_element(&b, "p"));
    }

    #[test]
    fn empty_container_detection() {
        let doc = Document::from("<div id='a'>  <br><hr> </div><div id='b'><p>text</p></div>");
        let a = doc.select("#a").nodes().first().unwrap().clone();
        let b = doc.select("#b").nodes().first().unwrap().clone();
        assert!(is_element_without_content(&a));
        assert!(!is_element_without_content(&b));
    }

    #[test]
    fn single_image_chains() {
        let doc = Document::from(
            "<div id='a'><span><img src='x.jpg'></span></div><div id='b'><img src='x.jpg'>caption</div>",
        );
        let a = doc.select("#a").nodes().first().unwrap().clone();
        let b = doc.select("#b").nodes().first().unwrap().clone();
        assert!(is_single_image(&a));
        assert!(!is_single_image(&b));
    }

    #[test]
    fn ancestor_tag_depth_limit() {
        let doc = Document::from("<table><tbody><tr><td><span id='x'>v</span></td></tr></tbody></table>");
        let x = doc.select("#x").nodes().first().unwrap().clone();
        assert!(has_ancestor_tag(&x, "table", 0, None));
        assert!(has_ancestor_tag(&x, "td", 1, None));
        assert!(!has_ancestor_tag(&x, "table", 1, None));
    }

    #[test]
    fn rename_keeps_attributes() {
        let doc = Document::from("<font id='x' color='red'>hi</font>");
        let node = doc.select("#x").nodes().first().unwrap().clone();
        set_node_tag(&node, "span");
        assert!(doc.select("span#x").exists());
        assert!(doc.select("font").is_empty());
    }
}
