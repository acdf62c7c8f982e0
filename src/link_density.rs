//! Link density testing.
//!
//! The share of a node's text that sits inside anchors. Good content has a
//! small link density; navigation and "related articles" boxes are mostly
//! links. Fragment-only links weigh less since tables of contents point into
//! the article itself.

use crate::dom::{self, NodeRef};
use crate::patterns;

/// Amount of text inside `<a>` descendants divided by the total text of the
/// node. Links to `#fragments` are weighted at 0.3.
#[must_use]
pub fn get_link_density(node: &NodeRef) -> f64 {
    let text_length = dom::inner_text(node, true).chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let mut link_length = 0.0;
    for link in dom::get_all_nodes_with_tag(node, &["a"]) {
        let href = dom::get_attribute(&link, "href").unwrap_or_default();
        let coefficient = if !href.is_empty() && patterns::HASH_URL.is_match(&href) {
            0.3
        } else {
            1.0
        };
        link_length += dom::inner_text(&link, true).chars().count() as f64 * coefficient;
    }

    link_length / text_length as f64
}

/// Share of the node's text that lives inside descendants with the given
/// tags. Used with the heading tags to spot heading-only boxes.
#[must_use]
pub fn get_text_density(node: &NodeRef, tags: &[&str]) -> f64 {
    let text_length = dom::inner_text(node, true).len();
    if text_length == 0 {
        return 0.0;
    }

    let children_length: usize = dom::get_all_nodes_with_tag(node, tags)
        .iter()
        .map(|child| dom::inner_text(child, true).len())
        .sum();

    children_length as f64 / text_length as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn nav_menu_has_high_density() {
        let doc = Document::from(concat!(
            r#"<div id="nav"><a href="/home">Home</a> <a href="/about">About</a> "#,
            r#"<a href="/contact">Contact</a></div>"#,
        ));
        let nav = doc.select("#nav").nodes().first().unwrap().clone();
        assert!(get_link_density(&nav) > 0.8);
    }

    #[test]
    fn paragraph_with_one_link_has_low_density() {
        let doc = Document::from(concat!(
            r#"<p id="p">This paragraph talks about a number of different topics at length "#,
            r#"and only mentions <a href="/ref">one reference</a> along the way.</p>"#,
        ));
        let p = doc.select("#p").nodes().first().unwrap().clone();
        assert!(get_link_density(&p) < 0.25);
    }

    #[test]
    fn fragment_links_are_discounted() {
        let doc = Document::from(concat!(
            r##"<div id="toc"><a href="#s1">Section one name</a></div>"##,
            r#"<div id="ext"><a href="/s1">Section one name</a></div>"#,
        ));
        let toc = doc.select("#toc").nodes().first().unwrap().clone();
        let ext = doc.select("#ext").nodes().first().unwrap().clone();
        let toc_density = get_link_density(&toc);
        let ext_density = get_link_density(&ext);
        assert!((toc_density - 0.3).abs() < 0.01);
        assert!((ext_density - 1.0).abs() < 0.01);
    }

    #[test]
    fn no_text_means_zero_density() {
        let doc = Document::from(r#"<div id="x"><img src="a.jpg"></div>"#);
        let x = doc.select("#x").nodes().first().unwrap().clone();
        assert!(get_link_density(&x).abs() < f64::EPSILON);
    }

    #[test]
    fn heading_text_density() {
        let doc = Document::from(r#"<div id="x"><h2>A heading</h2><p>body</p></div>"#);
        let x = doc.select("#x").nodes().first().unwrap().clone();
        let density = get_text_density(&x, &["h1", "h2", "h3", "h4", "h5", "h6"]);
        assert!(density > 0.5 && density < 1.0);
    }
}
