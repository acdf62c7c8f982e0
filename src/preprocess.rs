//! Document preparation.
//!
//! Everything that happens before scoring: recovering real images from
//! `<noscript>` fallbacks, removing scripts and styles, turning `<br>` runs
//! into paragraphs, and replacing deprecated `<font>` tags.

use tracing::debug;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::patterns;

/// Placeholder image attributes that count as "has a source".
const IMG_SOURCE_ATTRS: &[&str] = &["src", "srcset", "data-src", "data-srcset"];

/// Find all `<noscript>` that are located after `<img>` nodes and contain only
/// one image, and replace the preceding placeholder image with the real one
/// from inside the `<noscript>`. Sites like Medium ship their real images this
/// way.
pub fn unwrap_noscript_images(doc: &Document) {
    // Remove img without source and without any attribute that might contain
    // an image, so a placeholder is not mistaken for the real thing below.
    let images = doc.select("img").nodes().to_vec();
    for img in images.iter().rev() {
        let contains_img = dom::attributes(img).iter().any(|(name, value)| {
            IMG_SOURCE_ATTRS.contains(&name.as_str()) || patterns::IMG_EXTENSIONS.is_match(value)
        });
        if !contains_img {
            dom::remove_node(img);
        }
    }

    for noscript in doc.select("noscript").nodes() {
        // Parse the noscript content on the side and make sure it holds a
        // single image.
        let inner = dom::inner_html(noscript);
        let shadow = Document::from(inner.to_string());
        let Some(shadow_body) = shadow.select("body").nodes().first().cloned() else {
            continue;
        };
        if !dom::is_single_image(&shadow_body) {
            continue;
        }
        let Some(shadow_root) = dom::first_element_child(&shadow_body) else {
            continue;
        };

        // Only act when the previous element sibling is itself a lone image.
        let Some(prev_element) = noscript.prev_element_sibling() else {
            continue;
        };
        if !dom::is_single_image(&prev_element) {
            continue;
        }

        let prev_img = if dom::has_tag(&prev_element, "img") {
            prev_element.clone()
        } else {
            match dom::get_all_nodes_with_tag(&prev_element, &["img"]).first().cloned() {
                Some(img) => img,
                None => continue,
            }
        };

        let Some(new_img) = dom::get_all_nodes_with_tag(&shadow_root, &["img"])
            .first()
            .cloned()
            .or_else(|| dom::has_tag(&shadow_root, "img").then_some(shadow_root.clone()))
        else {
            continue;
        };

        // Carry over attributes from the placeholder that might contain an
        // image, under a `data-old-` name when the real image already uses it.
        for (name, value) in dom::attributes(&prev_img) {
            if value.is_empty() {
                continue;
            }
            if name != "src" && name != "srcset" && !patterns::IMG_EXTENSIONS.is_match(&value) {
                continue;
            }
            if dom::get_attribute(&new_img, &name).as_deref() == Some(value.as_str()) {
                continue;
            }
            let attr_name = if dom::has_attribute(&new_img, &name) {
                format!("data-old-{name}")
            } else {
                name
            };
            dom::set_attribute(&new_img, &attr_name, &value);
        }

        debug!("replacing placeholder image with noscript image");
        Selection::from(prev_element).replace_with_html(dom::outer_html(&shadow_root).as_ref());
    }
}

/// Remove `<script>` and `<noscript>` from the document.
pub fn remove_scripts(doc: &Document) {
    doc.select("script, noscript").remove();
}

/// Prepare the document for scoring: strip styles, normalize `<br>` runs,
/// replace deprecated `<font>` tags.
pub fn prep_document(doc: &Document) {
    doc.select("style").remove();

    if let Some(body) = doc.select("body").nodes().first() {
        replace_brs(doc, body);
    }

    for font in doc.select("font").nodes() {
        dom::set_node_tag(font, "span");
    }
}

/// Replaces 2 or more successive `<br>` elements with a single `<p>`, moving
/// the phrasing content that follows the run into the new paragraph.
/// Whitespace between the `<br>` elements is ignored:
///
/// ```html
/// <div>foo<br>bar<br> <br><br>abc</div>
/// ```
///
/// becomes
///
/// ```html
/// <div>foo<br>bar<p>abc</p></div>
/// ```
fn replace_brs(doc: &Document, body: &NodeRef) {
    for br in dom::get_all_nodes_with_tag(body, &["br"]) {
        // Whether 2 or more <br> elements have been found and removed.
        let mut replaced = false;

        // If we find a <br> chain, remove the <br>s until we hit another
        // node or non-whitespace. This leaves behind the first <br> in the
        // chain (which is replaced with a <p> below).
        let mut next = dom::next_significant_node(br.next_sibling());
        while let Some(n) = next.filter(|n| dom::has_tag(n, "br")) {
            replaced = true;
            let after = n.next_sibling();
            dom::remove_node(&n);
            next = dom::next_significant_node(after);
        }

        if !replaced {
            continue;
        }

        let p = dom::create_element(doc, "p");
        dom::replace_node(&br, &p);

        // Add all following sibling nodes as children of the <p> until we hit
        // another <br> chain or non-phrasing content.
        let mut next = p.next_sibling();
        while let Some(n) = next {
            if dom::has_tag(&n, "br") {
                let after_break = dom::next_significant_node(n.next_sibling());
                if after_break.is_some_and(|a| dom::has_tag(&a, "br")) {
                    break;
                }
            }
            if !dom::is_phrasing_content(&n) {
                break;
            }

            let sibling = n.next_sibling();
            dom::append_child(&p, &n);
            next = sibling;
        }

        while let Some(last) = p.last_child().filter(dom::is_whitespace) {
            dom::remove_node(&last);
        }

        if let Some(parent) = p.parent().filter(|parent| dom::has_tag(parent, "p")) {
            dom::set_node_tag(&parent, "div");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn br_runs_become_paragraphs() {
        let doc = Document::from("<div>foo<br>bar<br> <br><br>abc</div>");
        let body = doc.select("body").nodes().first().unwrap().clone();
        replace_brs(&doc, &body);

        let html = doc.select("div").html().to_string();
        assert_eq!(doc.select("div br").length(), 1);
        assert_eq!(doc.select("div p").length(), 1);
        assert_eq!(doc.select("div p").text().as_ref(), "abc");
        assert!(html.contains("bar"));
    }

    #[test]
    fn single_br_is_left_alone() {
        let doc = Document::from("<div>foo<br>bar</div>");
        let body = doc.select("body").nodes().first().unwrap().clone();
        replace_brs(&doc, &body);

        assert_eq!(doc.select("br").length(), 1);
        assert!(doc.select("p").is_empty());
    }

    #[test]
    fn paragraph_absorbs_phrasing_until_block() {
        let doc = Document::from("<div>a<br><br><span>inline</span> tail<div>block</div></div>");
        let body = doc.select("body").nodes().first().unwrap().clone();
        replace_brs(&doc, &body);

        let p_text = doc.select("p").text().to_string();
        assert!(p_text.contains("inline"));
        assert!(p_text.contains("tail"));
        assert!(!p_text.contains("block"));
    }

    #[test]
    fn nested_paragraph_parent_becomes_div() {
        let doc = Document::from("<p>a<br><br>b</p>");
        let body = doc.select("body").nodes().first().unwrap().clone();
        replace_brs(&doc, &body);

        assert_eq!(doc.select("div > p").length(), 1);
    }

    #[test]
    fn font_tags_become_spans() {
        let doc = Document::from(r#"<div><font color="red">hi</font></div>"#);
        prep_document(&doc);
        assert!(doc.select("font").is_empty());
        assert_eq!(doc.select("span").length(), 1);
    }

    #[test]
    fn styles_are_removed() {
        let doc = Document::from("<head><style>p{}</style></head><body><p>x</p></body>");
        prep_document(&doc);
        assert!(doc.select("style").is_empty());
    }

    #[test]
    fn sourceless_images_are_removed() {
        let doc = Document::from(r#"<div><img alt="placeholder"><img src="real.jpg"></div>"#);
        unwrap_noscript_images(&doc);
        assert_eq!(doc.select("img").length(), 1);
        assert_eq!(doc.select("img").attr("src").unwrap().as_ref(), "real.jpg");
    }

    #[test]
    fn data_src_images_survive() {
        let doc = Document::from(r#"<div><img data-src="lazy.jpg"></div>"#);
        unwrap_noscript_images(&doc);
        assert_eq!(doc.select("img").length(), 1);
    }

    #[test]
    fn noscript_image_replaces_placeholder() {
        let doc = Document::from(concat!(
            r#"<div><img src="data:image/gif;base64,AAAA" data-thumb="thumb.jpg">"#,
            r#"<noscript><img src="real.jpg"></noscript></div>"#,
        ));
        unwrap_noscript_images(&doc);

        let img = doc.select("div > img");
        assert_eq!(img.attr("src").unwrap().as_ref(), "real.jpg");
        // The placeholder's image-bearing attribute is carried over.
        assert_eq!(img.attr("data-thumb").unwrap().as_ref(), "thumb.jpg");
        // The conflicting placeholder src is preserved under a data-old- name.
        assert_eq!(
            img.attr("data-old-src").unwrap().as_ref(),
            "data:image/gif;base64,AAAA"
        );
    }

    #[test]
    fn noscript_with_text_is_ignored() {
        let doc = Document::from(concat!(
            r#"<div><img src="a.jpg">"#,
            r#"<noscript>Please enable JavaScript <img src="b.jpg"></noscript></div>"#,
        ));
        unwrap_noscript_images(&doc);
        assert_eq!(doc.select("div > img").attr("src").unwrap().as_ref(), "a.jpg");
    }
}
