//! Article cleanup.
//!
//! Runs after sibling unification: strips presentational attributes, marks
//! data tables so they survive, repairs lazily-loaded images, and removes
//! everything that still looks fishy (forms, share widgets, link farms,
//! heading-only boxes).

use std::collections::HashMap;

use tracing::debug;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::link_density::{get_link_density, get_text_density};
use crate::options::{Options, DEFAULT_CHAR_THRESHOLD};
use crate::patterns;

use super::score::{get_class_weight, Flags};

/// Deprecated presentational attributes removed everywhere.
const PRESENTATIONAL_ATTRIBUTES: &[&str] = &[
    "align", "background", "bgcolor", "border", "cellpadding", "cellspacing",
    "frame", "hspace", "rules", "style", "valign", "vspace",
];

/// Elements that additionally lose their `width`/`height` attributes.
const DEPRECATED_SIZE_ATTRIBUTE_ELEMS: &[&str] = &["table", "th", "td", "hr", "pre"];

/// Per-table verdicts: `true` = data table, `false` = layout table.
type DataTables = HashMap<NodeId, bool>;

/// Prepare the article node for display. Cleans out inline styles, iframes,
/// forms, and strips extraneous `<p>` tags and `<br>` runs.
pub fn prep_article(doc: &Document, article_content: &NodeRef, options: &Options, flags: Flags) {
    clean_styles(article_content);

    // Check for data tables before cleaning, so tabular content is not
    // removed just because it sits isolated from the running text.
    let data_tables = mark_data_tables(article_content);

    fix_lazy_images(doc, article_content);

    clean_conditionally(article_content, "form", options, flags, &data_tables);
    clean_conditionally(article_content, "fieldset", options, flags, &data_tables);
    clean(article_content, "object", options);
    clean(article_content, "embed", options);
    clean(article_content, "footer", options);
    clean(article_content, "link", options);
    clean(article_content, "aside", options);

    // Clean out share widgets with little content, but never the top
    // candidates themselves.
    for child in dom::element_children(article_content) {
        clean_matched_nodes(&child, |node, match_string| {
            patterns::SHARE_ELEMENTS.is_match(match_string)
                && dom::text_content(node).chars().count() < DEFAULT_CHAR_THRESHOLD
        });
    }

    clean(article_content, "iframe", options);
    clean(article_content, "input", options);
    clean(article_content, "textarea", options);
    clean(article_content, "select", options);
    clean(article_content, "button", options);
    clean_headers(article_content, flags);

    // Do these last, as the previous cleanup may have removed junk that
    // would have affected the verdicts.
    clean_conditionally(article_content, "table", options, flags, &data_tables);
    clean_conditionally(article_content, "ul", options, flags, &data_tables);
    clean_conditionally(article_content, "div", options, flags, &data_tables);

    // H1 is reserved for the title, which is rendered separately.
    for h1 in dom::get_all_nodes_with_tag(article_content, &["h1"]) {
        dom::set_node_tag(&h1, "h2");
    }

    // Remove paragraphs with no media and no text.
    for paragraph in dom::get_all_nodes_with_tag(article_content, &["p"]).iter().rev() {
        let media_count = dom::get_all_nodes_with_tag(paragraph, &["img", "embed", "object", "iframe"]).len();
        if media_count == 0 && dom::inner_text(paragraph, false).is_empty() {
            dom::remove_node(paragraph);
        }
    }

    // A <br> directly before a paragraph adds nothing.
    for br in dom::get_all_nodes_with_tag(article_content, &["br"]) {
        let next = dom::next_significant_node(br.next_sibling());
        if next.is_some_and(|n| dom::has_tag(&n, "p")) {
            dom::remove_node(&br);
        }
    }

    collapse_single_cell_tables(article_content);
}

/// Remove the style attribute and deprecated presentational attributes from
/// the subtree. SVG subtrees are left untouched.
fn clean_styles(node: &NodeRef) {
    if dom::has_tag(node, "svg") {
        return;
    }

    for attribute in PRESENTATIONAL_ATTRIBUTES {
        dom::remove_attribute(node, attribute);
    }

    if dom::tag_name(node)
        .is_some_and(|tag| DEPRECATED_SIZE_ATTRIBUTE_ELEMS.contains(&tag.as_str()))
    {
        dom::remove_attribute(node, "width");
        dom::remove_attribute(node, "height");
    }

    for child in dom::element_children(node) {
        clean_styles(&child);
    }
}

/// Look for 'data' (as opposed to 'layout') tables, which conditional
/// cleaning must leave alone.
fn mark_data_tables(root: &NodeRef) -> DataTables {
    let mut data_tables = DataTables::new();

    for table in dom::get_all_nodes_with_tag(root, &["table"]) {
        if dom::get_attribute(&table, "role").as_deref() == Some("presentation") {
            data_tables.insert(table.id, false);
            continue;
        }
        if dom::get_attribute(&table, "datatable").as_deref() == Some("0") {
            data_tables.insert(table.id, false);
            continue;
        }
        if dom::get_attribute(&table, "summary").is_some_and(|s| !s.is_empty()) {
            data_tables.insert(table.id, true);
            continue;
        }

        let caption_has_children = dom::get_all_nodes_with_tag(&table, &["caption"])
            .first()
            .is_some_and(|caption| !dom::child_nodes(caption).is_empty());
        if caption_has_children {
            data_tables.insert(table.id, true);
            continue;
        }

        // A descendant of one of these tags marks a data table.
        let data_table_descendants = ["col", "colgroup", "tfoot", "thead", "th"];
        if data_table_descendants
            .iter()
            .any(|tag| !dom::get_all_nodes_with_tag(&table, &[tag]).is_empty())
        {
            debug!("data table because found data-y descendant");
            data_tables.insert(table.id, true);
            continue;
        }

        // Nested tables indicate a layout table.
        if !dom::get_all_nodes_with_tag(&table, &["table"]).is_empty() {
            data_tables.insert(table.id, false);
            continue;
        }

        let (rows, columns) = get_row_and_column_count(&table);
        if rows >= 10 || columns > 4 {
            data_tables.insert(table.id, true);
            continue;
        }

        // Now just go by size entirely.
        data_tables.insert(table.id, rows * columns > 10);
    }

    data_tables
}

/// Row and column counts, honoring `rowspan`/`colspan`. Missing or invalid
/// spans count as one.
fn get_row_and_column_count(table: &NodeRef) -> (usize, usize) {
    let mut rows = 0;
    let mut columns = 0;

    for tr in dom::get_all_nodes_with_tag(table, &["tr"]) {
        let rowspan = dom::get_attribute(&tr, "rowspan")
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(0);
        rows += rowspan.max(1);

        let mut columns_in_this_row = 0;
        for cell in dom::get_all_nodes_with_tag(&tr, &["td"]) {
            let colspan = dom::get_attribute(&cell, "colspan")
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(0);
            columns_in_this_row += colspan.max(1);
        }
        columns = columns.max(columns_in_this_row);
    }

    (rows, columns)
}

/// Convert images and figures that hide their source in data attributes into
/// images that load without JavaScript.
fn fix_lazy_images(doc: &Document, root: &NodeRef) {
    for elem in dom::get_all_nodes_with_tag(root, &["img", "picture", "figure"]) {
        // Some sites put a tiny placeholder square as a base64 data URI in
        // src. SVG aside (meaningful vector images fit in under 133 bytes),
        // a short payload with a real image in another attribute is a
        // placeholder and gets dropped.
        let src = dom::get_attribute(&elem, "src").unwrap_or_default();
        if let Some(caps) = patterns::B64_DATA_URL.captures(&src) {
            if &caps[1] != "image/svg+xml" {
                let src_could_be_removed = dom::attributes(&elem).iter().any(|(name, value)| {
                    name != "src" && patterns::IMG_EXTENSIONS.is_match(value)
                });

                if src_could_be_removed {
                    if let Some(m) = patterns::BASE64_STARTS.find(&src) {
                        let b64_length = src.len() - (m.start() + 7);
                        if b64_length < 133 {
                            dom::remove_attribute(&elem, "src");
                        }
                    }
                }
            }
        }

        let src = dom::get_attribute(&elem, "src").unwrap_or_default();
        let srcset = dom::get_attribute(&elem, "srcset").unwrap_or_default();
        // "null" srcset works around pages serializing a missing value.
        let has_source = !src.is_empty() || (!srcset.is_empty() && srcset != "null");
        if has_source && !dom::class_name(&elem).to_lowercase().contains("lazy") {
            continue;
        }

        for (name, value) in dom::attributes(&elem) {
            if name == "src" || name == "srcset" || name == "alt" {
                continue;
            }

            let copy_to = if patterns::IMG_EXT_WITH_SPACES_AND_NUM.is_match(&value) {
                Some("srcset")
            } else if patterns::IMG_EXT_AMONG_TEXT.is_match(&value) {
                Some("src")
            } else {
                None
            };

            let Some(copy_to) = copy_to else { continue };

            if dom::has_tag(&elem, "img") || dom::has_tag(&elem, "picture") {
                dom::set_attribute(&elem, copy_to, &value);
            } else if dom::has_tag(&elem, "figure")
                && dom::get_all_nodes_with_tag(&elem, &["img", "picture"]).is_empty()
            {
                // A <figure> with a lazy source but no image inside: give it
                // a real one.
                let img = dom::create_element(doc, "img");
                dom::set_attribute(&img, copy_to, &value);
                dom::append_child(&elem, &img);
            }
        }
    }
}

/// Clean a node of all elements of type `tag`, except video embeds people
/// usually want to keep.
fn clean(node: &NodeRef, tag: &str, options: &Options) {
    let is_embed = matches!(tag, "object" | "embed" | "iframe");
    let video_pattern = options.video_pattern();

    for element in dom::get_all_nodes_with_tag(node, &[tag]).iter().rev() {
        if is_embed {
            let is_video = dom::attributes(element)
                .iter()
                .any(|(_, value)| video_pattern.is_match(value))
                || (dom::has_tag(element, "object")
                    && video_pattern.is_match(&dom::inner_html(element)));
            if is_video {
                continue;
            }
        }
        dom::remove_node(element);
    }
}

/// Clean an element of all tags of type `tag` if they look fishy: little
/// content, bad class names, high link density, too many images or embeds.
fn clean_conditionally(
    node: &NodeRef,
    tag: &str,
    options: &Options,
    flags: Flags,
    data_tables: &DataTables,
) {
    if !flags.clean_conditionally {
        return;
    }

    let is_data_table = |t: &NodeRef| data_tables.get(&t.id).copied().unwrap_or(false);

    // Traverse backwards so nodes can be removed without upsetting the walk.
    for n in dom::get_all_nodes_with_tag(node, &[tag]).iter().rev() {
        if n.parent().is_none() {
            continue;
        }

        if tag == "table" && is_data_table(n) {
            continue;
        }
        // Inside a data table: keep as well.
        if dom::has_ancestor_tag(n, "table", -1, Some(&is_data_table)) {
            continue;
        }
        if dom::has_ancestor_tag(n, "code", 3, None) {
            continue;
        }

        let weight = get_class_weight(n, flags);
        if weight < 0.0 {
            debug!(tag, "conditionally cleaned by class weight");
            dom::remove_node(n);
            continue;
        }

        let inner_text = dom::inner_text(n, true);
        if inner_text.matches(',').count() >= 10 {
            continue;
        }

        // Not many commas: if the number of non-paragraph elements is more
        // than paragraphs or other ominous signs are present, remove it.
        let p = dom::get_all_nodes_with_tag(n, &["p"]).len() as f64;
        let img = dom::get_all_nodes_with_tag(n, &["img"]).len() as f64;
        let li = dom::get_all_nodes_with_tag(n, &["li"]).len() as f64 - 100.0;
        let input = dom::get_all_nodes_with_tag(n, &["input"]).len() as f64;
        let heading_density = get_text_density(n, &["h1", "h2", "h3", "h4", "h5", "h6"]);

        let video_pattern = options.video_pattern();
        let mut embed_count = 0;
        let mut keep_for_video = false;
        for embed in dom::get_all_nodes_with_tag(n, &["object", "embed", "iframe"]) {
            // An embed with video attributes saves the whole node.
            if dom::attributes(&embed)
                .iter()
                .any(|(_, value)| video_pattern.is_match(value))
            {
                keep_for_video = true;
                break;
            }
            if dom::has_tag(&embed, "object") && video_pattern.is_match(&dom::inner_html(&embed)) {
                keep_for_video = true;
                break;
            }
            embed_count += 1;
        }
        if keep_for_video {
            continue;
        }

        let mut is_list = tag == "ul" || tag == "ol";
        if !is_list {
            let list_length: usize = dom::get_all_nodes_with_tag(n, &["ul", "ol"])
                .iter()
                .map(|list| dom::inner_text(list, true).len())
                .sum();
            is_list = list_length as f64 / inner_text.len() as f64 > 0.9;
        }

        let link_density = get_link_density(n);
        let content_length = inner_text.chars().count();

        let have_to_remove = (img > 1.0
            && p / img < 0.5
            && !dom::has_ancestor_tag(n, "figure", 3, None))
            || (!is_list && li > p)
            || (input > (p / 3.0).floor())
            || (!is_list
                && heading_density < 0.9
                && content_length < 25
                && (img == 0.0 || img > 2.0)
                && !dom::has_ancestor_tag(n, "figure", 3, None))
            || (!is_list && weight < 25.0 && link_density > 0.2)
            || (weight >= 25.0 && link_density > 0.5)
            || ((embed_count == 1 && content_length < 75) || embed_count > 1);

        // Allow simple lists of images to remain.
        if is_list && have_to_remove {
            let children = dom::element_children(n);
            // Don't filter lists whose items hold more than one child.
            let simple = children.iter().all(|child| dom::element_children(child).len() <= 1);
            if simple {
                let li_count = dom::get_all_nodes_with_tag(n, &["li"]).len() as f64;
                if (img - li_count).abs() < f64::EPSILON {
                    continue;
                }
            }
        }

        if have_to_remove {
            debug!(tag, content_length, link_density, "conditionally cleaned");
            dom::remove_node(n);
        }
    }
}

/// Walk the subtree and remove every node the filter flags.
fn clean_matched_nodes(node: &NodeRef, filter: impl Fn(&NodeRef, &str) -> bool) {
    let end_of_search = dom::get_next_node(node, true).map(|n| n.id);
    let mut next = dom::get_next_node(node, false);
    while let Some(n) = next {
        if Some(n.id) == end_of_search {
            break;
        }
        let match_string = format!("{} {}", dom::class_name(&n), dom::id(&n));
        if filter(&n, &match_string) {
            next = dom::remove_and_get_next(&n);
        } else {
            next = dom::get_next_node(&n, false);
        }
    }
}

/// Remove spurious `<h1>`/`<h2>` with a negative class weight.
fn clean_headers(node: &NodeRef, flags: Flags) {
    for heading in dom::get_all_nodes_with_tag(node, &["h1", "h2"]).iter().rev() {
        if get_class_weight(heading, flags) < 0.0 {
            debug!("removing header with low class weight");
            dom::remove_node(heading);
        }
    }
}

/// Collapse `<table><tbody><tr><td>` chains down to a `<div>`, or a `<p>`
/// when the cell only holds phrasing content.
fn collapse_single_cell_tables(root: &NodeRef) {
    for table in dom::get_all_nodes_with_tag(root, &["table"]) {
        let tbody = if dom::has_single_tag_inside_element(&table, "tbody") {
            match dom::first_element_child(&table) {
                Some(tbody) => tbody,
                None => continue,
            }
        } else {
            table.clone()
        };

        if !dom::has_single_tag_inside_element(&tbody, "tr") {
            continue;
        }
        let Some(row) = dom::first_element_child(&tbody) else { continue };
        if !dom::has_single_tag_inside_element(&row, "td") {
            continue;
        }
        let Some(cell) = dom::first_element_child(&row) else { continue };

        let all_phrasing = dom::child_nodes(&cell).iter().all(dom::is_phrasing_content);
        dom::set_node_tag(&cell, if all_phrasing { "p" } else { "div" });
        dom::replace_node(&table, &cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn content<'a>(doc: &'a Document) -> NodeRef<'a> {
        doc.select("#content").nodes().first().unwrap().clone()
    }

    #[test]
    fn presentational_attributes_are_stripped() {
        let doc = Document::from(concat!(
            r#"<div id="content" align="center" style="color:red">"#,
            r#"<table id="t" width="100" border="1"><tr><td>x</td></tr></table></div>"#,
        ));
        clean_styles(&content(&doc));

        let table = doc.select("#t");
        assert!(table.attr("width").is_none());
        assert!(table.attr("border").is_none());
        assert!(doc.select("#content").attr("style").is_none());
        assert!(doc.select("#content").attr("align").is_none());
    }

    #[test]
    fn svg_subtree_is_left_alone() {
        let doc = Document::from(
            r#"<div id="content"><svg width="10" height="10"><rect width="5"/></svg></div>"#,
        );
        clean_styles(&content(&doc));
        assert!(doc.select("svg").attr("width").is_some());
    }

    #[test]
    fn table_with_many_rows_is_data_table() {
        let rows: String = (0..11).map(|i| format!("<tr><td>{i}</td></tr>")).collect();
        let html = format!(r#"<div id="content"><table id="t">{rows}</table></div>"#);
        let doc = Document::from(html);
        let tables = mark_data_tables(&content(&doc));
        let t = doc.select("#t").nodes().first().unwrap().clone();
        assert_eq!(tables.get(&t.id), Some(&true));
    }

    #[test]
    fn presentation_role_is_layout_table() {
        let doc = Document::from(
            r#"<div id="content"><table id="t" role="presentation"><tr><td>x</td></tr></table></div>"#,
        );
        let tables = mark_data_tables(&content(&doc));
        let t = doc.select("#t").nodes().first().unwrap().clone();
        assert_eq!(tables.get(&t.id), Some(&false));
    }

    #[test]
    fn th_descendant_marks_data_table() {
        let doc = Document::from(
            r#"<div id="content"><table id="t"><tr><th>h</th></tr><tr><td>x</td></tr></table></div>"#,
        );
        let tables = mark_data_tables(&content(&doc));
        let t = doc.select("#t").nodes().first().unwrap().clone();
        assert_eq!(tables.get(&t.id), Some(&true));
    }

    #[test]
    fn spans_count_into_rows_and_columns() {
        let doc = Document::from(concat!(
            r#"<div id="content"><table id="t">"#,
            r#"<tr rowspan="3"><td colspan="2">a</td><td>b</td></tr>"#,
            r#"<tr><td>c</td></tr>"#,
            r#"</table></div>"#,
        ));
        let t = doc.select("#t").nodes().first().unwrap().clone();
        assert_eq!(get_row_and_column_count(&t), (4, 3));
    }

    #[test]
    fn lazy_image_data_src_is_promoted() {
        let doc = Document::from(
            r#"<div id="content"><img class="lazy" data-lazy-src="real.jpg"></div>"#,
        );
        fix_lazy_images(&doc, &content(&doc));
        assert_eq!(doc.select("img").attr("src").unwrap().as_ref(), "real.jpg");
    }

    #[test]
    fn tiny_base64_placeholder_is_dropped() {
        let b64 = "A".repeat(24);
        let html = format!(
            r#"<div id="content"><img src="data:image/gif;base64,{b64}" data-src="real.png"></div>"#
        );
        let doc = Document::from(html);
        fix_lazy_images(&doc, &content(&doc));
        let img = doc.select("img");
        // Placeholder src removed, then the real source is promoted.
        assert_eq!(img.attr("src").unwrap().as_ref(), "real.png");
    }

    #[test]
    fn svg_data_uri_is_kept() {
        let b64 = "A".repeat(24);
        let html = format!(
            r#"<div id="content"><img src="data:image/svg+xml;base64,{b64}" data-src="x.png"></div>"#
        );
        let doc = Document::from(html);
        fix_lazy_images(&doc, &content(&doc));
        assert!(doc.select("img").attr("src").unwrap().starts_with("data:image/svg+xml"));
    }

    #[test]
    fn figure_without_image_gains_one() {
        let doc = Document::from(
            r#"<div id="content"><figure data-img="photo.jpg"><figcaption>c</figcaption></figure></div>"#,
        );
        fix_lazy_images(&doc, &content(&doc));
        assert_eq!(doc.select("figure img").attr("src").unwrap().as_ref(), "photo.jpg");
    }

    #[test]
    fn embeds_are_cleaned_except_videos() {
        let doc = Document::from(concat!(
            r#"<div id="content">"#,
            r#"<iframe id="ad" src="https://ads.example.com/frame"></iframe>"#,
            r#"<iframe id="video" src="//www.youtube.com/embed/abc"></iframe>"#,
            r#"</div>"#,
        ));
        clean(&content(&doc), "iframe", &Options::default());
        assert!(doc.select("#ad").is_empty());
        assert!(doc.select("#video").exists());
    }

    #[test]
    fn conditional_clean_removes_link_farms() {
        let links: String = (0..12)
            .map(|i| format!(r#"<a href="/{i}">related article number {i}</a> "#))
            .collect();
        let html = format!(
            r#"<div id="content"><div id="farm">{links}</div><p>regular text</p></div>"#
        );
        let doc = Document::from(html);
        clean_conditionally(
            &content(&doc),
            "div",
            &Options::default(),
            Flags::all(),
            &DataTables::new(),
        );
        assert!(doc.select("#farm").is_empty());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn conditional_clean_spares_data_tables() {
        let rows: String = (0..12)
            .map(|i| format!("<tr><td>value {i}</td><td>more {i}</td></tr>"))
            .collect();
        let html = format!(r#"<div id="content"><table id="t">{rows}</table></div>"#);
        let doc = Document::from(html);
        let root = content(&doc);
        let data_tables = mark_data_tables(&root);
        clean_conditionally(&root, "table", &Options::default(), Flags::all(), &data_tables);
        assert!(doc.select("#t").exists());
    }

    #[test]
    fn conditional_clean_respects_flag() {
        let doc = Document::from(r#"<div id="content"><div id="junk"><a href="/x">only a link</a></div></div>"#);
        let flags = Flags {
            clean_conditionally: false,
            ..Flags::all()
        };
        clean_conditionally(&content(&doc), "div", &Options::default(), flags, &DataTables::new());
        assert!(doc.select("#junk").exists());
    }

    #[test]
    fn image_lists_survive_conditional_clean() {
        let items: String = (0..4)
            .map(|i| format!(r#"<li><img src="/{i}.jpg"></li>"#))
            .collect();
        let html = format!(r#"<div id="content"><ul id="gallery">{items}</ul></div>"#);
        let doc = Document::from(html);
        clean_conditionally(
            &content(&doc),
            "ul",
            &Options::default(),
            Flags::all(),
            &DataTables::new(),
        );
        assert!(doc.select("#gallery").exists());
    }

    #[test]
    fn single_cell_table_collapses_to_paragraph() {
        let doc = Document::from(
            r#"<div id="content"><table><tbody><tr><td>just some text</td></tr></tbody></table></div>"#,
        );
        collapse_single_cell_tables(&content(&doc));
        assert!(doc.select("table").is_empty());
        assert_eq!(doc.select("#content > p").text().as_ref(), "just some text");
    }

    #[test]
    fn multi_cell_table_is_kept() {
        let doc = Document::from(
            r#"<div id="content"><table><tr><td>a</td><td>b</td></tr></table></div>"#,
        );
        collapse_single_cell_tables(&content(&doc));
        assert!(doc.select("table").exists());
    }

    #[test]
    fn negative_weight_headers_are_removed() {
        let doc = Document::from(concat!(
            r#"<div id="content"><h2 class="share-header">Share this</h2>"#,
            r#"<h2 id="keep">Real heading</h2></div>"#,
        ));
        clean_headers(&content(&doc), Flags::all());
        assert!(doc.select(".share-header").is_empty());
        assert!(doc.select("#keep").exists());
    }

    #[test]
    fn prep_article_removes_empty_paragraphs_and_renames_h1() {
        let doc = Document::from(concat!(
            r#"<div id="content"><h1>Heading</h1><p>  </p>"#,
            r#"<p>body text</p><br><p>tail</p></div>"#,
        ));
        prep_article(&doc, &content(&doc), &Options::default(), Flags::all());

        assert!(doc.select("h1").is_empty());
        assert_eq!(doc.select("h2").length(), 1);
        assert_eq!(doc.select("p").length(), 2);
        assert!(doc.select("br").is_empty());
    }

    #[test]
    fn share_widgets_inside_children_are_removed() {
        let doc = Document::from(concat!(
            r#"<div id="content"><div id="child">"#,
            r##"<div class="share-buttons"><a href="#">tweet</a></div>"##,
            r#"<p>long enough paragraph text</p></div></div>"#,
        ));
        prep_article(&doc, &content(&doc), &Options::default(), Flags::all());
        assert!(doc.select(".share-buttons").is_empty());
        assert!(doc.select("p").exists());
    }
}
