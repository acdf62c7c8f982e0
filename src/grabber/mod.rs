//! The grabber: find the content a reader actually wants.
//!
//! Works over a snapshot of `<body>`: prunes chrome, scores paragraph-like
//! nodes into their ancestors, picks the best candidate, pulls related
//! siblings in, cleans the result, and retries with progressively weaker
//! filters when the outcome is too short.

mod clean;
mod score;

pub use score::Flags;

use tracing::debug;

use crate::dom::{self, Document, NodeRef};
use crate::link_density::get_link_density;
use crate::options::Options;
use crate::patterns;
use crate::text;

use score::ScoreMap;

/// Element tags collected for scoring.
const TAGS_TO_SCORE: &[&str] = &["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// ARIA roles whose elements are never content.
const UNLIKELY_ROLES: &[&str] = &[
    "menu", "menubar", "complementary", "navigation", "alert", "alertdialog", "dialog",
];

/// Tags allowed to keep their name when unified as siblings; everything else
/// becomes a `<div>` so later cleanup does not drop it by accident.
const ALTER_TO_DIV_EXCEPTIONS: &[&str] = &["div", "article", "section", "p"];

/// At least this many other top candidates must share an ancestor before the
/// ancestor is promoted to top candidate.
const MINIMUM_TOP_CANDIDATES: usize = 3;

/// Grabber outputs that feed the final result record.
#[derive(Debug, Default)]
pub struct GrabState {
    /// Title used for the duplicate-header check.
    pub article_title: String,
    /// Byline captured from a byline-looking node.
    pub article_byline: Option<String>,
    /// Text direction from the top candidate's ancestor chain.
    pub article_dir: Option<String>,
    /// Language from `<html lang>`.
    pub article_lang: Option<String>,
}

struct Attempt {
    content: String,
    text_length: usize,
}

/// Using a variety of metrics (content score, class names, element types),
/// find the content most likely to be the article and return it wrapped in a
/// container `<div>`.
pub fn grab_article<'a>(
    doc: &'a Document,
    options: &Options,
    state: &mut GrabState,
) -> Option<NodeRef<'a>> {
    debug!("starting grab loop");

    let page = doc.select("body").nodes().first().cloned()?;
    let page_cache_html = dom::inner_html(&page).to_string();

    let mut flags = Flags::all();
    let mut attempts: Vec<Attempt> = Vec::new();

    loop {
        let mut scores = ScoreMap::new();
        let mut elements_to_score: Vec<NodeRef> = Vec::new();
        let mut should_remove_title_header = true;

        // First pass: trash nodes that look cruddy and turn divs into
        // paragraphs where they were used inappropriately.
        let mut node_opt = doc.select("html").nodes().first().cloned();
        while let Some(node) = node_opt {
            if dom::has_tag(&node, "html") {
                state.article_lang =
                    dom::get_attribute(&node, "lang").filter(|lang| !lang.is_empty());
            }

            let match_string = format!("{} {}", dom::class_name(&node), dom::id(&node));

            if !options.visibility_checker.is_visible(&node) {
                debug!(match_string, "removing hidden node");
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            // Nobody sees content behind a modal dialog.
            if dom::get_attribute(&node, "aria-modal").as_deref() == Some("true")
                && dom::get_attribute(&node, "role").as_deref() == Some("dialog")
            {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if check_byline(state, &node, &match_string) {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if should_remove_title_header && header_duplicates_title(&node, &state.article_title) {
                debug!("removing header duplicating the title");
                should_remove_title_header = false;
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if flags.strip_unlikelys {
                if patterns::UNLIKELY_CANDIDATES.is_match(&match_string)
                    && !patterns::OK_MAYBE_ITS_A_CANDIDATE.is_match(&match_string)
                    && !dom::has_ancestor_tag(&node, "table", 3, None)
                    && !dom::has_ancestor_tag(&node, "code", 3, None)
                    && !dom::has_tag(&node, "body")
                    && !dom::has_tag(&node, "a")
                {
                    debug!(match_string, "removing unlikely candidate");
                    node_opt = dom::remove_and_get_next(&node);
                    continue;
                }
            }

            if dom::get_attribute(&node, "role")
                .is_some_and(|role| UNLIKELY_ROLES.contains(&role.as_str()))
            {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            // Structural containers with nothing in them.
            let tag = dom::tag_name(&node).unwrap_or_default();
            if matches!(
                tag.as_str(),
                "div" | "section" | "header" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
            ) && dom::is_element_without_content(&node)
            {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if TAGS_TO_SCORE.contains(&tag.as_str()) {
                elements_to_score.push(node.clone());
            }

            if tag == "div" {
                // Put phrasing content into paragraphs.
                let mut p: Option<NodeRef> = None;
                let mut child_opt = node.first_child();
                while let Some(child) = child_opt {
                    let next_sibling = child.next_sibling();
                    if dom::is_phrasing_content(&child) {
                        if let Some(paragraph) = &p {
                            dom::append_child(paragraph, &child);
                        } else if !dom::is_whitespace(&child) {
                            let paragraph = dom::create_element(doc, "p");
                            dom::replace_node(&child, &paragraph);
                            dom::append_child(&paragraph, &child);
                            p = Some(paragraph);
                        }
                    } else if let Some(paragraph) = p.take() {
                        while let Some(last) =
                            paragraph.last_child().filter(dom::is_whitespace)
                        {
                            dom::remove_node(&last);
                        }
                    }
                    child_opt = next_sibling;
                }

                // A div wrapping a single paragraph and nothing else is that
                // paragraph; a div with no block children is one too.
                if dom::has_single_tag_inside_element(&node, "p")
                    && get_link_density(&node) < 0.25
                {
                    let new_node = dom::element_children(&node)[0].clone();
                    dom::replace_node(&node, &new_node);
                    elements_to_score.push(new_node.clone());
                    node_opt = dom::get_next_node(&new_node, false);
                    continue;
                } else if !dom::has_child_block_element(&node) {
                    dom::set_node_tag(&node, "p");
                    elements_to_score.push(node.clone());
                }
            }

            node_opt = dom::get_next_node(&node, false);
        }

        // Second pass: score paragraphs by how content-y they look and feed
        // the score to their ancestors.
        let mut candidates: Vec<NodeRef> = Vec::new();
        for element in &elements_to_score {
            if element.parent().is_none() {
                continue;
            }

            let inner_text = dom::inner_text(element, true);
            if inner_text.chars().count() < 25 {
                continue;
            }

            let ancestors = dom::node_ancestors(element, 5);
            if ancestors.is_empty() {
                continue;
            }

            let content_score = score::paragraph_score(&inner_text);

            for (level, ancestor) in ancestors.iter().enumerate() {
                if !ancestor.is_element()
                    || !ancestor.parent().is_some_and(|p| p.is_element())
                {
                    continue;
                }

                if !scores.is_initialized(ancestor.id) {
                    scores.initialize_node(ancestor, flags);
                    candidates.push(ancestor.clone());
                }

                scores.add(ancestor.id, content_score / score::score_divider(level));
            }
        }

        // Scale candidate scores by link density and keep the best few.
        let mut top_candidates: Vec<NodeRef> = Vec::new();
        for candidate in candidates {
            let candidate_score =
                scores.get(candidate.id) * (1.0 - get_link_density(&candidate));
            scores.set(candidate.id, candidate_score);

            for t in 0..options.n_top_candidates {
                if t >= top_candidates.len() {
                    top_candidates.push(candidate);
                    break;
                }
                if candidate_score > scores.get(top_candidates[t].id) {
                    top_candidates.insert(t, candidate);
                    top_candidates.truncate(options.n_top_candidates);
                    break;
                }
            }
        }

        let mut top_candidate = top_candidates.first().cloned();
        let mut needed_to_create_top_candidate = false;

        if top_candidate.is_none() || top_candidate.clone().is_some_and(|tc| dom::has_tag(&tc, "body")) {
            // Last resort: move everything in the body (text nodes included)
            // into a synthetic container and use that.
            let container = dom::create_element(doc, "div");
            needed_to_create_top_candidate = true;
            while let Some(child) = page.first_child() {
                dom::append_child(&container, &child);
            }
            dom::append_child(&page, &container);
            scores.initialize_node(&container, flags);
            top_candidate = Some(container);
        } else if let Some(mut tc) = top_candidate {
            // Find a better top candidate if several of the other top
            // candidates cluster under one of its ancestors.
            let mut alternative_candidate_ancestors: Vec<Vec<dom::NodeId>> = Vec::new();
            for other in top_candidates.iter().skip(1) {
                if scores.get(other.id) / scores.get(tc.id) >= 0.75 {
                    let ancestor_ids =
                        dom::node_ancestors(other, 0).iter().map(|a| a.id).collect();
                    alternative_candidate_ancestors.push(ancestor_ids);
                }
            }

            if alternative_candidate_ancestors.len() >= MINIMUM_TOP_CANDIDATES {
                let mut parent = tc.parent();
                while let Some(p) = parent.filter(|p| !dom::has_tag(p, "body")) {
                    let lists_containing = alternative_candidate_ancestors
                        .iter()
                        .filter(|ancestors| ancestors.contains(&p.id))
                        .count();
                    if lists_containing >= MINIMUM_TOP_CANDIDATES {
                        tc = p;
                        break;
                    }
                    parent = p.parent();
                }
            }
            if !scores.is_initialized(tc.id) {
                scores.initialize_node(&tc, flags);
            }

            // Parents of candidates carry scores of their own. A score going
            // *up* a few steps above the top candidate means more content is
            // lurking at that level, so climb while it rises.
            let mut last_score = scores.get(tc.id);
            let score_threshold = last_score / 3.0;
            let mut parent = tc.parent();
            while let Some(p) = parent.filter(|p| !dom::has_tag(p, "body")) {
                if !scores.is_initialized(p.id) {
                    parent = p.parent();
                    continue;
                }
                let parent_score = scores.get(p.id);
                if parent_score < score_threshold {
                    break;
                }
                if parent_score > last_score {
                    tc = p;
                    break;
                }
                last_score = parent_score;
                parent = p.parent();
            }

            // If the top candidate is an only child, climb to the parent so
            // the sibling-joining logic below has siblings to look at.
            let mut parent = tc.parent();
            while let Some(p) = parent.filter(|p| !dom::has_tag(p, "body")) {
                if dom::element_children(&p).len() != 1 {
                    break;
                }
                tc = p;
                parent = tc.parent();
            }
            if !scores.is_initialized(tc.id) {
                scores.initialize_node(&tc, flags);
            }
            top_candidate = Some(tc);
        }

        let top_candidate = top_candidate?;

        // Look through the top candidate's siblings for content that might
        // also be related: preambles, content split by ads, and so on.
        let article_content = dom::create_element(doc, "div");
        let top_score = scores.get(top_candidate.id);
        let sibling_score_threshold = (top_score * 0.2).max(10.0);
        let top_class = dom::class_name(&top_candidate);

        let parent_of_top_candidate = top_candidate.parent()?;
        for sibling in dom::element_children(&parent_of_top_candidate) {
            let mut append = sibling.id == top_candidate.id;

            if !append {
                let mut content_bonus = 0.0;
                // Siblings sharing the top candidate's class name get the
                // benefit of the doubt.
                if !top_class.is_empty() && dom::class_name(&sibling) == top_class {
                    content_bonus += top_score * 0.2;
                }

                if scores.is_initialized(sibling.id)
                    && scores.get(sibling.id) + content_bonus >= sibling_score_threshold
                {
                    append = true;
                } else if dom::has_tag(&sibling, "p") {
                    let link_density = get_link_density(&sibling);
                    let node_content = dom::inner_text(&sibling, true);
                    let node_length = node_content.chars().count();

                    if node_length > 80 && link_density < 0.25 {
                        append = true;
                    } else if node_length < 80
                        && node_length > 0
                        && link_density == 0.0
                        && patterns::DOT_SPACE_OR_END.is_match(&node_content)
                    {
                        append = true;
                    }
                }
            }

            if append {
                debug!("appending sibling to article content");
                if !dom::tag_name(&sibling)
                    .is_some_and(|tag| ALTER_TO_DIV_EXCEPTIONS.contains(&tag.as_str()))
                {
                    // Not a common block element (a form, a td): turn it into
                    // a div so it is not filtered out later by accident.
                    dom::set_node_tag(&sibling, "div");
                }
                dom::append_child(&article_content, &sibling);
            }
        }

        clean::prep_article(doc, &article_content, options, flags);

        if needed_to_create_top_candidate {
            // The synthetic container already holds everything; just label it.
            dom::set_attribute(&top_candidate, "id", "readability-page-1");
            dom::set_attribute(&top_candidate, "class", "page");
        } else {
            let div = dom::create_element(doc, "div");
            dom::set_attribute(&div, "id", "readability-page-1");
            dom::set_attribute(&div, "class", "page");
            while let Some(child) = article_content.first_child() {
                dom::append_child(&div, &child);
            }
            dom::append_child(&article_content, &div);
        }

        // Did we get any meaningful content? If not, re-run with different
        // flags: the sieve approach raises the odds of finding the *right*
        // content on the retries.
        let mut final_content = article_content;
        let text_length = dom::inner_text(&final_content, true).chars().count();
        let mut parse_successful = true;

        if text_length < options.char_threshold {
            parse_successful = false;
            dom::set_inner_html(&page, &page_cache_html);
            attempts.push(Attempt {
                content: dom::inner_html(&final_content).to_string(),
                text_length,
            });

            if flags.drop_next() {
                debug!(text_length, "attempt too short, relaxing flags and retrying");
                continue;
            }

            // No luck after dropping every flag: take the longest text seen
            // over the loops. Stable sort keeps the earliest attempt on ties.
            attempts.sort_by(|a, b| b.text_length.cmp(&a.text_length));
            if attempts[0].text_length == 0 {
                return None;
            }

            let holder = dom::create_element(doc, "div");
            dom::set_inner_html(&holder, &attempts[0].content);
            final_content = holder;
            parse_successful = true;
        }

        if parse_successful {
            // Find the text direction from the ancestors of the final top
            // candidate.
            let mut dir_sources = vec![parent_of_top_candidate.clone(), top_candidate];
            dir_sources.extend(dom::node_ancestors(&parent_of_top_candidate, 0));
            for ancestor in dir_sources {
                if !ancestor.is_element() {
                    continue;
                }
                if let Some(dir) = dom::get_attribute(&ancestor, "dir").filter(|d| !d.is_empty()) {
                    state.article_dir = Some(dir);
                    break;
                }
            }
            return Some(final_content);
        }
    }
}

/// Check whether a node is a byline and capture it if so.
fn check_byline(state: &mut GrabState, node: &NodeRef, match_string: &str) -> bool {
    if state.article_byline.is_some() {
        return false;
    }

    let rel = dom::get_attribute(node, "rel").unwrap_or_default();
    let itemprop = dom::get_attribute(node, "itemprop").unwrap_or_default();
    let looks_like_byline = rel == "author"
        || itemprop.contains("author")
        || patterns::BYLINE.is_match(match_string);

    if looks_like_byline {
        let byline = dom::text_content(node);
        if is_valid_byline(&byline) {
            state.article_byline = Some(byline.trim().to_string());
            return true;
        }
    }
    false
}

/// A byline is a non-empty string of fewer than 100 chars.
fn is_valid_byline(text: &str) -> bool {
    let len = text.trim().chars().count();
    len > 0 && len < 100
}

/// Whether the node is an `<h1>`/`<h2>` restating the article title.
fn header_duplicates_title(node: &NodeRef, article_title: &str) -> bool {
    if !dom::has_tag(node, "h1") && !dom::has_tag(node, "h2") {
        return false;
    }
    let heading = dom::inner_text(node, false);
    text::text_similarity(article_title, &heading) > 0.75
}
