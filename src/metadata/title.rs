//! Document-title heuristic.
//!
//! Site titles usually carry the site name behind a separator, or prefix the
//! headline with a section name. This pulls the most headline-like part out
//! of the `<title>` text, consulting the page's headings along the way.

use crate::dom::{self, Document};
use crate::patterns;
use crate::text::{normalize_spaces, word_count};

/// Derive the article title from the document's `<title>` and headings.
#[must_use]
pub fn get_article_title(doc: &Document) -> String {
    let orig_title = doc
        .select("title")
        .nodes()
        .first()
        .map(|n| dom::inner_text(n, true))
        .unwrap_or_default();
    let mut cur_title = orig_title.clone();
    let mut title_had_hierarchical_separators = false;

    let h_ones = doc.select("h1").nodes().to_vec();

    // A degenerate title (very long or very short) with a lone <h1> on the
    // page: the heading is the better headline, take it as-is.
    let title_len = cur_title.chars().count();
    if (title_len > 150 || title_len < 15) && h_ones.len() == 1 {
        let heading = dom::inner_text(&h_ones[0], true);
        if !heading.is_empty() {
            return normalize_spaces(heading.trim());
        }
    }

    if patterns::TITLE_FINAL_PART.is_match(&cur_title) {
        // There is a separator in the title: first remove the final part.
        title_had_hierarchical_separators = patterns::TITLE_SEPARATORS.is_match(&cur_title);
        if let Some(caps) = patterns::OTHER_TITLE_SEPARATORS.captures(&orig_title) {
            cur_title = caps[1].to_string();
        }

        // If the resulting title is too short, remove the first part instead.
        if word_count(&cur_title) < 3 {
            if let Some(caps) = patterns::TITLE_FIRST_PART.captures(&orig_title) {
                cur_title = caps[1].to_string();
            }
        }
    } else if cur_title.contains(": ") {
        // Check if we have a heading containing this exact string, in which
        // case it is the full title already.
        let trimmed_title = cur_title.trim().to_string();
        let matches_heading = doc
            .select("h1, h2")
            .nodes()
            .iter()
            .any(|heading| dom::text_content(heading).trim() == trimmed_title);

        // If we don't, extract the title out of the original string.
        if !matches_heading {
            if let Some(idx) = orig_title.rfind(':') {
                cur_title = orig_title[idx + 1..].to_string();
            }
        }

        // If the title is now too short, try the first colon instead. But if
        // there are too many words before the colon, something is weird with
        // the titles and the headings, keep the original.
        if word_count(&cur_title) < 3 {
            if let Some(idx) = orig_title.find(':') {
                cur_title = orig_title[idx + 1..].to_string();
            }
        } else if let Some(idx) = orig_title.find(':') {
            if word_count(&orig_title[..idx]) > 5 {
                cur_title = orig_title.clone();
            }
        }
    }

    cur_title = normalize_spaces(cur_title.trim());
    // If we now have 4 words or fewer as our title, and either no
    // hierarchical separators (\, /, > or ») were found in the original
    // title, or we changed the number of words by other than 1, use the
    // original title instead.
    let cur_title_word_count = word_count(&cur_title);
    if cur_title_word_count <= 4 {
        let stripped_count =
            word_count(&patterns::SEPARATORS.replace_all(&orig_title, "")) as isize;
        if !title_had_hierarchical_separators
            || cur_title_word_count as isize != stripped_count - 1
        {
            cur_title = orig_title;
        }
    }

    cur_title
}
