use std::sync::Arc;

use rs_readability::dom::{self, NodeRef};
use rs_readability::{parse_with_options, Error, HtmlToText, Options, Serializer};

fn article_html(paragraphs: usize) -> String {
    let body: String = (0..paragraphs)
        .map(|i| {
            format!(
                "<p>Paragraph {i} contains readable prose, with commas, and enough words \
                 to be scored as content by the extraction pipeline every time.</p>"
            )
        })
        .collect();
    format!("<html><body><article>{body}</article></body></html>")
}

#[test]
fn max_elems_budget_is_enforced() {
    let options = Options {
        max_elems_to_parse: 3,
        ..Options::default()
    };
    match parse_with_options(&article_html(5), "https://example.com/", options) {
        Err(Error::DocumentTooLarge { found, limit }) => {
            assert_eq!(limit, 3);
            assert!(found > 3);
        }
        other => panic!("expected DocumentTooLarge, got {other:?}"),
    }
}

#[test]
fn zero_budget_means_unlimited() {
    let options = Options {
        max_elems_to_parse: 0,
        ..Options::default()
    };
    assert!(parse_with_options(&article_html(5), "https://example.com/", options).is_ok());
}

#[test]
fn char_threshold_controls_retries() {
    // One short paragraph inside an unlikely wrapper: with a tiny threshold
    // the first pass still fails (the wrapper is stripped), but the content
    // is accepted right after the STRIP_UNLIKELYS retry.
    let html = concat!(
        r#"<html><body><div class="comments"><div>"#,
        "<p>A short paragraph, with a comma, that is long enough to score.</p>",
        "</div></div></body></html>",
    );
    let options = Options {
        char_threshold: 40,
        ..Options::default()
    };
    let article = parse_with_options(html, "https://example.com/", options).unwrap();
    assert!(article.text_content.contains("short paragraph"));
}

#[test]
fn keep_classes_preserves_author_markup() {
    let html = article_html(5).replace("<p>", r#"<p class="body-text">"#);
    let kept = parse_with_options(
        &html,
        "https://example.com/",
        Options {
            keep_classes: true,
            ..Options::default()
        },
    )
    .unwrap();
    assert!(kept.content.contains("body-text"));

    let stripped = parse_with_options(&html, "https://example.com/", Options::default()).unwrap();
    assert!(!stripped.content.contains("body-text"));
}

#[test]
fn classes_to_preserve_keeps_listed_classes() {
    let html = article_html(5).replace("<p>", r#"<p class="notice">"#);
    let options = Options {
        classes_to_preserve: vec!["notice".to_string()],
        ..Options::default()
    };
    let article = parse_with_options(&html, "https://example.com/", options).unwrap();
    assert!(article.content.contains("notice"));
}

#[test]
fn disable_json_ld_skips_structured_metadata() {
    let html = article_html(5).replace(
        "<body>",
        concat!(
            "<body>",
            r#"<script type="application/ld+json">"#,
            r#"{"@context":"https://schema.org","@type":"Article","headline":"LD Title"}"#,
            "</script>",
        ),
    );
    let options = Options {
        disable_json_ld: true,
        ..Options::default()
    };
    let article = parse_with_options(&html, "https://example.com/", options).unwrap();
    assert_ne!(article.title, "LD Title");
}

struct OuterHtmlSerializer;

impl Serializer for OuterHtmlSerializer {
    fn serialize(&self, article: &NodeRef) -> String {
        dom::outer_html(article).to_string()
    }
}

#[test]
fn custom_serializer_is_used() {
    let options = Options {
        serializer: Arc::new(OuterHtmlSerializer),
        ..Options::default()
    };
    let article = parse_with_options(&article_html(5), "https://example.com/", options).unwrap();
    // The default serializer emits inner HTML, which starts with the page
    // div and its attributes; the custom one includes the bare container.
    assert!(article.content.starts_with("<div>"));
    assert!(article.content.contains("readability-page-1"));
}

struct UppercaseText;

impl HtmlToText for UppercaseText {
    fn convert(&self, html: &str) -> String {
        html.chars().filter(|c| !c.is_ascii_punctuation()).collect::<String>().to_uppercase()
    }
}

#[test]
fn html_to_text_override_feeds_text_content() {
    let options = Options {
        html_to_text: Some(Arc::new(UppercaseText)),
        ..Options::default()
    };
    let article = parse_with_options(&article_html(5), "https://example.com/", options).unwrap();
    assert!(article.text_content.contains("READABLE PROSE"));
    assert_eq!(article.length, article.text_content.chars().count());
}

#[test]
fn custom_video_regex_controls_embed_survival() {
    let html = article_html(5).replace(
        "</article>",
        r#"<iframe src="https://videos.partner.example/clip/9"></iframe></article>"#,
    );

    let default_result =
        parse_with_options(&html, "https://example.com/", Options::default()).unwrap();
    assert!(!default_result.content.contains("iframe"));

    let options = Options {
        allowed_video_regex: Some(regex::Regex::new(r"videos\.partner\.example").unwrap()),
        ..Options::default()
    };
    let custom_result = parse_with_options(&html, "https://example.com/", options).unwrap();
    assert!(custom_result.content.contains("iframe"));
}
