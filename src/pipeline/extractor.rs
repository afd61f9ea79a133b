//! Article field extraction from parsed HTML
//!
//! This module pulls structured fields (title, body text, author, publish
//! date, meta description) out of heterogeneous article markup. Every field
//! is resolved through an ordered list of selectors tried until the first
//! usable match; pages that match nothing fall back to fixed defaults, so
//! extraction never fails on malformed-but-parseable input.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};

/// Maximum stored length of the article title, in characters
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum stored length of the author field, in characters
pub const MAX_AUTHOR_LEN: usize = 100;
/// Maximum stored length of the publish date field, in characters
pub const MAX_DATE_LEN: usize = 50;
/// Maximum stored length of the meta description, in characters
pub const MAX_META_LEN: usize = 200;
/// Maximum stored length of the content preview, in characters
pub const MAX_PREVIEW_LEN: usize = 500;

/// Title candidates, highest priority first
const TITLE_SELECTORS: &[&str] = &["h1", "title", ".title", ".headline", ".entry-title"];

/// Article body containers, highest priority first
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".article",
    ".content",
    ".entry-content",
    ".post-content",
    ".article-body",
    ".story-body",
    ".main-content",
    "main",
    ".post-body",
];

/// Byline candidates, highest priority first
const AUTHOR_SELECTORS: &[&str] = &[
    ".author",
    ".byline",
    "[rel=\"author\"]",
    ".post-author",
    ".article-author",
    ".read__info",
];

/// Publish date candidates, highest priority first
const DATE_SELECTORS: &[&str] = &[
    "time",
    ".date",
    ".published",
    ".post-date",
    "[datetime]",
    ".read__time",
];

/// Elements whose subtrees carry no article text
const JUNK_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form",
];

/// Structured fields extracted from one article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFields {
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub meta_description: String,
    pub content_preview: String,
    pub word_count: usize,
}

/// Extracts article fields from a parsed document
///
/// Pure function over the document tree; performs no I/O and returns
/// defaults ("No Title" / "Unknown" / empty) for anything it cannot find.
/// All string fields come back truncated to their storage caps.
pub fn extract_article(document: &Html) -> ExtractionFields {
    let title = extract_title(document);
    let (content, word_count) = extract_content(document);
    let meta_description = extract_meta_description(document);
    let author = extract_author(document);
    let publish_date = extract_publish_date(document);

    ExtractionFields {
        title: truncate_chars(&title, MAX_TITLE_LEN),
        author: truncate_chars(&author, MAX_AUTHOR_LEN),
        publish_date: truncate_chars(&publish_date, MAX_DATE_LEN),
        meta_description: truncate_chars(&meta_description, MAX_META_LEN),
        content_preview: truncate_chars(&content, MAX_PREVIEW_LEN),
        word_count,
    }
}

/// Returns the first element matching any of the ordered selectors
fn select_first<'a>(document: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next())
}

fn extract_title(document: &Html) -> String {
    for raw in TITLE_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    "No Title".to_string()
}

/// Extracts the normalized article body text and its word count
///
/// Tries each content container in priority order; the whole `body` element
/// is the last resort. Junk subtrees are skipped during the text walk, all
/// whitespace runs collapse to single spaces.
fn extract_content(document: &Html) -> (String, usize) {
    let container = select_first(document, CONTENT_SELECTORS)
        .or_else(|| select_first(document, &["body"]));

    let raw = match container {
        Some(element) => {
            let mut out = String::new();
            collect_text(*element, &mut out);
            out
        }
        None => String::new(),
    };

    let words: Vec<&str> = raw.split_whitespace().collect();
    let word_count = words.len();
    (words.join(" "), word_count)
}

/// Appends the text of every non-junk descendant of `node` to `out`
fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(&text);
                out.push(' ');
            }
            Node::Element(element) => {
                if !is_junk(&element) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

fn is_junk(element: &Element) -> bool {
    JUNK_TAGS.contains(&element.name())
        || element.classes().any(|class| class == "ads")
        || element.id() == Some("comments")
}

fn extract_meta_description(document: &Html) -> String {
    select_first(document, &["meta[name=\"description\"]"])
        .and_then(|element| element.value().attr("content"))
        .unwrap_or("")
        .to_string()
}

fn extract_author(document: &Html) -> String {
    for raw in AUTHOR_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    "Unknown".to_string()
}

/// Resolves the publish date, preferring a machine-readable `datetime`
/// attribute over the element's visible text
fn extract_publish_date(document: &Html) -> String {
    for raw in DATE_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in document.select(&selector) {
            if let Some(datetime) = element.value().attr("datetime") {
                let datetime = datetime.trim();
                if !datetime.is_empty() {
                    return datetime.to_string();
                }
            }
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    "Unknown".to_string()
}

/// Truncates to at most `max` characters without splitting a code point
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((index, _)) => s[..index].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_title_prefers_h1() {
        let doc = parse(
            r#"<html><head><title>Page Title</title></head>
            <body><h1>Headline</h1></body></html>"#,
        );
        assert_eq!(extract_article(&doc).title, "Headline");
    }

    #[test]
    fn test_title_falls_back_to_title_tag() {
        let doc = parse(r#"<html><head><title>Page Title</title></head><body></body></html>"#);
        assert_eq!(extract_article(&doc).title, "Page Title");
    }

    #[test]
    fn test_title_falls_back_to_headline_class() {
        let doc = parse(r#"<html><body><div class="headline">Class Title</div></body></html>"#);
        assert_eq!(extract_article(&doc).title, "Class Title");
    }

    #[test]
    fn test_title_skips_empty_h1() {
        let doc = parse(
            r#"<html><head><title>Fallback</title></head><body><h1>  </h1></body></html>"#,
        );
        assert_eq!(extract_article(&doc).title, "Fallback");
    }

    #[test]
    fn test_missing_title_defaults() {
        let doc = parse(r#"<html><body><p>text</p></body></html>"#);
        assert_eq!(extract_article(&doc).title, "No Title");
    }

    #[test]
    fn test_content_from_article_element() {
        let doc = parse(
            r#"<html><body>
            <nav>menu items here</nav>
            <article>one two three</article>
            </body></html>"#,
        );
        let fields = extract_article(&doc);
        assert_eq!(fields.word_count, 3);
        assert_eq!(fields.content_preview, "one two three");
    }

    #[test]
    fn test_junk_subtrees_excluded() {
        let doc = parse(
            r#"<html><body><article>
            visible words
            <script>var hidden = "should not appear";</script>
            <style>.x { color: red }</style>
            <aside>sidebar junk</aside>
            <div class="ads">buy things</div>
            <div id="comments">comment text</div>
            more words
            </article></body></html>"#,
        );
        let fields = extract_article(&doc);
        assert_eq!(fields.content_preview, "visible words more words");
        assert_eq!(fields.word_count, 4);
    }

    #[test]
    fn test_content_falls_back_to_body() {
        let doc = parse(
            r#"<html><body>
            <nav>skip this</nav>
            <p>body fallback text</p>
            </body></html>"#,
        );
        let fields = extract_article(&doc);
        assert_eq!(fields.content_preview, "body fallback text");
        assert_eq!(fields.word_count, 3);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let doc = parse("<html><body><article>a\n\n  b\t\tc</article></body></html>");
        let fields = extract_article(&doc);
        assert_eq!(fields.content_preview, "a b c");
        assert_eq!(fields.word_count, 3);
    }

    #[test]
    fn test_meta_description() {
        let doc = parse(
            r#"<html><head><meta name="description" content="A summary."></head>
            <body></body></html>"#,
        );
        assert_eq!(extract_article(&doc).meta_description, "A summary.");
    }

    #[test]
    fn test_missing_meta_description_is_empty() {
        let doc = parse(r#"<html><body></body></html>"#);
        assert_eq!(extract_article(&doc).meta_description, "");
    }

    #[test]
    fn test_author_from_byline() {
        let doc = parse(r#"<html><body><span class="byline">Jane Doe</span></body></html>"#);
        assert_eq!(extract_article(&doc).author, "Jane Doe");
    }

    #[test]
    fn test_author_from_rel_attribute() {
        let doc = parse(r#"<html><body><a rel="author">J. Smith</a></body></html>"#);
        assert_eq!(extract_article(&doc).author, "J. Smith");
    }

    #[test]
    fn test_missing_author_defaults() {
        let doc = parse(r#"<html><body></body></html>"#);
        assert_eq!(extract_article(&doc).author, "Unknown");
    }

    #[test]
    fn test_publish_date_prefers_datetime_attribute() {
        let doc = parse(
            r#"<html><body><time datetime="2023-03-01T10:00:00">March 1st</time></body></html>"#,
        );
        assert_eq!(extract_article(&doc).publish_date, "2023-03-01T10:00:00");
    }

    #[test]
    fn test_publish_date_falls_back_to_text() {
        let doc = parse(r#"<html><body><span class="published">Yesterday</span></body></html>"#);
        assert_eq!(extract_article(&doc).publish_date, "Yesterday");
    }

    #[test]
    fn test_missing_publish_date_defaults() {
        let doc = parse(r#"<html><body></body></html>"#);
        assert_eq!(extract_article(&doc).publish_date, "Unknown");
    }

    #[test]
    fn test_title_truncated_to_cap() {
        let long = "t".repeat(400);
        let doc = parse(&format!("<html><body><h1>{}</h1></body></html>", long));
        assert_eq!(extract_article(&doc).title.chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_preview_truncation_respects_char_boundaries() {
        let long = "ä".repeat(600);
        let doc = parse(&format!("<html><body><article>{}</article></body></html>", long));
        let fields = extract_article(&doc);
        assert_eq!(fields.content_preview.chars().count(), MAX_PREVIEW_LEN);
    }

    #[test]
    fn test_word_count_not_capped_by_preview() {
        let body = "word ".repeat(300);
        let doc = parse(&format!("<html><body><article>{}</article></body></html>", body));
        let fields = extract_article(&doc);
        assert_eq!(fields.word_count, 300);
        assert!(fields.content_preview.chars().count() <= MAX_PREVIEW_LEN);
    }
}
