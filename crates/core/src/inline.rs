//! Inline markdown handling: emphasis, code, links, escapes and
//! screenshot placeholders.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static ITALIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\(.)").unwrap());

/// Stray emphasis markers left at the start of a line.
static LEADING_ASTERISKS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*{1,2}\s*").unwrap());

/// Stray emphasis markers left at the end of a line.
static TRAILING_ASTERISKS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\*{1,2}$").unwrap());

/// Single-pass tokenizer for the inline forms recognized above.
static INLINE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\*\*(?P<bold>.+?)\*\*|\*(?P<italic>.+?)\*|`(?P<code>.+?)`|\[(?P<ltext>.+?)\]\((?P<url>.+?)\)|\\(?P<esc>.)",
    )
    .unwrap()
});

/// Matches `📸 **[SCREENSHOT PLACEHOLDER]:** description`, tolerating
/// escaped brackets and missing emphasis.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"📸\s*\*{0,2}\\?\[?SCREENSHOT PLACEHOLDER\\?\]?\*{0,2}:\s*(.+)").unwrap()
});

/// A markdown link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// A run of inline text with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    /// Target URL when the span came from a `[text](url)` link.
    pub link: Option<String>,
}

impl InlineSpan {
    /// Create an unformatted span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the span carries any formatting.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.code && self.link.is_none()
    }
}

/// Remove emphasis, code, link and escape markup without trimming.
fn remove_markup(text: &str) -> String {
    let text = BOLD_REGEX.replace_all(text, "${1}");
    let text = ITALIC_REGEX.replace_all(&text, "${1}");
    let text = CODE_REGEX.replace_all(&text, "${1}");
    let text = LINK_REGEX.replace_all(&text, "${1}");
    ESCAPE_REGEX.replace_all(&text, "${1}").into_owned()
}

/// Remove markdown formatting, leaving plain text.
///
/// Link targets are dropped and only the link text is kept. Unbalanced
/// asterisks at either end of the text are removed as well.
pub fn strip_formatting(text: &str) -> String {
    let text = remove_markup(text);
    let text = LEADING_ASTERISKS_REGEX.replace(&text, "");
    let text = TRAILING_ASTERISKS_REGEX.replace(&text, "");
    text.trim().to_string()
}

/// Extract all `[text](url)` links from markdown text.
pub fn extract_links(text: &str) -> Vec<Link> {
    LINK_REGEX
        .captures_iter(text)
        .map(|caps| Link {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

/// Extract the description of a screenshot placeholder, if the text has one.
pub fn parse_screenshot_placeholder(text: &str) -> Option<String> {
    PLACEHOLDER_REGEX
        .captures(text)
        .map(|caps| strip_formatting(&caps[1]))
}

/// Split markdown text into formatted spans.
///
/// The spans' concatenated text matches what [`strip_formatting`] returns for
/// the same input; nested emphasis inside a span is flattened to plain text.
pub fn parse_spans(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_TOKEN_REGEX.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last {
            spans.push(InlineSpan::plain(&text[last..whole.start()]));
        }
        last = whole.end();

        let span = if let Some(m) = caps.name("bold") {
            InlineSpan {
                text: remove_markup(m.as_str()),
                bold: true,
                ..InlineSpan::default()
            }
        } else if let Some(m) = caps.name("italic") {
            InlineSpan {
                text: remove_markup(m.as_str()),
                italic: true,
                ..InlineSpan::default()
            }
        } else if let Some(m) = caps.name("code") {
            InlineSpan {
                text: m.as_str().to_string(),
                code: true,
                ..InlineSpan::default()
            }
        } else if let (Some(label), Some(url)) = (caps.name("ltext"), caps.name("url")) {
            InlineSpan {
                text: remove_markup(label.as_str()),
                link: Some(url.as_str().to_string()),
                ..InlineSpan::default()
            }
        } else if let Some(m) = caps.name("esc") {
            InlineSpan::plain(m.as_str())
        } else {
            continue;
        };
        spans.push(span);
    }

    if last < text.len() {
        spans.push(InlineSpan::plain(&text[last..]));
    }

    trim_span_edges(&mut spans);
    spans.retain(|s| !s.text.is_empty());
    spans
}

/// Apply the stray-asterisk and whitespace trimming of [`strip_formatting`]
/// to the outermost spans.
fn trim_span_edges(spans: &mut [InlineSpan]) {
    if let Some(first) = spans.first_mut() {
        let trimmed = LEADING_ASTERISKS_REGEX.replace(&first.text, "");
        first.text = trimmed.trim_start().to_string();
    }
    if let Some(last) = spans.last_mut() {
        let trimmed = TRAILING_ASTERISKS_REGEX.replace(&last.text, "");
        last.text = trimmed.trim_end().to_string();
    }
}

/// Concatenate span text.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bold_and_italic() {
        assert_eq!(strip_formatting("**Bold** and *italic*"), "Bold and italic");
        assert_eq!(strip_formatting("plain text"), "plain text");
    }

    #[test]
    fn test_strip_code_links_and_escapes() {
        assert_eq!(strip_formatting("Run `cargo` now"), "Run cargo now");
        assert_eq!(
            strip_formatting("See [the docs](https://example.com) first"),
            "See the docs first"
        );
        assert_eq!(strip_formatting(r"Costs \$5"), "Costs $5");
    }

    #[test]
    fn test_strip_stray_asterisks() {
        assert_eq!(strip_formatting("** dangling"), "dangling");
        assert_eq!(strip_formatting("dangling *"), "dangling");
        assert_eq!(strip_formatting("  spaced  "), "spaced");
    }

    #[test]
    fn test_extract_links() {
        let links = extract_links("[one](http://a.test) and [two](http://b.test)");
        assert_eq!(
            links,
            vec![
                Link {
                    text: "one".to_string(),
                    url: "http://a.test".to_string()
                },
                Link {
                    text: "two".to_string(),
                    url: "http://b.test".to_string()
                },
            ]
        );
        assert!(extract_links("no links").is_empty());
    }

    #[test]
    fn test_placeholder_variants() {
        assert_eq!(
            parse_screenshot_placeholder("📸 **[SCREENSHOT PLACEHOLDER]:** Login page"),
            Some("Login page".to_string())
        );
        assert_eq!(
            parse_screenshot_placeholder(r"📸 **\[SCREENSHOT PLACEHOLDER\]:** *Dashboard view*"),
            Some("Dashboard view".to_string())
        );
        assert_eq!(
            parse_screenshot_placeholder("📸 SCREENSHOT PLACEHOLDER: settings"),
            Some("settings".to_string())
        );
    }

    #[test]
    fn test_placeholder_absent() {
        assert_eq!(parse_screenshot_placeholder("SCREENSHOT PLACEHOLDER: x"), None);
        assert_eq!(parse_screenshot_placeholder("just text"), None);
    }

    #[test]
    fn test_spans_formatting() {
        let spans = parse_spans("**Bold** then *italic* and `code`");
        assert_eq!(spans.len(), 5);
        assert!(spans[0].bold);
        assert_eq!(spans[0].text, "Bold");
        assert!(spans[1].is_plain());
        assert!(spans[2].italic);
        assert_eq!(spans[3].text, " and ");
        assert!(spans[4].code);
        assert_eq!(spans[4].text, "code");
    }

    #[test]
    fn test_spans_links() {
        let spans = parse_spans("Read [the guide](https://example.com/guide).");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].text, "the guide");
        assert_eq!(spans[1].link.as_deref(), Some("https://example.com/guide"));
        assert_eq!(spans[2].text, ".");
    }

    #[test]
    fn test_spans_match_strip_formatting() {
        let inputs = [
            "**Bold** then *italic* and `code` with [link](http://x.test)",
            "  leading space and trailing  ",
            "** stray start",
            "Plain sentence.",
            "2 * 3 * 4",
        ];
        for input in inputs {
            assert_eq!(
                spans_text(&parse_spans(input)),
                strip_formatting(input),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_spans_empty() {
        assert!(parse_spans("").is_empty());
        assert!(parse_spans("   ").is_empty());
    }
}
