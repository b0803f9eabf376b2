//! Markdown slide parser.
//!
//! Splits a document on `---` separators and classifies each section as a
//! title, section divider or content slide. Sections that match none of the
//! slide forms (document headers, notes) are skipped.
//!
//! ```text
//! # Document Title           -> skipped
//! ---
//! Title Slide
//! **Deck Title** *Subtitle*  -> title slide
//! ---
//! # SECTION 1: Basics        -> section divider
//! ---
//! ## Slide 1: Overview       -> content slide
//! - item
//! ```

use crate::blocks::trim_block;
use crate::normalize::normalize_source;
use crate::types::SlideSpec;
use regex::Regex;
use std::sync::LazyLock;

static SLIDE_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n---\n").unwrap());

/// `# SECTION N: NAME`, optionally followed by a `(N slides)` annotation.
static SECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\A#\s+SECTION\s+(\d+):\s+(.+?)(?:\s+\(\d+\s+slides?\))?$").unwrap()
});

static CONTENT_SLIDE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\A##\s+Slide\s+\d+:\s+(.+)$").unwrap());

/// `**Title** *Subtitle*` pair used on the title slide.
static TITLE_PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*\s*\*(.+?)\*").unwrap());

/// Marker text a section must contain to be treated as the title slide.
const TITLE_SLIDE_MARKER: &str = "Title Slide";

/// Parser turning markdown source into slide descriptions.
#[derive(Debug, Clone)]
pub struct SlideParser {
    /// Whether to normalize line endings and Unicode composition first.
    normalize: bool,
}

impl Default for SlideParser {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl SlideParser {
    /// Create a parser with source normalization enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the source is normalized before parsing.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Parse markdown into slides, in source order.
    pub fn parse(&self, text: &str) -> Vec<SlideSpec> {
        let source = if self.normalize {
            normalize_source(text)
        } else {
            text.to_string()
        };

        let mut slides = Vec::new();

        for (idx, section) in SLIDE_SEPARATOR_REGEX.split(&source).enumerate() {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }

            match classify_section(section) {
                Some(slide) => {
                    log::debug!(
                        "Section {} -> {} slide: {}",
                        idx + 1,
                        slide.kind().as_str(),
                        slide.title()
                    );
                    slides.push(slide);
                }
                None => {
                    log::debug!(
                        "Section {} skipped: {}",
                        idx + 1,
                        section.lines().next().unwrap_or("")
                    );
                }
            }
        }

        slides
    }
}

/// Parse markdown into slides using the default parser settings.
pub fn parse_markdown(text: &str) -> Vec<SlideSpec> {
    SlideParser::new().parse(text)
}

/// Classify one trimmed section. Returns `None` for sections that are not
/// slides.
fn classify_section(section: &str) -> Option<SlideSpec> {
    if let Some(caps) = SECTION_REGEX.captures(section) {
        return Some(SlideSpec::Section {
            number: caps[1].to_string(),
            title: caps[2].trim().to_string(),
        });
    }

    if let Some(caps) = CONTENT_SLIDE_REGEX.captures(section) {
        let heading_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        return Some(SlideSpec::Content {
            title: caps[1].trim().to_string(),
            content: trim_block(&section[heading_end..]).to_string(),
        });
    }

    if section.contains(TITLE_SLIDE_MARKER) {
        if let Some(caps) = TITLE_PAIR_REGEX.captures(section) {
            return Some(SlideSpec::Title {
                title: caps[1].trim().to_string(),
                subtitle: caps[2].trim().to_string(),
            });
        }
    }

    None
}
