//! Core domain types and markdown parsing for converting slide-oriented
//! markdown into PowerPoint decks.

pub mod blocks;
pub mod error;
pub mod inline;
pub mod normalize;
pub mod parser;
pub mod types;

pub use blocks::{parse_bullets, parse_table, SlideBody};
pub use error::{Error, Result};
pub use inline::{
    extract_links, parse_screenshot_placeholder, parse_spans, spans_text, strip_formatting,
    InlineSpan, Link,
};
pub use normalize::normalize_source;
pub use parser::{parse_markdown, SlideParser};
pub use types::{Bullet, ContentBlock, ListMarker, SlideKind, SlideSpec, Table};
