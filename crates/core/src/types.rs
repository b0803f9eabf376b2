//! Domain types for representing parsed slide content.

use serde::{Deserialize, Serialize};

/// A slide recognized in the markdown source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideSpec {
    /// Opening slide built from a `**Title** *Subtitle*` pair.
    Title { title: String, subtitle: String },

    /// Section divider from `# SECTION N: NAME`.
    Section { number: String, title: String },

    /// Regular slide from `## Slide N: Title`, with its raw markdown body.
    Content { title: String, content: String },
}

impl SlideSpec {
    /// Get the kind of this slide.
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title { .. } => SlideKind::Title,
            Self::Section { .. } => SlideKind::Section,
            Self::Content { .. } => SlideKind::Content,
        }
    }

    /// Get the slide title (still carrying any inline markup).
    pub fn title(&self) -> &str {
        match self {
            Self::Title { title, .. } | Self::Section { title, .. } | Self::Content { title, .. } => {
                title
            }
        }
    }
}

/// The layout family a slide is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Section,
    Content,
}

impl SlideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Section => "section",
            Self::Content => "content",
        }
    }
}

/// A block of content inside a content slide body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A pipe table.
    Table(Table),

    /// A run of list items.
    Bullets(Vec<Bullet>),

    /// Free text, possibly spanning several lines.
    Paragraph(String),
}

/// Table rows parsed from a pipe table. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from parsed rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the header row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Get a cell, treating cells missing from short rows as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    /// Item text with the list marker removed.
    pub text: String,

    /// Nesting level: 0 for top-level items, 1 for indented ones.
    pub level: u8,

    /// How the item was marked in the source.
    pub marker: ListMarker,
}

impl Bullet {
    pub fn new(text: impl Into<String>, level: u8, marker: ListMarker) -> Self {
        Self {
            text: text.into(),
            level,
            marker,
        }
    }
}

/// The list marker an item was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMarker {
    /// `-` or `*`.
    Dash,
    /// `1.` style.
    Numbered,
    /// `- [ ]` or `- [x]`.
    Checkbox { checked: bool },
}
