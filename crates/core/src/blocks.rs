//! Classification of a content slide's body into tables, lists,
//! paragraphs and screenshot placeholders.

use crate::inline::parse_screenshot_placeholder;
use crate::types::{Bullet, ContentBlock, ListMarker, Table};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Blocks are separated by one or more blank lines.
static BLOCK_SPLIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());

static TABLE_ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\|.+\|").unwrap());

/// Header separator rows such as `|---|:--:|`.
static TABLE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:]+\|").unwrap());

static LIST_START_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[-*\d]").unwrap());

static INDENTED_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+[-*]").unwrap());

static CHECKBOX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*\[([ xX])\]\s*").unwrap());

static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+").unwrap());

static NUMBERED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

/// The parsed body of a content slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideBody {
    /// Content blocks in source order.
    pub blocks: Vec<ContentBlock>,

    /// Screenshot placeholder descriptions in source order.
    pub placeholders: Vec<String>,
}

impl SlideBody {
    /// Parse the markdown body that follows a slide heading.
    pub fn parse(content: &str) -> Self {
        let mut body = Self::default();

        for block in BLOCK_SPLIT_REGEX.split(content) {
            let block = trim_block(block);
            if block.is_empty() {
                continue;
            }

            if let Some(description) =
                parse_screenshot_placeholder(block).filter(|d| !d.is_empty())
            {
                body.placeholders.push(description);
            } else if let Some(content_block) = classify_block(block) {
                body.blocks.push(content_block);
            } else {
                log::debug!("Dropping heading block: {}", block.lines().next().unwrap_or(""));
            }
        }

        body
    }

    /// Whether the slide needs the two-column layout.
    pub fn has_placeholders(&self) -> bool {
        !self.placeholders.is_empty()
    }
}

/// Drop leading blank lines and trailing whitespace, keeping the indentation
/// of the first line so list levels survive.
pub(crate) fn trim_block(block: &str) -> &str {
    let block = block.trim_end();
    let start = block
        .char_indices()
        .take_while(|(_, c)| c.is_whitespace())
        .filter(|(_, c)| *c == '\n')
        .last()
        .map(|(idx, _)| idx + 1)
        .unwrap_or(0);
    &block[start..]
}

/// Classify a single block. Heading blocks yield `None`.
fn classify_block(block: &str) -> Option<ContentBlock> {
    let text = block.trim();

    if text.contains('|') && TABLE_ROW_REGEX.is_match(text) {
        let table = parse_table(text);
        if !table.is_empty() {
            return Some(ContentBlock::Table(table));
        }
    }

    if LIST_START_REGEX.is_match(block) || INDENTED_LIST_REGEX.is_match(block) {
        let bullets = parse_bullets(block);
        if !bullets.is_empty() {
            return Some(ContentBlock::Bullets(bullets));
        }
    }

    if text.starts_with('#') {
        None
    } else {
        Some(ContentBlock::Paragraph(text.to_string()))
    }
}

/// Extract table rows from a markdown pipe table.
///
/// Only lines starting with `|` are considered; header separator rows are
/// skipped. Cells are trimmed.
pub fn parse_table(text: &str) -> Table {
    let mut rows = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if !line.starts_with('|') || TABLE_SEPARATOR_REGEX.is_match(line) {
            continue;
        }

        let pieces: Vec<&str> = line.split('|').collect();
        if pieces.len() < 2 {
            continue;
        }

        let cells: Vec<String> = pieces[1..pieces.len() - 1]
            .iter()
            .map(|cell| cell.trim().to_string())
            .collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    Table::new(rows)
}

/// Extract list items from markdown.
///
/// Recognizes `- [ ]`/`- [x]` checkboxes, `-`/`*` bullets and `1.` numbered
/// items. Indented items are level 1. Other lines are ignored.
pub fn parse_bullets(text: &str) -> Vec<Bullet> {
    let mut bullets = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        let level = if raw.len() > raw.trim_start().len() { 1 } else { 0 };

        if let Some(caps) = CHECKBOX_REGEX.captures(line) {
            let checked = !caps[1].trim().is_empty();
            let rest = &line[caps[0].len()..];
            bullets.push(Bullet::new(rest, level, ListMarker::Checkbox { checked }));
        } else if let Some(m) = BULLET_REGEX.find(line) {
            bullets.push(Bullet::new(&line[m.end()..], level, ListMarker::Dash));
        } else if let Some(m) = NUMBERED_REGEX.find(line) {
            bullets.push(Bullet::new(&line[m.end()..], level, ListMarker::Numbered));
        }
    }

    bullets
}
