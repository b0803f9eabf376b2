//! Fixed slide layouts.
//!
//! Every position here is a constant; content never resizes or reflows the
//! shapes. Vertical stacking on content slides uses rough per-block height
//! estimates.

use crate::palette::{Palette, Rgb};
use crate::shapes::{
    Align, BulletMark, Frame, Outline, Paragraph, Rectangle, RunStyle, TableCell, TableShape,
    TextBox,
};
use crate::slide::Slide;
use crate::units::{font_size, inches, Emu, SlideSize};
use mdslides_core::{
    parse_spans, strip_formatting, Bullet, ContentBlock, ListMarker, SlideBody, Table,
};

/// Left edge shared by all text columns.
const MARGIN_LEFT: f64 = 0.5;
/// Width of titles and of the single-column body.
const FULL_WIDTH: f64 = 9.0;

const HEADER_BAR_HEIGHT: f64 = 0.7;
const BODY_TOP: f64 = 0.9;

const TWO_COLUMN_TEXT_WIDTH: f64 = 5.2;
const PLACEHOLDER_LEFT: f64 = 5.9;
const PLACEHOLDER_WIDTH: f64 = 3.8;
const PLACEHOLDER_AREA_HEIGHT: f64 = 4.5;
const PLACEHOLDER_MAX_HEIGHT: f64 = 3.5;
const PLACEHOLDER_GAP: f64 = 0.15;
const PLACEHOLDER_TEXT_INSET: f64 = 0.15;

const TABLE_ROW_HEIGHT: f64 = 0.35;
const TABLE_GAP: f64 = 0.2;
const BULLET_BOX_HEIGHT: f64 = 3.0;
const BULLET_LINE_HEIGHT: f64 = 0.25;
const BULLET_GAP: f64 = 0.15;
const TEXT_BOX_HEIGHT: f64 = 1.0;
const TEXT_LINE_HEIGHT: f64 = 0.2;
const TEXT_GAP: f64 = 0.1;
/// Characters assumed to fit on one line of body text.
const TEXT_CHARS_PER_LINE: usize = 100;

/// Horizontal extent of a column of stacked blocks.
#[derive(Debug, Clone, Copy)]
struct Column {
    left: Emu,
    width: Emu,
}

/// Builds slides for the four layouts using one palette and slide size.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    palette: &'a Palette,
    size: SlideSize,
}

impl<'a> Layout<'a> {
    pub fn new(palette: &'a Palette, size: SlideSize) -> Self {
        Self { palette, size }
    }

    /// Title slide: dark background, large centered title and optional
    /// subtitle.
    pub fn title_slide(&self, title: &str, subtitle: &str) -> Slide {
        let mut slide = Slide::new();
        self.add_background(&mut slide, self.palette.navy);

        let title_style = RunStyle::new(font_size(42.0), self.palette.white).bold(true);
        slide.add_shape(
            TextBox::new(frame(MARGIN_LEFT, 2.0, FULL_WIDTH, 1.0)).with_paragraph(
                Paragraph::with_text(&strip_formatting(title), title_style).aligned(Align::Center),
            ),
        );

        if !subtitle.is_empty() {
            let subtitle_style = RunStyle::new(font_size(22.0), self.palette.silver);
            slide.add_shape(
                TextBox::new(frame(MARGIN_LEFT, 3.2, FULL_WIDTH, 0.6)).with_paragraph(
                    Paragraph::with_text(&strip_formatting(subtitle), subtitle_style)
                        .aligned(Align::Center),
                ),
            );
        }

        slide
    }

    /// Section divider: `SECTION n` label above the section title.
    pub fn section_slide(&self, number: &str, title: &str) -> Slide {
        let mut slide = Slide::new();
        self.add_background(&mut slide, self.palette.navy);

        let label_style = RunStyle::new(font_size(14.0), self.palette.silver);
        slide.add_shape(
            TextBox::new(frame(MARGIN_LEFT, 1.8, FULL_WIDTH, 0.4)).with_paragraph(
                Paragraph::with_text(&format!("SECTION {}", number), label_style)
                    .aligned(Align::Center),
            ),
        );

        let title_style = RunStyle::new(font_size(36.0), self.palette.white).bold(true);
        slide.add_shape(
            TextBox::new(frame(MARGIN_LEFT, 2.3, FULL_WIDTH, 0.8)).with_paragraph(
                Paragraph::with_text(&strip_formatting(title), title_style).aligned(Align::Center),
            ),
        );

        slide
    }

    /// Content slide: header bar with title, then tables, lists and
    /// paragraphs stacked top to bottom. Screenshot placeholders switch the
    /// slide to two columns with the placeholders on the right.
    pub fn content_slide(&self, title: &str, content: &str) -> Slide {
        let body = SlideBody::parse(content);
        let mut slide = Slide::new();

        self.add_background(&mut slide, self.palette.off_white);
        slide.add_shape(Rectangle {
            frame: Frame::new(0, 0, self.size.width, inches(HEADER_BAR_HEIGHT)),
            fill: self.palette.navy,
            outline: Outline::None,
        });

        let title_style = RunStyle::new(font_size(22.0), self.palette.white).bold(true);
        slide.add_shape(
            TextBox::new(frame(MARGIN_LEFT, 0.15, FULL_WIDTH, 0.5))
                .with_paragraph(Paragraph::with_text(&strip_formatting(title), title_style)),
        );

        let column = Column {
            left: inches(MARGIN_LEFT),
            width: if body.has_placeholders() {
                inches(TWO_COLUMN_TEXT_WIDTH)
            } else {
                inches(FULL_WIDTH)
            },
        };

        log::debug!(
            "Content slide '{}': {} blocks, {} placeholders",
            title,
            body.blocks.len(),
            body.placeholders.len()
        );

        let mut y = inches(BODY_TOP);
        for block in &body.blocks {
            y = match block {
                ContentBlock::Table(table) => self.add_table(&mut slide, table, y, column),
                ContentBlock::Bullets(bullets) => self.add_bullets(&mut slide, bullets, y, column),
                ContentBlock::Paragraph(text) => self.add_text(&mut slide, text, y, column),
            };
        }

        if body.has_placeholders() {
            let slot = (inches(PLACEHOLDER_AREA_HEIGHT) / body.placeholders.len() as Emu)
                .min(inches(PLACEHOLDER_MAX_HEIGHT));
            let mut placeholder_y = inches(BODY_TOP);

            for description in &body.placeholders {
                let area = Frame::new(
                    inches(PLACEHOLDER_LEFT),
                    placeholder_y,
                    inches(PLACEHOLDER_WIDTH),
                    slot - inches(PLACEHOLDER_GAP),
                );
                self.add_placeholder(&mut slide, description, area);
                placeholder_y += slot;
            }
        }

        slide
    }

    fn add_background(&self, slide: &mut Slide, color: Rgb) {
        slide.add_shape(Rectangle {
            frame: Frame::new(0, 0, self.size.width, self.size.height),
            fill: color,
            outline: Outline::None,
        });
    }

    /// Add a table with a highlighted header row. Returns the next free y.
    fn add_table(&self, slide: &mut Slide, table: &Table, y: Emu, column: Column) -> Emu {
        let height = inches(TABLE_ROW_HEIGHT * table.row_count() as f64);
        let columns = table.column_count();

        let rows: Vec<Vec<TableCell>> = (0..table.row_count())
            .map(|row| {
                let header = row == 0;
                let style = if header {
                    RunStyle::new(font_size(11.0), self.palette.white).bold(true)
                } else {
                    RunStyle::new(font_size(11.0), self.palette.navy)
                };

                (0..columns)
                    .map(|col| TableCell {
                        paragraph: self.rich_paragraph(slide, table.cell(row, col), style.clone()),
                        fill: header.then_some(self.palette.slate),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        slide.add_shape(TableShape {
            frame: Frame::new(column.left, y, column.width, height),
            columns,
            rows,
        });

        y + height + inches(TABLE_GAP)
    }

    /// Add a list as one text box. Returns the next free y.
    fn add_bullets(&self, slide: &mut Slide, bullets: &[Bullet], y: Emu, column: Column) -> Emu {
        let style = RunStyle::new(font_size(14.0), self.palette.navy);
        let mut text_box =
            TextBox::new(Frame::new(column.left, y, column.width, inches(BULLET_BOX_HEIGHT)))
                .wrapped();

        for bullet in bullets {
            let mut paragraph = self.rich_paragraph(slide, &bullet.text, style.clone());
            paragraph.level = bullet.level;
            paragraph.bullet = Some(bullet_mark(bullet));
            text_box.paragraphs.push(paragraph);
        }
        slide.add_shape(text_box);

        y + inches(BULLET_LINE_HEIGHT * bullets.len() as f64) + inches(BULLET_GAP)
    }

    /// Add a paragraph of body text. Returns the next free y.
    fn add_text(&self, slide: &mut Slide, text: &str, y: Emu, column: Column) -> Emu {
        let style = RunStyle::new(font_size(14.0), self.palette.navy);
        let paragraph = self.rich_paragraph(slide, text, style);
        slide.add_shape(
            TextBox::new(Frame::new(column.left, y, column.width, inches(TEXT_BOX_HEIGHT)))
                .wrapped()
                .with_paragraph(paragraph),
        );

        let lines = text.chars().count() / TEXT_CHARS_PER_LINE + 1;
        y + inches(TEXT_LINE_HEIGHT * lines as f64) + inches(TEXT_GAP)
    }

    /// Add a dashed placeholder box with a centered caption.
    fn add_placeholder(&self, slide: &mut Slide, description: &str, area: Frame) {
        slide.add_shape(Rectangle {
            frame: area,
            fill: self.palette.placeholder_fill,
            outline: Outline::Dashed(self.palette.silver),
        });

        let style = RunStyle::new(font_size(10.0), self.palette.slate).italic(true);
        let caption = format!("[IMAGE]\n{}", description);
        slide.add_shape(
            TextBox::new(area.inset(inches(PLACEHOLDER_TEXT_INSET)))
                .wrapped()
                .with_paragraph(Paragraph::with_text(&caption, style).aligned(Align::Center)),
        );
    }

    /// Build a paragraph from inline markdown, registering link targets on
    /// the slide.
    fn rich_paragraph(&self, slide: &mut Slide, text: &str, base: RunStyle) -> Paragraph {
        let mut paragraph = Paragraph {
            end_style: base.clone(),
            ..Paragraph::default()
        };

        for span in parse_spans(text) {
            if span.is_plain() {
                paragraph.push_text(&span.text, &base);
                continue;
            }
            let mut style = base.clone();
            style.bold |= span.bold;
            style.italic |= span.italic;
            style.monospace = span.code;
            if let Some(url) = &span.link {
                style.hyperlink = Some(slide.add_hyperlink(url));
            }
            paragraph.push_text(&span.text, &style);
        }

        paragraph
    }
}

fn frame(left: f64, top: f64, width: f64, height: f64) -> Frame {
    Frame::new(inches(left), inches(top), inches(width), inches(height))
}

fn bullet_mark(bullet: &Bullet) -> BulletMark {
    match bullet.marker {
        ListMarker::Numbered => BulletMark::AutoNumber,
        ListMarker::Checkbox { checked: true } => BulletMark::Char('☑'),
        ListMarker::Checkbox { checked: false } => BulletMark::Char('☐'),
        ListMarker::Dash if bullet.level > 0 => BulletMark::Char('–'),
        ListMarker::Dash => BulletMark::Char('•'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Run, Shape};

    fn layout(palette: &Palette) -> Layout<'_> {
        Layout::new(palette, SlideSize::widescreen())
    }

    fn text_of(shape: &Shape) -> String {
        match shape {
            Shape::TextBox(t) => t
                .paragraphs
                .iter()
                .map(Paragraph::text)
                .collect::<Vec<_>>()
                .join("\n"),
            _ => panic!("not a text box: {:?}", shape),
        }
    }

    #[test]
    fn test_title_slide() {
        let palette = Palette::default();
        let slide = layout(&palette).title_slide("**Quarterly Review**", "Q3 results");

        assert_eq!(slide.shapes().len(), 3);
        assert_eq!(slide.shapes()[0].frame(), Frame::new(0, 0, 9_144_000, 5_143_500));
        assert_eq!(text_of(&slide.shapes()[1]), "Quarterly Review");
        assert_eq!(slide.shapes()[1].frame(), frame(0.5, 2.0, 9.0, 1.0));
        assert_eq!(text_of(&slide.shapes()[2]), "Q3 results");
    }

    #[test]
    fn test_title_slide_without_subtitle() {
        let palette = Palette::default();
        let slide = layout(&palette).title_slide("Only a title", "");
        assert_eq!(slide.shapes().len(), 2);
    }

    #[test]
    fn test_section_slide() {
        let palette = Palette::default();
        let slide = layout(&palette).section_slide("4", "Deployment");

        assert_eq!(slide.shapes().len(), 3);
        assert_eq!(text_of(&slide.shapes()[1]), "SECTION 4");
        assert_eq!(text_of(&slide.shapes()[2]), "Deployment");
        assert_eq!(slide.shapes()[2].frame(), frame(0.5, 2.3, 9.0, 0.8));
    }

    #[test]
    fn test_content_slide_stacks_blocks() {
        let palette = Palette::default();
        let slide = layout(&palette).content_slide("Status", "Hello\n\n- one\n- two\n\n| A | B |\n|---|---|\n| 1 | 2 |");
        let shapes = slide.shapes();

        // background, header bar, title, paragraph, list, table
        assert_eq!(shapes.len(), 6);
        assert_eq!(text_of(&shapes[2]), "Status");

        let paragraph = shapes[3].frame();
        assert_eq!(paragraph, Frame::new(457_200, 822_960, 8_229_600, 914_400));

        // 0.9in + 0.2in + 0.1in
        let list = shapes[4].frame();
        assert_eq!(list.top, 822_960 + 182_880 + 91_440);
        assert_eq!(list.height, inches(3.0));

        let table = shapes[5].frame();
        assert_eq!(
            table.top,
            list.top + inches(0.25 * 2.0) + inches(0.15)
        );
        assert_eq!(table.height, inches(0.35 * 2.0));
        assert!(matches!(&shapes[5], Shape::Table(t) if t.columns == 2 && t.rows.len() == 2));
    }

    #[test]
    fn test_long_paragraph_height_counts_characters() {
        let palette = Palette::default();
        // 250 two-byte characters: three estimated lines, not six
        let long = "é".repeat(250);
        let slide = layout(&palette).content_slide("Long", &format!("{}\n\n- after", long));
        let shapes = slide.shapes();

        assert_eq!(shapes[3].frame().top, inches(0.9));
        assert_eq!(
            shapes[4].frame().top,
            inches(0.9) + inches(0.2 * 3.0) + inches(0.1)
        );
    }

    #[test]
    fn test_table_ignores_cells_beyond_header() {
        let palette = Palette::default();
        let slide = layout(&palette).content_slide("T", "| A | B |\n|---|---|\n| 1 | 2 | 3 |");

        let Shape::Table(table) = &slide.shapes()[3] else {
            panic!("expected table");
        };
        assert_eq!(table.columns, 2);
        assert!(table.rows.iter().all(|row| row.len() == 2));
        assert_eq!(table.rows[1][1].paragraph.text(), "2");
    }

    #[test]
    fn test_content_slide_with_placeholders() {
        let palette = Palette::default();
        let content = "Intro text\n\n📸 **[SCREENSHOT PLACEHOLDER]:** Home\n\n📸 **[SCREENSHOT PLACEHOLDER]:** Detail";
        let slide = layout(&palette).content_slide("Screens", content);
        let shapes = slide.shapes();

        // background, header, title, text, 2 x (box + caption)
        assert_eq!(shapes.len(), 8);
        assert_eq!(shapes[3].frame().width, inches(5.2));

        let first_box = shapes[4].frame();
        assert_eq!(first_box.left, inches(5.9));
        assert_eq!(first_box.top, inches(0.9));
        assert_eq!(first_box.width, inches(3.8));
        assert_eq!(first_box.height, 2_057_400 - 137_160);
        assert_eq!(text_of(&shapes[5]), "[IMAGE]\nHome");

        let second_box = shapes[6].frame();
        assert_eq!(second_box.top, inches(0.9) + 2_057_400);
    }

    #[test]
    fn test_single_placeholder_height_is_capped() {
        let palette = Palette::default();
        let slide = layout(&palette)
            .content_slide("One", "📸 SCREENSHOT PLACEHOLDER: only one");
        let placeholder = slide.shapes()[3].frame();
        assert_eq!(placeholder.height, inches(3.5) - inches(0.15));
    }

    #[test]
    fn test_bullet_markers_and_levels() {
        let palette = Palette::default();
        let slide = layout(&palette)
            .content_slide("List", "- top\n  - nested\n1. first\n- [x] done");

        let Shape::TextBox(text_box) = &slide.shapes()[3] else {
            panic!("expected list text box");
        };
        let marks: Vec<_> = text_box.paragraphs.iter().map(|p| p.bullet.clone()).collect();
        assert_eq!(
            marks,
            vec![
                Some(BulletMark::Char('•')),
                Some(BulletMark::Char('–')),
                Some(BulletMark::AutoNumber),
                Some(BulletMark::Char('☑')),
            ]
        );
        assert_eq!(text_box.paragraphs[1].level, 1);
        assert!(text_box.word_wrap);
    }

    #[test]
    fn test_inline_formatting_and_links() {
        let palette = Palette::default();
        let slide = layout(&palette).content_slide(
            "Links",
            "See **the guide** at [docs](https://example.com/docs) and [docs](https://example.com/docs).",
        );

        assert_eq!(slide.hyperlinks(), ["https://example.com/docs"]);

        let Shape::TextBox(text_box) = &slide.shapes()[3] else {
            panic!("expected paragraph text box");
        };
        let runs = &text_box.paragraphs[0].runs;
        let bold = runs.iter().any(|r| {
            matches!(r, Run::Text { text, style } if text == "the guide" && style.bold)
        });
        assert!(bold);
        let linked = runs
            .iter()
            .filter(|r| matches!(r, Run::Text { style, .. } if style.hyperlink.as_deref() == Some("rId2")))
            .count();
        assert_eq!(linked, 2);
    }

    #[test]
    fn test_table_header_styling() {
        let palette = Palette::default();
        let slide = layout(&palette).content_slide("T", "| Name | Role |\n|---|---|\n| Ada | Lead |");

        let Shape::Table(table) = &slide.shapes()[3] else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0][0].fill, Some(palette.slate));
        assert_eq!(table.rows[1][0].fill, None);
        let Run::Text { style, .. } = &table.rows[0][1].paragraph.runs[0] else {
            panic!("expected text run");
        };
        assert!(style.bold);
        assert_eq!(style.color, Some(palette.white));
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette {
            navy: Rgb::new(0x10, 0x20, 0x30),
            ..Palette::default()
        };
        let slide = layout(&palette).section_slide("1", "Intro");
        let Shape::Rectangle(background) = &slide.shapes()[0] else {
            panic!("expected background");
        };
        assert_eq!(background.fill, Rgb::new(0x10, 0x20, 0x30));
    }
}
