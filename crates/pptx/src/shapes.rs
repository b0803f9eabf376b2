//! Shape model for slides and its DrawingML serialization.

use crate::palette::Rgb;
use crate::units::Emu;
use crate::xml::{XmlWriter, NS_TABLE};
use mdslides_core::Result;

/// Built-in "Medium Style 2 - Accent 1" table style.
pub const DEFAULT_TABLE_STYLE: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

const MONOSPACE_TYPEFACE: &str = "Consolas";

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Frame {
    pub fn new(left: Emu, top: Emu, width: Emu, height: Emu) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Shrink the frame by `margin` on every side.
    pub fn inset(&self, margin: Emu) -> Self {
        Self::new(
            self.left + margin,
            self.top + margin,
            self.width - margin * 2,
            self.height - margin * 2,
        )
    }

    fn write_xfrm(&self, xml: &mut XmlWriter, tag: &str) -> Result<()> {
        xml.start(tag, &[])?;
        xml.empty(
            "a:off",
            &[("x", &self.left.to_string()), ("y", &self.top.to_string())],
        )?;
        xml.empty(
            "a:ext",
            &[("cx", &self.width.to_string()), ("cy", &self.height.to_string())],
        )?;
        xml.end(tag)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn as_attr(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }
}

/// Character formatting for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    /// Size in hundredths of a point.
    pub size: Option<u32>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
    pub monospace: bool,
    /// Relationship id of an external hyperlink.
    pub hyperlink: Option<String>,
}

impl RunStyle {
    pub fn new(size: u32, color: Rgb) -> Self {
        Self {
            size: Some(size),
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    fn write_props(&self, xml: &mut XmlWriter, tag: &str) -> Result<()> {
        let size = self.size.map(|s| s.to_string());
        let mut attrs = vec![("lang", "en-US")];
        if let Some(size) = size.as_deref() {
            attrs.push(("sz", size));
        }
        if self.bold {
            attrs.push(("b", "1"));
        }
        if self.italic {
            attrs.push(("i", "1"));
        }
        attrs.push(("dirty", "0"));

        let has_children = self.color.is_some() || self.monospace || self.hyperlink.is_some();
        if !has_children {
            return xml.empty(tag, &attrs);
        }

        xml.start(tag, &attrs)?;
        if let Some(color) = self.color {
            xml.solid_fill(&color.hex())?;
        }
        if self.monospace {
            xml.empty("a:latin", &[("typeface", MONOSPACE_TYPEFACE)])?;
        }
        if let Some(rel_id) = &self.hyperlink {
            xml.empty("a:hlinkClick", &[("r:id", rel_id)])?;
        }
        xml.end(tag)
    }
}

/// A piece of paragraph content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Text { text: String, style: RunStyle },
    Break { style: RunStyle },
}

/// Visible list marker of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulletMark {
    Char(char),
    AutoNumber,
}

/// A paragraph inside a text frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Option<Align>,
    pub level: u8,
    pub bullet: Option<BulletMark>,
    /// Formatting for the end-of-paragraph mark, which sets the height of an
    /// empty paragraph.
    pub end_style: RunStyle,
}

impl Paragraph {
    /// A paragraph holding a single run. Embedded newlines become line breaks.
    pub fn with_text(text: &str, style: RunStyle) -> Self {
        let mut paragraph = Self {
            end_style: style.clone(),
            ..Self::default()
        };
        paragraph.push_text(text, &style);
        paragraph
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Append text, turning newlines into line breaks.
    pub fn push_text(&mut self, text: &str, style: &RunStyle) {
        for (idx, line) in text.split(['\n', '\x0b']).enumerate() {
            if idx > 0 {
                self.runs.push(Run::Break {
                    style: style.clone(),
                });
            }
            if !line.is_empty() {
                self.runs.push(Run::Text {
                    text: line.to_string(),
                    style: style.clone(),
                });
            }
        }
    }

    /// Concatenated text, with breaks as newlines.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                Run::Text { text, .. } => text.as_str(),
                Run::Break { .. } => "\n",
            })
            .collect()
    }

    fn write_xml(&self, xml: &mut XmlWriter) -> Result<()> {
        xml.start("a:p", &[])?;
        self.write_props(xml)?;

        for run in &self.runs {
            match run {
                Run::Text { text, style } => {
                    xml.start("a:r", &[])?;
                    style.write_props(xml, "a:rPr")?;
                    xml.text_element("a:t", &[], text)?;
                    xml.end("a:r")?;
                }
                Run::Break { style } => {
                    xml.start("a:br", &[])?;
                    style.write_props(xml, "a:rPr")?;
                    xml.end("a:br")?;
                }
            }
        }

        let mut end_style = self.end_style.clone();
        end_style.hyperlink = None;
        end_style.write_props(xml, "a:endParaRPr")?;
        xml.end("a:p")
    }

    fn write_props(&self, xml: &mut XmlWriter) -> Result<()> {
        if self.align.is_none() && self.level == 0 && self.bullet.is_none() {
            return Ok(());
        }

        let level = self.level.to_string();
        let (margin, indent) = bullet_indent(self.level);
        let (margin, indent) = (margin.to_string(), indent.to_string());

        let mut attrs = Vec::new();
        if self.bullet.is_some() {
            attrs.push(("marL", margin.as_str()));
            attrs.push(("indent", indent.as_str()));
        }
        if self.level > 0 {
            attrs.push(("lvl", level.as_str()));
        }
        if let Some(align) = self.align {
            attrs.push(("algn", align.as_attr()));
        }

        match &self.bullet {
            None => xml.empty("a:pPr", &attrs),
            Some(mark) => {
                xml.start("a:pPr", &attrs)?;
                xml.empty("a:buFont", &[("typeface", "Arial")])?;
                match mark {
                    BulletMark::Char(c) => {
                        xml.empty("a:buChar", &[("char", &c.to_string())])?;
                    }
                    BulletMark::AutoNumber => {
                        xml.empty("a:buAutoNum", &[("type", "arabicPeriod")])?;
                    }
                }
                xml.end("a:pPr")
            }
        }
    }
}

/// Left margin and hanging indent for a bulleted paragraph at `level`.
fn bullet_indent(level: u8) -> (Emu, Emu) {
    let step = crate::units::points(18.0);
    (step * (Emu::from(level) + 1), -step)
}

/// A text box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    pub frame: Frame,
    pub word_wrap: bool,
    pub paragraphs: Vec<Paragraph>,
}

impl TextBox {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            word_wrap: false,
            paragraphs: Vec::new(),
        }
    }

    pub fn wrapped(mut self) -> Self {
        self.word_wrap = true;
        self
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }
}

/// Outline of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    None,
    Dashed(Rgb),
}

/// A filled rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub frame: Frame,
    pub fill: Rgb,
    pub outline: Outline,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub paragraph: Paragraph,
    pub fill: Option<Rgb>,
}

/// A table laid out with equal column widths and row heights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    pub frame: Frame,
    pub columns: usize,
    pub rows: Vec<Vec<TableCell>>,
}

/// A shape placed on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Rectangle(Rectangle),
    TextBox(TextBox),
    Table(TableShape),
}

impl Shape {
    pub fn frame(&self) -> Frame {
        match self {
            Self::Rectangle(r) => r.frame,
            Self::TextBox(t) => t.frame,
            Self::Table(t) => t.frame,
        }
    }

    /// Serialize as a `p:spTree` child with the given shape id.
    pub fn write_xml(&self, xml: &mut XmlWriter, id: u32) -> Result<()> {
        match self {
            Self::Rectangle(rect) => write_rectangle(xml, rect, id),
            Self::TextBox(text_box) => write_text_box(xml, text_box, id),
            Self::Table(table) => write_table(xml, table, id),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<TextBox> for Shape {
    fn from(text_box: TextBox) -> Self {
        Shape::TextBox(text_box)
    }
}

impl From<TableShape> for Shape {
    fn from(table: TableShape) -> Self {
        Shape::Table(table)
    }
}

fn write_non_visual(xml: &mut XmlWriter, id: u32, name: &str, text_box: bool) -> Result<()> {
    xml.start("p:nvSpPr", &[])?;
    xml.empty(
        "p:cNvPr",
        &[("id", &id.to_string()), ("name", &format!("{} {}", name, id - 1))],
    )?;
    if text_box {
        xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    } else {
        xml.empty("p:cNvSpPr", &[])?;
    }
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")
}

fn write_rect_geometry(xml: &mut XmlWriter) -> Result<()> {
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")
}

fn write_rectangle(xml: &mut XmlWriter, rect: &Rectangle, id: u32) -> Result<()> {
    xml.start("p:sp", &[])?;
    write_non_visual(xml, id, "Rectangle", false)?;

    xml.start("p:spPr", &[])?;
    rect.frame.write_xfrm(xml, "a:xfrm")?;
    write_rect_geometry(xml)?;
    xml.solid_fill(&rect.fill.hex())?;
    xml.start("a:ln", &[])?;
    match rect.outline {
        Outline::None => xml.empty("a:noFill", &[])?,
        Outline::Dashed(color) => {
            xml.solid_fill(&color.hex())?;
            xml.empty("a:prstDash", &[("val", "sysDash")])?;
        }
    }
    xml.end("a:ln")?;
    xml.end("p:spPr")?;

    xml.end("p:sp")
}

fn write_text_box(xml: &mut XmlWriter, text_box: &TextBox, id: u32) -> Result<()> {
    xml.start("p:sp", &[])?;
    write_non_visual(xml, id, "TextBox", true)?;

    xml.start("p:spPr", &[])?;
    text_box.frame.write_xfrm(xml, "a:xfrm")?;
    write_rect_geometry(xml)?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    let wrap = if text_box.word_wrap { "square" } else { "none" };
    xml.start("a:bodyPr", &[("wrap", wrap), ("rtlCol", "0")])?;
    xml.empty("a:spAutoFit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;
    if text_box.paragraphs.is_empty() {
        Paragraph::default().write_xml(xml)?;
    }
    for paragraph in &text_box.paragraphs {
        paragraph.write_xml(xml)?;
    }
    xml.end("p:txBody")?;

    xml.end("p:sp")
}

fn write_table(xml: &mut XmlWriter, table: &TableShape, id: u32) -> Result<()> {
    let columns = table.columns.max(1);
    let rows = table.rows.len().max(1);
    let col_width = table.frame.width / columns as Emu;
    let row_height = table.frame.height / rows as Emu;

    xml.start("p:graphicFrame", &[])?;
    xml.start("p:nvGraphicFramePr", &[])?;
    xml.empty(
        "p:cNvPr",
        &[("id", &id.to_string()), ("name", &format!("Table {}", id - 1))],
    )?;
    xml.start("p:cNvGraphicFramePr", &[])?;
    xml.empty("a:graphicFrameLocks", &[("noGrp", "1")])?;
    xml.end("p:cNvGraphicFramePr")?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGraphicFramePr")?;

    table.frame.write_xfrm(xml, "p:xfrm")?;

    xml.start("a:graphic", &[])?;
    xml.start("a:graphicData", &[("uri", NS_TABLE)])?;
    xml.start("a:tbl", &[])?;

    xml.start("a:tblPr", &[("firstRow", "1"), ("bandRow", "1")])?;
    xml.text_element("a:tableStyleId", &[], DEFAULT_TABLE_STYLE)?;
    xml.end("a:tblPr")?;

    xml.start("a:tblGrid", &[])?;
    let width = col_width.to_string();
    for _ in 0..columns {
        xml.empty("a:gridCol", &[("w", &width)])?;
    }
    xml.end("a:tblGrid")?;

    let height = row_height.to_string();
    for row in &table.rows {
        xml.start("a:tr", &[("h", &height)])?;
        for col in 0..columns {
            xml.start("a:tc", &[])?;
            xml.start("a:txBody", &[])?;
            xml.empty("a:bodyPr", &[])?;
            xml.empty("a:lstStyle", &[])?;
            match row.get(col) {
                Some(cell) => cell.paragraph.write_xml(xml)?,
                None => Paragraph::default().write_xml(xml)?,
            }
            xml.end("a:txBody")?;
            match row.get(col).and_then(|c| c.fill) {
                Some(fill) => {
                    xml.start("a:tcPr", &[])?;
                    xml.solid_fill(&fill.hex())?;
                    xml.end("a:tcPr")?;
                }
                None => xml.empty("a:tcPr", &[])?,
            }
            xml.end("a:tc")?;
        }
        xml.end("a:tr")?;
    }

    xml.end("a:tbl")?;
    xml.end("a:graphicData")?;
    xml.end("a:graphic")?;
    xml.end("p:graphicFrame")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &Shape) -> String {
        let mut xml = XmlWriter::new().unwrap();
        shape.write_xml(&mut xml, 2).unwrap();
        String::from_utf8(xml.into_bytes()).unwrap()
    }

    #[test]
    fn test_frame_inset() {
        let frame = Frame::new(100, 200, 1000, 500).inset(50);
        assert_eq!(frame, Frame::new(150, 250, 900, 400));
    }

    #[test]
    fn test_paragraph_line_breaks() {
        let style = RunStyle::new(1000, Rgb::new(0, 0, 0));
        let paragraph = Paragraph::with_text("[IMAGE]\nLogin page", style);
        assert_eq!(paragraph.runs.len(), 3);
        assert!(matches!(paragraph.runs[1], Run::Break { .. }));
        assert_eq!(paragraph.text(), "[IMAGE]\nLogin page");
    }

    #[test]
    fn test_rectangle_xml() {
        let shape = Shape::Rectangle(Rectangle {
            frame: Frame::new(0, 0, 10, 20),
            fill: Rgb::new(0x1C, 0x28, 0x33),
            outline: Outline::None,
        });
        let out = render(&shape);
        assert!(out.contains(r#"<p:cNvPr id="2" name="Rectangle 1"/>"#));
        assert!(out.contains(r#"<a:off x="0" y="0"/><a:ext cx="10" cy="20"/>"#));
        assert!(out.contains(r#"<a:solidFill><a:srgbClr val="1C2833"/></a:solidFill><a:ln><a:noFill/></a:ln>"#));
    }

    #[test]
    fn test_dashed_outline() {
        let shape = Shape::Rectangle(Rectangle {
            frame: Frame::new(0, 0, 10, 20),
            fill: Rgb::new(0xE8, 0xE8, 0xE8),
            outline: Outline::Dashed(Rgb::new(0xAA, 0xB7, 0xB8)),
        });
        let out = render(&shape);
        assert!(out.contains(r#"<a:prstDash val="sysDash"/>"#));
    }

    #[test]
    fn test_text_box_xml() {
        let style = RunStyle::new(4200, Rgb::new(0xFF, 0xFF, 0xFF)).bold(true);
        let shape = Shape::TextBox(
            TextBox::new(Frame::new(1, 2, 3, 4))
                .with_paragraph(Paragraph::with_text("Hello & welcome", style).aligned(Align::Center)),
        );
        let out = render(&shape);
        assert!(out.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(out.contains(r#"<a:bodyPr wrap="none" rtlCol="0">"#));
        assert!(out.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(out.contains(r#"<a:rPr lang="en-US" sz="4200" b="1" dirty="0">"#));
        assert!(out.contains("<a:t>Hello &amp; welcome</a:t>"));
    }

    #[test]
    fn test_bulleted_paragraph_props() {
        let mut paragraph = Paragraph::with_text("child", RunStyle::default());
        paragraph.level = 1;
        paragraph.bullet = Some(BulletMark::Char('–'));
        let shape = Shape::TextBox(TextBox::new(Frame::new(0, 0, 1, 1)).with_paragraph(paragraph));
        let out = render(&shape);
        assert!(out.contains(r#"<a:pPr marL="457200" indent="-228600" lvl="1">"#));
        assert!(out.contains(r#"<a:buChar char="–"/>"#));
    }

    #[test]
    fn test_hyperlink_run() {
        let style = RunStyle {
            hyperlink: Some("rId2".to_string()),
            ..RunStyle::default()
        };
        let paragraph = Paragraph::with_text("docs", style);
        let shape = Shape::TextBox(TextBox::new(Frame::new(0, 0, 1, 1)).with_paragraph(paragraph));
        let out = render(&shape);
        assert!(out.contains(r#"<a:hlinkClick r:id="rId2"/>"#));
        assert!(out.contains(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#));
    }

    #[test]
    fn test_table_xml() {
        let cell = |text: &str, fill: Option<Rgb>| TableCell {
            paragraph: Paragraph::with_text(text, RunStyle::default()),
            fill,
        };
        let shape = Shape::Table(TableShape {
            frame: Frame::new(0, 0, 900, 200),
            columns: 3,
            rows: vec![
                vec![cell("A", Some(Rgb::new(0x2E, 0x40, 0x53))), cell("B", None), cell("C", None)],
                vec![cell("1", None)],
            ],
        });
        let out = render(&shape);
        assert!(out.contains(r#"<a:gridCol w="300"/>"#));
        assert!(out.contains(r#"<a:tr h="100">"#));
        assert_eq!(out.matches("<a:tc>").count(), 6);
        assert!(out.contains(r#"<a:tcPr><a:solidFill><a:srgbClr val="2E4053"/></a:solidFill></a:tcPr>"#));
        assert!(out.contains(DEFAULT_TABLE_STYLE));
    }
}
