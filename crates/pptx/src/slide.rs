//! A single slide under construction.

use crate::shapes::Shape;
use crate::xml::{relationships_xml, Relationship, XmlWriter, PRESENTATION_NAMESPACES};
use mdslides_core::Result;

pub const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Shapes and external links of one slide, in z-order.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    shapes: Vec<Shape>,
    hyperlinks: Vec<String>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the existing ones.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn hyperlinks(&self) -> &[String] {
        &self.hyperlinks
    }

    /// Register an external hyperlink and return its relationship id.
    ///
    /// `rId1` is reserved for the slide layout, so links start at `rId2`.
    /// Registering the same URL twice reuses the first id.
    pub fn add_hyperlink(&mut self, url: &str) -> String {
        let idx = match self.hyperlinks.iter().position(|u| u == url) {
            Some(idx) => idx,
            None => {
                self.hyperlinks.push(url.to_string());
                self.hyperlinks.len() - 1
            }
        };
        format!("rId{}", idx + 2)
    }

    /// Serialize the slide part.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start("p:sld", &PRESENTATION_NAMESPACES)?;
        xml.start("p:cSld", &[])?;
        xml.start("p:spTree", &[])?;

        write_shape_tree_root(&mut xml)?;

        for (idx, shape) in self.shapes.iter().enumerate() {
            shape.write_xml(&mut xml, idx as u32 + 2)?;
        }

        xml.end("p:spTree")?;
        xml.end("p:cSld")?;
        xml.start("p:clrMapOvr", &[])?;
        xml.empty("a:masterClrMapping", &[])?;
        xml.end("p:clrMapOvr")?;
        xml.end("p:sld")?;
        Ok(xml.into_bytes())
    }

    /// Serialize the slide's relationships part.
    pub fn rels_xml(&self) -> Result<Vec<u8>> {
        let mut rels = vec![Relationship::internal(
            "rId1",
            REL_SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        )];
        for (idx, url) in self.hyperlinks.iter().enumerate() {
            rels.push(Relationship::external(
                format!("rId{}", idx + 2),
                REL_HYPERLINK,
                url.as_str(),
            ));
        }
        relationships_xml(&rels)
    }
}

/// Write the non-visual and identity group properties that open a `p:spTree`.
pub(crate) fn write_shape_tree_root(xml: &mut XmlWriter) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.start("p:grpSpPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.end("a:xfrm")?;
    xml.end("p:grpSpPr")
}
