//! Small wrapper around `quick_xml::Writer` for generating OOXML parts.

use mdslides_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub const NS_TABLE: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// Namespace declarations shared by presentation parts.
pub const PRESENTATION_NAMESPACES: [(&str, &str); 3] = [
    ("xmlns:a", NS_DRAWING),
    ("xmlns:r", NS_RELATIONSHIPS),
    ("xmlns:p", NS_PRESENTATION),
];

/// Streaming XML writer producing an in-memory part.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Create a writer that starts with the standalone XML declaration.
    pub fn new() -> Result<Self> {
        let mut inner = Writer::new(Vec::with_capacity(4096));
        inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        Ok(Self { inner })
    }

    /// Write an opening tag.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for &attr in attrs {
            elem.push_attribute(attr);
        }
        self.inner.write_event(Event::Start(elem)).map_err(xml_error)
    }

    /// Write a self-closing tag.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for &attr in attrs {
            elem.push_attribute(attr);
        }
        self.inner.write_event(Event::Empty(elem)).map_err(xml_error)
    }

    /// Write a closing tag.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    /// Write escaped character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.inner
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)
    }

    /// Write pre-escaped markup verbatim.
    pub fn raw(&mut self, markup: &str) -> Result<()> {
        self.inner
            .write_event(Event::Text(BytesText::from_escaped(markup)))
            .map_err(xml_error)
    }

    /// Write `<name attrs>text</name>`.
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Write `<a:solidFill><a:srgbClr val=".."/></a:solidFill>`.
    pub fn solid_fill(&mut self, hex: &str) -> Result<()> {
        self.start("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", hex)])?;
        self.end("a:solidFill")
    }

    /// Finish and return the serialized bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

fn xml_error(e: quick_xml::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// A single `Relationship` entry of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

impl Relationship {
    pub fn internal(id: impl Into<String>, rel_type: &str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.to_string(),
            target: target.into(),
            external: false,
        }
    }

    pub fn external(id: impl Into<String>, rel_type: &str, target: impl Into<String>) -> Self {
        Self {
            external: true,
            ..Self::internal(id, rel_type, target)
        }
    }
}

/// Serialize a relationships part.
pub fn relationships_xml(rels: &[Relationship]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;
    for rel in rels {
        let mut attrs = vec![
            ("Id", rel.id.as_str()),
            ("Type", rel.rel_type.as_str()),
            ("Target", rel.target.as_str()),
        ];
        if rel.external {
            attrs.push(("TargetMode", "External"));
        }
        xml.empty("Relationship", &attrs)?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}
