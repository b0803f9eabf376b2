//! Reading an existing .pptx as a template.
//!
//! Only the slide size and the theme are taken from the template; every slide
//! is still drawn with explicit shapes on the blank layout.

use crate::units::SlideSize;
use log::{debug, warn};
use mdslides_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const DEFAULT_THEME_PART: &str = "ppt/theme/theme1.xml";

/// Slide geometry and theme borrowed from an existing presentation.
#[derive(Debug, Clone)]
pub struct Template {
    slide_size: SlideSize,
    theme: Option<Vec<u8>>,
}

impl Template {
    /// Open a template from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening template {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a template from any seekable source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let presentation = read_file_from_archive(&mut archive, PRESENTATION_PART)?;
        let slide_size = parse_slide_size(&presentation)?.ok_or_else(|| {
            Error::TemplateError(format!("No p:sldSz element in {}", PRESENTATION_PART))
        })?;

        let theme_part = match read_file_from_archive(&mut archive, PRESENTATION_RELS_PART) {
            Ok(rels) => find_theme_part(&rels)?.unwrap_or_else(|| DEFAULT_THEME_PART.to_string()),
            Err(_) => DEFAULT_THEME_PART.to_string(),
        };
        let theme = match read_bytes_from_archive(&mut archive, &theme_part) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Template has no usable theme, using the default one: {}", e);
                None
            }
        };

        debug!(
            "Template slide size {}x{} EMU, theme {}",
            slide_size.width,
            slide_size.height,
            if theme.is_some() { theme_part.as_str() } else { "default" }
        );
        Ok(Self { slide_size, theme })
    }

    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    /// Raw bytes of the template's theme part, if it had one.
    pub fn theme(&self) -> Option<&[u8]> {
        self.theme.as_deref()
    }
}

/// Find `cx`/`cy` of `p:sldSz` in presentation.xml.
fn parse_slide_size(xml: &str) -> Result<Option<SlideSize>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                let mut width = None;
                let mut height = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value);
                    match attr.key.as_ref() {
                        b"cx" => width = value.trim().parse::<i64>().ok(),
                        b"cy" => height = value.trim().parse::<i64>().ok(),
                        _ => {}
                    }
                }
                return match (width, height) {
                    (Some(w), Some(h)) if w > 0 && h > 0 => Ok(Some(SlideSize::new(w, h))),
                    _ => Err(Error::TemplateError(
                        "p:sldSz has missing or invalid cx/cy".to_string(),
                    )),
                };
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }
}

/// Resolve the theme part targeted by presentation.xml.rels.
fn find_theme_part(rels_xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }
                if rel_type.ends_with("/theme") && !target.is_empty() {
                    let part = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("ppt/{}", target),
                    };
                    return Ok(Some(part));
                }
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }
}

fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

fn read_bytes_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn archive(parts: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    const PRESENTATION: &str = r#"<?xml version="1.0"?><p:presentation xmlns:p="p"><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sldSz"), b"sldSz");
        assert_eq!(local_name(b"Relationship"), b"Relationship");
    }

    #[test]
    fn test_parse_slide_size() {
        let size = parse_slide_size(PRESENTATION).unwrap().unwrap();
        assert_eq!(size, SlideSize::new(12192000, 6858000));
        assert!(parse_slide_size("<p:presentation/>").unwrap().is_none());
        assert!(parse_slide_size(r#"<p:sldSz cx="abc" cy="1"/>"#).is_err());
    }

    #[test]
    fn test_find_theme_part() {
        let rels = r#"<Relationships>
            <Relationship Id="rId1" Type="http://x/slideMaster" Target="slideMasters/slideMaster1.xml"/>
            <Relationship Id="rId2" Type="http://x/theme" Target="theme/theme7.xml"/>
        </Relationships>"#;
        assert_eq!(find_theme_part(rels).unwrap().as_deref(), Some("ppt/theme/theme7.xml"));

        let absolute = r#"<Relationships><Relationship Type="http://x/theme" Target="/ppt/theme/a.xml"/></Relationships>"#;
        assert_eq!(find_theme_part(absolute).unwrap().as_deref(), Some("ppt/theme/a.xml"));

        assert!(find_theme_part("<Relationships/>").unwrap().is_none());
    }

    #[test]
    fn test_template_reads_size_and_theme() {
        let cursor = archive(&[
            (PRESENTATION_PART, PRESENTATION),
            (DEFAULT_THEME_PART, "<a:theme name=\"Brand\"/>"),
        ]);
        let template = Template::from_reader(cursor).unwrap();
        assert_eq!(template.slide_size().width, 12192000);
        assert_eq!(template.theme(), Some("<a:theme name=\"Brand\"/>".as_bytes()));
    }

    #[test]
    fn test_template_without_theme() {
        let template = Template::from_reader(archive(&[(PRESENTATION_PART, PRESENTATION)])).unwrap();
        assert!(template.theme().is_none());
    }

    #[test]
    fn test_template_without_slide_size() {
        let cursor = archive(&[(PRESENTATION_PART, "<p:presentation/>")]);
        let err = Template::from_reader(cursor).unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_template_not_a_zip() {
        let err = Template::from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }
}
