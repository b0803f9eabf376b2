//! Presentation assembly and .pptx packaging.

use crate::layout::Layout;
use crate::palette::Palette;
use crate::parts;
use crate::slide::Slide;
use crate::template::Template;
use crate::units::SlideSize;
use log::{debug, info};
use mdslides_core::{strip_formatting, Error, Result, SlideSpec};
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A presentation being built slide by slide.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    palette: Palette,
    size: SlideSize,
    theme: Option<Vec<u8>>,
    title: Option<String>,
    slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty 16:9 deck with the default palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty deck using a template's slide size and theme.
    pub fn from_template(template: &Template) -> Self {
        Self {
            size: template.slide_size(),
            theme: template.theme().map(<[u8]>::to_vec),
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_slide_size(mut self, size: SlideSize) -> Self {
        self.size = size;
        self
    }

    pub fn slide_size(&self) -> SlideSize {
        self.size
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Render one parsed slide with the layout for its kind.
    pub fn add_slide(&mut self, spec: &SlideSpec) {
        match spec {
            SlideSpec::Title { title, subtitle } => self.add_title_slide(title, subtitle),
            SlideSpec::Section { number, title } => self.add_section_slide(number, title),
            SlideSpec::Content { title, content } => self.add_content_slide(title, content),
        }
    }

    pub fn add_title_slide(&mut self, title: &str, subtitle: &str) {
        if self.title.is_none() {
            self.title = Some(strip_formatting(title));
        }
        let slide = Layout::new(&self.palette, self.size).title_slide(title, subtitle);
        self.push(slide, "title");
    }

    pub fn add_section_slide(&mut self, number: &str, title: &str) {
        let slide = Layout::new(&self.palette, self.size).section_slide(number, title);
        self.push(slide, "section");
    }

    pub fn add_content_slide(&mut self, title: &str, content: &str) {
        let slide = Layout::new(&self.palette, self.size).content_slide(title, content);
        self.push(slide, "content");
    }

    fn push(&mut self, slide: Slide, kind: &str) {
        self.slides.push(slide);
        debug!("Added {} slide {}", kind, self.slides.len());
    }

    /// Write the complete package to `writer` and hand it back.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let count = self.slides.len();

        let theme = match &self.theme {
            Some(theme) => theme.clone(),
            None => parts::theme_xml(&self.palette)?,
        };

        let mut package: Vec<(String, Vec<u8>)> = vec![
            ("[Content_Types].xml".to_string(), parts::content_types_xml(count)?),
            ("_rels/.rels".to_string(), parts::root_rels_xml()?),
            ("docProps/core.xml".to_string(), parts::core_props_xml(self.title.as_deref())?),
            ("docProps/app.xml".to_string(), parts::app_props_xml(count)?),
            ("ppt/presentation.xml".to_string(), parts::presentation_xml(count, self.size)?),
            ("ppt/_rels/presentation.xml.rels".to_string(), parts::presentation_rels_xml(count)?),
            ("ppt/presProps.xml".to_string(), parts::pres_props_xml()?),
            ("ppt/viewProps.xml".to_string(), parts::view_props_xml()?),
            ("ppt/tableStyles.xml".to_string(), parts::table_styles_xml()?),
            ("ppt/theme/theme1.xml".to_string(), theme),
            ("ppt/slideMasters/slideMaster1.xml".to_string(), parts::slide_master_xml()?),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
                parts::slide_master_rels_xml()?,
            ),
            ("ppt/slideLayouts/slideLayout1.xml".to_string(), parts::slide_layout_xml()?),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
                parts::slide_layout_rels_xml()?,
            ),
        ];
        for (idx, slide) in self.slides.iter().enumerate() {
            package.push((parts::slide_part_name(idx + 1), slide.to_xml()?));
            package.push((parts::slide_rels_part_name(idx + 1), slide.rels_xml()?));
        }

        for (name, body) in &package {
            zip.start_file(name.as_str(), options).map_err(zip_error)?;
            zip.write_all(body)?;
        }

        let writer = zip.finish().map_err(zip_error)?;
        debug!("Wrote {} package parts for {} slides", package.len(), count);
        Ok(writer)
    }

    /// Serialize the package into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write the package to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = self.write(BufWriter::new(file))?;
        writer.flush()?;
        info!("Saved {} slides to {}", self.slides.len(), path.display());
        Ok(())
    }
}

fn zip_error(e: zip::result::ZipError) -> Error {
    Error::ZipError(e.to_string())
}
