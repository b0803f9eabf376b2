//! Fixed package parts: content types, relationships, presentation, slide
//! master and layout, theme and document properties.

use crate::palette::Palette;
use crate::slide::{write_shape_tree_root, REL_SLIDE_LAYOUT};
use crate::units::SlideSize;
use crate::xml::{relationships_xml, Relationship, XmlWriter, NS_DRAWING, PRESENTATION_NAMESPACES};
use mdslides_core::Result;

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
pub const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Name recorded as the creating application.
pub const APPLICATION_NAME: &str = "md2pptx";

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

/// First id in `p:sldIdLst`; lower values are reserved.
const FIRST_SLIDE_ID: usize = 256;

/// Part name of the n-th slide (1-based).
pub fn slide_part_name(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// Part name of the n-th slide's relationships (1-based).
pub fn slide_rels_part_name(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

pub fn content_types_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let fixed = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/viewProps.xml", CT_VIEW_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/docProps/core.xml", CT_CORE_PROPERTIES),
        ("/docProps/app.xml", CT_EXTENDED_PROPERTIES),
    ];
    for (part, content_type) in fixed {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    for number in 1..=slide_count {
        let part = format!("/{}", slide_part_name(number));
        xml.empty("Override", &[("PartName", &part), ("ContentType", CT_SLIDE)])?;
    }

    xml.end("Types")?;
    Ok(xml.into_bytes())
}

pub fn root_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        Relationship::internal("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        Relationship::internal("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        Relationship::internal("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

pub fn presentation_xml(slide_count: usize, size: SlideSize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    let mut attrs = PRESENTATION_NAMESPACES.to_vec();
    attrs.push(("saveSubsetFonts", "1"));
    xml.start("p:presentation", &attrs)?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    if slide_count > 0 {
        xml.start("p:sldIdLst", &[])?;
        for idx in 0..slide_count {
            xml.empty(
                "p:sldId",
                &[
                    ("id", &(FIRST_SLIDE_ID + idx).to_string()),
                    ("r:id", &slide_rel_id(idx)),
                ],
            )?;
        }
        xml.end("p:sldIdLst")?;
    }

    xml.empty(
        "p:sldSz",
        &[("cx", &size.width.to_string()), ("cy", &size.height.to_string())],
    )?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    Ok(xml.into_bytes())
}

/// Relationship id of the slide at `idx` (0-based) in `presentation.xml.rels`.
fn slide_rel_id(idx: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + idx + 1)
}

pub fn presentation_rels_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![
        Relationship::internal("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        Relationship::internal("rId2", REL_THEME, "theme/theme1.xml"),
        Relationship::internal("rId3", REL_PRES_PROPS, "presProps.xml"),
        Relationship::internal("rId4", REL_VIEW_PROPS, "viewProps.xml"),
        Relationship::internal("rId5", REL_TABLE_STYLES, "tableStyles.xml"),
    ];
    for idx in 0..slide_count {
        rels.push(Relationship::internal(
            slide_rel_id(idx),
            REL_SLIDE,
            format!("slides/slide{}.xml", idx + 1),
        ));
    }
    relationships_xml(&rels)
}

fn write_empty_shape_tree(xml: &mut XmlWriter) -> Result<()> {
    xml.start("p:spTree", &[])?;
    write_shape_tree_root(xml)?;
    xml.end("p:spTree")
}

/// Slide master with no placeholders; slides draw all their own shapes.
pub fn slide_master_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("p:sldMaster", &PRESENTATION_NAMESPACES)?;

    xml.start("p:cSld", &[])?;
    xml.start("p:bg", &[])?;
    xml.start("p:bgRef", &[("idx", "1001")])?;
    xml.empty("a:schemeClr", &[("val", "bg1")])?;
    xml.end("p:bgRef")?;
    xml.end("p:bg")?;
    write_empty_shape_tree(&mut xml)?;
    xml.end("p:cSld")?;

    xml.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    xml.start("p:sldLayoutIdLst", &[])?;
    xml.empty("p:sldLayoutId", &[("id", "2147483649"), ("r:id", "rId1")])?;
    xml.end("p:sldLayoutIdLst")?;

    xml.start("p:txStyles", &[])?;
    for (style, size) in [("p:titleStyle", "4400"), ("p:bodyStyle", "1800"), ("p:otherStyle", "1800")] {
        xml.start(style, &[])?;
        xml.start("a:lvl1pPr", &[])?;
        xml.start("a:defRPr", &[("sz", size)])?;
        xml.start("a:solidFill", &[])?;
        xml.empty("a:schemeClr", &[("val", "tx1")])?;
        xml.end("a:solidFill")?;
        xml.empty("a:latin", &[("typeface", "+mn-lt")])?;
        xml.end("a:defRPr")?;
        xml.end("a:lvl1pPr")?;
        xml.end(style)?;
    }
    xml.end("p:txStyles")?;

    xml.end("p:sldMaster")?;
    Ok(xml.into_bytes())
}

pub fn slide_master_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        Relationship::internal("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        Relationship::internal("rId2", REL_THEME, "../theme/theme1.xml"),
    ])
}

/// The single blank layout every slide uses.
pub fn slide_layout_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    let mut attrs = PRESENTATION_NAMESPACES.to_vec();
    attrs.push(("type", "blank"));
    attrs.push(("preserve", "1"));
    xml.start("p:sldLayout", &attrs)?;
    xml.start("p:cSld", &[("name", "Blank")])?;
    write_empty_shape_tree(&mut xml)?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sldLayout")?;
    Ok(xml.into_bytes())
}

pub fn slide_layout_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[Relationship::internal(
        "rId1",
        REL_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml",
    )])
}

/// Font and format schemes of the generated theme.
const THEME_FONT_AND_FORMAT_SCHEMES: &str = concat!(
    r#"<a:fontScheme name="Office">"#,
    r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    r#"</a:fontScheme>"#,
    r#"<a:fmtScheme name="Office">"#,
    r#"<a:fillStyleLst>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill>"#,
    r#"</a:fillStyleLst>"#,
    r#"<a:lnStyleLst>"#,
    r#"<a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"</a:lnStyleLst>"#,
    r#"<a:effectStyleLst>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"</a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill>"#,
    r#"</a:bgFillStyleLst>"#,
    r#"</a:fmtScheme>"#,
);

/// Theme whose dark/light/accent colors follow the palette, so table styles
/// and scheme colors match the layouts.
pub fn theme_xml(palette: &Palette) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("a:theme", &[("xmlns:a", NS_DRAWING), ("name", "md2pptx")])?;
    xml.start("a:themeElements", &[])?;

    xml.start("a:clrScheme", &[("name", "md2pptx")])?;
    xml.start("a:dk1", &[])?;
    xml.empty("a:sysClr", &[("val", "windowText"), ("lastClr", "000000")])?;
    xml.end("a:dk1")?;
    xml.start("a:lt1", &[])?;
    xml.empty("a:sysClr", &[("val", "window"), ("lastClr", "FFFFFF")])?;
    xml.end("a:lt1")?;

    let scheme = [
        ("a:dk2", palette.navy.hex()),
        ("a:lt2", palette.off_white.hex()),
        ("a:accent1", palette.slate.hex()),
        ("a:accent2", palette.silver.hex()),
        ("a:accent3", "A5A5A5".to_string()),
        ("a:accent4", "FFC000".to_string()),
        ("a:accent5", "5B9BD5".to_string()),
        ("a:accent6", "70AD47".to_string()),
        ("a:hlink", "0563C1".to_string()),
        ("a:folHlink", "954F72".to_string()),
    ];
    for (slot, color) in &scheme {
        xml.start(slot, &[])?;
        xml.empty("a:srgbClr", &[("val", color)])?;
        xml.end(slot)?;
    }
    xml.end("a:clrScheme")?;

    xml.raw(THEME_FONT_AND_FORMAT_SCHEMES)?;
    xml.end("a:themeElements")?;
    xml.empty("a:objectDefaults", &[])?;
    xml.empty("a:extraClrSchemeLst", &[])?;
    xml.end("a:theme")?;
    Ok(xml.into_bytes())
}

pub fn pres_props_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty("p:presentationPr", &PRESENTATION_NAMESPACES)?;
    Ok(xml.into_bytes())
}

pub fn view_props_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty("p:viewPr", &PRESENTATION_NAMESPACES)?;
    Ok(xml.into_bytes())
}

pub fn table_styles_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.empty(
        "a:tblStyleLst",
        &[("xmlns:a", NS_DRAWING), ("def", crate::shapes::DEFAULT_TABLE_STYLE)],
    )?;
    Ok(xml.into_bytes())
}

pub fn core_props_xml(title: Option<&str>) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE_PROPERTIES),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(title) = title {
        xml.text_element("dc:title", &[], title)?;
    }
    xml.text_element("dc:creator", &[], APPLICATION_NAME)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

pub fn app_props_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Properties",
        &[
            ("xmlns", NS_EXTENDED_PROPERTIES),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    xml.text_element("Application", &[], APPLICATION_NAME)?;
    xml.text_element("Slides", &[], &slide_count.to_string())?;
    xml.end("Properties")?;
    Ok(xml.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_content_types_lists_slides() {
        let out = as_string(content_types_xml(2).unwrap());
        assert!(out.contains(r#"<Override PartName="/ppt/slides/slide1.xml""#));
        assert!(out.contains(r#"<Override PartName="/ppt/slides/slide2.xml""#));
        assert!(!out.contains("slide3.xml"));
        assert!(out.contains(r#"<Default Extension="rels""#));
    }

    #[test]
    fn test_presentation_slide_ids() {
        let out = as_string(presentation_xml(2, SlideSize::widescreen()).unwrap());
        assert!(out.contains(r#"<p:sldId id="256" r:id="rId6"/><p:sldId id="257" r:id="rId7"/>"#));
        assert!(out.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
    }

    #[test]
    fn test_presentation_without_slides() {
        let out = as_string(presentation_xml(0, SlideSize::widescreen()).unwrap());
        assert!(!out.contains("sldIdLst"));
    }

    #[test]
    fn test_presentation_rels_match_slide_ids() {
        let out = as_string(presentation_rels_xml(1).unwrap());
        assert!(out.contains(r#"Id="rId6""#));
        assert!(out.contains(r#"Target="slides/slide1.xml""#));
        assert!(out.contains(r#"Target="theme/theme1.xml""#));
    }

    #[test]
    fn test_theme_uses_palette() {
        let out = as_string(theme_xml(&Palette::default()).unwrap());
        assert!(out.contains(r#"<a:dk2><a:srgbClr val="1C2833"/></a:dk2>"#));
        assert!(out.contains(r#"<a:accent1><a:srgbClr val="2E4053"/></a:accent1>"#));
        assert!(out.contains("<a:fmtScheme"));
        assert!(out.ends_with("</a:theme>"));
    }

    #[test]
    fn test_core_props_title_is_escaped() {
        let out = as_string(core_props_xml(Some("R&D Update")).unwrap());
        assert!(out.contains("<dc:title>R&amp;D Update</dc:title>"));
        assert!(out.contains("<dc:creator>md2pptx</dc:creator>"));

        let untitled = as_string(core_props_xml(None).unwrap());
        assert!(!untitled.contains("dc:title"));
    }

    #[test]
    fn test_app_props() {
        let out = as_string(app_props_xml(3).unwrap());
        assert!(out.contains("<Slides>3</Slides>"));
    }
}
