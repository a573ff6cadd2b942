//! The main presentation API: named layout discovery, slide creation, and
//! package serialization.

use crate::common::xml::{child_element_spans, contains_element};
use crate::opc::constants::{content_type as ct, relationship_type};
use crate::opc::package::OpcPackage;
use crate::opc::packuri::PackURI;
use crate::opc::part::Part;
use crate::opc::pkgwriter::PackageWriter;
use crate::pptx::editor::SlideEditor;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::slide::Slide;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Empty slide skeleton; cloned layout placeholders are spliced into the
/// spTree between prologue and epilogue.
const SLIDE_XML_PROLOGUE: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
);

const SLIDE_XML_EPILOGUE: &str =
    r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#;

/// An open presentation: the OPC package plus the slides created from it.
pub struct Presentation {
    /// The underlying package, exclusively owned
    opc: OpcPackage,
    /// Partname of the presentation part (`/ppt/presentation.xml`)
    main_partname: PackURI,
    /// Working copies of the slides created this session, in order
    slides: Vec<Slide>,
    /// Layout-name to layout-partname mapping (built once)
    layouts: Option<HashMap<String, PackURI>>,
}

impl Presentation {
    pub(crate) fn new(opc: OpcPackage, main_partname: PackURI) -> Self {
        Self {
            opc,
            main_partname,
            slides: Vec::new(),
            layouts: None,
        }
    }

    /// The layout-name map, built on first use by scanning every
    /// slideLayout part for its `<p:cSld name="...">` attribute.
    fn layouts(&mut self) -> Result<&HashMap<String, PackURI>> {
        if self.layouts.is_none() {
            let mut layouts = HashMap::new();
            for part in self.opc.iter_parts() {
                if part.content_type() != ct::PML_SLIDE_LAYOUT {
                    continue;
                }
                if let Some(name) = layout_display_name(part.blob())? {
                    layouts.insert(name, part.partname().clone());
                }
            }
            self.layouts = Some(layouts);
        }
        Ok(self.layouts.as_ref().unwrap())
    }

    /// All layout names in the template, sorted for stable error output.
    pub fn layout_names(&mut self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.layouts()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Find a layout's partname by its display name.
    ///
    /// Layout names are the contract between template authors and this
    /// tool, so the error lists every name the template actually has.
    pub fn layout_partname(&mut self, layout_name: &str) -> Result<PackURI> {
        if let Some(partname) = self.layouts()?.get(layout_name) {
            return Ok(partname.clone());
        }
        Err(PptxError::LayoutNotFound {
            name: layout_name.to_string(),
            available: self.layout_names()?,
        })
    }

    /// Create a new slide from a named layout and append it to the
    /// presentation.
    ///
    /// The layout's placeholder shapes are cloned onto the slide (static
    /// layout content stays on the layout and is rendered beneath the
    /// slide), the slide part is related to its layout, and the slide is
    /// registered in the presentation's slide-id list.
    pub fn add_slide(&mut self, layout_name: &str) -> Result<usize> {
        let layout_partname = self.layout_partname(layout_name)?;
        let layout_xml = self.opc.get_part(&layout_partname)?.blob().to_vec();

        let mut slide_xml = String::with_capacity(layout_xml.len());
        slide_xml.push_str(SLIDE_XML_PROLOGUE);
        slide_xml.push_str(&clone_layout_placeholders(&layout_xml)?);
        slide_xml.push_str(SLIDE_XML_EPILOGUE);

        let slide_partname = self.opc.next_partname("/ppt/slides/slide%d.xml")?;
        let mut slide_part = Part::new(
            slide_partname.clone(),
            ct::PML_SLIDE.to_string(),
            slide_xml.clone().into_bytes(),
        );
        slide_part.relate_to(&layout_partname, relationship_type::SLIDE_LAYOUT);
        self.opc.add_part(slide_part);

        let pres_part = self.opc.get_part_mut(&self.main_partname)?;
        let r_id = pres_part.relate_to(&slide_partname, relationship_type::SLIDE);
        let slide_id = next_slide_id(pres_part.blob());
        let pres_xml = append_slide_id(pres_part.blob(), slide_id, &r_id)?;
        pres_part.set_blob(pres_xml);

        debug!(
            layout = layout_name,
            slide = %slide_partname,
            slide_id,
            "created slide from layout"
        );

        self.slides
            .push(Slide::parse(slide_partname, slide_xml.as_bytes())?);
        Ok(self.slides.len() - 1)
    }

    /// Number of slides created so far.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get an editor over one slide.
    pub fn editor(&mut self, index: usize) -> Result<SlideEditor<'_>> {
        if index >= self.slides.len() {
            return Err(PptxError::InvalidFormat(format!(
                "no slide at index {} ({} slides)",
                index,
                self.slides.len()
            )));
        }
        let Self { opc, slides, .. } = self;
        Ok(SlideEditor::new(&mut slides[index], opc))
    }

    /// Direct access to a slide's working copy.
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Write every slide's working copy back into its package part.
    fn sync_slides(&mut self) -> Result<()> {
        let Self { opc, slides, .. } = self;
        for slide in slides.iter() {
            opc.get_part_mut(slide.partname())?.set_blob(slide.to_xml());
        }
        Ok(())
    }

    /// Serialize the presentation to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.sync_slides()?;
        PackageWriter::write(path.as_ref(), &self.opc)?;
        info!(path = %path.as_ref().display(), slides = self.slide_count(), "saved presentation");
        Ok(())
    }

    /// Serialize the presentation to bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.sync_slides()?;
        Ok(PackageWriter::to_bytes(&self.opc)?)
    }

    /// The underlying OPC package.
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}

/// Read the display name from a layout's `<p:cSld name="...">` attribute.
fn layout_display_name(xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"cSld" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            let name = attr
                                .unescape_value()
                                .map_err(|e| PptxError::Xml(e.to_string()))?
                                .to_string();
                            return Ok(if name.is_empty() { None } else { Some(name) });
                        }
                    }
                    return Ok(None);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(None)
}

/// Concatenate the layout's placeholder `<p:sp>` elements for cloning onto
/// a new slide.
fn clone_layout_placeholders(layout_xml: &[u8]) -> Result<String> {
    let spans = child_element_spans(layout_xml, b"spTree").map_err(PptxError::Xml)?;

    let mut cloned = String::new();
    for span in spans {
        if span.local != b"sp" {
            continue;
        }
        let fragment = span.slice(layout_xml);
        if contains_element(fragment, b"ph") {
            cloned.push_str(std::str::from_utf8(fragment).map_err(|e| {
                PptxError::Xml(format!("layout placeholder is not valid UTF-8: {}", e))
            })?);
        }
    }
    Ok(cloned)
}

/// Pick the next free numeric slide id.
///
/// Slide ids start at 256 by convention.
fn next_slide_id(pres_xml: &[u8]) -> u32 {
    let mut max_id = 255u32;

    let mut reader = Reader::from_reader(pres_xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"sldId" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"id" {
                            if let Ok(id) = atoi_simd::parse::<u32, false, false>(&attr.value) {
                                max_id = max_id.max(id);
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    max_id + 1
}

/// Register a slide in the presentation's `<p:sldIdLst>`.
fn append_slide_id(pres_xml: &[u8], slide_id: u32, r_id: &str) -> Result<Vec<u8>> {
    let entry = format!(r#"<p:sldId id="{}" r:id="{}"/>"#, slide_id, r_id);

    let splice = |pos: usize, replace_len: usize, with: &str| -> Vec<u8> {
        let mut out = Vec::with_capacity(pres_xml.len() + with.len());
        out.extend_from_slice(&pres_xml[..pos]);
        out.extend_from_slice(with.as_bytes());
        out.extend_from_slice(&pres_xml[pos + replace_len..]);
        out
    };

    if let Some(pos) = memchr::memmem::find(pres_xml, b"</p:sldIdLst>") {
        return Ok(splice(pos, 0, &entry));
    }

    if let Some(pos) = memchr::memmem::find(pres_xml, b"<p:sldIdLst/>") {
        let expanded = format!("<p:sldIdLst>{}</p:sldIdLst>", entry);
        return Ok(splice(pos, "<p:sldIdLst/>".len(), &expanded));
    }

    if let Some(pos) = memchr::memmem::find(pres_xml, b"</p:sldMasterIdLst>") {
        let insert_at = pos + "</p:sldMasterIdLst>".len();
        let list = format!("<p:sldIdLst>{}</p:sldIdLst>", entry);
        return Ok(splice(insert_at, 0, &list));
    }

    Err(PptxError::InvalidFormat(
        "presentation part has no slide-id list to extend".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRES_XML: &[u8] = br#"<?xml version="1.0"?><p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst/><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#;

    fn layout_xml(name: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0"?><p:sldLayout xmlns:a="a" xmlns:p="p"><p:cSld name="{}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:bodyPr/><a:p><a:r><a:t></a:t></a:r></a:p></p:txBody></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Decoration"/></p:nvSpPr><p:spPr/></p:sp></p:spTree></p:cSld></p:sldLayout>"#,
            name
        )
        .into_bytes()
    }

    fn test_presentation() -> Presentation {
        let mut opc = OpcPackage::new();
        let main = PackURI::new("/ppt/presentation.xml").unwrap();
        opc.add_part(Part::new(
            main.clone(),
            ct::PML_PRESENTATION_MAIN.to_string(),
            PRES_XML.to_vec(),
        ));
        opc.add_part(Part::new(
            PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            ct::PML_SLIDE_LAYOUT.to_string(),
            layout_xml("first-page"),
        ));
        opc.add_part(Part::new(
            PackURI::new("/ppt/slideLayouts/slideLayout2.xml").unwrap(),
            ct::PML_SLIDE_LAYOUT.to_string(),
            layout_xml("trombi-slide"),
        ));
        Presentation::new(opc, main)
    }

    #[test]
    fn layouts_are_discovered_by_display_name() {
        let mut pres = test_presentation();
        assert_eq!(
            pres.layout_names().unwrap(),
            vec!["first-page".to_string(), "trombi-slide".to_string()]
        );
    }

    #[test]
    fn missing_layout_error_lists_available_names() {
        let mut pres = test_presentation();
        match pres.layout_partname("facebook-slide-dense").unwrap_err() {
            PptxError::LayoutNotFound { name, available } => {
                assert_eq!(name, "facebook-slide-dense");
                assert_eq!(available, vec!["first-page", "trombi-slide"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn add_slide_clones_placeholders_only() {
        let mut pres = test_presentation();
        let index = pres.add_slide("first-page").unwrap();

        let slide = pres.slide_mut(index).unwrap();
        assert_eq!(slide.shape_count(), 1);
        assert!(slide.get_shape("Title 1").is_ok());
        assert!(slide.get_shape("Decoration").is_err());
    }

    #[test]
    fn add_slide_registers_part_rel_and_slide_id() {
        let mut pres = test_presentation();
        pres.add_slide("first-page").unwrap();
        pres.add_slide("trombi-slide").unwrap();

        let slide1 = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let slide2 = PackURI::new("/ppt/slides/slide2.xml").unwrap();
        assert!(pres.opc_package().contains_part(&slide1));
        assert!(pres.opc_package().contains_part(&slide2));

        let main = pres.main_partname.clone();
        let pres_blob = pres.opc_package().get_part(&main).unwrap().blob().to_vec();
        let count = memchr::memmem::find_iter(&pres_blob, b"<p:sldId ").count();
        assert_eq!(count, 2);
        assert!(memchr::memmem::find(&pres_blob, br#"id="256""#).is_some());
        assert!(memchr::memmem::find(&pres_blob, br#"id="257""#).is_some());

        // Slide part is related to its layout
        let slide_part = pres.opc_package().get_part(&slide1).unwrap();
        let layout_rel = slide_part
            .rels()
            .part_with_reltype(relationship_type::SLIDE_LAYOUT)
            .unwrap();
        assert_eq!(
            layout_rel.target_partname().unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout1.xml"
        );
    }

    #[test]
    fn append_slide_id_expands_self_closing_list() {
        let out = append_slide_id(PRES_XML, 256, "rId7").unwrap();
        assert!(
            memchr::memmem::find(
                &out,
                br#"<p:sldIdLst><p:sldId id="256" r:id="rId7"/></p:sldIdLst>"#
            )
            .is_some()
        );

        // A second append lands inside the now-open list
        let out2 = append_slide_id(&out, 257, "rId8").unwrap();
        assert!(memchr::memmem::find(&out2, br#"<p:sldId id="257" r:id="rId8"/></p:sldIdLst>"#).is_some());
    }

    #[test]
    fn append_slide_id_creates_missing_list() {
        let xml = br#"<p:presentation><p:sldMasterIdLst></p:sldMasterIdLst><p:sldSz cx="1"/></p:presentation>"#;
        let out = append_slide_id(xml, 256, "rId2").unwrap();
        let pos_master = memchr::memmem::find(&out, b"</p:sldMasterIdLst>").unwrap();
        let pos_list = memchr::memmem::find(&out, b"<p:sldIdLst>").unwrap();
        assert!(pos_list > pos_master);
    }

    #[test]
    fn next_slide_id_scans_existing_entries() {
        assert_eq!(next_slide_id(PRES_XML), 256);
        let with_slides = br#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="300" r:id="rId3"/></p:sldIdLst>"#;
        assert_eq!(next_slide_id(with_slides), 301);
    }
}
