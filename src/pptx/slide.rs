//! Slide working copy and shape-name lookup.
//!
//! A slide's part XML is split once into the spTree prologue, the list of
//! top-level shape elements, and the epilogue. Edits rewrite individual
//! shape elements; the part blob is reassembled when the presentation is
//! saved.

use crate::common::xml::{child_element_spans, element_span};
use crate::opc::packuri::PackURI;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::shapes::{Shape, ShapeType};
use once_cell::unsync::OnceCell;
use std::collections::HashMap;

/// One slide of a presentation, held as an editable working copy.
pub struct Slide {
    /// Partname of the slide's part in the package
    partname: PackURI,
    /// XML up to the first shape element
    head: Vec<u8>,
    /// Top-level shape elements of the spTree, in document order
    shapes: Vec<Shape>,
    /// XML after the last shape element
    tail: Vec<u8>,
    /// Cached mapping from shape display name to position.
    ///
    /// Built lazily on first lookup. Shapes are written into, not added or
    /// removed, so the cache stays valid for the slide's lifetime; the one
    /// exception is the explicit empty-placeholder cleanup, which drops it.
    name_index: OnceCell<HashMap<String, usize>>,
}

impl Slide {
    /// Split a slide part's XML into an editable working copy.
    pub(crate) fn parse(partname: PackURI, xml: &[u8]) -> Result<Self> {
        let tree = element_span(xml, b"spTree")
            .map_err(PptxError::Xml)?
            .ok_or_else(|| PptxError::InvalidFormat(format!("slide {} has no spTree", partname)))?;

        let children = child_element_spans(xml, b"spTree").map_err(PptxError::Xml)?;

        let mut shapes = Vec::new();
        let mut first_start = None;
        let mut last_end = 0usize;

        for span in &children {
            if !ShapeType::is_shape_element(&span.local) {
                continue;
            }
            if first_start.is_none() {
                first_start = Some(span.start);
            }
            last_end = span.end;
            shapes.push(Shape::new(
                span.slice(xml).to_vec(),
                ShapeType::from_local(&span.local),
            )?);
        }

        let (head, tail) = match first_start {
            Some(start) => (xml[..start].to_vec(), xml[last_end..].to_vec()),
            None => {
                // No shapes: split at the spTree closing tag
                let close = memchr::memmem::rfind(tree.slice(xml), b"</").ok_or_else(|| {
                    PptxError::InvalidFormat(format!("slide {} has empty spTree", partname))
                })?;
                let pos = tree.start + close;
                (xml[..pos].to_vec(), xml[pos..].to_vec())
            }
        };

        Ok(Self {
            partname,
            head,
            shapes,
            tail,
            name_index: OnceCell::new(),
        })
    }

    /// Partname of the slide's part in the package.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Reassemble the slide's XML from the working copy.
    pub fn to_xml(&self) -> Vec<u8> {
        let shapes_len: usize = self.shapes.iter().map(|s| s.xml().len()).sum();
        let mut xml = Vec::with_capacity(self.head.len() + shapes_len + self.tail.len());
        xml.extend_from_slice(&self.head);
        for shape in &self.shapes {
            xml.extend_from_slice(shape.xml());
        }
        xml.extend_from_slice(&self.tail);
        xml
    }

    /// The cached name-to-position mapping, built on first use.
    fn index(&self) -> &HashMap<String, usize> {
        self.name_index.get_or_init(|| {
            let mut index = HashMap::with_capacity(self.shapes.len());
            for (position, shape) in self.shapes.iter().enumerate() {
                if !shape.name().is_empty() {
                    index.insert(shape.name().to_string(), position);
                }
            }
            index
        })
    }

    /// All shape names on this slide, sorted for stable error output.
    pub fn shape_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.index().keys().cloned().collect();
        names.sort();
        names
    }

    /// Find a shape's position by its display name.
    pub(crate) fn shape_position(&self, shape_name: &str) -> Result<usize> {
        if let Some(&position) = self.index().get(shape_name) {
            return Ok(position);
        }
        Err(PptxError::ShapeNotFound {
            name: shape_name.to_string(),
            available: self.shape_names(),
        })
    }

    /// Access a shape by its display name.
    ///
    /// Fails with an error listing all available names; shape names are
    /// template-author-controlled strings, and a mismatch after a template
    /// edit is the most common failure mode.
    pub fn get_shape(&self, shape_name: &str) -> Result<&Shape> {
        let position = self.shape_position(shape_name)?;
        Ok(&self.shapes[position])
    }

    /// Mutable access to a shape by its display name.
    pub fn get_shape_mut(&mut self, shape_name: &str) -> Result<&mut Shape> {
        let position = self.shape_position(shape_name)?;
        Ok(&mut self.shapes[position])
    }

    /// Access a shape by position.
    pub(crate) fn shape_at_mut(&mut self, position: usize) -> &mut Shape {
        &mut self.shapes[position]
    }

    /// Replace a shape element wholesale (placeholder becoming a picture).
    ///
    /// Positions are unchanged, so the name index stays valid.
    pub(crate) fn replace_shape(&mut self, position: usize, shape: Shape) {
        self.shapes[position] = shape;
    }

    /// Number of shapes on the slide.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Remove placeholder shapes whose text frame is still empty.
    ///
    /// Roster slides have a fixed grid of placeholders; a short final group
    /// leaves some unfilled, and PowerPoint would render their prompt text.
    /// Returns the number of shapes removed. Removal shifts positions, so
    /// the name index is rebuilt on next use.
    pub fn remove_empty_placeholders(&mut self) -> Result<usize> {
        let mut removed = 0usize;
        let mut kept = Vec::with_capacity(self.shapes.len());

        for shape in self.shapes.drain(..) {
            let empty = shape.is_placeholder()
                && shape.has_text_frame()
                && shape.text()?.as_deref() == Some("");
            if empty {
                removed += 1;
            } else {
                kept.push(shape);
            }
        }

        self.shapes = kept;
        if removed > 0 {
            self.name_index = OnceCell::new();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slide_xml() -> Vec<u8> {
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:bodyPr/><a:p><a:r><a:t>Welcome</a:t></a:r></a:p></p:txBody></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Text Placeholder 2"/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:txBody><a:bodyPr/><a:p><a:r><a:t></a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
            .to_vec()
    }

    fn sample_slide() -> Slide {
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        Slide::parse(partname, &sample_slide_xml()).unwrap()
    }

    #[test]
    fn parse_finds_shape_elements_only() {
        let slide = sample_slide();
        assert_eq!(slide.shape_count(), 2);
    }

    #[test]
    fn lookup_is_stable_across_calls() {
        let slide = sample_slide();
        let first = slide.shape_position("Title 1").unwrap();
        let second = slide.shape_position("Title 1").unwrap();
        assert_eq!(first, second);

        let other = slide.shape_position("Text Placeholder 2").unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn missing_shape_error_lists_available_names() {
        let slide = sample_slide();
        let err = slide.get_shape("Picture Placeholder 9").unwrap_err();
        match err {
            PptxError::ShapeNotFound { name, available } => {
                assert_eq!(name, "Picture Placeholder 9");
                assert_eq!(
                    available,
                    vec!["Text Placeholder 2".to_string(), "Title 1".to_string()]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn round_trip_without_edits_is_identity() {
        let xml = sample_slide_xml();
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let slide = Slide::parse(partname, &xml).unwrap();
        assert_eq!(slide.to_xml(), xml);
    }

    #[test]
    fn set_text_shows_up_in_reassembled_xml() {
        let mut slide = sample_slide();
        slide
            .get_shape_mut("Title 1")
            .unwrap()
            .set_text("Bonjour")
            .unwrap();

        let xml = slide.to_xml();
        assert!(
            memchr::memmem::find(&xml, b"Bonjour").is_some(),
            "edited text missing from slide XML"
        );
        assert!(memchr::memmem::find(&xml, b"Welcome").is_none());
    }

    #[test]
    fn cleanup_removes_only_empty_placeholders() {
        let mut slide = sample_slide();
        let removed = slide.remove_empty_placeholders().unwrap();
        assert_eq!(removed, 1);
        assert_eq!(slide.shape_count(), 1);

        // Filled title stays; index rebuild reflects the removal
        assert!(slide.get_shape("Title 1").is_ok());
        assert!(slide.get_shape("Text Placeholder 2").is_err());
    }

    #[test]
    fn slide_without_shapes_parses() {
        let xml = br#"<p:sld xmlns:p="ns"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld></p:sld>"#;
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let slide = Slide::parse(partname, xml).unwrap();
        assert_eq!(slide.shape_count(), 0);
        assert_eq!(slide.to_xml(), xml.to_vec());
    }
}
