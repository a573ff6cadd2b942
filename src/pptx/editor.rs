//! Editing operations over one slide of an open presentation.
//!
//! Text edits touch only the slide's working copy; image insertion also
//! touches the package (a new media part plus a relationship from the
//! slide part), so the editor borrows both sides.

use crate::opc::constants::relationship_type;
use crate::opc::package::OpcPackage;
use crate::opc::part::Part;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::shapes::picture;
use crate::pptx::shapes::{Shape, ShapeType};
use crate::pptx::slide::Slide;
use std::path::Path;
use tracing::debug;

/// Mutable view over one slide and the package it belongs to.
pub struct SlideEditor<'a> {
    slide: &'a mut Slide,
    opc: &'a mut OpcPackage,
}

impl<'a> SlideEditor<'a> {
    pub(crate) fn new(slide: &'a mut Slide, opc: &'a mut OpcPackage) -> Self {
        Self { slide, opc }
    }

    /// The slide under edit.
    pub fn slide(&mut self) -> &mut Slide {
        self.slide
    }

    /// Replace the visible text of the named shape, preserving its
    /// formatting runs.
    pub fn replace_text(&mut self, shape_name: &str, new_text: &str) -> Result<()> {
        debug!(shape = shape_name, "replacing text");
        self.slide.get_shape_mut(shape_name)?.set_text(new_text)
    }

    /// Insert an image into the named placeholder.
    ///
    /// With `refit`, the image is shrunk to fit entirely inside the
    /// placeholder's box with its aspect ratio preserved, and repositioned
    /// to the placeholder's top-left corner; `center` additionally centers
    /// it within the original box. Without `refit`, the image fills the
    /// placeholder's bounds exactly.
    pub fn place_image(
        &mut self,
        shape_name: &str,
        image_path: &Path,
        refit: bool,
        center: bool,
    ) -> Result<()> {
        let position = self.slide.shape_position(shape_name)?;

        let (placeholder_id, placeholder_name, placeholder_box) = {
            let shape = self.slide.shape_at_mut(position);
            (shape.id(), shape.name().to_string(), shape.geometry()?)
        };

        if placeholder_box.cx <= 0 || placeholder_box.cy <= 0 {
            return Err(PptxError::MissingGeometry(placeholder_name));
        }

        let image_size = picture::probe_dimensions(image_path)?;
        let geometry = picture::placed_geometry(placeholder_box, image_size, refit, center);

        // Register the image bytes as a media part
        let (content_type, ext) = picture::image_content_type(image_path)?;
        let media_partname = self
            .opc
            .next_partname(&format!("/ppt/media/image%d.{}", ext))?;
        let blob = std::fs::read(image_path)?;
        self.opc
            .add_part(Part::new(media_partname.clone(), content_type.to_string(), blob));

        // Relate the slide part to the image and swap the placeholder for
        // a picture element that keeps the placeholder's name
        let r_id = self
            .opc
            .get_part_mut(self.slide.partname())?
            .relate_to(&media_partname, relationship_type::IMAGE);

        let pic_xml = picture::build_pic_xml(placeholder_id, &placeholder_name, &r_id, geometry);
        let pic = Shape::new(pic_xml.into_bytes(), ShapeType::Picture)?;
        self.slide.replace_shape(position, pic);

        debug!(
            shape = placeholder_name.as_str(),
            media = %media_partname,
            refit,
            center,
            "placed image"
        );
        Ok(())
    }

    /// Remove placeholder shapes whose text frame is still empty.
    pub fn remove_empty_placeholders(&mut self) -> Result<usize> {
        let removed = self.slide.remove_empty_placeholders()?;
        if removed > 0 {
            debug!(removed, slide = %self.slide.partname(), "removed leftover placeholders");
        }
        Ok(removed)
    }
}
