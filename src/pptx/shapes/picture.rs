/// Picture generation and the fit-and-center placement math.
///
/// Inserting an image replaces a picture placeholder's `<p:sp>` element
/// with a `<p:pic>` element pointing at a media part. The placement math
/// works entirely in EMUs taken from the placeholder's geometry.
use crate::common::xml::escape_xml;
use crate::opc::constants::content_type as ct;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::shapes::base::ShapeGeometry;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Content types for the image formats templates actually embed.
static IMAGE_CONTENT_TYPES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "png" => ct::PNG,
    "jpg" => ct::JPEG,
    "jpeg" => ct::JPEG,
    "gif" => ct::GIF,
    "bmp" => ct::BMP,
    "tif" => ct::TIFF,
    "tiff" => ct::TIFF,
};

/// Look up the content type for an image path by its extension.
pub(crate) fn image_content_type(path: &Path) -> Result<(&'static str, String)> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match IMAGE_CONTENT_TYPES.get(ext.as_str()) {
        Some(content_type) => Ok((content_type, ext)),
        None => Err(PptxError::Image(format!(
            "unsupported image format '{}'",
            path.display()
        ))),
    }
}

/// Probe an image file's native pixel dimensions without decoding it.
pub(crate) fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| PptxError::Image(format!("{}: {}", path.display(), e)))?;
    if width == 0 || height == 0 {
        return Err(PptxError::Image(format!(
            "{}: image has zero dimension",
            path.display()
        )));
    }
    Ok((width, height))
}

/// Shrink an image to fit entirely inside the available box, preserving its
/// aspect ratio.
///
/// When the box is proportionally wider than the image, height is pinned to
/// the box and width follows the image aspect; otherwise width is pinned.
/// The result never exceeds the box in either dimension, so the image is
/// never cropped.
pub(crate) fn fit_within(
    available_width: i64,
    available_height: i64,
    image_width: u32,
    image_height: u32,
) -> (i64, i64) {
    let box_aspect = available_width as f64 / available_height as f64;
    let image_aspect = image_width as f64 / image_height as f64;

    if box_aspect > image_aspect {
        ((image_aspect * available_height as f64) as i64, available_height)
    } else {
        (available_width, (available_width as f64 / image_aspect) as i64)
    }
}

/// Offset a fitted image by half the leftover space in each dimension.
///
/// Integer EMU truncation is fine at this scale (1 cm is 360000 EMU).
pub(crate) fn center_within(
    position: (i64, i64),
    available: (i64, i64),
    fitted: (i64, i64),
) -> (i64, i64) {
    (
        position.0 + (available.0 - fitted.0) / 2,
        position.1 + (available.1 - fitted.1) / 2,
    )
}

/// Compute the final geometry for an image placed into a placeholder box.
///
/// `refit` shrinks the image to fit inside the box (aspect preserved) and
/// resets its position to the placeholder's own top-left corner; `center`
/// additionally centers the fitted image inside the original box. Without
/// `refit` the image simply fills the placeholder's bounds.
pub(crate) fn placed_geometry(
    placeholder: ShapeGeometry,
    image_size: (u32, u32),
    refit: bool,
    center: bool,
) -> ShapeGeometry {
    if !refit {
        return placeholder;
    }

    let (cx, cy) = fit_within(placeholder.cx, placeholder.cy, image_size.0, image_size.1);
    let (mut x, mut y) = (placeholder.x, placeholder.y);
    if center {
        (x, y) = center_within((x, y), (placeholder.cx, placeholder.cy), (cx, cy));
    }

    ShapeGeometry { x, y, cx, cy }
}

/// Build the `<p:pic>` element for an inserted image.
///
/// The element keeps the replaced placeholder's id and display name so
/// later lookups by name still resolve.
pub(crate) fn build_pic_xml(
    shape_id: u32,
    name: &str,
    r_id: &str,
    geometry: ShapeGeometry,
) -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str("<p:pic>");
    xml.push_str("<p:nvPicPr>");
    let _ = write!(
        xml,
        r#"<p:cNvPr id="{}" name="{}"/>"#,
        shape_id,
        escape_xml(name)
    );
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvPicPr>");

    xml.push_str("<p:blipFill>");
    let _ = write!(xml, r#"<a:blip r:embed="{}"/>"#, escape_xml(r_id));
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    xml.push_str("<p:spPr>");
    xml.push_str("<a:xfrm>");
    let _ = write!(xml, r#"<a:off x="{}" y="{}"/>"#, geometry.x, geometry.y);
    let _ = write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, geometry.cx, geometry.cy);
    xml.push_str("</a:xfrm>");
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");

    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_box_pins_height() {
        // Box 200x100, square image: height pinned, width = 1.0 * 100
        assert_eq!(fit_within(200, 100, 100, 100), (100, 100));
    }

    #[test]
    fn taller_box_pins_width() {
        // Box 100x200, image twice as wide as tall: width pinned, height = 100 / 2.0
        assert_eq!(fit_within(100, 200, 100, 50), (100, 50));
    }

    #[test]
    fn fitted_image_never_exceeds_box() {
        for (bw, bh, iw, ih) in [
            (914400i64, 457200i64, 640u32, 480u32),
            (457200, 914400, 1920, 1080),
            (360000, 360000, 17, 4000),
        ] {
            let (w, h) = fit_within(bw, bh, iw, ih);
            assert!(w <= bw && h <= bh, "({bw},{bh}) vs ({iw},{ih}) -> ({w},{h})");
            assert!(w > 0 && h > 0);
        }
    }

    #[test]
    fn centering_offsets_by_half_leftover() {
        let (x, y) = center_within((1000, 2000), (200, 100), (100, 100));
        assert_eq!(x, 1000 + 50);
        assert_eq!(y, 2000);
    }

    #[test]
    fn placed_geometry_without_refit_fills_placeholder() {
        let placeholder = ShapeGeometry {
            x: 10,
            y: 20,
            cx: 300,
            cy: 400,
        };
        assert_eq!(
            placed_geometry(placeholder, (640, 480), false, false),
            placeholder
        );
    }

    #[test]
    fn placed_geometry_with_refit_and_center() {
        let placeholder = ShapeGeometry {
            x: 0,
            y: 0,
            cx: 200,
            cy: 100,
        };
        let placed = placed_geometry(placeholder, (100, 100), true, true);
        assert_eq!((placed.cx, placed.cy), (100, 100));
        assert_eq!((placed.x, placed.y), (50, 0));
    }

    #[test]
    fn pic_xml_keeps_name_and_rel_id() {
        let xml = build_pic_xml(
            7,
            "Picture Placeholder 3",
            "rId9",
            ShapeGeometry {
                x: 1,
                y: 2,
                cx: 3,
                cy: 4,
            },
        );
        assert!(xml.contains(r#"<p:cNvPr id="7" name="Picture Placeholder 3"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId9"/>"#));
        assert!(xml.contains(r#"<a:off x="1" y="2"/>"#));
        assert!(xml.contains(r#"<a:ext cx="3" cy="4"/>"#));
    }

    #[test]
    fn content_type_by_extension() {
        let (content_type, ext) = image_content_type(Path::new("logo.PNG")).unwrap();
        assert_eq!(content_type, "image/png");
        assert_eq!(ext, "png");

        assert!(image_content_type(Path::new("logo.webp")).is_err());
        assert!(image_content_type(Path::new("logo")).is_err());
    }
}
