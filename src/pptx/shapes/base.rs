/// Base shape type for slide editing.
use crate::common::xml::contains_element;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::shapes::textframe;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Shape type enumeration.
///
/// Derived from the shape element's local name inside `<p:spTree>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// A text shape (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table or chart (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
    /// Unknown or unsupported shape type
    Unknown,
}

impl ShapeType {
    /// Map a spTree child element's local name to a shape type.
    pub(crate) fn from_local(local: &[u8]) -> Self {
        match local {
            b"sp" => ShapeType::Shape,
            b"pic" => ShapeType::Picture,
            b"graphicFrame" => ShapeType::GraphicFrame,
            b"grpSp" => ShapeType::GroupShape,
            b"cxnSp" => ShapeType::Connector,
            _ => ShapeType::Unknown,
        }
    }

    /// Whether this element kind participates in shape-name lookup.
    pub(crate) fn is_shape_element(local: &[u8]) -> bool {
        !matches!(Self::from_local(local), ShapeType::Unknown)
    }
}

/// Shape geometry (position and size) in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeGeometry {
    /// X position in EMUs
    pub x: i64,
    /// Y position in EMUs
    pub y: i64,
    /// Width in EMUs
    pub cx: i64,
    /// Height in EMUs
    pub cy: i64,
}

/// One shape on a slide, held as the raw XML of its element.
///
/// Edits rewrite the XML in place; the slide reassembles the spTree from
/// its shapes when the package is saved.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Raw XML bytes for this shape's element
    xml: Vec<u8>,
    /// Shape type
    shape_type: ShapeType,
    /// Shape ID from `<p:cNvPr>`
    id: u32,
    /// Shape display name from `<p:cNvPr>`
    name: String,
    /// Position and size (cached)
    geometry: Option<ShapeGeometry>,
}

impl Shape {
    /// Create a Shape from the XML of one spTree child element.
    pub(crate) fn new(xml: Vec<u8>, shape_type: ShapeType) -> Result<Self> {
        let (id, name) = parse_c_nv_pr(&xml)?;
        Ok(Self {
            xml,
            shape_type,
            id,
            name,
            geometry: None,
        })
    }

    /// Get the shape type.
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Get the shape's display name.
    ///
    /// This is the name shown in PowerPoint's selection pane and the key
    /// used for shape lookup on a slide.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the shape ID.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Check if this shape is a layout placeholder (`<p:ph>` present).
    pub fn is_placeholder(&self) -> bool {
        contains_element(&self.xml, b"ph")
    }

    /// Check if this shape has a text frame.
    pub fn has_text_frame(&self) -> bool {
        self.shape_type == ShapeType::Shape && contains_element(&self.xml, b"txBody")
    }

    /// Extract the shape's visible text.
    ///
    /// Returns None for shapes without a text frame (e.g. pictures).
    pub fn text(&self) -> Result<Option<String>> {
        if !self.has_text_frame() {
            return Ok(None);
        }
        textframe::extract_text(&self.xml).map(Some)
    }

    /// Replace the shape's visible text, preserving run styling.
    ///
    /// Placeholder shapes get the text distributed over their existing
    /// paragraphs; free-floating text boxes get it written into the first
    /// run of the first paragraph only, so character-level formatting on
    /// that run survives.
    pub fn set_text(&mut self, new_text: &str) -> Result<()> {
        if !self.has_text_frame() {
            return Err(PptxError::NoTextFrame(self.name.clone()));
        }

        self.xml = if self.is_placeholder() {
            textframe::set_text_placeholder(&self.xml, new_text)?
        } else {
            textframe::set_text_textbox(&self.xml, new_text)?
        };
        Ok(())
    }

    /// Get the shape's position and size in EMUs.
    ///
    /// Values default to zero when the shape carries no `<a:xfrm>`.
    pub fn geometry(&mut self) -> Result<ShapeGeometry> {
        if let Some(geometry) = self.geometry {
            return Ok(geometry);
        }

        let mut reader = Reader::from_reader(&self.xml[..]);
        reader.config_mut().trim_text(true);

        let mut geometry = ShapeGeometry {
            x: 0,
            y: 0,
            cx: 0,
            cy: 0,
        };

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let tag_name = e.local_name();

                    if tag_name.as_ref() == b"off" {
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"x" => geometry.x = parse_emu(&attr.value),
                                b"y" => geometry.y = parse_emu(&attr.value),
                                _ => {}
                            }
                        }
                    } else if tag_name.as_ref() == b"ext" {
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"cx" => geometry.cx = parse_emu(&attr.value),
                                b"cy" => geometry.cy = parse_emu(&attr.value),
                                _ => {}
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {}
            }
        }

        self.geometry = Some(geometry);
        Ok(geometry)
    }

    /// Get raw XML bytes.
    #[inline]
    pub(crate) fn xml(&self) -> &[u8] {
        &self.xml
    }
}

fn parse_emu(value: &[u8]) -> i64 {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Parse the shape's `<p:cNvPr>` element for its id and display name.
fn parse_c_nv_pr(xml: &[u8]) -> Result<(u32, String)> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"cNvPr" {
                    let mut id = 0u32;
                    let mut name = String::new();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"id" => {
                                id = std::str::from_utf8(&attr.value)
                                    .ok()
                                    .and_then(|s| s.parse().ok())
                                    .unwrap_or(0);
                            }
                            b"name" => {
                                name = attr
                                    .unescape_value()
                                    .map_err(|e| PptxError::Xml(e.to_string()))?
                                    .to_string();
                            }
                            _ => {}
                        }
                    }
                    return Ok((id, name));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {}
        }
    }

    // Group properties elements carry no cNvPr of their own
    Ok((0, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_shape(name: &str, body: &str) -> Shape {
        let xml = format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="4" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="838200" y="365125"/><a:ext cx="7772400" cy="1325563"/></a:xfrm></p:spPr>{}</p:sp>"#,
            name, body
        );
        Shape::new(xml.into_bytes(), ShapeType::Shape).unwrap()
    }

    #[test]
    fn parses_name_and_id() {
        let shape = text_shape("Text Placeholder 2", "<p:txBody><a:p/></p:txBody>");
        assert_eq!(shape.name(), "Text Placeholder 2");
        assert_eq!(shape.id(), 4);
        assert_eq!(shape.shape_type(), ShapeType::Shape);
    }

    #[test]
    fn detects_placeholder_and_text_frame() {
        let shape = text_shape("Title 1", "<p:txBody><a:p/></p:txBody>");
        assert!(shape.is_placeholder());
        assert!(shape.has_text_frame());

        let bare = Shape::new(
            br#"<p:sp><p:nvSpPr><p:cNvPr id="5" name="Decoration"/></p:nvSpPr></p:sp>"#.to_vec(),
            ShapeType::Shape,
        )
        .unwrap();
        assert!(!bare.is_placeholder());
        assert!(!bare.has_text_frame());
    }

    #[test]
    fn geometry_is_cached() {
        let mut shape = text_shape("Title 1", "<p:txBody><a:p/></p:txBody>");
        let geometry = shape.geometry().unwrap();
        assert_eq!(geometry.x, 838200);
        assert_eq!(geometry.y, 365125);
        assert_eq!(geometry.cx, 7772400);
        assert_eq!(geometry.cy, 1325563);
        assert_eq!(shape.geometry().unwrap(), geometry);
    }

    #[test]
    fn missing_xfrm_defaults_to_zero() {
        let mut shape = Shape::new(
            br#"<p:sp><p:nvSpPr><p:cNvPr id="7" name="X"/></p:nvSpPr><p:spPr/></p:sp>"#.to_vec(),
            ShapeType::Shape,
        )
        .unwrap();
        let geometry = shape.geometry().unwrap();
        assert_eq!((geometry.cx, geometry.cy), (0, 0));
    }

    #[test]
    fn set_text_on_textless_shape_fails() {
        let mut shape = Shape::new(
            br#"<p:pic><p:nvPicPr><p:cNvPr id="9" name="Picture 1"/></p:nvPicPr></p:pic>"#.to_vec(),
            ShapeType::Picture,
        )
        .unwrap();
        assert!(matches!(
            shape.set_text("hello"),
            Err(PptxError::NoTextFrame(name)) if name == "Picture 1"
        ));
    }
}
