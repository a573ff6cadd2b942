//! The page-rendering seam.
//!
//! Pages wrap a slide handle instead of subclassing any document type:
//! each deck kind produces `PageSpec`s naming the layout to instantiate
//! and the renderer that fills the resulting slide.

use crate::error::Result;
use crate::pptx::SlideEditor;

/// Fills one slide with its content.
pub trait PageRenderer {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()>;
}

/// A page to be rendered: which named layout to instantiate, and what to
/// fill it with.
pub struct PageSpec {
    /// Display name of the slide layout in the template
    pub layout: String,
    /// Renderer invoked once the slide exists
    pub renderer: Box<dyn PageRenderer>,
}

impl PageSpec {
    pub fn new(layout: &str, renderer: impl PageRenderer + 'static) -> Self {
        Self {
            layout: layout.to_string(),
            renderer: Box::new(renderer),
        }
    }
}
