//! PowerPoint (.pptx) presentation support.
//!
//! Read-modify-write access to PresentationML packages, scoped to what
//! template filling needs: open a template, instantiate slides from named
//! layouts, bind text and images into named shapes, save.
//!
//! # Example
//!
//! ```rust,no_run
//! use deckhand::pptx::Package;
//!
//! let mut pres = Package::open("template.pptx")?.into_presentation();
//! let slide = pres.add_slide("first-page")?;
//!
//! let mut editor = pres.editor(slide)?;
//! editor.replace_text("Text Placeholder 2", "Acme Corp")?;
//!
//! pres.save("out.pptx")?;
//! # Ok::<(), deckhand::pptx::PptxError>(())
//! ```

pub mod editor;
pub mod error;
pub mod package;
pub mod presentation;
pub mod shapes;
pub mod slide;

pub use editor::SlideEditor;
pub use error::{PptxError, Result};
pub use package::Package;
pub use presentation::Presentation;
pub use slide::Slide;
