//! Generic deck orchestration.
//!
//! A deck kind is a pure function from records and language to an ordered
//! list of page specs; the orchestrator here is the same for every kind.
//! It instantiates one slide per spec from the template's named layouts
//! (once, cached), fills them in order, and serializes the result.

use crate::decks::page::{PageRenderer, PageSpec};
use crate::error::Result;
use crate::pptx::{Package, Presentation};
use std::path::Path;
use tracing::{debug, info};

/// A page spec bound to its instantiated slide.
struct BoundPage {
    slide: usize,
    renderer: Box<dyn PageRenderer>,
}

/// One deck generation: a template, the pages to render, and the slides
/// built from them.
///
/// Slides are created on first access and cached; building them again
/// would append duplicate slides to the underlying document. `save` may
/// be called again (filling is idempotent for the same records) but never
/// re-creates slides.
pub struct Deck {
    pres: Presentation,
    specs: Vec<PageSpec>,
    pages: Option<Vec<BoundPage>>,
}

impl Deck {
    /// Load a template and stage the given pages.
    pub fn from_template<P: AsRef<Path>>(template_path: P, specs: Vec<PageSpec>) -> Result<Self> {
        let pres = Package::open(template_path.as_ref())?.into_presentation();
        debug!(
            template = %template_path.as_ref().display(),
            pages = specs.len(),
            "loaded template"
        );
        Ok(Self {
            pres,
            specs,
            pages: None,
        })
    }

    /// Instantiate one slide per page spec (first call only).
    ///
    /// Every layout name must exist in the template; a missing one aborts
    /// with an error listing the template's layout names.
    fn ensure_slides(&mut self) -> Result<()> {
        if self.pages.is_some() {
            return Ok(());
        }

        let mut pages = Vec::with_capacity(self.specs.len());
        for spec in self.specs.drain(..) {
            let slide = self.pres.add_slide(&spec.layout)?;
            pages.push(BoundPage {
                slide,
                renderer: spec.renderer,
            });
        }
        self.pages = Some(pages);
        Ok(())
    }

    /// Number of slides in the deck, building them if needed.
    pub fn slide_count(&mut self) -> Result<usize> {
        self.ensure_slides()?;
        Ok(self.pres.slide_count())
    }

    /// Fill every page and write the presentation to `file_path`.
    ///
    /// A stale file at the destination is removed first and parent
    /// directories are created as needed. If a fill fails, nothing is
    /// written; the deck should then be discarded.
    pub fn save(&mut self, file_path: &Path) -> Result<()> {
        self.ensure_slides()?;

        let Self { pres, pages, .. } = self;
        for page in pages.as_ref().unwrap() {
            let mut editor = pres.editor(page.slide)?;
            page.renderer.fill(&mut editor)?;
        }

        if file_path.exists() {
            std::fs::remove_file(file_path)?;
        }
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        self.pres.save(file_path)?;
        info!(path = %file_path.display(), "deck written");
        Ok(())
    }

    /// The underlying presentation (for inspection in tests).
    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.pres
    }
}
