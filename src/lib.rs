//! Deckhand - generates member-onboarding PowerPoint decks from templates
//!
//! This library fills named placeholder shapes in `.pptx` templates with
//! member-onboarding data (names, logos, photos, contact info) and writes
//! one rendered presentation per language.
//!
//! # Layers
//!
//! - **opc**: Open Packaging Conventions plumbing (ZIP + content types +
//!   relationships) for reading and writing `.pptx` packages
//! - **pptx**: PresentationML support (named layouts, slides, shapes,
//!   text binding, image fitting)
//! - **decks**: record types and the deck kinds built on top
//!
//! # Example - Rendering a flyer
//!
//! ```no_run
//! use deckhand::decks::{Deck, Language, MemberInfo, flyer_pages};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let info = MemberInfo {
//!     member_name: "Acme Corp".to_string(),
//!     member_join_month: "September 2025".to_string(),
//!     member_logo_path: None,
//!     member_gatherer_firstname: "Jane".to_string(),
//!     member_gatherer_lastname: "Doe".to_string(),
//!     member_gatherer_title_fr: String::new(),
//!     member_gatherer_title_en: String::new(),
//!     member_gatherer_desc_fr: String::new(),
//!     member_gatherer_desc_en: String::new(),
//!     member_gatherer_email: "jane.doe@acme.example".to_string(),
//!     member_gatherer_photo_path: None,
//! };
//! info.validate()?;
//!
//! let language = Language::Fr;
//! let mut deck = Deck::from_template("templates/flyer-fr.pptx", flyer_pages(&info, language))?;
//! deck.save(Path::new("out/flyer_acme_corp_fr.pptx"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level slide editing
//!
//! ```no_run
//! use deckhand::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pres = Package::open("template.pptx")?.into_presentation();
//! let slide = pres.add_slide("first-page")?;
//!
//! let mut editor = pres.editor(slide)?;
//! editor.replace_text("Text Placeholder 2", "Acme Corp")?;
//!
//! pres.save("out.pptx")?;
//! # Ok(())
//! # }
//! ```

/// Shared XML helpers
pub mod common;

/// YAML batch-configuration loading
pub mod config;

/// Deck generation: records, page renderers, orchestration
pub mod decks;

/// Unified error type for the domain layer
pub mod error;

/// Open Packaging Conventions (OPC) package support
pub mod opc;

/// PresentationML (.pptx) support
pub mod pptx;

// Re-export commonly used types for convenience
pub use decks::{Deck, Language, MemberInfo};
pub use error::{Error, Result};
