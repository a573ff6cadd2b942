//! Referent starter pack.
//!
//! The starter-pack template is entirely static for now, so the deck has
//! no pages to fill; generating it copies the template's layouts through
//! untouched. Page specs will appear here once the template grows
//! per-referent placeholders.

use crate::decks::page::PageSpec;

/// Pages of the referent starter pack (currently none).
pub fn starter_pack_pages() -> Vec<PageSpec> {
    Vec::new()
}
