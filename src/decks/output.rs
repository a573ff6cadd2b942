//! Output-path construction for generated decks.
//!
//! Every invocation writes into a generated-output tree namespaced by the
//! record id (when the deck belongs to one record) and the document type,
//! with filenames carrying a month stamp, the document type, the record
//! id, and the language:
//!
//! `<out>/<record-id>/<doc-type>/<YYYY_MM>_<doc-type>_<record-id>_<lang>.pptx`
//!
//! Org-wide decks (community, core team) have no record id; their segment
//! and filename component are simply omitted.

use crate::decks::language::Language;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Month stamp used as the filename prefix, e.g. `2025_09`.
pub fn month_stamp() -> String {
    Local::now().format("%Y_%m").to_string()
}

/// Build the output path for one rendered deck.
///
/// `record_id` may be empty for decks not tied to a single record.
pub fn output_path(
    out_root: &Path,
    record_id: &str,
    doc_type: &str,
    language: Language,
    stamp: &str,
) -> PathBuf {
    let mut dir = out_root.to_path_buf();
    if !record_id.is_empty() {
        dir.push(record_id);
    }
    dir.push(doc_type);

    let filename = if record_id.is_empty() {
        format!("{}_{}_{}.pptx", stamp, doc_type, language.code())
    } else {
        format!("{}_{}_{}_{}.pptx", stamp, doc_type, record_id, language.code())
    };
    dir.join(filename)
}
