//! Open Packaging Conventions (OPC) support.
//!
//! A `.pptx` file is an OPC package: a ZIP archive whose members ("parts")
//! are tied together by `[Content_Types].xml` and per-part relationship
//! files. This module provides just enough of OPC to open a presentation
//! template, mutate its parts in memory, and serialize the result back to
//! a valid package.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use error::{OpcError, Result};
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgwriter::PackageWriter;
