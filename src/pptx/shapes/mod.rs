//! Shape support for slides: the raw-XML shape wrapper, text-frame
//! rewriting, and picture generation.

pub mod base;
pub mod picture;
pub mod textframe;

pub use base::{Shape, ShapeGeometry, ShapeType};
