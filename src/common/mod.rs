//! Utilities shared across the OPC and PresentationML layers.

pub mod xml;
