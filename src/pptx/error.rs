/// Error types for PresentationML operations.
use thiserror::Error;

/// Result type for PresentationML operations.
pub type Result<T> = std::result::Result<T, PptxError>;

/// Error types for PresentationML operations.
#[derive(Error, Debug)]
pub enum PptxError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::opc::error::OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// A named slide layout is absent from the template.
    ///
    /// Layout names are template-author-controlled strings, so the message
    /// carries every name actually present for diagnosis.
    #[error("Cannot find layout named '{name}'. Available layouts: {available:?}")]
    LayoutNotFound { name: String, available: Vec<String> },

    /// A named shape is absent from the slide.
    ///
    /// Same diagnosis rule as for layouts: the message enumerates every
    /// shape name present on the slide.
    #[error("Cannot find shape named '{name}'. Available shapes: {available:?}")]
    ShapeNotFound { name: String, available: Vec<String> },

    /// Text replacement was attempted on a shape with no text-bearing region
    #[error("Shape '{0}' has no text frame")]
    NoTextFrame(String),

    /// A picture placeholder has no usable position/size
    #[error("Shape '{0}' has no usable geometry for image placement")]
    MissingGeometry(String),

    /// Image file could not be probed or has an unsupported format
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for PptxError {
    fn from(err: quick_xml::Error) -> Self {
        PptxError::Xml(err.to_string())
    }
}
