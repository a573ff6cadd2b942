/// Package entry point for PowerPoint presentations.
use crate::opc::OpcPackage;
use crate::opc::constants::content_type as ct;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::presentation::Presentation;
use std::io::Read;
use std::path::Path;

/// A PowerPoint (.pptx) package.
///
/// Wraps an OPC package whose main part has been verified to be a
/// PresentationML presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use deckhand::pptx::Package;
///
/// let pkg = Package::open("template.pptx")?;
/// let mut pres = pkg.into_presentation();
/// println!("layouts: {:?}", pres.layout_names()?);
/// # Ok::<(), deckhand::pptx::PptxError>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    /// Partname of the verified presentation part
    main_partname: crate::opc::PackURI,
}

impl Package {
    /// Open a `.pptx` package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Open a `.pptx` package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Verify the main part's content type and wrap the package.
    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| PptxError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        // Support both regular and macro-enabled presentations
        if content_type != ct::PML_PRESENTATION_MAIN && content_type != ct::PML_PRES_MACRO_MAIN {
            return Err(PptxError::InvalidContentType {
                expected: format!(
                    "{} or {}",
                    ct::PML_PRESENTATION_MAIN,
                    ct::PML_PRES_MACRO_MAIN
                ),
                got: content_type.to_string(),
            });
        }

        let main_partname = main_part.partname().clone();
        Ok(Self { opc, main_partname })
    }

    /// Turn the package into an editable presentation.
    pub fn into_presentation(self) -> Presentation {
        Presentation::new(self.opc, self.main_partname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn minimal_package(content_type: &str) -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer
                .write_all(
                    format!(
                        r#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="{}"/>
</Types>"#,
                        content_type
                    )
                    .as_bytes(),
                )
                .unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer
                .write_all(br#"<p:presentation xmlns:p="p"><p:sldIdLst/></p:presentation>"#)
                .unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn accepts_presentation_content_type() {
        let data = minimal_package(ct::PML_PRESENTATION_MAIN);
        assert!(Package::from_reader(Cursor::new(data)).is_ok());
    }

    #[test]
    fn rejects_foreign_content_type() {
        let data = minimal_package("application/vnd.example.other+xml");
        assert!(matches!(
            Package::from_reader(Cursor::new(data)),
            Err(PptxError::InvalidContentType { .. })
        ));
    }
}
