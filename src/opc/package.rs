/// Objects that implement reading and writing OPC packages.
///
/// The main OpcPackage type represents an Open Packaging Convention
/// package in memory: a map of parts plus the package-level relationships.
use crate::opc::constants::relationship_type;
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{PACKAGE_URI, PackURI};
use crate::opc::part::Part;
use crate::opc::phys_pkg::PhysPkgReader;
use crate::opc::pkgreader::PackageReader;
use crate::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// An Open Packaging Convention package in memory.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, indexed by partname
    parts: HashMap<String, Part>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(PhysPkgReader::open(path)?)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(PhysPkgReader::from_reader(reader)?)?)
    }

    /// Convert serialized parts and relationships into the in-memory
    /// object graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.pkg_srels() {
            package.rels.add_relationship(
                srel.reltype.clone(),
                srel.target_ref.clone(),
                srel.r_id.clone(),
                srel.is_external(),
            );
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = Part::new(spart.partname, spart.content_type, spart.blob);
            for srel in &spart.srels {
                part.rels_mut().add_relationship(
                    srel.reltype.clone(),
                    srel.target_ref.clone(),
                    srel.r_id.clone(),
                    srel.is_external(),
                );
            }
            package.parts.insert(part.partname().to_string(), part);
        }

        Ok(package)
    }

    /// Get a reference to the main document part.
    ///
    /// For a presentation package this is the `/ppt/presentation.xml` part,
    /// reached through the package-level officeDocument relationship.
    pub fn main_document_part(&self) -> Result<&Part> {
        let rel = self.rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&Part> {
        self.parts
            .get(partname.as_str())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut Part> {
        self.parts
            .get_mut(partname.as_str())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add a new part to the package, replacing any part with the same
    /// partname.
    pub fn add_part(&mut self, part: Part) {
        self.parts.insert(part.partname().to_string(), part);
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }

    /// Get an iterator over all parts in the package.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    /// Get the number of parts in the package.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get a reference to the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Find the next available partname for a part template.
    ///
    /// Useful for creating new parts with sequential numbering, e.g.
    /// `next_partname("/ppt/slides/slide%d.xml")` or
    /// `next_partname("/ppt/media/image%d.png")`.
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        let mut n = 1u32;
        loop {
            let candidate = template.replace("%d", &n.to_string());
            if !self.parts.contains_key(&candidate) {
                return PackURI::new(candidate).map_err(OpcError::InvalidPackUri);
            }
            n += 1;
            if n > 10000 {
                // Safety limit to prevent infinite loops
                return Err(OpcError::InvalidPackUri(
                    "Too many parts, cannot find next partname".to_string(),
                ));
            }
        }
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_minimal_pptx() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#).unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:sldIdLst/>
</p:presentation>"#).unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn open_package_from_reader() {
        let zip_data = create_minimal_pptx();
        let pkg = OpcPackage::from_reader(Cursor::new(zip_data)).unwrap();

        assert_eq!(pkg.part_count(), 1);
    }

    #[test]
    fn main_document_part_content_type() {
        let zip_data = create_minimal_pptx();
        let pkg = OpcPackage::from_reader(Cursor::new(zip_data)).unwrap();

        let main_part = pkg.main_document_part().unwrap();
        assert_eq!(
            main_part.content_type(),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"
        );
    }

    #[test]
    fn next_partname_skips_existing() {
        let zip_data = create_minimal_pptx();
        let mut pkg = OpcPackage::from_reader(Cursor::new(zip_data)).unwrap();

        let first = pkg.next_partname("/ppt/slides/slide%d.xml").unwrap();
        assert_eq!(first.as_str(), "/ppt/slides/slide1.xml");

        pkg.add_part(Part::new(
            first.clone(),
            "application/xml".to_string(),
            b"<p:sld/>".to_vec(),
        ));

        let second = pkg.next_partname("/ppt/slides/slide%d.xml").unwrap();
        assert_eq!(second.as_str(), "/ppt/slides/slide2.xml");
    }
}
