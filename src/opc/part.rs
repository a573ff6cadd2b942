use crate::opc::packuri::PackURI;
use crate::opc::rel::Relationships;
/// Open Packaging Convention (OPC) objects related to package parts.
///
/// Parts are the fundamental units of content in an OPC package: each has a
/// unique partname, a content type, a binary blob, and optionally a set of
/// relationships to other parts. Unlike a pure reader, this representation
/// is mutable: filling a deck rewrites slide-part XML in place and adds
/// image parts and relationships.

/// A part in an OPC package.
#[derive(Debug)]
pub struct Part {
    /// The partname (URI) of this part
    partname: PackURI,

    /// The content type of this part
    content_type: String,

    /// The binary content of this part
    blob: Vec<u8>,

    /// Relationships from this part to other parts
    rels: Relationships,
}

impl Part {
    /// Create a new part.
    pub fn new(partname: PackURI, content_type: String, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type,
            blob,
            rels,
        }
    }

    /// Get the partname of this part.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Get the content type of this part.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the binary content of this part.
    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Replace the binary content of this part.
    ///
    /// Used when syncing an edited slide's XML back into the package.
    pub fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
    }

    /// Get the relationships for this part.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Get mutable access to the relationships for this part.
    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Add or get a relationship to another part.
    ///
    /// If a relationship of the given type to the target already exists,
    /// returns its rId. Otherwise, creates a new relationship and returns
    /// the new rId. The target is stored as a reference relative to this
    /// part's directory.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname.base_uri());
        let rel = self.rels.get_or_add(reltype, &target_ref);
        rel.r_id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::relationship_type;

    #[test]
    fn part_holds_blob_and_content_type() {
        let partname = PackURI::new("/ppt/media/image1.png").unwrap();
        let content = vec![0x89, 0x50, 0x4E, 0x47]; // PNG header
        let part = Part::new(partname, "image/png".to_string(), content.clone());

        assert_eq!(part.content_type(), "image/png");
        assert_eq!(part.blob(), content.as_slice());
    }

    #[test]
    fn set_blob_replaces_content() {
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let mut part = Part::new(partname, "application/xml".to_string(), b"<old/>".to_vec());
        part.set_blob(b"<new/>".to_vec());
        assert_eq!(part.blob(), b"<new/>");
    }

    #[test]
    fn relate_to_stores_relative_target() {
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let mut part = Part::new(
            partname,
            "application/xml".to_string(),
            b"<p:sld/>".to_vec(),
        );

        let media = PackURI::new("/ppt/media/image1.png").unwrap();
        let r_id = part.relate_to(&media, relationship_type::IMAGE);
        assert_eq!(r_id, "rId1");

        let rel = part.rels().get("rId1").unwrap();
        assert_eq!(rel.target_ref(), "../media/image1.png");

        // Relating again to the same target reuses the rId
        assert_eq!(part.relate_to(&media, relationship_type::IMAGE), "rId1");
    }
}
