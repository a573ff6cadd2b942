//! Byte-level XML scanning helpers.
//!
//! Slide and layout parts are edited as raw XML: shapes are located as byte
//! spans inside their parent element and spliced, never re-serialized
//! wholesale. The helpers here find those spans with a streaming quick-xml
//! pass, leaving the original bytes untouched.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Escape XML special characters.
#[inline]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A byte span of one element (start tag through matching end tag) within a
/// larger XML buffer, together with the element's local name.
#[derive(Debug, Clone)]
pub struct ElementSpan {
    pub start: usize,
    pub end: usize,
    pub local: Vec<u8>,
}

impl ElementSpan {
    /// Slice the span out of the buffer it was scanned from.
    #[inline]
    pub fn slice<'a>(&self, xml: &'a [u8]) -> &'a [u8] {
        &xml[self.start..self.end]
    }
}

/// Find the byte spans of all direct children of the first element whose
/// local name is `container`.
///
/// Nested occurrences of the same local names deeper in the tree are not
/// reported; only immediate children of the container are. Returns an empty
/// vector if the container is absent.
pub fn child_element_spans(xml: &[u8], container: &[u8]) -> Result<Vec<ElementSpan>, String> {
    let mut reader = Reader::from_reader(xml);
    let mut spans = Vec::new();

    let mut depth = 0usize;
    let mut container_depth: Option<usize> = None;
    let mut child_start: Option<usize> = None;
    let mut child_local: Vec<u8> = Vec::new();

    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                match container_depth {
                    None => {
                        if e.local_name().as_ref() == container {
                            container_depth = Some(depth);
                        }
                    }
                    Some(cd) => {
                        if depth == cd + 1 {
                            child_start = Some(pos);
                            child_local = e.local_name().as_ref().to_vec();
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(cd) = container_depth {
                    if depth == cd && child_start.is_none() {
                        spans.push(ElementSpan {
                            start: pos,
                            end: reader.buffer_position() as usize,
                            local: e.local_name().as_ref().to_vec(),
                        });
                    }
                }
            }
            Ok(Event::End(_)) => {
                if let Some(cd) = container_depth {
                    if depth == cd + 1 {
                        if let Some(start) = child_start.take() {
                            spans.push(ElementSpan {
                                start,
                                end: reader.buffer_position() as usize,
                                local: std::mem::take(&mut child_local),
                            });
                        }
                    } else if depth == cd {
                        break;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML scan error: {}", e)),
            _ => {}
        }
    }

    Ok(spans)
}

/// Find the byte span of the first element with the given local name.
pub fn element_span(xml: &[u8], local: &[u8]) -> Result<Option<ElementSpan>, String> {
    let mut reader = Reader::from_reader(xml);

    let mut depth = 0usize;
    let mut target_depth: Option<usize> = None;
    let mut target_start = 0usize;

    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                if target_depth.is_none() && e.local_name().as_ref() == local {
                    target_depth = Some(depth);
                    target_start = pos;
                }
            }
            Ok(Event::Empty(e)) => {
                if target_depth.is_none() && e.local_name().as_ref() == local {
                    return Ok(Some(ElementSpan {
                        start: pos,
                        end: reader.buffer_position() as usize,
                        local: local.to_vec(),
                    }));
                }
            }
            Ok(Event::End(_)) => {
                if target_depth == Some(depth) {
                    return Ok(Some(ElementSpan {
                        start: target_start,
                        end: reader.buffer_position() as usize,
                        local: local.to_vec(),
                    }));
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML scan error: {}", e)),
            _ => {}
        }
    }

    Ok(None)
}

/// Check whether the buffer contains an element with the given local name.
pub fn contains_element(xml: &[u8], local: &[u8]) -> bool {
    matches!(element_span(xml, local), Ok(Some(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &[u8] = b"<p:spTree><p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/></p:nvGrpSpPr>\
        <p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Title 1\"/></p:nvSpPr></p:sp>\
        <p:pic><p:nvPicPr><p:cNvPr id=\"3\" name=\"Logo\"/></p:nvPicPr></p:pic>\
        <p:sp/></p:spTree>";

    #[test]
    fn finds_direct_children_only() {
        let spans = child_element_spans(TREE, b"spTree").unwrap();
        let locals: Vec<&[u8]> = spans.iter().map(|s| s.local.as_slice()).collect();
        assert_eq!(
            locals,
            vec![
                b"nvGrpSpPr".as_slice(),
                b"sp".as_slice(),
                b"pic".as_slice(),
                b"sp".as_slice()
            ]
        );

        // The nested cNvPr elements are not direct children
        assert!(spans.iter().all(|s| s.local != b"cNvPr"));
    }

    #[test]
    fn spans_slice_back_to_source() {
        let spans = child_element_spans(TREE, b"spTree").unwrap();
        let pic = spans.iter().find(|s| s.local == b"pic").unwrap();
        let bytes = pic.slice(TREE);
        assert!(bytes.starts_with(b"<p:pic>"));
        assert!(bytes.ends_with(b"</p:pic>"));
    }

    #[test]
    fn self_closing_children_are_reported() {
        let spans = child_element_spans(TREE, b"spTree").unwrap();
        assert_eq!(spans.last().unwrap().slice(TREE), b"<p:sp/>");
    }

    #[test]
    fn element_span_finds_first_match() {
        let span = element_span(TREE, b"sp").unwrap().unwrap();
        assert!(span.slice(TREE).starts_with(b"<p:sp><p:nvSpPr>"));

        assert!(element_span(TREE, b"txBody").unwrap().is_none());
        assert!(contains_element(TREE, b"pic"));
    }

    #[test]
    fn missing_container_yields_no_spans() {
        let spans = child_element_spans(b"<a><b/></a>", b"zzz").unwrap();
        assert!(spans.is_empty());
    }
}
