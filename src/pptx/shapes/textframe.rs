/// Text frame access and rewriting for shapes.
///
/// Text lives in `<p:txBody>` as paragraphs (`<a:p>`) of runs (`<a:r>`),
/// each run carrying its own character formatting in `<a:rPr>`. Rewrites
/// here never add or remove runs from an existing paragraph and never touch
/// run properties, so formatting applied by the template author survives
/// text substitution.
use crate::common::xml::{ElementSpan, child_element_spans, element_span, escape_xml};
use crate::pptx::error::{PptxError, Result};
use quick_xml::events::{BytesEnd, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Extract all visible text, paragraphs separated by newlines.
pub(crate) fn extract_text(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);

    let mut text = String::new();
    let mut para_count = 0usize;
    let mut in_text_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"p" => {
                if para_count > 0 {
                    text.push('\n');
                }
                para_count += 1;
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                in_text_element = true;
            }
            Ok(Event::Text(e)) if in_text_element => {
                let t = e.decode().map_err(xml_err)?;
                text.push_str(&t);
            }
            Ok(Event::GeneralRef(e)) if in_text_element => {
                if let Some(ch) = resolve_entity(&e) {
                    text.push(ch);
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_element = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(e)),
            _ => {}
        }
    }

    Ok(text)
}

/// Resolve the predefined XML entities and numeric character references.
fn resolve_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ if name.starts_with(b"#x") || name.starts_with(b"#X") => {
            std::str::from_utf8(&name[2..])
                .ok()
                .and_then(|s| u32::from_str_radix(s, 16).ok())
                .and_then(char::from_u32)
        }
        _ if name.starts_with(b"#") => std::str::from_utf8(&name[1..])
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .and_then(char::from_u32),
        _ => None,
    }
}

/// Replace the text of a free-floating text box.
///
/// Writes into the first run of the first paragraph only; every other run
/// and paragraph is left byte-for-byte intact.
pub(crate) fn set_text_textbox(xml: &[u8], new_text: &str) -> Result<Vec<u8>> {
    let paragraphs = paragraph_spans(xml)?;
    let first = paragraphs
        .first()
        .ok_or_else(|| PptxError::InvalidFormat("text frame has no paragraphs".to_string()))?;

    let (rewritten, replaced) = rewrite_runs(first.slice(xml), |run| {
        if run == 0 {
            RunAction::Set(new_text.to_string())
        } else {
            RunAction::Keep
        }
    })?;
    if replaced == 0 {
        return Err(PptxError::InvalidFormat(
            "text frame has no runs".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(xml.len() + new_text.len());
    out.extend_from_slice(&xml[..first.start]);
    out.extend_from_slice(&rewritten);
    out.extend_from_slice(&xml[first.end..]);
    Ok(out)
}

/// Replace the text of a layout placeholder.
///
/// Line `i` of the new text goes into paragraph `i`'s first run; surplus
/// runs are emptied rather than removed. Surplus lines append paragraphs
/// cloned from the last one so paragraph and run styling carries over.
pub(crate) fn set_text_placeholder(xml: &[u8], new_text: &str) -> Result<Vec<u8>> {
    let lines: Vec<&str> = new_text.split('\n').collect();
    let paragraphs = paragraph_spans(xml)?;

    if paragraphs.is_empty() {
        return Err(PptxError::InvalidFormat(
            "text frame has no paragraphs".to_string(),
        ));
    }

    let first = paragraphs.first().unwrap();
    let last = paragraphs.last().unwrap();

    let mut out = Vec::with_capacity(xml.len() + new_text.len());
    out.extend_from_slice(&xml[..first.start]);

    for (index, span) in paragraphs.iter().enumerate() {
        let line = lines.get(index).copied().unwrap_or("");
        out.extend_from_slice(&set_paragraph_line(span.slice(xml), line)?);
    }

    // Overflow lines clone the last paragraph's structure
    for line in lines.iter().skip(paragraphs.len()) {
        out.extend_from_slice(&set_paragraph_line(last.slice(xml), line)?);
    }

    out.extend_from_slice(&xml[last.end..]);
    Ok(out)
}

/// Spans of the `<a:p>` children of the shape's `<p:txBody>`.
fn paragraph_spans(xml: &[u8]) -> Result<Vec<ElementSpan>> {
    let body = element_span(xml, b"txBody")
        .map_err(PptxError::Xml)?
        .ok_or_else(|| PptxError::InvalidFormat("shape has no text body".to_string()))?;

    let mut spans = child_element_spans(body.slice(xml), b"txBody").map_err(PptxError::Xml)?;
    spans.retain(|span| span.local == b"p");
    for span in &mut spans {
        span.start += body.start;
        span.end += body.start;
    }
    Ok(spans)
}

/// Put `line` into the paragraph's first run and empty the others.
///
/// A paragraph with no runs at all gets a plain run injected.
fn set_paragraph_line(paragraph: &[u8], line: &str) -> Result<Vec<u8>> {
    let (rewritten, replaced) = rewrite_runs(paragraph, |run| {
        if run == 0 {
            RunAction::Set(line.to_string())
        } else {
            RunAction::Set(String::new())
        }
    })?;

    if replaced > 0 || line.is_empty() {
        return Ok(rewritten);
    }
    Ok(inject_run(paragraph, line))
}

/// Append a plain `<a:r>` to a paragraph that has none.
fn inject_run(paragraph: &[u8], line: &str) -> Vec<u8> {
    let run = format!("<a:r><a:t>{}</a:t></a:r>", escape_xml(line));

    if paragraph.ends_with(b"/>") {
        // Self-closing <a:p/>
        return format!("<a:p>{}</a:p>", run).into_bytes();
    }

    match memchr::memmem::rfind(paragraph, b"</") {
        Some(pos) => {
            let mut out = Vec::with_capacity(paragraph.len() + run.len());
            out.extend_from_slice(&paragraph[..pos]);
            out.extend_from_slice(run.as_bytes());
            out.extend_from_slice(&paragraph[pos..]);
            out
        }
        None => paragraph.to_vec(),
    }
}

enum RunAction {
    Keep,
    Set(String),
}

/// Stream one paragraph, applying `assign` to each run's `<a:t>` content.
///
/// Returns the rewritten XML and the number of `<a:t>` elements whose text
/// was replaced.
fn rewrite_runs(
    xml: &[u8],
    mut assign: impl FnMut(usize) -> RunAction,
) -> Result<(Vec<u8>, usize)> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));

    let mut run_index: Option<usize> = None;
    let mut seen_runs = 0usize;
    let mut replaced = 0usize;
    let mut drop_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let local = e.local_name().as_ref().to_vec();
                if local == b"r" {
                    run_index = Some(seen_runs);
                    seen_runs += 1;
                } else if local == b"t" {
                    if let Some(index) = run_index {
                        if let RunAction::Set(text) = assign(index) {
                            writer.write_event(Event::Start(e)).map_err(xml_err)?;
                            writer
                                .write_event(Event::Text(BytesText::new(&text)))
                                .map_err(xml_err)?;
                            replaced += 1;
                            drop_text = true;
                            continue;
                        }
                    }
                }
                writer.write_event(Event::Start(e)).map_err(xml_err)?;
            }
            Ok(Event::Empty(e)) => {
                // A self-closing <a:t/> expands when it receives text
                if e.local_name().as_ref() == b"t" {
                    if let Some(index) = run_index {
                        if let RunAction::Set(text) = assign(index) {
                            replaced += 1;
                            if !text.is_empty() {
                                let end = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                                writer.write_event(Event::Start(e)).map_err(xml_err)?;
                                writer
                                    .write_event(Event::Text(BytesText::new(&text)))
                                    .map_err(xml_err)?;
                                writer
                                    .write_event(Event::End(BytesEnd::new(end)))
                                    .map_err(xml_err)?;
                                continue;
                            }
                        }
                    }
                }
                writer.write_event(Event::Empty(e)).map_err(xml_err)?;
            }
            Ok(Event::End(e)) => {
                let local = e.local_name().as_ref().to_vec();
                if local == b"r" {
                    run_index = None;
                } else if local == b"t" {
                    drop_text = false;
                }
                writer.write_event(Event::End(e)).map_err(xml_err)?;
            }
            Ok(Event::Text(e)) => {
                if !drop_text {
                    writer.write_event(Event::Text(e)).map_err(xml_err)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(e)),
            other => {
                // Entity references, CDATA and comments pass through, except
                // inside an <a:t> whose content was replaced
                let event = other.map_err(xml_err)?;
                if !drop_text {
                    writer.write_event(event).map_err(xml_err)?;
                }
            }
        }
    }

    Ok((writer.into_inner(), replaced))
}

fn xml_err<E: std::fmt::Display>(err: E) -> PptxError {
    PptxError::Xml(err.to_string())
}
