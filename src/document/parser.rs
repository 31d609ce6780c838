//! Document loading and XML parsing
//!
//! Some authoring systems inject processing instructions that strict XML
//! parsers reject. They are removed by literal substring match before
//! the text is parsed into an [`XmlElement`] tree.

use crate::document::tree::{XmlElement, XmlNode};
use crate::DocumentError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Directives stripped from the raw document text before parsing
pub const CLEANUP_DIRECTIVES: &[&str] = &[
    "<?sc-transform-do-oumusic-to-unicode?>",
    "<?sc-transform-do-oxy-pi?>",
    r#"<?xml version="1.0" encoding="utf-8"?>"#,
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#,
];

/// Removes the known non-standard directives from document text
pub fn clean_document(text: &str) -> String {
    let mut cleaned = text.trim_start_matches('\u{feff}').to_string();
    for directive in CLEANUP_DIRECTIVES {
        cleaned = cleaned.replace(directive, "");
    }
    cleaned
}

/// Reads a document from disk, cleans it, and parses it
///
/// # Returns
///
/// * `Ok(XmlElement)` - The document root element
/// * `Err(DocumentError::Io)` - The file could not be read
/// * `Err(DocumentError::Malformed)` - The text is not well-formed XML after cleaning
pub fn load_document(path: &Path) -> Result<XmlElement, DocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text, path)
}

/// Cleans and parses document text; `path` is only used for error reporting
pub fn parse_document(text: &str, path: &Path) -> Result<XmlElement, DocumentError> {
    let cleaned = clean_document(text);
    parse_xml(&cleaned).map_err(|message| DocumentError::Malformed {
        path: path.to_path_buf(),
        message,
    })
}

/// Parses well-formed XML into a tree, returning the root element
fn parse_xml(text: &str) -> Result<XmlElement, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("error at position {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let el = element_from(&start)?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| "closing tag without matching opening tag".to_string())?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(raw) => {
                let text = raw.unescape().map_err(|e| e.to_string())?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(raw) => {
                let text = String::from_utf8_lossy(&raw.into_inner()).into_owned();
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, processing instructions, comments and doctypes carry no links
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }

    root.ok_or_else(|| "document has no root element".to_string())
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let mut el = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        el.attributes.push((key, value));
    }

    Ok(el)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    el: XmlElement,
) -> Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(el));
        return Ok(());
    }

    if root.is_some() {
        return Err(format!("second root element <{}>", el.name));
    }
    *root = Some(el);
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(text.to_string()));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err("text outside of the root element".to_string()),
    }
}
