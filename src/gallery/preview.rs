use std::io::Cursor;

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Edge length, in pixels, every preview is drawn at.
pub const PREVIEW_SIZE: &str = "48";

/// Shown in place of a preview that could not be loaded.
pub const PLACEHOLDER: &str = r#"<div class="icon-placeholder">SVG</div>"#;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attr(#[from] AttrError),

    #[error("Failed to write preview: {0}")]
    Io(#[from] std::io::Error),

    #[error("No <svg> root element")]
    MissingRoot,
}

/// Reduce raw asset markup to its root `<svg>` element drawn at preview size.
///
/// Anything before the root (XML declaration, doctype, comments) and after it is dropped.
pub fn prepare_preview(markup: &str) -> Result<String, PreviewError> {
    let mut reader = Reader::from_str(markup);
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(markup.len())));
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(elem) if depth == 0 && elem.name().as_ref() == b"svg" => {
                writer.write_event(Event::Start(sized_root(&elem)?))?;
                depth = 1;
            }
            Event::Empty(elem) if depth == 0 && elem.name().as_ref() == b"svg" => {
                writer.write_event(Event::Empty(sized_root(&elem)?))?;
                break;
            }
            Event::Eof => return Err(PreviewError::MissingRoot),
            _ if depth == 0 => {}
            Event::Start(elem) => {
                depth += 1;
                writer.write_event(Event::Start(elem))?;
            }
            Event::End(elem) => {
                depth -= 1;
                writer.write_event(Event::End(elem))?;
                if depth == 0 {
                    break;
                }
            }
            event => writer.write_event(event)?,
        }
    }

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn sized_root(elem: &BytesStart<'_>) -> Result<BytesStart<'static>, PreviewError> {
    let mut root = BytesStart::new("svg");
    for attr in elem.attributes() {
        let attr = attr?;
        if matches!(attr.key.as_ref(), b"width" | b"height") {
            continue;
        }
        root.push_attribute(attr);
    }
    root.push_attribute(("width", PREVIEW_SIZE));
    root.push_attribute(("height", PREVIEW_SIZE));
    Ok(root)
}
