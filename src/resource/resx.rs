//! Resx (XML resource) parsing and writing, built on quick-xml events.
//!
//! Only `<data>` elements are significant on read; `<resheader>`, comments,
//! and schema declarations are skipped. Entries carrying a `type=` or
//! `mimetype=` attribute are kept but marked [`ValueKind::Typed`] so the
//! translatable filter can exclude them.

use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{ResourceEntry, ResourceTable, ValueKind};

/// Parse a resx document. Returns a human-readable reason on failure.
pub(super) fn parse(text: &str) -> Result<ResourceTable, String> {
    let mut reader = Reader::from_str(text);

    let mut table = ResourceTable::new();
    let mut saw_root = false;
    // (key, kind) of the <data> element currently open, if any
    let mut current: Option<(String, ValueKind)> = None;
    let mut in_value = false;
    let mut value_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"root" => saw_root = true,
                b"data" => {
                    current = Some(data_attributes(&e)?);
                    value_buf.clear();
                }
                b"value" if current.is_some() => in_value = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"data" => {
                    let (key, kind) = data_attributes(&e)?;
                    table.insert_entry(ResourceEntry {
                        key,
                        value: String::new(),
                        kind,
                    });
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_value => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                value_buf.push_str(&text);
            }
            Ok(Event::CData(c)) if in_value => {
                let text = std::str::from_utf8(c.as_ref()).map_err(|e| e.to_string())?;
                value_buf.push_str(text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"value" => in_value = false,
                b"data" => {
                    if let Some((key, kind)) = current.take() {
                        table.insert_entry(ResourceEntry {
                            key,
                            value: std::mem::take(&mut value_buf),
                            kind,
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    if !saw_root {
        return Err("not a resx document (no <root> element)".to_string());
    }
    Ok(table)
}

/// Extract the key and value kind from a `<data>` element's attributes.
fn data_attributes(element: &BytesStart<'_>) -> Result<(String, ValueKind), String> {
    let mut key = None;
    let mut kind = ValueKind::Text;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        match attr.key.as_ref() {
            b"name" => {
                let value = attr.unescape_value().map_err(|e| e.to_string())?;
                key = Some(value.into_owned());
            }
            b"type" | b"mimetype" => kind = ValueKind::Typed,
            _ => {}
        }
    }

    match key {
        Some(key) => Ok((key, kind)),
        None => Err("<data> element without a name attribute".to_string()),
    }
}

const RESX_HEADERS: &[(&str, &str)] = &[
    ("resmimetype", "text/microsoft-resx"),
    ("version", "2.0"),
    (
        "reader",
        "System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, \
         Culture=neutral, PublicKeyToken=b77a5c561934e089",
    ),
    (
        "writer",
        "System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, \
         Culture=neutral, PublicKeyToken=b77a5c561934e089",
    ),
];

fn to_io<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

/// Serialize a table to resx bytes, entries in table order.
pub(super) fn write(table: &ResourceTable) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(to_io)?;
    writer
        .write_event(Event::Start(BytesStart::new("root")))
        .map_err(to_io)?;

    for (name, value) in RESX_HEADERS {
        let mut header = BytesStart::new("resheader");
        header.push_attribute(("name", *name));
        writer.write_event(Event::Start(header)).map_err(to_io)?;
        writer
            .write_event(Event::Start(BytesStart::new("value")))
            .map_err(to_io)?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(to_io)?;
        writer
            .write_event(Event::End(BytesEnd::new("value")))
            .map_err(to_io)?;
        writer
            .write_event(Event::End(BytesEnd::new("resheader")))
            .map_err(to_io)?;
    }

    for entry in table.iter() {
        let mut data = BytesStart::new("data");
        data.push_attribute(("name", entry.key.as_str()));
        data.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(data)).map_err(to_io)?;
        writer
            .write_event(Event::Start(BytesStart::new("value")))
            .map_err(to_io)?;
        writer
            .write_event(Event::Text(BytesText::new(&entry.value)))
            .map_err(to_io)?;
        writer
            .write_event(Event::End(BytesEnd::new("value")))
            .map_err(to_io)?;
        writer
            .write_event(Event::End(BytesEnd::new("data")))
            .map_err(to_io)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("root")))
        .map_err(to_io)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
