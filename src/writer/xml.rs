use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::EncodeError;

/// In-memory builder for one XML part of a spreadsheet container.
///
/// Text and attribute values are escaped by quick-xml; whitespace is
/// written as given, except carriage returns in text, which become `&#13;`
/// so readers do not normalise them away. Other C0 control characters are
/// not allowed in XML 1.0 and are rejected.
pub(super) struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    /// Start a part with the standalone UTF-8 declaration
    pub fn new() -> Result<Self, EncodeError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(EncodeError::xml)?;
        Ok(Self { writer })
    }

    /// Open an element
    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EncodeError> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer
            .write_event(Event::Start(start))
            .map_err(EncodeError::xml)
    }

    /// Close an element
    pub fn close(&mut self, name: &str) -> Result<(), EncodeError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(EncodeError::xml)
    }

    /// Write a self-closing element
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EncodeError> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer
            .write_event(Event::Empty(start))
            .map_err(EncodeError::xml)
    }

    /// Write escaped character data
    pub fn text(&mut self, text: &str) -> Result<(), EncodeError> {
        if let Some(ch) = text.chars().find(|&c| is_forbidden_control(c)) {
            return Err(EncodeError::XmlError(format!(
                "control character U+{:04X} cannot be written to XML",
                u32::from(ch)
            )));
        }

        let mut escaped = escape(text);
        if escaped.contains('\r') {
            escaped = escaped.replace('\r', "&#13;").into();
        }
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escaped)))
            .map_err(EncodeError::xml)
    }

    /// Write `<name attrs>text</name>`
    pub fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), EncodeError> {
        self.open(name, attrs)?;
        self.text(text)?;
        self.close(name)
    }

    /// Finished document bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn is_forbidden_control(c: char) -> bool {
    c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')
}
