#![forbid(unsafe_code)]

//! Serialization of [`XmlDocument`] trees, compact or indented.

use crate::document::{Element, XmlDocument, XmlNode};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Writes trees into a string buffer.
///
/// A compact writer reproduces every node verbatim. An indented writer
/// puts each element of element-only content on its own line; text-only
/// elements stay on one line and mixed content is written compactly so no
/// significant whitespace is invented.
pub struct XmlWriter {
    out: String,
    indent: Option<usize>,
}

impl XmlWriter {
    pub fn compact() -> Self {
        Self {
            out: String::new(),
            indent: None,
        }
    }

    pub fn indented(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent: Some(indent),
        }
    }

    fn write_declaration(&mut self) {
        self.out.push_str(DECLARATION);
        if self.indent.is_some() {
            self.out.push('\n');
        }
    }

    /// Write a whole document. Indented output starts with the XML
    /// declaration and ends with a newline.
    pub fn write_document(&mut self, doc: &XmlDocument) {
        if self.indent.is_some() {
            self.write_declaration();
        }
        for node in &doc.prolog {
            self.write_top_level(node);
        }
        self.write_element(&doc.root);
        self.end_top_level();
        for node in &doc.epilog {
            self.write_top_level(node);
        }
    }

    pub fn write_element(&mut self, element: &Element) {
        match self.indent {
            Some(_) => self.write_pretty_element(element, 0),
            None => self.write_compact_element(element),
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn write_top_level(&mut self, node: &XmlNode) {
        match node {
            XmlNode::Element(e) => self.write_element(e),
            other => self.write_compact_node(other),
        }
        self.end_top_level();
    }

    fn end_top_level(&mut self) {
        if self.indent.is_some() {
            self.out.push('\n');
        }
    }

    fn pad(&mut self, depth: usize) {
        let width = self.indent.unwrap_or(0) * depth;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn write_pretty_element(&mut self, element: &Element, depth: usize) {
        if !is_block(element) {
            self.write_compact_element(element);
            return;
        }
        self.write_start_tag(element);
        self.out.push('>');
        for child in element.children.iter().filter(|c| !c.is_whitespace()) {
            self.out.push('\n');
            self.pad(depth + 1);
            match child {
                XmlNode::Element(e) => self.write_pretty_element(e, depth + 1),
                other => self.write_compact_node(other),
            }
        }
        self.out.push('\n');
        self.pad(depth);
        self.write_end_tag(element);
    }

    fn write_compact_element(&mut self, element: &Element) {
        self.write_start_tag(element);
        if element.children.is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');
        for child in &element.children {
            self.write_compact_node(child);
        }
        self.write_end_tag(element);
    }

    fn write_compact_node(&mut self, node: &XmlNode) {
        match node {
            XmlNode::Element(e) => self.write_compact_element(e),
            XmlNode::Text(t) => push_escaped(&mut self.out, t, Quoting::Text),
            XmlNode::Comment(c) => {
                self.out.push_str("<!--");
                self.out.push_str(&c.replace("--", "- -"));
                if c.ends_with('-') {
                    self.out.push(' ');
                }
                self.out.push_str("-->");
            }
            XmlNode::ProcessingInstruction { target, data } => {
                self.out.push_str("<?");
                self.out.push_str(target);
                if let Some(data) = data.as_deref().filter(|d| !d.is_empty()) {
                    self.out.push(' ');
                    self.out.push_str(data);
                }
                self.out.push_str("?>");
            }
        }
    }

    fn write_start_tag(&mut self, element: &Element) {
        self.out.push('<');
        self.out.push_str(&element.qualified_name());
        for decl in &element.namespaces {
            match &decl.prefix {
                Some(prefix) => self.write_attribute(&format!("xmlns:{prefix}"), &decl.uri),
                None => self.write_attribute("xmlns", &decl.uri),
            }
        }
        for attr in &element.attributes {
            self.write_attribute(&attr.qualified_name(), &attr.value);
        }
    }

    fn write_attribute(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        push_escaped(&mut self.out, value, Quoting::Attribute);
        self.out.push('"');
    }

    fn write_end_tag(&mut self, element: &Element) {
        self.out.push_str("</");
        self.out.push_str(&element.qualified_name());
        self.out.push('>');
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quoting {
    Text,
    Attribute,
}

/// Append `s` with markup characters replaced by references. Carriage
/// returns are always written as `&#xD;` so they survive a re-parse;
/// attribute values also protect quotes and the whitespace that attribute
/// normalization would otherwise fold into spaces.
fn push_escaped(out: &mut String, s: &str, quoting: Quoting) {
    for ch in s.chars() {
        let reference = match (ch, quoting) {
            ('&', _) => "&amp;",
            ('<', _) => "&lt;",
            ('\r', _) => "&#xD;",
            ('>', Quoting::Text) => "&gt;",
            ('"', Quoting::Attribute) => "&quot;",
            ('\t', Quoting::Attribute) => "&#x9;",
            ('\n', Quoting::Attribute) => "&#xA;",
            _ => {
                out.push(ch);
                continue;
            }
        };
        out.push_str(reference);
    }
}

/// An element is laid out as a block when its content is element-only
/// (ignoring whitespace) and non-empty.
fn is_block(element: &Element) -> bool {
    let mut has_markup = false;
    for child in &element.children {
        match child {
            XmlNode::Text(_) if child.is_whitespace() => {}
            XmlNode::Text(_) => return false,
            _ => has_markup = true,
        }
    }
    has_markup
}

/// Serialize a document without any added whitespace or declaration.
pub fn to_compact_string(doc: &XmlDocument) -> String {
    let mut writer = XmlWriter::compact();
    writer.write_document(doc);
    writer.into_string()
}

/// Serialize a single element compactly.
pub fn element_to_string(element: &Element) -> String {
    let mut writer = XmlWriter::compact();
    writer.write_element(element);
    writer.into_string()
}

/// Serialize a document with the given indentation width.
pub fn to_pretty_string(doc: &XmlDocument, indent: usize) -> String {
    let mut writer = XmlWriter::indented(indent);
    writer.write_document(doc);
    writer.into_string()
}
