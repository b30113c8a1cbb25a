#![forbid(unsafe_code)]

//! Namespace constants and element-name rules shared across the workspace.

/// XML namespace (bound to the `xml` prefix).
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// The character used to join element names in a stage's textual form.
///
/// Configured names may never contain it.
pub const NAME_DELIMITER: char = '|';

/// Check whether `name` is usable as an unprefixed XML element name.
///
/// This follows the XML `NCName` production loosely: a letter or `_`
/// first, then letters, digits, `_`, `-` or `.`. Non-ASCII alphanumerics
/// are accepted. A `:` is refused since element names are matched after
/// namespace prefixes have been removed.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
