#![forbid(unsafe_code)]

//! Owned, mutable XML tree built from a `roxmltree` parse.
//!
//! `roxmltree` documents borrow their input and cannot be edited, so every
//! stage works on this owned copy instead. Only the information a
//! normalization stage can observe is kept: names, namespaces, attributes,
//! text, comments and processing instructions.

use xmlnorm_core::{ns, Error};

/// A namespace declaration made on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsDecl {
    /// `None` for the default namespace.
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub prefix: Option<String>,
    /// Local name.
    pub name: String,
    pub namespace: Option<String>,
    pub value: String,
}

impl Attribute {
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub prefix: Option<String>,
    /// Local name.
    pub name: String,
    pub namespace: Option<String>,
    /// Declarations made on this element (not inherited ones).
    pub namespaces: Vec<NsDecl>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Visit this element and every descendant element, children first.
    pub fn walk_post_order_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        for child in &mut self.children {
            if let XmlNode::Element(e) = child {
                e.walk_post_order_mut(f);
            }
        }
        f(self);
    }
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) => format!("{p}:{name}"),
        None => name.to_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: Option<String> },
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlNode::Text(t) => Some(t),
            _ => None,
        }
    }

    /// True for text nodes made only of XML whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.as_text()
            .is_some_and(|t| t.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')))
    }
}

/// A parsed document: the root element plus any comments and processing
/// instructions around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub prolog: Vec<XmlNode>,
    pub root: Element,
    pub epilog: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse XML text into an owned tree.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let doc = roxmltree::Document::parse_with_options(text, crate::parsing_options())
            .map_err(|e| Error::XmlParse(e.to_string()))?;

        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root = None;
        for child in doc.root().children() {
            if child.is_element() {
                root = Some(convert_element(child));
                continue;
            }
            let Some(node) = convert_misc(child) else {
                continue;
            };
            if root.is_none() {
                prolog.push(node);
            } else {
                epilog.push(node);
            }
        }

        let root = root.ok_or_else(|| Error::XmlParse("document has no root element".into()))?;
        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let namespace = tag.namespace().map(str::to_owned);
    let prefix = tag.namespace().and_then(|uri| lookup_prefix(node, uri));

    let parent = node.parent_element();
    let namespaces = node
        .namespaces()
        .filter(|decl| decl.name() != Some("xml"))
        .filter(|decl| {
            !parent.is_some_and(|p| {
                p.namespaces()
                    .any(|pd| pd.name() == decl.name() && pd.uri() == decl.uri())
            })
        })
        .map(|decl| NsDecl {
            prefix: decl.name().map(str::to_owned),
            uri: decl.uri().to_owned(),
        })
        .collect();

    let attributes = node
        .attributes()
        .map(|attr| Attribute {
            prefix: attr.namespace().and_then(|uri| lookup_prefix(node, uri)),
            name: attr.name().to_owned(),
            namespace: attr.namespace().map(str::to_owned),
            value: attr.value().to_owned(),
        })
        .collect();

    let children = node
        .children()
        .filter_map(|child| {
            if child.is_element() {
                Some(XmlNode::Element(convert_element(child)))
            } else if child.is_text() {
                Some(XmlNode::Text(child.text().unwrap_or("").to_owned()))
            } else {
                convert_misc(child)
            }
        })
        .collect();

    Element {
        prefix,
        name: tag.name().to_owned(),
        namespace,
        namespaces,
        attributes,
        children,
    }
}

/// Comments and processing instructions. Anything else yields `None`.
fn convert_misc(node: roxmltree::Node<'_, '_>) -> Option<XmlNode> {
    match node.node_type() {
        roxmltree::NodeType::Comment => Some(XmlNode::Comment(node.text().unwrap_or("").to_owned())),
        roxmltree::NodeType::PI => node.pi().map(|pi| XmlNode::ProcessingInstruction {
            target: pi.target.to_owned(),
            data: pi.value.map(str::to_owned),
        }),
        _ => None,
    }
}

fn lookup_prefix(node: roxmltree::Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == ns::XML {
        return Some("xml".to_owned());
    }
    node.lookup_prefix(uri).map(str::to_owned)
}
