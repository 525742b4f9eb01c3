//! Generic node type and the transformation from a parsed XML tree.

use roxmltree::{Node, NodeType};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::search::Entry;
use crate::config::{ATTRIBUTES_KEY, TEXT_KEY};
use crate::error::{ConvertError, Result};

/// An attribute as a `(name, value)` pair.
pub type Attribute = (String, String);

/// Schema-agnostic representation of a parsed document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericNode {
    /// Non-empty, whitespace-trimmed text content.
    Leaf(String),

    /// Named element with its children and attributes in document order.
    Element {
        name: String,
        children: Vec<GenericNode>,
        attributes: Vec<Attribute>,
    },
}

impl GenericNode {
    /// Transform a parsed XML node.
    ///
    /// Returns `Ok(None)` for nodes that carry no data: whitespace-only text,
    /// comments and processing instructions.
    ///
    /// # Errors
    /// Returns `ConvertError::StructuralMismatch` for any other node shape,
    /// such as the document root node.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use europass_tex::tree::GenericNode;
    ///
    /// let doc = Document::parse(r#"<Name lang="en"> Jane </Name>"#).unwrap();
    /// let node = GenericNode::from_xml(doc.root_element()).unwrap().unwrap();
    ///
    /// assert_eq!(node.name(), Some("Name"));
    /// assert_eq!(node.children(), &[GenericNode::Leaf("Jane".to_string())]);
    /// assert_eq!(node.attribute("lang"), Some("en"));
    /// ```
    pub fn from_xml(node: Node<'_, '_>) -> Result<Option<Self>> {
        match node.node_type() {
            NodeType::Text => {
                let text = node.text().unwrap_or_default().trim();
                if text.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Self::Leaf(text.to_string())))
                }
            }
            NodeType::Element => {
                let mut children = Vec::new();
                for child in node.children() {
                    if let Some(converted) = Self::from_xml(child)? {
                        children.push(converted);
                    }
                }
                let attributes = node
                    .attributes()
                    .map(|a| (a.name().to_string(), a.value().to_string()))
                    .collect();

                Ok(Some(Self::Element {
                    name: node.tag_name().name().to_string(),
                    children,
                    attributes,
                }))
            }
            NodeType::Comment | NodeType::PI => Ok(None),
            NodeType::Root => Err(ConvertError::StructuralMismatch(
                "expected an element or text node, got the document root".to_string(),
            )),
        }
    }

    /// The key this node is found under: its element name, or `#text` for a leaf.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Leaf(_) => TEXT_KEY,
            Self::Element { name, .. } => name,
        }
    }

    /// Element name, `None` for a leaf.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Leaf(_) => None,
            Self::Element { name, .. } => Some(name),
        }
    }

    /// Child nodes, empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[GenericNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Element { children, .. } => children,
        }
    }

    /// Attributes, empty for a leaf.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::Leaf(_) => &[],
            Self::Element { attributes, .. } => attributes,
        }
    }

    /// Look up a single attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup_attribute(self.attributes(), name)
    }

    /// The entries of this element's list: its children, then the synthetic
    /// attribute entry when the element has attributes.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        let attributes = self.attributes();
        self.children()
            .iter()
            .map(Entry::Node)
            .chain((!attributes.is_empty()).then_some(Entry::Attributes(attributes)))
    }
}

/// Look up an attribute value by name in an attribute list.
pub(crate) fn lookup_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Serializes as the nested map view: `{"#text": text}` for a leaf,
/// `{name: [children..., {"#attributes": [[name, value], ...]}]}` for an element.
impl Serialize for GenericNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Leaf(text) => map.serialize_entry(TEXT_KEY, text)?,
            Self::Element { name, .. } => {
                let entries: Vec<Entry<'_>> = self.entries().collect();
                map.serialize_entry(name, &entries)?;
            }
        }
        map.end()
    }
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Entry::Node(node) => node.serialize(serializer),
            Entry::Attributes(attributes) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(ATTRIBUTES_KEY, attributes)?;
                map.end()
            }
        }
    }
}
