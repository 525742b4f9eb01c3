//! Breadth-first key search and text extraction over a `GenericNode` tree.
//!
//! The structure is viewed as nested single-key maps: every node is a map
//! from its key (element name or `#text`) to its value, and an element's
//! value is the list of its entries. Searching never needs to know the
//! schema path to a field, at the cost of ambiguity when a key name recurs
//! at several depths: the first match in breadth-first order wins.

use std::collections::VecDeque;

use super::node::{Attribute, GenericNode};
use crate::config::{ATTRIBUTES_KEY, TEXT_KEY};
use crate::error::{ConvertError, Result};

/// One map visited by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// A node, keyed by its element name or `#text`.
    Node(&'a GenericNode),
    /// The synthetic attribute entry of an element, keyed by `#attributes`.
    Attributes(&'a [Attribute]),
}

/// The value stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Leaf text.
    Text(&'a str),
    /// The entry list of an element.
    List(&'a GenericNode),
    /// Attribute pairs.
    Attributes(&'a [Attribute]),
}

impl<'a> Entry<'a> {
    /// The key this entry is found under.
    #[must_use]
    pub fn key(&self) -> &'a str {
        match *self {
            Self::Node(node) => node.key(),
            Self::Attributes(_) => ATTRIBUTES_KEY,
        }
    }

    /// The value stored under this entry's key.
    #[must_use]
    pub fn value(&self) -> Value<'a> {
        match *self {
            Self::Node(GenericNode::Leaf(text)) => Value::Text(text),
            Self::Node(node) => Value::List(node),
            Self::Attributes(attributes) => Value::Attributes(attributes),
        }
    }

    /// Entries reachable through this entry's list-valued value.
    fn nested(&self) -> Vec<Entry<'a>> {
        match *self {
            Self::Node(node) => node.entries().collect(),
            Self::Attributes(_) => Vec::new(),
        }
    }
}

impl<'a> Value<'a> {
    /// The entries of a list value.
    ///
    /// # Errors
    /// Returns `ConvertError::StructuralMismatch` for text and attribute values.
    pub fn entries(&self) -> Result<Vec<Entry<'a>>> {
        match *self {
            Self::List(node) => Ok(node.entries().collect()),
            Self::Text(text) => Err(ConvertError::StructuralMismatch(format!(
                "expected a list, found text '{text}'"
            ))),
            Self::Attributes(_) => Err(ConvertError::StructuralMismatch(
                "expected a list, found attributes".to_string(),
            )),
        }
    }

    /// Child elements of a list value, skipping its text and attribute entries.
    ///
    /// # Errors
    /// Returns `ConvertError::StructuralMismatch` for text and attribute values.
    pub fn elements(&self) -> Result<Vec<Entry<'a>>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| matches!(e, Entry::Node(GenericNode::Element { .. })))
            .collect())
    }
}

/// Something the search can start from: a single map or a list of maps.
pub trait Scope<'a> {
    /// The entries that seed the search queue.
    fn seeds(&self) -> Result<Vec<Entry<'a>>>;

    /// Find the value stored under `key`, see [`find_key`].
    fn find(&self, key: &str) -> Result<Value<'a>> {
        find_key(self.seeds()?, key)
    }

    /// Find the text of the field stored under `key`, see [`get_text`].
    fn text(&self, key: &str) -> Result<&'a str> {
        get_text(self.seeds()?, key)
    }
}

impl<'a> Scope<'a> for Entry<'a> {
    fn seeds(&self) -> Result<Vec<Entry<'a>>> {
        Ok(vec![*self])
    }
}

impl<'a> Scope<'a> for Value<'a> {
    fn seeds(&self) -> Result<Vec<Entry<'a>>> {
        self.entries()
    }
}

impl GenericNode {
    /// Find the value stored under `key`, starting from this node itself.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use europass_tex::tree::{GenericNode, Scope, Value};
    ///
    /// let xml = "<CV><Identification><Surname>Doe</Surname></Identification></CV>";
    /// let doc = Document::parse(xml).unwrap();
    /// let root = GenericNode::from_xml(doc.root_element()).unwrap().unwrap();
    ///
    /// let identification = root.find("Identification").unwrap();
    /// assert!(matches!(identification, Value::List(_)));
    /// assert_eq!(identification.text("Surname").unwrap(), "Doe");
    /// ```
    pub fn find(&self, key: &str) -> Result<Value<'_>> {
        find_key([Entry::Node(self)], key)
    }

    /// Find the text of the field stored under `key`, starting from this node.
    pub fn text(&self, key: &str) -> Result<&str> {
        get_text([Entry::Node(self)], key)
    }
}

/// Breadth-first search for `key`.
///
/// The queue is seeded with `seeds` in order. The first entry whose key
/// matches wins, even if the key also occurs elsewhere.
///
/// # Errors
/// Returns `ConvertError::KeyNotFound` when no entry matches.
pub fn find_key<'a>(seeds: impl IntoIterator<Item = Entry<'a>>, key: &str) -> Result<Value<'a>> {
    let mut queue: VecDeque<Entry<'a>> = seeds.into_iter().collect();

    while let Some(front) = queue.pop_front() {
        if front.key() == key {
            return Ok(front.value());
        }
        queue.extend(front.nested());
    }

    Err(ConvertError::KeyNotFound(key.to_string()))
}

/// Extract the text of the field stored under `key`.
///
/// Each seed is searched on its own, in order. For the first seed that
/// holds the key, the text is taken from the first entry of the field's
/// list. A seed without the key, or whose field list is empty, is skipped.
///
/// # Errors
/// - `ConvertError::KeyNotFound` when no seed yields the field, or when the
///   field's first entry holds no text
/// - `ConvertError::StructuralMismatch` when the field is not a list
pub fn get_text<'a>(seeds: impl IntoIterator<Item = Entry<'a>>, key: &str) -> Result<&'a str> {
    for seed in seeds {
        let value = match find_key([seed], key) {
            Ok(value) => value,
            Err(ConvertError::KeyNotFound(_)) => continue,
            Err(e) => return Err(e),
        };

        if let Some(first) = value.entries()?.into_iter().next() {
            return match find_key([first], TEXT_KEY)? {
                Value::Text(text) => Ok(text),
                _ => Err(ConvertError::StructuralMismatch(format!(
                    "field '{key}' holds no text"
                ))),
            };
        }
    }

    Err(ConvertError::KeyNotFound(key.to_string()))
}
