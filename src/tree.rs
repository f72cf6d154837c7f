//! # DAE Tree Loader
//!
//! Loads an XML DAE dump into an arena of element nodes. Nodes are stored in
//! document order, so iterating the arena is a pre-order walk of the tree.

use crate::error::{Result, WrapperError};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;

type NodeId = usize;

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
}

/// A parsed XML document
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    /// First element (in document order) for each `name` attribute value
    by_name: HashMap<String, NodeId>,
}

/// Borrowed handle to one element of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl Document {
    /// Parse XML text into a document tree
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut doc = Document::default();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let id = doc.push_element(&start, stack.last().copied())?;
                    stack.push(id);
                }
                Event::Empty(start) => {
                    doc.push_element(&start, stack.last().copied())?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        tracing::debug!("[TREE] Loaded {} elements ({} named)", doc.elements.len(), doc.by_name.len());
        Ok(doc)
    }

    /// Read and parse the XML file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&xml)
    }

    fn push_element(&mut self, start: &BytesStart<'_>, parent: Option<NodeId>) -> Result<NodeId> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = normalize_whitespace(&String::from_utf8_lossy(&attr.value));
            let value = unescape(&raw)?.into_owned();
            attributes.push((key, value));
        }

        let id = self.elements.len();
        if let Some((_, name)) = attributes.iter().find(|(key, _)| key == "name") {
            self.by_name.entry(name.clone()).or_insert(id);
        }
        self.elements.push(Element {
            tag,
            attributes,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.elements[parent].children.push(id);
        }

        Ok(id)
    }

    /// All elements in document order, the root first
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.elements.len()).map(move |id| Node { doc: self, id })
    }

    /// All `<variable>` elements in document order
    pub fn variables(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        self.iter().filter(|node| node.tag() == "variable")
    }

    /// First element in document order whose `name` attribute equals `name`
    pub fn find_by_name(&self, name: &str) -> Option<Node<'_>> {
        self.by_name.get(name).map(|&id| Node { doc: self, id })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> Node<'a> {
    fn element(&self) -> &'a Element {
        &self.doc.elements[self.id]
    }

    pub fn tag(&self) -> &'a str {
        &self.element().tag
    }

    /// Unescaped value of attribute `key`
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn name(&self) -> Option<&'a str> {
        self.attr("name")
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<Node<'a>> {
        let doc = self.doc;
        self.element()
            .children
            .iter()
            .map(|&id| Node { doc, id })
            .find(|node| node.tag() == tag)
    }

    /// Label used in error messages: the `name` attribute, or the tag
    pub(crate) fn label(&self) -> String {
        self.name().unwrap_or_else(|| self.tag()).to_string()
    }

    /// Follow a chain of direct children, e.g. `["attributesValues", "unit"]`
    pub(crate) fn require_path(&self, path: &[&str]) -> Result<Node<'a>> {
        let mut node = *self;
        for tag in path {
            node = node.child(tag).ok_or_else(|| WrapperError::MissingChild {
                node: self.label(),
                child: path.join("/"),
            })?;
        }
        Ok(node)
    }

    /// The `string` attribute of the child reached by `path`
    pub(crate) fn require_string(&self, path: &[&str]) -> Result<&'a str> {
        self.require_path(path)?
            .attr("string")
            .ok_or_else(|| WrapperError::malformed(&self.label(), &path.join("/"), "missing 'string' attribute"))
    }
}

/// Attribute-value normalization: literal line breaks and tabs become spaces,
/// a `\r\n` pair counting as one break. Character references are expanded
/// afterwards, so `&#10;` still yields a newline.
fn normalize_whitespace(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dae>
  <variables>
    <orderedVariables>
      <variablesList>
        <variable name="a.u" variability="continuous">
          <attributesValues>
            <unit string="&quot;K&quot;"/>
          </attributesValues>
        </variable>
        <variable name="a.u" variability="duplicate"/>
        <variable name="b.y"/>
      </variablesList>
    </orderedVariables>
  </variables>
</dae>"#;

    #[test]
    fn test_document_order_and_root() {
        let doc = Document::parse(SAMPLE).unwrap();
        let tags: Vec<_> = doc.iter().map(|n| n.tag()).collect();
        assert_eq!(tags[0], "dae");
        assert_eq!(
            tags,
            vec![
                "dae",
                "variables",
                "orderedVariables",
                "variablesList",
                "variable",
                "attributesValues",
                "unit",
                "variable",
                "variable",
            ]
        );
    }

    #[test]
    fn test_variables_and_unescape() {
        let doc = Document::parse(SAMPLE).unwrap();
        let names: Vec<_> = doc.variables().filter_map(|n| n.name()).collect();
        assert_eq!(names, vec!["a.u", "a.u", "b.y"]);

        let unit = doc
            .find_by_name("a.u")
            .unwrap()
            .require_string(&["attributesValues", "unit"])
            .unwrap();
        assert_eq!(unit, "\"K\"");
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let doc = Document::parse(SAMPLE).unwrap();
        let node = doc.find_by_name("a.u").unwrap();
        assert_eq!(node.attr("variability"), Some("continuous"));
        assert!(doc.find_by_name("missing").is_none());
    }

    #[test]
    fn test_require_path_reports_missing_child() {
        let doc = Document::parse(SAMPLE).unwrap();
        let node = doc.find_by_name("b.y").unwrap();
        let err = node.require_string(&["attributesValues", "unit"]).unwrap_err();
        assert!(matches!(
            err,
            WrapperError::MissingChild { ref node, ref child } if node == "b.y" && child == "attributesValues/unit"
        ));
    }

    #[test]
    fn test_attribute_whitespace_is_normalized() {
        let xml = "<dae><bindExpression name=\"d\" string=\"&quot;two\nlines\ttab\r\nend&quot;\"/></dae>";
        let doc = Document::parse(xml).unwrap();
        let value = doc.find_by_name("d").unwrap().attr("string").unwrap();
        assert_eq!(value, "\"two lines tab end\"");
    }

    #[test]
    fn test_character_references_keep_line_breaks() {
        let xml = "<dae><bindExpression name=\"d\" string=\"a&#10;b&#9;c\"/></dae>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.find_by_name("d").unwrap().attr("string"), Some("a\nb\tc"));
    }

    #[test]
    fn test_mismatched_tags_fail() {
        assert!(matches!(
            Document::parse("<a><b></a>"),
            Err(WrapperError::Xml(_))
        ));
    }
}
