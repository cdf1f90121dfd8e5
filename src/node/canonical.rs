//! Canonical element trees
//!
//! The normalized, renderer-independent shape used for comparison and serialization:
//!
//! - an element's `type_name` is always a classified name, never an opaque reference
//! - `children` is flat: no nested lists, no `null`/`false` fillers
//! - `props` never holds `children`; a source `key` is folded into `props["key"]`
//!
//! Leaves (`null`, booleans, text) are their own degenerate trees.

use super::props::Props;
use serde::{Serialize, Serializer};

/// Which consumer a tree was normalized for.
///
/// Only affects presentation: snapshot-mode elements carry a marker that the
/// structured formats emit, query-mode elements do not. Equality ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Query,
    Snapshot,
}

impl Mode {
    /// Marker value emitted for snapshot-mode elements.
    pub const SNAPSHOT_MARKER: &'static str = "shallow.test.json";

    pub fn is_query(&self) -> bool {
        matches!(self, Mode::Query)
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mode::Query => serializer.serialize_unit(),
            Mode::Snapshot => serializer.serialize_str(Self::SNAPSHOT_MARKER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<Node>),
    Element(Element),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Null | Node::Bool(_) | Node::Text(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Falsy nodes are dropped from child lists.
    pub fn is_falsy(&self) -> bool {
        match self {
            Node::Null | Node::Bool(false) => true,
            Node::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Element {
    #[serde(rename = "$$typeof", skip_serializing_if = "Mode::is_query")]
    pub mode: Mode,
    #[serde(rename = "type")]
    pub type_name: String,
    pub props: Props,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            mode: Mode::Query,
            type_name: type_name.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(
        mut self,
        key: impl Into<String>,
        value: impl Into<super::props::PropValue>,
    ) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.props == other.props
            && self.children == other.children
    }
}
