//! Raw-to-canonical tree normalization
//!
//! Rewrites renderer output into the canonical shape (see [`crate::node::canonical`]):
//!
//! - leaves pass through untouched, lists are normalized item by item
//! - an element's type is replaced by its classified name
//! - children are coerced to a list, normalized, nested lists are spliced in place and
//!   falsy fillers (`null`, `false`, empty text) are dropped
//! - element-valued props are normalized in place, through lists and maps too
//! - callbacks known to the mock table take their mock name
//!
//! Normalizing a tree that is already canonical gives the same tree back.

use crate::classify::TypeClassifier;
use crate::mocks::MockNames;
use crate::node::{Element, Mode, Node, PropValue, Props, RawElement, RawNode};
use tracing::debug;

const CHILDREN_PROP: &str = "children";
const KEY_PROP: &str = "key";

/// Normalizes raw trees for one [`Mode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer<'m> {
    classifier: TypeClassifier<'m>,
    mock_names: Option<&'m MockNames>,
    mode: Mode,
}

impl<'m> Normalizer<'m> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_mock_names(mut self, mock_names: &'m MockNames) -> Self {
        self.classifier = TypeClassifier::with_mock_names(mock_names);
        self.mock_names = Some(mock_names);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn normalize(&self, node: &RawNode) -> Node {
        match node {
            RawNode::Null => Node::Null,
            RawNode::Bool(b) => Node::Bool(*b),
            RawNode::Text(text) => Node::Text(text.clone()),
            RawNode::List(items) => Node::List(items.iter().map(|n| self.normalize(n)).collect()),
            RawNode::Element(element) => Node::Element(self.normalize_element(element)),
        }
    }

    fn normalize_element(&self, element: &RawElement) -> Element {
        let mut props: Props = element
            .props
            .iter()
            .filter(|(key, _)| key.as_str() != CHILDREN_PROP)
            .map(|(key, value)| (key.clone(), self.normalize_prop(value)))
            .collect();
        if let Some(key) = element.key.as_deref().filter(|key| !key.is_empty()) {
            props.insert(KEY_PROP.to_string(), PropValue::Str(key.to_string()));
        }

        let children = match &element.children {
            Some(children) => self.normalize_children(children),
            None => match element.props.get(CHILDREN_PROP) {
                Some(value) => match value.to_raw_node() {
                    Some(children) => self.normalize_children(&children),
                    None => {
                        debug!("ignoring non-renderable children prop");
                        Vec::new()
                    }
                },
                None => Vec::new(),
            },
        };

        Element {
            mode: self.mode,
            type_name: self.classifier.classify_type(&element.element_type),
            props,
            children,
        }
    }

    /// Coerce to a list, normalize, splice nested lists and drop falsy entries.
    fn normalize_children(&self, children: &RawNode) -> Vec<Node> {
        let items = match children {
            RawNode::List(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            splice_into(&mut out, self.normalize(item));
        }
        out
    }

    fn normalize_prop(&self, value: &PropValue) -> PropValue {
        match value {
            PropValue::Element(raw) => PropValue::Node(Box::new(self.normalize(raw))),
            PropValue::List(items) => {
                PropValue::List(items.iter().map(|v| self.normalize_prop(v)).collect())
            }
            PropValue::Map(entries) => PropValue::Map(
                entries
                    .iter()
                    .map(|(key, v)| (key.clone(), self.normalize_prop(v)))
                    .collect(),
            ),
            PropValue::Callback(callback) => {
                match self.mock_names.and_then(|names| names.get(callback.id())) {
                    Some(name) => PropValue::Callback(callback.renamed(name)),
                    None => value.clone(),
                }
            }
            other => other.clone(),
        }
    }
}

fn splice_into(out: &mut Vec<Node>, node: Node) {
    match node {
        Node::List(items) => {
            for item in items {
                splice_into(out, item);
            }
        }
        node if node.is_falsy() => {}
        node => out.push(node),
    }
}

/// Normalize in query mode without a mock table.
pub fn normalize(node: &RawNode) -> Node {
    Normalizer::new(Mode::Query).normalize(node)
}
