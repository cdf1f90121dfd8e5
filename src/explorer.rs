//! Query and traversal over canonical trees
//!
//! An [`Explorer`] owns a canonical tree flattened into an arena. Entries are allocated
//! in pre-order, so the subtree of any node is the contiguous range of entries from the
//! node itself up to its recorded end. Every find-by-* query is therefore a filtered scan
//! of that range, in traversal order, starting at the node itself.
//!
//! Parents are stored as indices, never as references, so the arena has a single owner
//! and no cycles. [`ExplorerNode`] is a cheap borrowed handle into it.
//!
//! ```text
//! let result = shallow(element);
//! let buttons = result.instance().find_by_class_name("go");
//! assert_eq!(buttons[0].type_name(), Some("button"));
//! ```

use crate::formats::SnapshotSerializer;
use crate::mocks::{MockComponent, MockNames};
use crate::node::{ComponentRef, Element, Mode, Node, PropValue, Props, RawNode};
use crate::normalize::normalize;
use crate::settings::{QueryConfig, SnapshotConfig};
use std::fmt;

/// Index of a node inside its [`Explorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum EntryKind {
    Leaf(Node),
    List,
    Element { type_name: String, mode: Mode },
}

#[derive(Debug, Clone)]
struct Entry {
    kind: EntryKind,
    props: Props,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// One past the last entry of this node's subtree
    end: usize,
}

/// A canonical tree prepared for querying.
#[derive(Debug, Clone)]
pub struct Explorer {
    entries: Vec<Entry>,
    query: QueryConfig,
    snapshot: SnapshotConfig,
    mock_names: MockNames,
}

impl Explorer {
    pub fn new(root: Node) -> Self {
        Self::with_config(root, QueryConfig::default())
    }

    /// Normalize a raw tree (query mode) and explore it.
    pub fn from_raw(root: &RawNode) -> Self {
        Self::new(normalize(root))
    }

    pub fn with_config(root: Node, query: QueryConfig) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        let mut pending: Vec<(Node, Option<NodeId>)> = vec![(root, None)];

        while let Some((node, parent)) = pending.pop() {
            let id = NodeId(entries.len());
            if let Some(parent) = parent {
                entries[parent.0].children.push(id);
            }
            let (kind, props, children) = match node {
                Node::List(items) => (EntryKind::List, Props::new(), items),
                Node::Element(element) => (
                    EntryKind::Element {
                        type_name: element.type_name,
                        mode: element.mode,
                    },
                    element.props,
                    element.children,
                ),
                leaf => (EntryKind::Leaf(leaf), Props::new(), Vec::new()),
            };
            entries.push(Entry {
                kind,
                props,
                parent,
                children: Vec::new(),
                end: id.0 + 1,
            });
            // reversed so the first child is popped (and numbered) first
            for child in children.into_iter().rev() {
                pending.push((child, Some(id)));
            }
        }

        // children always have higher indices than their parent
        for index in (0..entries.len()).rev() {
            if let Some(last) = entries[index].children.last().copied() {
                entries[index].end = entries[last.0].end;
            }
        }

        Self {
            entries,
            query,
            snapshot: SnapshotConfig::default(),
            mock_names: MockNames::new(),
        }
    }

    /// Settings used by [`ExplorerNode::snapshot`].
    pub fn with_snapshot_config(mut self, snapshot: SnapshotConfig) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Mock names used to resolve component references in type queries.
    pub fn with_mock_names(mut self, mock_names: MockNames) -> Self {
        self.mock_names = mock_names;
        self
    }

    pub fn root(&self) -> ExplorerNode<'_> {
        ExplorerNode {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<ExplorerNode<'_>> {
        (id.0 < self.entries.len()).then_some(ExplorerNode { tree: self, id })
    }

    /// Number of nodes, leaves included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query
    }

    pub fn snapshot_config(&self) -> &SnapshotConfig {
        &self.snapshot
    }

    fn entry(&self, id: NodeId) -> &Entry {
        &self.entries[id.0]
    }
}

/// What a type query compares against.
///
/// Strings match literally. A component reference matches by its mock name when the
/// explorer knows one, otherwise by its declared `name`; a reference with neither
/// matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeQuery {
    Name(String),
    Component(ComponentRef),
}

impl TypeQuery {
    /// The type name this query looks for, if it resolves to one.
    pub fn resolve<'q>(&'q self, mock_names: &'q MockNames) -> Option<&'q str> {
        match self {
            TypeQuery::Name(name) => Some(name),
            TypeQuery::Component(component) => mock_names
                .get(component.id())
                .filter(|name| !name.is_empty())
                .or_else(|| component.name().filter(|name| !name.is_empty())),
        }
    }
}

impl From<&str> for TypeQuery {
    fn from(value: &str) -> Self {
        TypeQuery::Name(value.to_string())
    }
}

impl From<String> for TypeQuery {
    fn from(value: String) -> Self {
        TypeQuery::Name(value)
    }
}

impl From<&String> for TypeQuery {
    fn from(value: &String) -> Self {
        TypeQuery::Name(value.clone())
    }
}

impl From<&ComponentRef> for TypeQuery {
    fn from(value: &ComponentRef) -> Self {
        TypeQuery::Component(value.clone())
    }
}

impl From<&MockComponent> for TypeQuery {
    fn from(value: &MockComponent) -> Self {
        TypeQuery::Name(value.name().to_string())
    }
}

/// Borrowed handle to one node of an [`Explorer`].
#[derive(Clone, Copy)]
pub struct ExplorerNode<'t> {
    tree: &'t Explorer,
    id: NodeId,
}

impl<'t> ExplorerNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Classified type, `None` for leaves and lists.
    pub fn type_name(&self) -> Option<&'t str> {
        match &self.tree.entry(self.id).kind {
            EntryKind::Element { type_name, .. } => Some(type_name),
            EntryKind::Leaf(_) | EntryKind::List => None,
        }
    }

    /// Props of an element; empty for leaves and lists.
    pub fn props(&self) -> &'t Props {
        &self.tree.entry(self.id).props
    }

    pub fn prop(&self, key: &str) -> Option<&'t PropValue> {
        self.props().get(key)
    }

    pub fn children(&self) -> impl Iterator<Item = ExplorerNode<'t>> + 't {
        let tree = self.tree;
        tree.entry(self.id)
            .children
            .iter()
            .map(move |&id| ExplorerNode { tree, id })
    }

    pub fn child(&self, index: usize) -> Option<ExplorerNode<'t>> {
        self.children().nth(index)
    }

    pub fn parent(&self) -> Option<ExplorerNode<'t>> {
        self.tree
            .entry(self.id)
            .parent
            .map(|id| ExplorerNode { tree: self.tree, id })
    }

    /// Every node of the subtree rooted here, in pre-order, self first.
    pub fn descendants(&self) -> impl Iterator<Item = ExplorerNode<'t>> + 't {
        let tree = self.tree;
        (self.id.0..tree.entry(self.id).end).map(move |index| ExplorerNode {
            tree,
            id: NodeId(index),
        })
    }

    /// Pre-order matches of `predicate` over the subtree, self included.
    pub fn find_all<F>(&self, mut predicate: F) -> Vec<ExplorerNode<'t>>
    where
        F: FnMut(&ExplorerNode<'t>) -> bool,
    {
        self.descendants().filter(|node| predicate(node)).collect()
    }

    pub fn find_by_prop(&self, key: &str, value: &PropValue) -> Vec<ExplorerNode<'t>> {
        self.find_all(|node| node.prop(key) == Some(value))
    }

    pub fn find_by_test_id(&self, test_id: &str) -> Vec<ExplorerNode<'t>> {
        let attribute = self.tree.query.test_id_attribute.as_str();
        self.find_all(|node| string_prop(node, attribute) == Some(test_id))
    }

    pub fn find_by_class_name(&self, class_name: &str) -> Vec<ExplorerNode<'t>> {
        let attribute = self.tree.query.class_name_attribute.as_str();
        self.find_all(|node| string_prop(node, attribute) == Some(class_name))
    }

    pub fn find_by_type(&self, query: impl Into<TypeQuery>) -> Vec<ExplorerNode<'t>> {
        let query = query.into();
        let Some(name) = query.resolve(&self.tree.mock_names) else {
            return Vec::new();
        };
        self.find_all(|node| node.type_name() == Some(name))
    }

    /// The node as it was handed to the explorer, presentation marker included.
    pub fn el(&self) -> Node {
        self.materialize(true)
    }

    /// Canonical data: the leaf itself, or a rebuilt element without parent links.
    pub fn data(&self) -> Node {
        self.materialize(false)
    }

    fn materialize(&self, keep_mode: bool) -> Node {
        let entry = self.tree.entry(self.id);
        match &entry.kind {
            EntryKind::Leaf(leaf) => leaf.clone(),
            EntryKind::List => Node::List(
                self.children()
                    .map(|child| child.materialize(keep_mode))
                    .collect(),
            ),
            EntryKind::Element { type_name, mode } => Node::Element(Element {
                mode: if keep_mode { *mode } else { Mode::Query },
                type_name: type_name.clone(),
                props: entry.props.clone(),
                children: self
                    .children()
                    .map(|child| child.materialize(keep_mode))
                    .collect(),
            }),
        }
    }

    /// Deep structural equality against anything that has canonical data.
    pub fn matches<T: CanonicalData + ?Sized>(&self, other: &T) -> bool {
        self.data() == other.canonical_data()
    }

    /// Snapshot text for this subtree, using the explorer's snapshot settings.
    pub fn snapshot(&self) -> String {
        SnapshotSerializer::new(self.tree.snapshot.clone()).serialize(&self.el())
    }
}

fn string_prop<'t>(node: &ExplorerNode<'t>, key: &str) -> Option<&'t str> {
    node.prop(key).and_then(PropValue::as_str)
}

impl fmt::Debug for ExplorerNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplorerNode")
            .field("id", &self.id.0)
            .field("type", &self.type_name())
            .field("props", self.props())
            .finish()
    }
}

/// Values that can be compared with [`ExplorerNode::matches`].
pub trait CanonicalData {
    fn canonical_data(&self) -> Node;
}

impl CanonicalData for Node {
    fn canonical_data(&self) -> Node {
        self.clone()
    }
}

impl CanonicalData for Element {
    fn canonical_data(&self) -> Node {
        Node::Element(self.clone())
    }
}

/// Raw trees are normalized in query mode first.
impl CanonicalData for RawNode {
    fn canonical_data(&self) -> Node {
        normalize(self)
    }
}

impl CanonicalData for ExplorerNode<'_> {
    fn canonical_data(&self) -> Node {
        self.data()
    }
}

impl CanonicalData for Explorer {
    fn canonical_data(&self) -> Node {
        self.root().data()
    }
}
