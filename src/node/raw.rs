//! Raw element trees
//!
//! A [`RawNode`] is whatever a renderer produced, before any normalization: children
//! may be missing, singular, nested in lists or padded with `null`/`false` fillers,
//! and element types are still opaque references rather than names.

use super::canonical::Node;
use super::props::{PropValue, Props};
use super::MockId;
use crate::render::RenderError;
use std::fmt;
use std::sync::Arc;

/// Render function attached to a component reference.
///
/// Receives the element's props and its children (if any) and returns the
/// component's own output, one level deep.
pub type RenderFn =
    Arc<dyn Fn(&Props, Option<&RawNode>) -> Result<RawNode, RenderError> + Send + Sync>;

/// A node as produced by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<RawNode>),
    Element(Box<RawElement>),
}

impl RawNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, RawNode::Null | RawNode::Bool(_) | RawNode::Text(_))
    }

    /// `null` and `false` are the two ways of rendering nothing.
    pub fn is_empty_render(&self) -> bool {
        matches!(self, RawNode::Null | RawNode::Bool(false))
    }

    pub fn as_element(&self) -> Option<&RawElement> {
        match self {
            RawNode::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An element before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    pub element_type: ElementType,
    pub props: Props,
    pub children: Option<RawNode>,
    pub key: Option<String>,
}

impl RawElement {
    pub fn new(element_type: impl Into<ElementType>) -> Self {
        Self {
            element_type: element_type.into(),
            props: Props::new(),
            children: None,
            key: None,
        }
    }

    /// Element for a primitive tag such as `div`.
    pub fn host(tag: impl Into<String>) -> Self {
        Self::new(ElementType::Host(tag.into()))
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append a child, turning a single child into a list when needed.
    pub fn child(mut self, child: impl Into<RawNode>) -> Self {
        let child = child.into();
        self.children = Some(match self.children.take() {
            None => child,
            Some(RawNode::List(mut items)) => {
                items.push(child);
                RawNode::List(items)
            }
            Some(existing) => RawNode::List(vec![existing, child]),
        });
        self
    }

    /// Replace the children with a list, exactly as given.
    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<RawNode>,
    {
        self.children = Some(RawNode::List(children.into_iter().map(Into::into).collect()));
        self
    }
}

/// The opaque "type" of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    /// A primitive tag name
    Host(String),
    Component(ComponentRef),
    Fragment,
    Suspense,
    Portal,
    Lazy,
    ForwardRef(ForwardRef),
    Memo(Memo),
}

impl ElementType {
    pub fn host(tag: impl Into<String>) -> Self {
        ElementType::Host(tag.into())
    }
}

impl From<&str> for ElementType {
    fn from(value: &str) -> Self {
        ElementType::Host(value.to_string())
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        ElementType::Host(value)
    }
}

impl From<ComponentRef> for ElementType {
    fn from(value: ComponentRef) -> Self {
        ElementType::Component(value)
    }
}

impl From<&ComponentRef> for ElementType {
    fn from(value: &ComponentRef) -> Self {
        ElementType::Component(value.clone())
    }
}

impl From<ForwardRef> for ElementType {
    fn from(value: ForwardRef) -> Self {
        ElementType::ForwardRef(value)
    }
}

impl From<Memo> for ElementType {
    fn from(value: Memo) -> Self {
        ElementType::Memo(value)
    }
}

/// Reference to a function or class component.
///
/// `name` mirrors a function's own name, `display_name` an explicitly declared
/// display name. A reference without a render function is a stand-in: renderers
/// leave it in place and it shows up in snapshots under its name.
#[derive(Clone)]
pub struct ComponentRef {
    id: MockId,
    name: Option<String>,
    display_name: Option<String>,
    render: Option<RenderFn>,
}

impl ComponentRef {
    /// A named stand-in without a render function.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MockId::next(),
            name: Some(name.into()),
            display_name: None,
            render: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: MockId::next(),
            name: None,
            display_name: None,
            render: None,
        }
    }

    /// A component that renders through `render`.
    pub fn with_render<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Props, Option<&RawNode>) -> Result<RawNode, RenderError> + Send + Sync + 'static,
    {
        Self {
            render: Some(Arc::new(render)),
            ..Self::new(name)
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn id(&self) -> MockId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn render_fn(&self) -> Option<&RenderFn> {
        self.render.as_ref()
    }

    /// Shorthand for an element of this component.
    pub fn element(&self) -> RawElement {
        RawElement::new(self)
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("id", &self.id.get())
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("renders", &self.render.is_some())
            .finish()
    }
}

/// A forward-reference wrapper around a render function.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRef {
    pub display_name: Option<String>,
    pub render: ComponentRef,
}

impl ForwardRef {
    pub fn new(render: ComponentRef) -> Self {
        Self {
            display_name: None,
            render,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// A memoized wrapper around another element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Memo {
    pub display_name: Option<String>,
    pub inner: Box<ElementType>,
}

impl Memo {
    pub fn new(inner: impl Into<ElementType>) -> Self {
        Self {
            display_name: None,
            inner: Box::new(inner.into()),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl From<RawElement> for RawNode {
    fn from(value: RawElement) -> Self {
        RawNode::Element(Box::new(value))
    }
}

impl From<&str> for RawNode {
    fn from(value: &str) -> Self {
        RawNode::Text(value.to_string())
    }
}

impl From<String> for RawNode {
    fn from(value: String) -> Self {
        RawNode::Text(value)
    }
}

impl From<bool> for RawNode {
    fn from(value: bool) -> Self {
        RawNode::Bool(value)
    }
}

impl From<Vec<RawNode>> for RawNode {
    fn from(value: Vec<RawNode>) -> Self {
        RawNode::List(value)
    }
}

impl<T: Into<RawNode>> From<Option<T>> for RawNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawNode::Null, Into::into)
    }
}

/// Canonical trees convert back losslessly: element names become host tags.
impl From<Node> for RawNode {
    fn from(value: Node) -> Self {
        match value {
            Node::Null => RawNode::Null,
            Node::Bool(b) => RawNode::Bool(b),
            Node::Text(s) => RawNode::Text(s),
            Node::List(items) => RawNode::List(items.into_iter().map(RawNode::from).collect()),
            Node::Element(element) => {
                let children = if element.children.is_empty() {
                    None
                } else {
                    Some(RawNode::List(
                        element.children.into_iter().map(RawNode::from).collect(),
                    ))
                };
                RawNode::from(RawElement {
                    element_type: ElementType::Host(element.type_name),
                    props: element.props,
                    children,
                    key: None,
                })
            }
        }
    }
}
