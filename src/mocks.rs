//! Test doubles that read well in snapshots
//!
//! Two helpers:
//!
//! - [`MockNames`] is a side table from stand-in identity to display name. The
//!   classifier and the normalizer consult it, so renaming a component or callback
//!   never touches the value itself.
//! - [`mock_components`] builds a module of named stand-in components from a
//!   declarative name tree, e.g.
//!
//! ```text
//! { "Card": { "Body": "Card.Body" }, "IconButton": "IconButton" }
//! ```
//!
//!   `Card` becomes a stand-in component named `Card` with a `Body` member that
//!   renders as the host tag `Card.Body`; `IconButton` renders as the tag `IconButton`.

use crate::node::{Callback, ComponentRef, ElementType, MockId, RawElement};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Anything that can be renamed through the side table.
pub trait MockTarget {
    fn mock_id(&self) -> MockId;
}

impl MockTarget for ComponentRef {
    fn mock_id(&self) -> MockId {
        self.id()
    }
}

impl MockTarget for Callback {
    fn mock_id(&self) -> MockId {
        self.id()
    }
}

/// Display names for stand-ins, keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct MockNames {
    names: HashMap<MockId, String>,
}

impl MockNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `target` a display name. A later call replaces an earlier one.
    pub fn set_mock_name(&mut self, target: &impl MockTarget, name: impl Into<String>) {
        self.names.insert(target.mock_id(), name.into());
    }

    pub fn get(&self, id: MockId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Free-function form of [`MockNames::set_mock_name`].
pub fn set_mock_name(names: &mut MockNames, target: &impl MockTarget, name: impl Into<String>) {
    names.set_mock_name(target, name);
}

/// Declarative description of a mocked component module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MockTree {
    /// Render under this literal name
    Name(String),
    /// A component with named members
    Nested(BTreeMap<String, MockTree>),
}

impl From<&str> for MockTree {
    fn from(value: &str) -> Self {
        MockTree::Name(value.to_string())
    }
}

/// One mocked export.
#[derive(Debug, Clone, PartialEq)]
pub enum MockComponent {
    /// Renders as a host tag of this name
    Tag(String),
    /// A named stand-in component with members of its own
    Nested {
        component: ComponentRef,
        members: BTreeMap<String, MockComponent>,
    },
}

impl MockComponent {
    pub fn element_type(&self) -> ElementType {
        match self {
            MockComponent::Tag(name) => ElementType::Host(name.clone()),
            MockComponent::Nested { component, .. } => ElementType::Component(component.clone()),
        }
    }

    /// Start an element of this stand-in.
    pub fn element(&self) -> RawElement {
        RawElement::new(self.element_type())
    }

    pub fn member(&self, name: &str) -> Option<&MockComponent> {
        match self {
            MockComponent::Tag(_) => None,
            MockComponent::Nested { members, .. } => members.get(name),
        }
    }

    /// Name this stand-in classifies to.
    pub fn name(&self) -> &str {
        match self {
            MockComponent::Tag(name) => name,
            MockComponent::Nested { component, .. } => component.name().unwrap_or_default(),
        }
    }
}

/// Mock a single component. Nested members are named `<name>.<member>`.
pub fn mock_nested_component(name: &str, contents: &MockTree) -> MockComponent {
    match contents {
        MockTree::Name(literal) => MockComponent::Tag(literal.clone()),
        MockTree::Nested(entries) => {
            let members = entries
                .iter()
                .map(|(member, value)| {
                    (
                        member.clone(),
                        mock_nested_component(&format!("{name}.{member}"), value),
                    )
                })
                .collect();
            MockComponent::Nested {
                component: ComponentRef::new(name),
                members,
            }
        }
    }
}

/// A mocked module: top-level export name to stand-in.
#[derive(Debug, Clone, Default)]
pub struct MockModule {
    exports: BTreeMap<String, MockComponent>,
}

impl MockModule {
    pub fn get(&self, name: &str) -> Option<&MockComponent> {
        self.exports.get(name)
    }

    /// Look up a dotted path such as `Form.Control.Feedback`.
    pub fn path(&self, path: &str) -> Option<&MockComponent> {
        let mut segments = path.split('.');
        let first = self.exports.get(segments.next()?)?;
        segments.try_fold(first, |current, segment| current.member(segment))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }
}

/// Mock a module of components from a name mapping.
pub fn mock_components(mapping: &BTreeMap<String, MockTree>) -> MockModule {
    let exports = mapping
        .iter()
        .map(|(name, value)| (name.clone(), mock_nested_component(name, value)))
        .collect();
    MockModule { exports }
}
