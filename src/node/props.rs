//! Element props
//!
//! Props are stored in a `BTreeMap`, so every consumer sees them key-sorted. That is
//! the ordering rule the snapshot format relies on for deterministic output.

use super::canonical::Node;
use super::raw::{RawElement, RawNode};
use super::MockId;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub type Props = BTreeMap<String, PropValue>;

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<PropValue>),
    Map(BTreeMap<String, PropValue>),
    Callback(Callback),
    /// An element-valued prop that has not been normalized yet
    Element(Box<RawNode>),
    /// An element-valued prop after normalization
    Node(Box<Node>),
}

impl PropValue {
    /// Primitive values are the ones that can be spliced into text.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            PropValue::Null | PropValue::Bool(_) | PropValue::Number(_) | PropValue::Str(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Text form of a primitive value, `None` for anything structured.
    pub fn to_text(&self) -> Option<String> {
        match self {
            PropValue::Null => Some("null".to_string()),
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Number(n) => Some(format_number(*n)),
            PropValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Reinterpret a `children` prop as a renderable node.
    ///
    /// Maps and callbacks are not renderable and yield `None`.
    pub fn to_raw_node(&self) -> Option<RawNode> {
        match self {
            PropValue::Null => Some(RawNode::Null),
            PropValue::Bool(b) => Some(RawNode::Bool(*b)),
            PropValue::Number(n) => Some(RawNode::Text(format_number(*n))),
            PropValue::Str(s) => Some(RawNode::Text(s.clone())),
            PropValue::List(items) => Some(RawNode::List(
                items.iter().filter_map(PropValue::to_raw_node).collect(),
            )),
            PropValue::Element(raw) => Some((**raw).clone()),
            PropValue::Node(node) => Some(RawNode::from((**node).clone())),
            PropValue::Map(_) | PropValue::Callback(_) => None,
        }
    }
}

/// Numbers print without a trailing `.0` when they are integral.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Stand-in for a function-valued prop (an event handler, a hook callback, ...).
///
/// Callbacks compare by identity: two callbacks with the same name are still
/// different values unless they share a [`MockId`].
#[derive(Debug, Clone)]
pub struct Callback {
    id: MockId,
    name: String,
}

impl Callback {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MockId::next(),
            name: name.into(),
        }
    }

    /// An unnamed callback.
    pub fn anonymous() -> Self {
        Self::new("")
    }

    pub fn id(&self) -> MockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same identity, different display name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id,
            name: name.into(),
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "[Function anonymous]")
        } else {
            write!(f, "[Function {}]", self.name)
        }
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Null => serializer.serialize_unit(),
            PropValue::Bool(b) => serializer.serialize_bool(*b),
            PropValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            PropValue::Str(s) => serializer.serialize_str(s),
            PropValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PropValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            PropValue::Callback(callback) => serializer.serialize_str(&callback.to_string()),
            PropValue::Element(raw) => serializer.serialize_str(&format!(
                "[Element {}]",
                crate::classify::classify(raw)
            )),
            PropValue::Node(node) => node.serialize(serializer),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<Callback> for PropValue {
    fn from(value: Callback) -> Self {
        PropValue::Callback(value)
    }
}

impl From<RawElement> for PropValue {
    fn from(value: RawElement) -> Self {
        PropValue::Element(Box::new(RawNode::from(value)))
    }
}

impl From<Node> for PropValue {
    fn from(value: Node) -> Self {
        PropValue::Node(Box::new(value))
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        PropValue::List(value)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(value: BTreeMap<String, PropValue>) -> Self {
        PropValue::Map(value)
    }
}
