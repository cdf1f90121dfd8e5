//! Raw trees described as JSON or YAML documents
//!
//! A fixture node is `null`, a boolean, a number or string (both become text), an array
//! (a list) or an element object:
//!
//! ```yaml
//! type: div                 # a host tag...
//! props:
//!   className: shell
//!   onClick: { $fn: submit }         # a callback
//!   icon: { type: i, props: {} }     # an element-valued prop
//! key: first
//! children:
//!   - type:                          # ...or a typed reference
//!       kind: component
//!       name: Card
//!       displayName: FancyCard
//!       render: { type: section, children: Card body }
//!   - plain text
//! ```
//!
//! Reference kinds are `component`, `fragment`, `suspense`, `portal`, `lazy`,
//! `forward_ref` (with `name`/`render` like a component) and `memo` (with `inner`, another
//! type). A component with `render` renders to that fixed output; one without is a
//! stand-in.

use crate::node::props::format_number;
use crate::node::{
    Callback, ComponentRef, ElementType, ForwardRef, Memo, PropValue, Props, RawElement, RawNode,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported fixture extension: {0}")]
    UnsupportedExtension(String),
    #[error("invalid fixture at {at}: {message}")]
    Invalid { at: String, message: String },
}

fn invalid(at: &str, message: impl Into<String>) -> FixtureError {
    FixtureError::Invalid {
        at: at.to_string(),
        message: message.into(),
    }
}

/// Load a fixture file, picking the parser from the extension.
pub fn load_fixture(path: impl AsRef<Path>) -> Result<RawNode, FixtureError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    debug!(path = %path.display(), extension, "loading fixture");
    match extension {
        "json" => parse_json(&source),
        "yaml" | "yml" => parse_yaml(&source),
        other => Err(FixtureError::UnsupportedExtension(other.to_string())),
    }
}

pub fn parse_json(source: &str) -> Result<RawNode, FixtureError> {
    let value: Value = serde_json::from_str(source)?;
    from_value(&value)
}

pub fn parse_yaml(source: &str) -> Result<RawNode, FixtureError> {
    let value: Value = serde_yaml::from_str(source)?;
    from_value(&value)
}

/// Build a raw tree from an already parsed document.
pub fn from_value(value: &Value) -> Result<RawNode, FixtureError> {
    node_from_value(value, "$")
}

fn node_from_value(value: &Value, at: &str) -> Result<RawNode, FixtureError> {
    match value {
        Value::Null => Ok(RawNode::Null),
        Value::Bool(b) => Ok(RawNode::Bool(*b)),
        Value::Number(n) => Ok(RawNode::Text(number_text(n))),
        Value::String(s) => Ok(RawNode::Text(s.clone())),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| node_from_value(item, &format!("{at}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(RawNode::List),
        Value::Object(object) => element_from_object(object, at).map(RawNode::from),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    n.as_f64().map_or_else(|| n.to_string(), format_number)
}

fn element_from_object(object: &Map<String, Value>, at: &str) -> Result<RawElement, FixtureError> {
    let element_type = match object.get("type") {
        Some(value) => type_from_value(value, &format!("{at}.type"))?,
        None => return Err(invalid(at, "element is missing `type`")),
    };
    let mut element = RawElement::new(element_type);

    match object.get("props") {
        None | Some(Value::Null) => {}
        Some(Value::Object(props)) => element.props = props_from_object(props, at)?,
        Some(_) => return Err(invalid(at, "`props` must be an object")),
    }
    match object.get("children") {
        None => {}
        Some(children) => {
            element.children = Some(node_from_value(children, &format!("{at}.children"))?)
        }
    }
    match object.get("key") {
        None | Some(Value::Null) => {}
        Some(Value::String(key)) => element.key = Some(key.clone()),
        Some(Value::Number(n)) => element.key = Some(n.to_string()),
        Some(_) => return Err(invalid(at, "`key` must be a string or number")),
    }
    Ok(element)
}

fn type_from_value(value: &Value, at: &str) -> Result<ElementType, FixtureError> {
    let object = match value {
        Value::String(tag) => return Ok(ElementType::Host(tag.clone())),
        Value::Object(object) => object,
        _ => return Err(invalid(at, "`type` must be a tag name or an object")),
    };
    let kind = object
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(at, "typed reference is missing `kind`"))?;
    let display_name = optional_str(object, "displayName", at)?;

    match kind {
        "component" => Ok(ElementType::Component(component_from_object(object, at)?)),
        "fragment" => Ok(ElementType::Fragment),
        "suspense" => Ok(ElementType::Suspense),
        "portal" => Ok(ElementType::Portal),
        "lazy" => Ok(ElementType::Lazy),
        // the wrapper carries the display name, not the wrapped function
        "forward_ref" => Ok(ElementType::ForwardRef(ForwardRef {
            display_name,
            render: base_component(object, at)?,
        })),
        "memo" => {
            let inner = object
                .get("inner")
                .ok_or_else(|| invalid(at, "memo is missing `inner`"))?;
            Ok(ElementType::Memo(Memo {
                display_name,
                inner: Box::new(type_from_value(inner, &format!("{at}.inner"))?),
            }))
        }
        other => Err(invalid(at, format!("unknown kind `{other}`"))),
    }
}

fn component_from_object(
    object: &Map<String, Value>,
    at: &str,
) -> Result<ComponentRef, FixtureError> {
    let component = base_component(object, at)?;
    Ok(match optional_str(object, "displayName", at)? {
        Some(display_name) => component.with_display_name(display_name),
        None => component,
    })
}

fn base_component(object: &Map<String, Value>, at: &str) -> Result<ComponentRef, FixtureError> {
    let name = optional_str(object, "name", at)?;
    let render = object
        .get("render")
        .map(|value| node_from_value(value, &format!("{at}.render")))
        .transpose()?;
    Ok(match (name, render) {
        (Some(name), Some(output)) => {
            ComponentRef::with_render(name, move |_: &Props, _: Option<&RawNode>| {
                Ok(output.clone())
            })
        }
        (Some(name), None) => ComponentRef::new(name),
        (None, Some(output)) => {
            ComponentRef::with_render("", move |_: &Props, _: Option<&RawNode>| {
                Ok(output.clone())
            })
        }
        (None, None) => ComponentRef::anonymous(),
    })
}

fn optional_str(
    object: &Map<String, Value>,
    field: &str,
    at: &str,
) -> Result<Option<String>, FixtureError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(at, format!("`{field}` must be a string"))),
    }
}

fn props_from_object(object: &Map<String, Value>, at: &str) -> Result<Props, FixtureError> {
    object
        .iter()
        .map(|(key, value)| {
            prop_from_value(value, &format!("{at}.props.{key}")).map(|prop| (key.clone(), prop))
        })
        .collect()
}

fn prop_from_value(value: &Value, at: &str) -> Result<PropValue, FixtureError> {
    match value {
        Value::Null => Ok(PropValue::Null),
        Value::Bool(b) => Ok(PropValue::Bool(*b)),
        Value::Number(n) => Ok(n
            .as_f64()
            .map_or_else(|| PropValue::Str(n.to_string()), PropValue::Number)),
        Value::String(s) => Ok(PropValue::Str(s.clone())),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| prop_from_value(item, &format!("{at}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(PropValue::List),
        Value::Object(object) => {
            if let Some(name) = object.get("$fn") {
                return match name {
                    Value::String(name) if name.is_empty() => Ok(Callback::anonymous().into()),
                    Value::String(name) => Ok(Callback::new(name.as_str()).into()),
                    Value::Null => Ok(Callback::anonymous().into()),
                    _ => Err(invalid(at, "`$fn` must be a function name")),
                };
            }
            if object.contains_key("type") && object.contains_key("props") {
                return element_from_object(object, at).map(PropValue::from);
            }
            object
                .iter()
                .map(|(key, item)| {
                    prop_from_value(item, &format!("{at}.{key}")).map(|prop| (key.clone(), prop))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(PropValue::Map)
        }
    }
}
