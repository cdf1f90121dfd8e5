//! Snapshot text serialization
//!
//! Serializes a canonical tree into tag-shaped, indented text. Children are serialized
//! first and then nested, indented one level, inside their parent.
//!
//! ## Format
//!
//! - text, `true`, `false` and `null` print as themselves
//! - lists print their items back to back, with no separator
//! - elements print as tags, one prop per line (key-sorted), self-closing when empty
//! - string props are quoted, every other prop value is wrapped in braces
//!
//! ## Example
//!
//! ```text
//! <div>
//!   <button
//!     className="go"
//!     onClick={[Function submit]}
//!   >
//!     Click
//!   </button>
//!   <input
//!     style={
//!       Object {
//!         "width": 10,
//!       }
//!     }
//!   />
//!   <br />
//! </div>
//! ```

use super::registry::{FormatError, Formatter};
use crate::classify::classify;
use crate::node::props::format_number;
use crate::node::{Element, Node, PropValue};
use crate::settings::SnapshotConfig;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct SnapshotSerializer {
    config: SnapshotConfig,
}

impl SnapshotSerializer {
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    pub fn serialize(&self, node: &Node) -> String {
        match node {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Text(text) => text.clone(),
            Node::List(items) => items.iter().map(|item| self.serialize(item)).collect(),
            Node::Element(element) => self.serialize_element(element),
        }
    }

    fn unit(&self) -> String {
        " ".repeat(self.config.indent)
    }

    fn serialize_element(&self, element: &Element) -> String {
        trace!(type_name = %element.type_name, "serializing element");
        let children: Vec<String> = element
            .children
            .iter()
            .map(|child| self.serialize(child))
            .collect();
        let unit = self.unit();

        let mut out = format!("<{}", element.type_name);
        for (key, value) in &element.props {
            out.push('\n');
            out.push_str(&unit);
            out.push_str(key);
            out.push('=');
            out.push_str(&self.print_prop(value));
        }
        if !element.props.is_empty() {
            out.push('\n');
        }

        if children.is_empty() {
            out.push_str(if element.props.is_empty() { " />" } else { "/>" });
            return out;
        }

        out.push('>');
        for child in &children {
            out.push('\n');
            out.push_str(&indent_lines(child, &unit));
        }
        out.push_str(&format!("\n</{}>", element.type_name));
        out
    }

    fn print_prop(&self, value: &PropValue) -> String {
        if let PropValue::Str(s) = value {
            return self.quote(s);
        }
        let printed = self.print_value(value);
        if printed.contains('\n') {
            let unit = self.unit();
            format!(
                "{{\n{}\n{}}}",
                indent_lines(&printed, &unit.repeat(2)),
                unit
            )
        } else {
            format!("{{{printed}}}")
        }
    }

    fn print_value(&self, value: &PropValue) -> String {
        match value {
            PropValue::Null => "null".to_string(),
            PropValue::Bool(b) => b.to_string(),
            PropValue::Number(n) => format_number(*n),
            PropValue::Str(s) => self.quote(s),
            PropValue::Callback(callback) => {
                if self.config.print_function_name {
                    callback.to_string()
                } else {
                    "[Function]".to_string()
                }
            }
            PropValue::List(items) if items.is_empty() => "Array []".to_string(),
            PropValue::List(items) => {
                let unit = self.unit();
                let mut out = "Array [\n".to_string();
                for item in items {
                    out.push_str(&indent_lines(&self.print_value(item), &unit));
                    out.push_str(",\n");
                }
                out.push(']');
                out
            }
            PropValue::Map(entries) if entries.is_empty() => "Object {}".to_string(),
            PropValue::Map(entries) => {
                let unit = self.unit();
                let mut out = "Object {\n".to_string();
                for (key, item) in entries {
                    let entry = format!("{}: {}", self.quote(key), self.print_value(item));
                    out.push_str(&indent_lines(&entry, &unit));
                    out.push_str(",\n");
                }
                out.push('}');
                out
            }
            PropValue::Node(node) => self.serialize(node),
            // unresolved elements only appear when a tree skipped normalization
            PropValue::Element(raw) => format!("[Element {}]", classify(raw)),
        }
    }

    fn quote(&self, s: &str) -> String {
        if self.config.escape_strings {
            format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
        } else {
            format!("\"{s}\"")
        }
    }
}

/// Prefix every non-empty line of `block`.
fn indent_lines(block: &str, prefix: &str) -> String {
    block
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize with default settings.
pub fn to_snapshot(node: &Node) -> String {
    SnapshotSerializer::default().serialize(node)
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotFormatter {
    serializer: SnapshotSerializer,
}

impl SnapshotFormatter {
    pub fn new(config: SnapshotConfig) -> Self {
        Self {
            serializer: SnapshotSerializer::new(config),
        }
    }
}

impl Formatter for SnapshotFormatter {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(self.serializer.serialize(node))
    }

    fn description(&self) -> &str {
        "Indented tag-shaped text for regression snapshots"
    }
}
