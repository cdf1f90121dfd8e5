//! Treeviz formatter for canonical trees
//!
//! One line per node, with box-drawing connectors encoding the nesting:
//!
//! ```text
//! └─ div className="shell"
//!   ├─ h1
//!   │ └─ "head"
//!   └─ p
//!     ├─ "SimpleComponent"
//!     └─ b
//!       └─ "Bold content"
//! ```
//!
//! Props and text are truncated to keep every line scannable.

use super::registry::{FormatError, Formatter};
use crate::classify::classify;
use crate::node::{Node, PropValue};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(node: &Node) -> String {
    let mut result = String::new();
    match node {
        // a rendered list has no node of its own; its items are the roots
        Node::List(items) => append_children(&mut result, items, ""),
        _ => append_node(&mut result, node, "", true),
    }
    result
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!("{prefix}{connector} {}\n", display_label(node)));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    match node {
        Node::Element(element) => append_children(result, &element.children, &new_prefix),
        Node::List(items) => append_children(result, items, &new_prefix),
        Node::Null | Node::Bool(_) | Node::Text(_) => {}
    }
}

fn append_children(result: &mut String, children: &[Node], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}

fn display_label(node: &Node) -> String {
    match node {
        Node::Null => "null".to_string(),
        Node::Bool(b) => b.to_string(),
        Node::Text(text) => format!("\"{}\"", truncate(text, MAX_LABEL_CHARS)),
        Node::List(items) => format!("[{} items]", items.len()),
        Node::Element(element) => {
            let props = element
                .props
                .iter()
                .map(|(key, value)| format!("{key}={}", compact_value(value)))
                .collect::<Vec<_>>()
                .join(" ");
            if props.is_empty() {
                element.type_name.clone()
            } else {
                format!(
                    "{} {}",
                    element.type_name,
                    truncate(&props, MAX_LABEL_CHARS)
                )
            }
        }
    }
}

fn compact_value(value: &PropValue) -> String {
    match value {
        PropValue::Str(s) => format!("\"{s}\""),
        PropValue::Callback(callback) => callback.to_string(),
        PropValue::List(items) => format!("[{}]", items.len()),
        PropValue::Map(entries) => format!("{{{}}}", entries.len()),
        PropValue::Node(node) => match node.as_ref() {
            Node::Element(element) => format!("<{}>", element.type_name),
            other => display_label(other),
        },
        PropValue::Element(raw) => format!("<{}>", classify(raw)),
        primitive => primitive.to_text().unwrap_or_default(),
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node))
    }

    fn description(&self) -> &str {
        "One line per node, nesting drawn with box connectors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    #[test]
    fn test_treeviz_layout() {
        let tree = Element::new("div")
            .with_prop("className", "shell")
            .with_child(Element::new("h1").with_child("head"))
            .with_child(
                Element::new("p")
                    .with_child("SimpleComponent")
                    .with_child(Element::new("b").with_child("Bold content")),
            );
        let expected = "\
└─ div className=\"shell\"
  ├─ h1
  │ └─ \"head\"
  └─ p
    ├─ \"SimpleComponent\"
    └─ b
      └─ \"Bold content\"
";
        assert_eq!(to_treeviz_str(&Node::Element(tree)), expected);
    }

    #[test]
    fn test_list_items_are_roots() {
        let list = Node::List(vec![Node::Null, Node::Element(Element::new("div"))]);
        assert_eq!(to_treeviz_str(&list), "├─ null\n└─ div\n");
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let text = "a".repeat(40);
        let line = to_treeviz_str(&Node::Text(text));
        assert_eq!(line, format!("└─ \"{}...\"\n", "a".repeat(30)));
    }
}
