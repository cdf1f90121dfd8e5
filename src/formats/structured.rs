//! JSON and YAML renditions of canonical trees
//!
//! Elements serialize as `{ "type", "props", "children" }`; snapshot-mode elements also
//! carry a `"$$typeof"` marker so downstream pretty-printers can tell them apart from
//! plain objects.

use super::registry::{FormatError, Formatter};
use crate::node::Node;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        serde_json::to_string_pretty(node)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Canonical data as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        serde_yaml::to_string(node).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Canonical data as YAML"
    }
}
