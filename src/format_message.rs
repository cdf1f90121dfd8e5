//! Stand-in for an internationalization `formatMessage` function.
//!
//! Primitive substitution values are interpolated into the default message. As soon as
//! one value is structured (an element, a callback, a list or a map) the message can no
//! longer be a plain string, so a `format-message-function` placeholder element is
//! returned instead, carrying the descriptor and the values as props. That element goes
//! through classification and serialization like any other node.

use crate::node::{PropValue, Props, RawElement, RawNode};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Tag of the placeholder element.
pub const PLACEHOLDER_TAG: &str = "format-message-function";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageDescriptor {
    pub id: Option<String>,
    pub default_message: String,
    pub description: Option<String>,
}

impl MessageDescriptor {
    pub fn new(default_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The descriptor as a map-valued prop, using the conventional field names.
    pub fn to_prop(&self) -> PropValue {
        let mut map = BTreeMap::new();
        if let Some(id) = &self.id {
            map.insert("id".to_string(), PropValue::from(id.as_str()));
        }
        map.insert(
            "defaultMessage".to_string(),
            PropValue::from(self.default_message.as_str()),
        );
        if let Some(description) = &self.description {
            map.insert(
                "description".to_string(),
                PropValue::from(description.as_str()),
            );
        }
        PropValue::Map(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormattedMessage {
    Text(String),
    Element(RawElement),
}

impl FormattedMessage {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormattedMessage::Text(text) => Some(text),
            FormattedMessage::Element(_) => None,
        }
    }
}

impl From<FormattedMessage> for RawNode {
    fn from(value: FormattedMessage) -> Self {
        match value {
            FormattedMessage::Text(text) => RawNode::Text(text),
            FormattedMessage::Element(element) => RawNode::from(element),
        }
    }
}

impl From<FormattedMessage> for PropValue {
    fn from(value: FormattedMessage) -> Self {
        match value {
            FormattedMessage::Text(text) => PropValue::Str(text),
            FormattedMessage::Element(element) => PropValue::from(element),
        }
    }
}

/// Format `descriptor` with optional substitution `values`.
///
/// Placeholders without a matching value are left untouched.
pub fn format_message(descriptor: &MessageDescriptor, values: Option<&Props>) -> FormattedMessage {
    let Some(values) = values else {
        return FormattedMessage::Text(descriptor.default_message.clone());
    };

    if values.values().any(|value| !value.is_primitive()) {
        return FormattedMessage::Element(
            RawElement::host(PLACEHOLDER_TAG)
                .prop("message", descriptor.to_prop())
                .prop("values", PropValue::Map(values.clone())),
        );
    }

    let text = PLACEHOLDER.replace_all(&descriptor.default_message, |caps: &Captures| {
        values
            .get(&caps[1])
            .and_then(PropValue::to_text)
            .unwrap_or_else(|| caps[0].to_string())
    });
    FormattedMessage::Text(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::to_snapshot;
    use crate::node::Callback;
    use crate::normalize::normalize;
    use rstest::rstest;

    fn values(entries: &[(&str, PropValue)]) -> Props {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_without_values_returns_default_message() {
        let descriptor = MessageDescriptor::new("Hello {name}").with_id("greeting");
        assert_eq!(
            format_message(&descriptor, None),
            FormattedMessage::Text("Hello {name}".into())
        );
    }

    #[rstest]
    #[case(&[("name", PropValue::from("Ada"))], "Hello Ada, you have {count} items")]
    #[case(&[("name", PropValue::from("Ada")), ("count", PropValue::from(3))], "Hello Ada, you have 3 items")]
    #[case(&[("count", PropValue::from(2.5))], "Hello {name}, you have 2.5 items")]
    #[case(&[("name", PropValue::Null), ("count", PropValue::from(true))], "Hello null, you have true items")]
    fn test_primitive_values_are_interpolated(
        #[case] entries: &[(&str, PropValue)],
        #[case] expected: &str,
    ) {
        let descriptor = MessageDescriptor::new("Hello {name}, you have {count} items");
        let formatted = format_message(&descriptor, Some(&values(entries)));
        assert_eq!(formatted.as_text(), Some(expected));
    }

    #[test]
    fn test_repeated_placeholders() {
        let descriptor = MessageDescriptor::new("{x} and {x}");
        let formatted = format_message(&descriptor, Some(&values(&[("x", "y".into())])));
        assert_eq!(formatted.as_text(), Some("y and y"));
    }

    #[test]
    fn test_structured_values_produce_placeholder_element() {
        let descriptor = MessageDescriptor::new("Click {link}").with_id("cta");
        let link = RawElement::host("a").child("here");
        let formatted = format_message(
            &descriptor,
            Some(&values(&[
                ("link", PropValue::from(link)),
                ("count", PropValue::from(1)),
            ])),
        );
        let FormattedMessage::Element(element) = &formatted else {
            panic!("expected a placeholder element");
        };
        assert_eq!(element.props.len(), 2);

        let snapshot = to_snapshot(&normalize(&formatted.into()));
        let expected = "\
<format-message-function
  message={
    Object {
      \"defaultMessage\": \"Click {link}\",
      \"id\": \"cta\",
    }
  }
  values={
    Object {
      \"count\": 1,
      \"link\": <a>
        here
      </a>,
    }
  }
/>";
        assert_eq!(snapshot, expected);
    }

    #[test]
    fn test_callbacks_are_not_primitive() {
        let descriptor = MessageDescriptor::new("{cb}");
        let formatted = format_message(
            &descriptor,
            Some(&values(&[("cb", Callback::new("onClick").into())])),
        );
        assert!(formatted.as_text().is_none());
    }
}
