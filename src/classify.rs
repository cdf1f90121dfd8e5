//! Element type classification
//!
//! Resolves the opaque type of an element to the name shown in snapshots and matched
//! by queries. Resolution order, first match wins:
//!
//! 1. `Lazy`, `Suspense`, `Portal`, `Fragment` map to their own labels
//! 2. forward refs use the wrapper's display name verbatim, else
//!    `ForwardRef(<render name>)`, else plain `ForwardRef`
//! 3. memo wrappers print as `Memo(<name>)`, where the name is the wrapper's display
//!    name or, failing that, the classification of the wrapped type
//! 4. everything else uses its base name: display name, then mock-table name, then
//!    function name, then host tag, then `Component`
//!
//! Forward refs and memos compose: `Memo(ForwardRef(Input))` falls out of step 3
//! recursing into step 2.

use crate::mocks::MockNames;
use crate::node::{ComponentRef, ElementType, RawNode};

const FALLBACK_NAME: &str = "Component";

/// Classifies element types, optionally consulting a mock-name side table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeClassifier<'m> {
    mock_names: Option<&'m MockNames>,
}

impl<'m> TypeClassifier<'m> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mock_names(mock_names: &'m MockNames) -> Self {
        Self {
            mock_names: Some(mock_names),
        }
    }

    /// Classify a node. Anything that is not an element classifies to `""`.
    pub fn classify(&self, node: &RawNode) -> String {
        match node {
            RawNode::Element(element) => self.classify_type(&element.element_type),
            _ => String::new(),
        }
    }

    pub fn classify_type(&self, element_type: &ElementType) -> String {
        match element_type {
            ElementType::Lazy => "Lazy".to_string(),
            ElementType::Suspense => "Suspense".to_string(),
            ElementType::Portal => "Portal".to_string(),
            ElementType::Fragment => "Fragment".to_string(),
            ElementType::ForwardRef(forward_ref) => {
                if let Some(name) = non_empty(forward_ref.display_name.as_deref()) {
                    return name.to_string();
                }
                match self.component_name(&forward_ref.render) {
                    Some(inner) => format!("ForwardRef({inner})"),
                    None => "ForwardRef".to_string(),
                }
            }
            ElementType::Memo(memo) => {
                let name = match non_empty(memo.display_name.as_deref()) {
                    Some(name) => name.to_string(),
                    None => self.classify_type(&memo.inner),
                };
                format!("Memo({name})")
            }
            ElementType::Host(tag) => non_empty(Some(tag.as_str()))
                .unwrap_or(FALLBACK_NAME)
                .to_string(),
            ElementType::Component(component) => self
                .component_name(component)
                .unwrap_or(FALLBACK_NAME)
                .to_string(),
        }
    }

    /// Declared name of a component: display name, mock name, then function name.
    fn component_name<'c>(&'c self, component: &'c ComponentRef) -> Option<&'c str> {
        non_empty(component.display_name())
            .or_else(|| non_empty(self.mock_names.and_then(|names| names.get(component.id()))))
            .or_else(|| non_empty(component.name()))
    }
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}

/// Classify without a mock table.
pub fn classify(node: &RawNode) -> String {
    TypeClassifier::new().classify(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ForwardRef, Memo, RawElement};
    use rstest::rstest;

    fn element_of(element_type: ElementType) -> RawNode {
        RawElement::new(element_type).into()
    }

    #[rstest]
    #[case(ElementType::Lazy, "Lazy")]
    #[case(ElementType::Suspense, "Suspense")]
    #[case(ElementType::Portal, "Portal")]
    #[case(ElementType::Fragment, "Fragment")]
    #[case(ElementType::host("div"), "div")]
    #[case(ElementType::host(""), "Component")]
    #[case(ComponentRef::new("Card").into(), "Card")]
    #[case(ComponentRef::new("Card").with_display_name("Fancy.Card").into(), "Fancy.Card")]
    #[case(ComponentRef::anonymous().into(), "Component")]
    fn test_base_names(#[case] element_type: ElementType, #[case] expected: &str) {
        assert_eq!(classify(&element_of(element_type)), expected);
    }

    #[rstest]
    #[case(ForwardRef::new(ComponentRef::new("Input")), "ForwardRef(Input)")]
    #[case(
        ForwardRef::new(ComponentRef::new("Input").with_display_name("TextInput")),
        "ForwardRef(TextInput)"
    )]
    #[case(
        ForwardRef::new(ComponentRef::new("Input")).with_display_name("Wrapped"),
        "Wrapped"
    )]
    #[case(ForwardRef::new(ComponentRef::anonymous()), "ForwardRef")]
    fn test_forward_refs(#[case] forward_ref: ForwardRef, #[case] expected: &str) {
        assert_eq!(classify(&element_of(forward_ref.into())), expected);
    }

    #[test]
    fn test_memo_uses_wrapper_name_first() {
        let memo = Memo::new(ComponentRef::new("List")).with_display_name("FastList");
        assert_eq!(classify(&element_of(memo.into())), "Memo(FastList)");
    }

    #[test]
    fn test_memo_recurses_into_inner_type() {
        let memo = Memo::new(ComponentRef::new("List"));
        assert_eq!(classify(&element_of(memo.into())), "Memo(List)");

        let memo = Memo::new(ForwardRef::new(ComponentRef::new("Input")));
        assert_eq!(classify(&element_of(memo.into())), "Memo(ForwardRef(Input))");

        let memo = Memo::new(ComponentRef::anonymous());
        assert_eq!(classify(&element_of(memo.into())), "Memo(Component)");
    }

    #[test]
    fn test_non_elements_classify_to_empty() {
        assert_eq!(classify(&RawNode::Text("hello".into())), "");
        assert_eq!(classify(&RawNode::Null), "");
        assert_eq!(classify(&RawNode::Bool(true)), "");
        assert_eq!(classify(&RawNode::List(vec![])), "");
    }

    #[test]
    fn test_mock_names_sit_between_display_name_and_function_name() {
        let plain = ComponentRef::new("fn");
        let displayed = ComponentRef::new("fn").with_display_name("Shown");
        let mut names = MockNames::new();
        names.set_mock_name(&plain, "hooks.Plain");
        names.set_mock_name(&displayed, "hooks.Displayed");

        let classifier = TypeClassifier::with_mock_names(&names);
        assert_eq!(classifier.classify(&plain.element().into()), "hooks.Plain");
        assert_eq!(classifier.classify(&displayed.element().into()), "Shown");

        let forward_ref = ForwardRef::new(plain.clone());
        assert_eq!(
            classifier.classify(&element_of(forward_ref.into())),
            "ForwardRef(hooks.Plain)"
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let node = element_of(Memo::new(ForwardRef::new(ComponentRef::new("X"))).into());
        assert_eq!(classify(&node), classify(&node));
    }
}
