//! Shallow rendering entry point
//!
//! [`shallow`] asks a [`Render`] implementation for one level of output, then prepares
//! everything a test needs from it: a query-mode tree for the explorer and a
//! snapshot-mode tree for the snapshot text.
//!
//! Rendering is best effort. When the renderer fails, the failure is logged and the
//! target comes back untouched as [`Shallow::Unrendered`], so a test can still inspect
//! what it tried to render.

use crate::explorer::{CanonicalData, Explorer, ExplorerNode};
use crate::formats::{FormatError, FormatRegistry, SnapshotSerializer};
use crate::mocks::MockNames;
use crate::node::{ElementType, Mode, Node, PropValue, RawElement, RawNode};
use crate::normalize::Normalizer;
use crate::settings::{Settings, SnapshotConfig};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("component `{component}` failed to render: {message}")]
    Component { component: String, message: String },
    #[error("cannot render {0}")]
    Unsupported(String),
}

impl RenderError {
    pub fn component(component: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Component {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// The UI framework seam: produce one level of output for a target.
pub trait Render {
    fn render(&self, target: &RawNode) -> Result<RawNode, RenderError>;
}

impl<F> Render for F
where
    F: Fn(&RawNode) -> Result<RawNode, RenderError>,
{
    fn render(&self, target: &RawNode) -> Result<RawNode, RenderError> {
        self(target)
    }
}

/// Resolves only the root of a tree through component render functions.
///
/// - components with a render function are called once; their output is not
///   rendered any further
/// - memo and forward-ref wrappers unwrap to the render function they wrap
/// - a root fragment yields its children
/// - lists render item by item
/// - host elements, stand-ins and the remaining wrapper kinds come back unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentRenderer;

impl ComponentRenderer {
    fn render_element(&self, element: &RawElement) -> Result<RawNode, RenderError> {
        let mut element_type = &element.element_type;
        loop {
            match element_type {
                ElementType::Memo(memo) => element_type = &memo.inner,
                ElementType::ForwardRef(forward_ref) => {
                    return match forward_ref.render.render_fn() {
                        Some(render) => render(&element.props, element.children.as_ref()),
                        None => Ok(RawNode::from(element.clone())),
                    };
                }
                ElementType::Component(component) => {
                    return match component.render_fn() {
                        Some(render) => render(&element.props, element.children.as_ref()),
                        None => Ok(RawNode::from(element.clone())),
                    };
                }
                ElementType::Fragment => {
                    let children = element.children.clone().or_else(|| {
                        element
                            .props
                            .get("children")
                            .and_then(PropValue::to_raw_node)
                    });
                    return Ok(children.unwrap_or(RawNode::Null));
                }
                ElementType::Host(_)
                | ElementType::Suspense
                | ElementType::Portal
                | ElementType::Lazy => return Ok(RawNode::from(element.clone())),
            }
        }
    }
}

impl Render for ComponentRenderer {
    fn render(&self, target: &RawNode) -> Result<RawNode, RenderError> {
        match target {
            RawNode::Element(element) => self.render_element(element),
            RawNode::List(items) => items
                .iter()
                .map(|item| self.render(item))
                .collect::<Result<Vec<_>, _>>()
                .map(RawNode::List),
            leaf => Ok(leaf.clone()),
        }
    }
}

/// Shallow renderer with its collaborators: the framework seam, the mock-name table
/// and settings.
pub struct ShallowRenderer<R = ComponentRenderer> {
    renderer: R,
    mock_names: MockNames,
    settings: Settings,
}

impl ShallowRenderer<ComponentRenderer> {
    pub fn new() -> Self {
        Self::with_renderer(ComponentRenderer)
    }
}

impl Default for ShallowRenderer<ComponentRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Render> ShallowRenderer<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            mock_names: MockNames::new(),
            settings: Settings::default(),
        }
    }

    pub fn mock_names(mut self, mock_names: MockNames) -> Self {
        self.mock_names = mock_names;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Render `target` one level deep, falling back to `target` itself on failure.
    pub fn shallow(&self, target: RawNode) -> Shallow {
        match self.renderer.render(&target) {
            Ok(output) => {
                debug!("shallow render succeeded");
                Shallow::Rendered(self.prepare(output))
            }
            Err(error) => {
                warn!(%error, "shallow render failed; returning the unrendered target");
                Shallow::Unrendered(target)
            }
        }
    }

    fn prepare(&self, output: RawNode) -> RenderResult {
        let query = Normalizer::new(Mode::Query)
            .with_mock_names(&self.mock_names)
            .normalize(&output);
        let snapshot_tree = Normalizer::new(Mode::Snapshot)
            .with_mock_names(&self.mock_names)
            .normalize(&output);
        let explorer = Explorer::with_config(query, self.settings.query.clone())
            .with_snapshot_config(self.settings.snapshot.clone())
            .with_mock_names(self.mock_names.clone());
        RenderResult {
            output,
            snapshot_tree,
            explorer,
            snapshot_config: self.settings.snapshot.clone(),
        }
    }
}

/// Render with the built-in [`ComponentRenderer`] and default settings.
pub fn shallow(target: impl Into<RawNode>) -> Shallow {
    ShallowRenderer::new().shallow(target.into())
}

/// Outcome of [`shallow`].
#[derive(Debug)]
pub enum Shallow {
    Rendered(RenderResult),
    /// Rendering failed; this is the target, verbatim
    Unrendered(RawNode),
}

impl Shallow {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Shallow::Rendered(_))
    }

    pub fn rendered(&self) -> Option<&RenderResult> {
        match self {
            Shallow::Rendered(result) => Some(result),
            Shallow::Unrendered(_) => None,
        }
    }

    pub fn into_rendered(self) -> Option<RenderResult> {
        match self {
            Shallow::Rendered(result) => Some(result),
            Shallow::Unrendered(_) => None,
        }
    }

    pub fn unrendered(&self) -> Option<&RawNode> {
        match self {
            Shallow::Rendered(_) => None,
            Shallow::Unrendered(target) => Some(target),
        }
    }
}

/// A fallback equals the target it fell back to.
impl PartialEq<RawNode> for Shallow {
    fn eq(&self, other: &RawNode) -> bool {
        self.unrendered() == Some(other)
    }
}

/// Everything derived from one successful render.
#[derive(Debug)]
pub struct RenderResult {
    output: RawNode,
    snapshot_tree: Node,
    explorer: Explorer,
    snapshot_config: SnapshotConfig,
}

impl RenderResult {
    /// Raw renderer output, before normalization.
    pub fn output(&self) -> &RawNode {
        &self.output
    }

    /// The query-mode canonical tree.
    pub fn tree(&self) -> Node {
        self.explorer.root().data()
    }

    /// Explorer over the query-mode tree.
    pub fn instance(&self) -> ExplorerNode<'_> {
        self.explorer.root()
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// The snapshot-mode canonical tree.
    pub fn snapshot_tree(&self) -> &Node {
        &self.snapshot_tree
    }

    pub fn snapshot(&self) -> String {
        SnapshotSerializer::new(self.snapshot_config.clone()).serialize(&self.snapshot_tree)
    }

    /// The snapshot-mode tree in any registered format.
    pub fn snapshot_as(&self, format: &str) -> Result<String, FormatError> {
        FormatRegistry::with_snapshot_config(self.snapshot_config.clone())
            .serialize(&self.snapshot_tree, format)
    }

    /// True when the renderer produced `null` or `false`.
    pub fn is_empty_render(&self) -> bool {
        self.output.is_empty_render()
    }
}

impl CanonicalData for RenderResult {
    fn canonical_data(&self) -> Node {
        self.tree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ComponentRef, ForwardRef, Memo, Props};

    fn greeting() -> ComponentRef {
        ComponentRef::with_render("Greeting", |props: &Props, _children: Option<&RawNode>| {
            let name = props
                .get("name")
                .and_then(|value| value.as_str())
                .unwrap_or("stranger")
                .to_string();
            Ok(RawElement::host("h1")
                .child(format!("Hello, {name}"))
                .child(ComponentRef::new("Footer").element())
                .into())
        })
    }

    #[test]
    fn test_renders_one_level() {
        let result = shallow(greeting().element().prop("name", "Ada"))
            .into_rendered()
            .unwrap();
        assert_eq!(result.instance().type_name(), Some("h1"));
        assert_eq!(result.instance().find_by_type("Footer").len(), 1);
        assert_eq!(
            result.snapshot(),
            "<h1>\n  Hello, Ada\n  <Footer />\n</h1>"
        );
    }

    #[test]
    fn test_wrappers_unwrap_to_render_function() {
        let memo = Memo::new(ForwardRef::new(greeting()));
        let result = shallow(RawElement::new(memo)).into_rendered().unwrap();
        assert_eq!(result.instance().type_name(), Some("h1"));
    }

    #[test]
    fn test_stand_ins_render_as_themselves() {
        let result = shallow(ComponentRef::new("ImportedComponent").element())
            .into_rendered()
            .unwrap();
        assert_eq!(result.snapshot(), "<ImportedComponent />");
    }

    #[test]
    fn test_root_fragment_yields_children() {
        let fragment = RawElement::new(ElementType::Fragment)
            .child(RawElement::host("dt"))
            .child(RawElement::host("dd"));
        let result = shallow(fragment).into_rendered().unwrap();
        assert_eq!(result.snapshot(), "<dt /><dd />");
    }

    #[test]
    fn test_root_fragment_children_prop() {
        let fragment = RawElement::new(ElementType::Fragment).prop(
            "children",
            PropValue::List(vec![
                RawElement::host("dt").into(),
                PropValue::from("term"),
            ]),
        );
        let result = shallow(fragment).into_rendered().unwrap();
        assert_eq!(result.snapshot(), "<dt />term");
    }

    #[test]
    fn test_instance_snapshot_follows_settings() {
        let settings = Settings {
            snapshot: SnapshotConfig {
                indent: 4,
                ..SnapshotConfig::default()
            },
            ..Settings::default()
        };
        let result = ShallowRenderer::new()
            .settings(settings)
            .shallow(RawElement::host("p").child("hi").into())
            .into_rendered()
            .unwrap();
        assert_eq!(result.snapshot(), "<p>\n    hi\n</p>");
        assert_eq!(result.instance().snapshot(), result.snapshot());
    }

    #[test]
    fn test_find_by_renamed_component_reference() {
        let widget = ComponentRef::new("fn");
        let mut names = MockNames::new();
        names.set_mock_name(&widget, "hooks.Widget");
        let result = ShallowRenderer::new()
            .mock_names(names)
            .shallow(RawElement::host("div").child(widget.element()).into())
            .into_rendered()
            .unwrap();
        assert_eq!(result.instance().find_by_type("hooks.Widget").len(), 1);
        assert_eq!(result.instance().find_by_type(&widget).len(), 1);
    }

    #[test]
    fn test_failure_falls_back_to_target() {
        let broken = ComponentRef::with_render("Broken", |_: &Props, _: Option<&RawNode>| {
            Err(RenderError::component("Broken", "boom"))
        });
        let target: RawNode = broken.element().prop("id", 1).into();
        let outcome = shallow(target.clone());
        assert!(!outcome.is_rendered());
        assert_eq!(outcome, target);
    }

    #[test]
    fn test_empty_renders() {
        let nothing = ComponentRef::with_render("Nothing", |_: &Props, _: Option<&RawNode>| {
            Ok(RawNode::Null)
        });
        let result = shallow(nothing.element()).into_rendered().unwrap();
        assert!(result.is_empty_render());
        assert_eq!(result.snapshot(), "null");

        let result = shallow(RawElement::host("div")).into_rendered().unwrap();
        assert!(!result.is_empty_render());
    }

    #[test]
    fn test_custom_renderer_closure() {
        let renderer = |_: &RawNode| -> Result<RawNode, RenderError> {
            Err(RenderError::Unsupported("everything".into()))
        };
        let outcome = ShallowRenderer::with_renderer(renderer).shallow(RawNode::Text("x".into()));
        assert_eq!(outcome, RawNode::Text("x".into()));
    }

    #[test]
    fn test_mock_names_flow_into_snapshot() {
        let widget = ComponentRef::anonymous();
        let mut names = MockNames::new();
        names.set_mock_name(&widget, "hooks.Widget");
        let outcome = ShallowRenderer::new()
            .mock_names(names)
            .shallow(RawElement::host("div").child(widget.element()).into());
        let result = outcome.into_rendered().unwrap();
        assert_eq!(result.snapshot(), "<div>\n  <hooks.Widget />\n</div>");
        assert_eq!(result.instance().find_by_type("hooks.Widget").len(), 1);
    }

    #[test]
    fn test_snapshot_as_json_has_marker() {
        let result = shallow(RawElement::host("p").child("hi"))
            .into_rendered()
            .unwrap();
        let json = result.snapshot_as("json").unwrap();
        assert!(json.contains(Mode::SNAPSHOT_MARKER));
        assert_eq!(
            result.snapshot_as("nope"),
            Err(FormatError::FormatNotFound("nope".into()))
        );
    }
}
