//! End-to-end shallow rendering of a small component library
//!
//! `ExampleComponent` renders an imported component (mocked as a plain tag), messages
//! formatted through `format_message` and a callback supplied by a mocked hook.

use shallow::format_message::{format_message, MessageDescriptor};
use shallow::mocks::{mock_components, MockModule, MockNames, MockTree};
use shallow::node::{Callback, ComponentRef, Element, Node, Props, RawElement, RawNode};
use shallow::render::{shallow, RenderError, Shallow, ShallowRenderer};
use shallow::settings::Loader;
use std::collections::BTreeMap;

struct Messages {
    imported_component_label: MessageDescriptor,
    heading: MessageDescriptor,
    span: MessageDescriptor,
}

fn messages() -> Messages {
    Messages {
        imported_component_label: MessageDescriptor::new("Imported label")
            .with_id("example.importedComponentLabel"),
        heading: MessageDescriptor::new("Heading").with_id("example.heading"),
        span: MessageDescriptor::new("Span text").with_id("example.span"),
    }
}

fn imports() -> MockModule {
    let mut mapping = BTreeMap::new();
    mapping.insert(
        "ImportedComponent".to_string(),
        MockTree::from("ImportedComponent"),
    );
    mock_components(&mapping)
}

fn heading_block() -> RawElement {
    let messages = messages();
    RawElement::host("div")
        .child(RawElement::host("h1").child(format_message(&messages.heading, None)))
        .child(RawElement::host("span").child(format_message(&messages.span, None)))
}

fn example_component(module: MockModule, on_click: Callback) -> ComponentRef {
    ComponentRef::with_render(
        "ExampleComponent",
        move |_: &Props, _: Option<&RawNode>| {
            let imported = module
                .get("ImportedComponent")
                .ok_or_else(|| RenderError::component("ExampleComponent", "missing import"))?;
            Ok(RawElement::host("div")
                .child(
                    imported
                        .element()
                        .prop("className", "imported-component")
                        .prop("label", messages().imported_component_label.to_prop())
                        .prop("onClick", on_click.clone()),
                )
                .child(heading_block())
                .into())
        },
    )
}

struct Fixture {
    on_click: Callback,
    module: MockModule,
    outcome: Shallow,
}

fn render_example() -> Fixture {
    let on_click = Callback::anonymous();
    let mut names = MockNames::new();
    names.set_mock_name(&on_click, "hooks.handleClickImportedComponent");
    let module = imports();
    let component = example_component(module.clone(), on_click.clone());
    let outcome = ShallowRenderer::new()
        .mock_names(names)
        .shallow(component.element().into());
    Fixture {
        on_click,
        module,
        outcome,
    }
}

#[test]
fn test_example_component_snapshot() {
    let fixture = render_example();
    let result = fixture.outcome.rendered().unwrap();
    insta::assert_snapshot!(result.snapshot(), @r###"
    <div>
      <ImportedComponent
        className="imported-component"
        label={
          Object {
            "defaultMessage": "Imported label",
            "id": "example.importedComponentLabel",
          }
        }
        onClick={[Function hooks.handleClickImportedComponent]}
      />
      <div>
        <h1>
          Heading
        </h1>
        <span>
          Span text
        </span>
      </div>
    </div>
    "###);
}

#[test]
fn test_find_imported_component_by_mock() {
    let fixture = render_example();
    let result = fixture.outcome.rendered().unwrap();
    let imported = fixture.module.get("ImportedComponent").unwrap();
    let control = result.instance().find_by_type(imported)[0];
    assert_eq!(
        control.prop("onClick"),
        Some(&fixture.on_click.clone().into())
    );
}

#[test]
fn test_inner_block_matches_independent_render() {
    let fixture = render_example();
    let result = fixture.outcome.rendered().unwrap();
    let control = result.instance().find_by_type("div")[1];

    let expected = shallow(heading_block()).into_rendered().unwrap();
    assert!(control.matches(&expected));
    assert!(control.matches(&expected.instance()));
}

#[test]
fn test_simple_component_snapshot() {
    let simple = ComponentRef::with_render("SimpleComponent", |_: &Props, _: Option<&RawNode>| {
        Ok(RawElement::host("div")
            .child(RawElement::host("h1").child("head"))
            .child(
                RawElement::host("p")
                    .child("SimpleComponent")
                    .child(RawElement::host("b").child("Bold content")),
            )
            .into())
    });
    let result = shallow(simple.element()).into_rendered().unwrap();
    insta::assert_snapshot!(result.snapshot(), @r###"
    <div>
      <h1>
        head
      </h1>
      <p>
        SimpleComponent
        <b>
          Bold content
        </b>
      </p>
    </div>
    "###);
}

#[test]
fn test_leaf_components() {
    let string_component = ComponentRef::with_render("StringComponent", |_: &Props, _: Option<&RawNode>| {
        Ok(RawNode::Text("HelloThere".into()))
    });
    let result = shallow(string_component.element()).into_rendered().unwrap();
    assert_eq!(result.snapshot(), "HelloThere");
    assert!(!result.is_empty_render());

    let null_component = ComponentRef::with_render("NullComponent", |_: &Props, _: Option<&RawNode>| {
        Ok(RawNode::Null)
    });
    let result = shallow(null_component.element()).into_rendered().unwrap();
    assert_eq!(result.snapshot(), "null");
    assert!(result.is_empty_render());

    let false_component = ComponentRef::with_render("FalseComponent", |_: &Props, _: Option<&RawNode>| {
        Ok(RawNode::Bool(false))
    });
    let result = shallow(false_component.element()).into_rendered().unwrap();
    assert_eq!(result.snapshot(), "false");
    assert!(result.is_empty_render());
}

#[test]
fn test_list_render_keeps_top_level_fillers() {
    let list_component = ComponentRef::with_render("ListComponent", |_: &Props, _: Option<&RawNode>| {
        Ok(RawNode::List(vec![
            RawNode::Null,
            RawElement::host("div").child("Test Component").into(),
        ]))
    });
    let result = shallow(list_component.element()).into_rendered().unwrap();
    assert_eq!(result.snapshot(), "null<div>\n  Test Component\n</div>");
    assert_eq!(result.instance().find_by_type("div").len(), 1);
}

#[test]
fn test_matches_is_structural() {
    let a = shallow(RawElement::host("div").prop("className", "a"))
        .into_rendered()
        .unwrap();
    let b = shallow(RawElement::host("div").prop("className", "a"))
        .into_rendered()
        .unwrap();
    assert!(a.instance().matches(&b.instance()));
    assert!(a.instance().matches(&b));

    let c = shallow(RawElement::host("div").prop("className", "b"))
        .into_rendered()
        .unwrap();
    assert!(!a.instance().matches(&c));
}

#[test]
fn test_end_to_end_find_by_class_name() {
    let target = RawElement::host("div").children([RawElement::host("button")
        .prop("className", "go")
        .child("Click")]);
    let result = shallow(target).into_rendered().unwrap();

    let found = result.instance().find_by_class_name("go");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].type_name(), Some("button"));
    let Node::Element(data) = found[0].data() else {
        panic!("expected an element");
    };
    assert_eq!(data.children, vec![Node::Text("Click".into())]);
    assert_eq!(
        found[0].data(),
        Node::Element(
            Element::new("button")
                .with_prop("className", "go")
                .with_child("Click")
        )
    );
}

#[test]
fn test_render_failure_returns_target() {
    let failing = ComponentRef::with_render("Failing", |_: &Props, _: Option<&RawNode>| {
        Err(RenderError::component("Failing", "hook called outside a component"))
    });
    let target: RawNode = failing.element().prop("title", "t").into();
    let outcome = shallow(target.clone());
    assert_eq!(outcome, target);
    assert_eq!(outcome.unrendered(), Some(&target));
    assert!(outcome.rendered().is_none());
}

#[test]
fn test_settings_change_snapshot_layout() {
    let settings = Loader::new()
        .set_override("snapshot.indent", 4)
        .unwrap()
        .set_override("snapshot.print_function_name", false)
        .unwrap()
        .build()
        .unwrap();
    let target = RawElement::host("button")
        .prop("onClick", Callback::new("submit"))
        .child("Go");
    let result = ShallowRenderer::new()
        .settings(settings)
        .shallow(target.into())
        .into_rendered()
        .unwrap();
    assert_eq!(
        result.snapshot(),
        "<button\n    onClick={[Function]}\n>\n    Go\n</button>"
    );
}
