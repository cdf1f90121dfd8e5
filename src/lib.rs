//! # shallow
//!
//! Shallow rendering for component trees in tests.
//!
//! A component is rendered exactly one level deep. Its output is normalized into a
//! canonical tree that can be queried, compared and serialized into stable snapshot text:
//!
//! ```text
//! let result = shallow(card.element().prop("title", "Hi")).into_rendered().unwrap();
//! assert_eq!(result.instance().find_by_test_id("title").len(), 1);
//! insta::assert_snapshot!(result.snapshot());
//! ```
//!
//! ## Pipeline
//!
//! - [`node`]: raw trees (what renderers produce) and canonical trees
//! - [`classify`]: stable names for element types
//! - [`normalize`]: raw trees into canonical trees
//! - [`explorer`]: traversal and find-by-* queries
//! - [`formats`]: snapshot text, plus treeviz, JSON and YAML renditions
//! - [`render`]: the [`shallow`] entry point
//!
//! Test helpers live in [`mocks`] and [`format_message`]; [`fixture`] loads raw trees
//! from JSON or YAML files and [`settings`] holds the layered configuration.

pub mod classify;
pub mod explorer;
pub mod fixture;
pub mod format_message;
pub mod formats;
pub mod mocks;
pub mod node;
pub mod normalize;
pub mod render;
pub mod settings;

pub use classify::{classify, TypeClassifier};
pub use explorer::{CanonicalData, Explorer, ExplorerNode, NodeId, TypeQuery};
pub use format_message::{format_message, FormattedMessage, MessageDescriptor};
pub use formats::{to_snapshot, FormatError, FormatRegistry, SnapshotSerializer};
pub use mocks::{mock_components, mock_nested_component, set_mock_name, MockNames};
pub use node::{
    Callback, ComponentRef, Element, ElementType, Mode, Node, PropValue, Props, RawElement,
    RawNode,
};
pub use normalize::{normalize, Normalizer};
pub use render::{shallow, Render, RenderError, RenderResult, Shallow, ShallowRenderer};
pub use settings::Settings;
