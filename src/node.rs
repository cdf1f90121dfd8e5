//! Element tree definitions
//!
//! Two tree shapes live here:
//!
//! - `raw` - what a renderer hands back: leaves, lists and elements whose type is an
//!   opaque [`ElementType`] (host tag, component reference or one of the wrapper kinds)
//! - `canonical` - the normalized form consumed by the explorer and the formats, where
//!   every element carries a resolved type name and a flat child list
//!
//! Props are shared by both shapes (see `props`).

pub mod canonical;
pub mod props;
pub mod raw;

pub use canonical::{Element, Mode, Node};
pub use props::{Callback, PropValue, Props};
pub use raw::{ComponentRef, ElementType, ForwardRef, Memo, RawElement, RawNode, RenderFn};

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a component reference or callback.
///
/// Two stand-ins are equal only when they share an id, no matter what they are named.
/// Ids also key the mock-name side table (see [`crate::mocks::MockNames`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MockId(u64);

static NEXT_MOCK_ID: AtomicU64 = AtomicU64::new(1);

impl MockId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_MOCK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}
