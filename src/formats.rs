//! Output formats for canonical trees
//!
//! - `snapshot` - the indented, tag-shaped text used for regression snapshots
//! - `treeviz` - one line per node, for quick scanning of large trees
//! - `structured` - JSON and YAML renditions of the canonical data
//!
//! All formats are registered in a [`FormatRegistry`] and looked up by name.

pub mod registry;
pub mod snapshot;
pub mod structured;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use snapshot::{to_snapshot, SnapshotFormatter, SnapshotSerializer};
pub use structured::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
