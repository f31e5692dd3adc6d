//! Red-black tree engine with replayable step traces.
//!
//! Every insert returns a [`Trace`]: the ordered [`Snapshot`]s of the tree
//! after placement, after each recoloring and after each rotation, ending
//! with the settled tree. Snapshots are independent deep copies, so a
//! caller can replay them at its own pace while the live tree moves on.
//!
//! ```
//! use rbstep_tree::{Color, RbTree};
//!
//! let mut tree = RbTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! let trace = tree.insert(30);
//!
//! assert_eq!(trace.first().unwrap().message(), "Placed 30 as child of 20");
//! assert_eq!(trace.last().unwrap().message(), "Insertion complete");
//!
//! let root = tree.current_root().unwrap();
//! assert_eq!(*root.value(), 20);
//! assert_eq!(root.color(), Color::Black);
//! ```

mod engine;
mod error;
mod fixup;
mod node;
mod rotate;
mod trace;
mod validate;
mod view;

pub use engine::RbTree;
pub use error::{Result, TreeError};
pub use node::{Color, NodeId, Side};
pub use trace::{RecorderConfig, Snapshot, StepKind, Trace};
pub use validate::InvariantViolation;
pub use view::{NestedNode, NodeRef, TreeView};

// Traces are plain values and may be handed to another thread for playback.
static_assertions::assert_impl_all!(Trace<i64>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Snapshot<i64>: Send, Sync, Clone);
static_assertions::assert_impl_all!(RbTree<i64>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(TreeView<'static, i64>: Copy);
