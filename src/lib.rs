//! rbstep - step-by-step red-black tree insertion
//!
//! The caller-side layer over [`rbstep_tree`]: configuration, logging
//! bootstrap, a playback cursor over recorded traces and trace reports.
//!
//! ```
//! use rbstep::playback::Playback;
//! use rbstep::report::render_tree;
//! use rbstep_tree::RbTree;
//!
//! let mut tree = RbTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! let mut playback = Playback::new(tree.insert(30));
//!
//! assert_eq!(playback.message(), "Placed 30 as child of 20");
//! while playback.advance() {}
//! assert_eq!(playback.message(), "Insertion complete");
//! assert!(render_tree(playback.view_or(tree.view())).starts_with("    30 (R)"));
//! ```

pub mod cli;
pub mod config;
pub mod playback;
pub mod report;
pub mod utils;

pub use config::Config;
pub use playback::Playback;
pub use report::{OutputFormat, TraceReport};
