//! Cucumber step definitions.

pub mod playback;
pub mod rotation;
pub mod tree;
