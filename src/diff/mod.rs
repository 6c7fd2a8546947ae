//! Line-oriented diff synthesis: splitting, the bounded-lookahead engine,
//! and unified-diff-style rendering.

pub mod engine;
pub mod render;
pub mod split;

pub use engine::{DiffOp, LOOKAHEAD_WINDOW, diff_lines};
pub use render::{ChangeKind, render_added, render_deleted, render_modified};
pub use split::split_lines;
