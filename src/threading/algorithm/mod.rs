//! Walks over the reply forest
//!
//! Backward walks (child to root) live in `cycle_detection`, forward walks
//! (root to descendants) in `tree_traversal`.

mod cycle_detection;
mod tree_traversal;

pub use cycle_detection::{detect_cycle_in_ancestry, resolve_root};
pub use tree_traversal::{collect_thread_members, identify_thread_roots};
