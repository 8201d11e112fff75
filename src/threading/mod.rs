//! Thread reconstruction
//!
//! Every message names the message it replies to (or `NO_PARENT`). This
//! module turns those flat back-references into a forest and answers thread
//! questions against it.
//!
//! ## Threading Strategy
//!
//! 1. **Backward walk**: the root of a message's thread is found by following
//!    parent links until a container without a parent. A visited set guards
//!    against malformed input that loops.
//! 2. **Forward collection**: the members of a thread are every stored
//!    message reachable from the root through child links.
//! 3. **Phantoms**: a parent id that is referenced but not stored gets a
//!    phantom container, so replies to a missing message still group together.
//!
//! ## Module Structure
//!
//! - `container`: forest nodes and thread groupings
//! - `algorithm`: backward and forward walks
//! - `index`: the incrementally maintained `ThreadIndex`
//! - `view`: timestamp and thread ordering

pub mod algorithm;
pub mod container;
pub mod index;
pub mod view;

pub use container::{Container, ThreadGroup, ThreadSummary};
pub use index::ThreadIndex;
