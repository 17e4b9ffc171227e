//! Parse tree input and the cursor-based matching engine.
//!
//! The tree is produced by an external Java grammar front-end: every node carries the
//! production (or token) it was built from as its `kind`, identifier and literal leaves
//! carry their text as `payload`. Nothing in this crate knows about Java semantics; the
//! declaration matchers in `javelin-hir` drive the [`Matcher`] against the vocabulary in
//! [`kinds`].

pub mod kinds;
mod matcher;
mod tree;

pub use matcher::{MatchError, Matcher};
pub use tree::{ParseNode, TreeError};
