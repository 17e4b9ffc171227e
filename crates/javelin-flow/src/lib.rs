//! Statement IR for translated bodies and the `switch` fall-through normalizer.
//!
//! Java `switch` arms fall through into the next arm unless they end in `break`,
//! `return` or `throw`. The target `case`/`when` construct never falls through, so
//! [`normalize_switch`] copies the fall-through statements into every arm that can
//! reach them, drops the now redundant trailing `break`s and moves `default` last.

mod error;
mod ir;
mod normalize;

pub use crate::error::FlowError;
pub use crate::ir::{CaseBranch, CaseLabel, Expression, Stmt};
pub use crate::normalize::{
    closes, normalize_body, normalize_switch, ClosureMode, FlowConfig, SWITCH_EXIT_LABEL,
};
