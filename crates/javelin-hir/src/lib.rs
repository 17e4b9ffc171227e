//! Semantic model of one Java compilation unit.
//!
//! [`build_compilation_unit`] walks the declaration productions of a parse tree and
//! builds a [`ModuleGraph`]: one [`JavaModule`] per class, interface or enum, with
//! fields, constants, constructors, methods and static initializers recorded in
//! source order. Expressions and statements are matched by a [`PeerMatchers`]
//! implementation; their results are stored as pending bodies for the renderer.
//!
//! Module kinds are inferred from the context a declaration appears in (see
//! [`Context::infer_kind`]); generics are erased to `Object`.

mod builder;
mod context;
mod decl;
mod error;
mod model;
mod peer;
mod signature;

pub use crate::builder::build_compilation_unit;
pub use crate::context::{Context, DeclKind};
pub use crate::decl::{Declarator, Modifiers};
pub use crate::error::BuildError;
pub use crate::model::{
    initialization_plan, Constant, Constructor, ConstructorInvocation, Field, Import, InitStep,
    JavaModule, Method, MethodBody, MethodOwner, ModuleGraph, ModuleId, ModuleKind, Owner,
    Param, PendingBody, StaticBlock, StaticMember,
};
pub use crate::peer::{BodyScope, PeerMatchers};
