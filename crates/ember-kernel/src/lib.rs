//! ember-kernel
//!
//! The minimal term substrate consumed by the ember proof-search
//! core: hierarchical names, universe levels, de Bruijn expressions,
//! an environment of declarations, and a small type inferencer.
//!
//! Terms are immutable and structurally shared; the proof core never
//! mutates a term, only replaces which term a state field points to.

pub mod env;
pub mod expr;
pub mod infer;
pub mod level;
pub mod name;

pub use env::{Declaration, Environment, KernelError, LogicMode};
pub use expr::{BinderInfo, Expr, FVarId, LevelVec};
pub use infer::{LocalTypes, TypeInferer};
pub use level::Level;
pub use name::Name;
