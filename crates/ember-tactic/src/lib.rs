//! ember-tactic
//!
//! The goal-directed proof-search core: a mutable proof state is
//! threaded through a sequence of fallible, branching actions; each
//! successful transformation records a reconstruction step; once a
//! branch is closed, the pending steps replay bottom-up to assemble a
//! proof of the original goal.
//!
//! # Protocol
//!
//! Every action returns one of three outcomes ([`ActionResult`]):
//! `Failed` (no progress, state untouched), `Solved` (goal discharged
//! with a proof of the pre-action target), or `NewBranch` (goal
//! transformed; exactly one [`ProofStep`] was pushed recording how to
//! map a proof of the new goal back to the old one).
//!
//! # Example
//!
//! ```
//! use ember_kernel::{Environment, Expr, LevelVec, Name};
//! use ember_tactic::{
//!     search, simplify_target, trivial_action, Action, ProofState, Relation, SimpLemma,
//!     SimpRuleSet,
//! };
//!
//! let mut env = Environment::new();
//! env.init_logic().unwrap();
//! env.add_axiom("P", Expr::prop()).unwrap();
//! let p = Expr::const_("P", LevelVec::new());
//! let true_ = Expr::const_("True", LevelVec::new());
//! let iff_p_true = Expr::apps(Expr::const_("Iff", LevelVec::new()), [p.clone(), true_.clone()]);
//! env.add_axiom("e", iff_p_true).unwrap();
//!
//! let mut rules = SimpRuleSet::new();
//! rules.add(SimpLemma {
//!     name: Name::from_string("e"),
//!     relation: Relation::Iff,
//!     lhs: p.clone(),
//!     rhs: true_,
//!     proof: Expr::const_("e", LevelVec::new()),
//! });
//!
//! let mut state = ProofState::with_rules(env, p, rules);
//! let actions: &[Action] = &[trivial_action, simplify_target];
//! let proof = search(&mut state, actions, 4);
//! assert!(proof.is_some());
//! ```

pub mod action;
pub mod app_builder;
pub mod basic;
pub mod search;
pub mod simp;
pub mod simplify;
pub mod state;
pub mod step;

#[cfg(test)]
pub(crate) mod tests;

pub use action::ActionResult;
pub use app_builder::{AppBuilder, AppBuilderError};
pub use basic::{assumption_action, trivial_action};
pub use search::{search, Action};
pub use simp::{simplify, SimpLemma, SimpResult, SimpRuleSet};
pub use simplify::{choose_relation, simplify_target, use_iff};
pub use state::{Hypothesis, ProofState};
pub use step::{ProofStep, Relation};
