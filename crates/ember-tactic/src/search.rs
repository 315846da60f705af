//! Depth-first search driver
//!
//! A minimal synchronous driver over the action protocol: try each
//! action against the current state; feed `Solved` proofs through the
//! reconstruction stack; recurse on `NewBranch` goals; abandon a
//! branch when every action fails or the depth budget runs out.
//!
//! Abandoning a branch is always safe: actions only perform in-memory
//! state transitions, so a discarded clone carries no side effects.

use crate::action::ActionResult;
use crate::state::ProofState;
use ember_kernel::Expr;

/// A single tactic step obeying the action-result protocol
pub type Action = fn(&mut ProofState) -> ActionResult;

/// Depth-first search for a proof of the state's target.
///
/// Returns the fully reconstructed proof of the *original* target on
/// success, leaving `state` at the successful branch. On failure the
/// state is unchanged.
pub fn search(state: &mut ProofState, actions: &[Action], max_depth: usize) -> Option<Expr> {
    for action in actions {
        let mut attempt = state.clone();
        match action(&mut attempt) {
            ActionResult::Failed => continue,
            ActionResult::Solved(proof) => match attempt.resolve_solved(proof) {
                ActionResult::Solved(full) => {
                    *state = attempt;
                    return Some(full);
                }
                _ => {
                    tracing::debug!("reconstruction failed, abandoning branch");
                    continue;
                }
            },
            ActionResult::NewBranch => {
                if max_depth == 0 {
                    tracing::trace!("depth budget exhausted");
                    continue;
                }
                if let Some(full) = search(&mut attempt, actions, max_depth - 1) {
                    *state = attempt;
                    return Some(full);
                }
            }
        }
    }
    None
}
