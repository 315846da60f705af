//! Closing actions
//!
//! Terminal actions that discharge a goal outright. Both follow the
//! action contract: on `Failed` the state is untouched, and a
//! `Solved` proof type-checks against the target as it stood on
//! entry.

use crate::action::ActionResult;
use crate::state::ProofState;
use ember_kernel::{Expr, LevelVec, TypeInferer};

/// Close the goal with a hypothesis whose type matches the target.
pub fn assumption_action(state: &mut ProofState) -> ActionResult {
    let locals = state.local_types();
    let tc = TypeInferer::with_locals(state.env(), locals);
    for hyp in state.hypotheses() {
        if tc.is_def_eq(&hyp.ty, state.target()) {
            tracing::debug!(hyp = %hyp.name, "assumption closed the goal");
            return ActionResult::solved(Expr::fvar(hyp.fvar));
        }
    }
    ActionResult::failed()
}

/// Close a `True` goal with `True.intro`.
pub fn trivial_action(state: &mut ProofState) -> ActionResult {
    let tc = TypeInferer::new(state.env());
    let true_const = Expr::const_("True", LevelVec::new());
    if tc.is_def_eq(state.target(), &true_const) {
        return ActionResult::solved(Expr::const_("True.intro", LevelVec::new()));
    }
    ActionResult::failed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{c, logic_env};

    #[test]
    fn test_assumption_solves_with_matching_hypothesis() {
        let env = logic_env();
        let mut state = ProofState::new(env, c("P"));
        let h = state.add_hypothesis("h", c("P"));
        let result = assumption_action(&mut state);
        assert_eq!(result, ActionResult::Solved(Expr::fvar(h)));
    }

    #[test]
    fn test_assumption_fails_without_match() {
        let env = logic_env();
        let mut state = ProofState::new(env, c("P"));
        state.add_hypothesis("h", c("Q"));
        let before = state.clone();
        assert!(assumption_action(&mut state).is_failed());
        assert_eq!(state, before);
    }

    #[test]
    fn test_trivial_solves_true_goal() {
        let env = logic_env();
        let mut state = ProofState::new(env, c("True"));
        let result = trivial_action(&mut state);
        assert_eq!(result, ActionResult::Solved(c("True.intro")));
    }

    #[test]
    fn test_trivial_fails_on_other_goals() {
        let env = logic_env();
        let mut state = ProofState::new(env, c("P"));
        let before = state.clone();
        assert!(trivial_action(&mut state).is_failed());
        assert_eq!(state, before);
    }
}
