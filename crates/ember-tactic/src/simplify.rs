//! Simplify-target action
//!
//! The representative action of the search core: rewrite the current
//! target to an equivalent one under the appropriate relation, push a
//! reconstruction step capturing the certificate, and hand the
//! smaller goal back to the driver.

use crate::action::ActionResult;
use crate::simp::simplify;
use crate::state::ProofState;
use crate::step::{ProofStep, Relation};
use ember_kernel::{Environment, Expr, LocalTypes, TypeInferer};

/// Whether target rewriting may go through propositional equivalence.
///
/// True iff the logic is in standard (classical, proof-irrelevant)
/// mode and the target is proposition-valued. Data-valued targets,
/// and any target in constructive mode, rewrite through `Eq`.
pub fn use_iff(env: &Environment, locals: &LocalTypes, target: &Expr) -> bool {
    env.is_standard() && TypeInferer::with_locals(env, locals.clone()).is_proposition(target)
}

/// Choose the rewrite relation for a target, once per invocation.
/// The choice is threaded into both the simplifier call and the
/// pushed proof step so resolution uses the matching converse lemma.
pub fn choose_relation(env: &Environment, locals: &LocalTypes, target: &Expr) -> Relation {
    if use_iff(env, locals, target) {
        Relation::Iff
    } else {
        Relation::Eq
    }
}

/// Rewrite the current target with the state's rule set.
///
/// On progress: pushes one `ProofStep::SimplifyTarget`, replaces the
/// target with the rewritten term, and returns `NewBranch`. On no
/// progress: returns `Failed` with the state untouched. All fallible
/// work happens before any mutation.
pub fn simplify_target(state: &mut ProofState) -> ActionResult {
    let target = state.target().clone();
    let locals = state.local_types();
    let relation = choose_relation(state.env(), &locals, &target);

    let result = simplify(state.env(), &locals, relation, &target, state.rules());
    let Some(equiv_proof) = result.proof else {
        tracing::trace!(?relation, "simplify_target: no progress");
        return ActionResult::failed();
    };

    tracing::debug!(?relation, "simplify_target: target rewritten");
    state.push_proof_step(ProofStep::SimplifyTarget {
        relation,
        equiv_proof,
    });
    state.set_target(result.new_expr);
    ActionResult::new_branch()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simp::{SimpLemma, SimpRuleSet};
    use crate::tests::{c, iff, logic_env};
    use ember_kernel::{LogicMode, Name};

    fn iff_rule(name: &str, lhs: Expr, rhs: Expr) -> SimpLemma {
        SimpLemma {
            name: Name::from_string(name),
            relation: Relation::Iff,
            lhs,
            rhs,
            proof: c(name),
        }
    }

    #[test]
    fn test_choose_relation_truth_table() {
        let mut env = logic_env();
        env.add_axiom("A", Expr::type_()).unwrap();
        let locals = LocalTypes::new();

        // standard mode, proposition target
        assert_eq!(choose_relation(&env, &locals, &c("P")), Relation::Iff);
        // standard mode, data-valued target
        assert_eq!(choose_relation(&env, &locals, &c("A")), Relation::Eq);

        env.set_mode(LogicMode::Constructive);
        // constructive mode, proposition target
        assert_eq!(choose_relation(&env, &locals, &c("P")), Relation::Eq);
        // constructive mode, data-valued target
        assert_eq!(choose_relation(&env, &locals, &c("A")), Relation::Eq);
    }

    #[test]
    fn test_no_progress_leaves_state_untouched() {
        let env = logic_env();
        let mut state = ProofState::new(env, c("P"));
        let before = state.clone();
        assert!(simplify_target(&mut state).is_failed());
        assert_eq!(state, before);
    }

    #[test]
    fn test_no_progress_is_deterministic() {
        let env = logic_env();
        let mut state = ProofState::new(env, c("P"));
        assert!(simplify_target(&mut state).is_failed());
        assert!(simplify_target(&mut state).is_failed());
    }

    #[test]
    fn test_progress_pushes_one_step_and_replaces_target() {
        let mut env = logic_env();
        env.add_axiom("e", iff(c("P"), c("True"))).unwrap();
        let mut rules = SimpRuleSet::new();
        rules.add(iff_rule("e", c("P"), c("True")));
        let mut state = ProofState::with_rules(env, c("P"), rules);

        let steps_before = state.pending_steps();
        let result = simplify_target(&mut state);
        assert_eq!(result, ActionResult::NewBranch);
        assert_eq!(state.pending_steps(), steps_before + 1);
        assert_eq!(state.target(), &c("True"));
    }

    #[test]
    fn test_iff_rules_do_not_fire_in_constructive_mode() {
        let mut env = logic_env();
        env.set_mode(LogicMode::Constructive);
        env.add_axiom("e", iff(c("P"), c("True"))).unwrap();
        let mut rules = SimpRuleSet::new();
        rules.add(iff_rule("e", c("P"), c("True")));
        let mut state = ProofState::with_rules(env, c("P"), rules);
        // Relation is Eq here, and the rule set has no Eq lemmas
        assert!(simplify_target(&mut state).is_failed());
        assert_eq!(state.target(), &c("P"));
    }
}
