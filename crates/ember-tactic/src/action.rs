//! Action result protocol
//!
//! Every action is a total function `&mut ProofState -> ActionResult`.
//! The three-way outcome is the whole contract between actions and the
//! search driver:
//!
//! - `Failed` — no progress; the state must be unchanged from entry.
//! - `Solved(proof)` — the goal is fully discharged; `proof` must
//!   type-check against the target *as it stood before the action ran*.
//! - `NewBranch` — the goal was transformed; the action pushed exactly
//!   one proof step recording how to turn a future proof of the new
//!   target back into a proof of the old one.
//!
//! Expected "no match" conditions are `Failed`, never a panic or an
//! error value escaping the action.

use ember_kernel::Expr;

/// Outcome of running an action against the current proof state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    /// The action made no progress; the state is untouched
    Failed,
    /// The action discharged the goal with the given proof term
    Solved(Expr),
    /// The action transformed the goal and deferred completion to the
    /// new, smaller goal
    NewBranch,
}

impl ActionResult {
    pub fn failed() -> Self {
        ActionResult::Failed
    }

    pub fn solved(proof: Expr) -> Self {
        ActionResult::Solved(proof)
    }

    pub fn new_branch() -> Self {
        ActionResult::NewBranch
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ActionResult::Failed)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, ActionResult::Solved(_))
    }

    /// The proof term, if this result is `Solved`
    pub fn proof(&self) -> Option<&Expr> {
        match self {
            ActionResult::Solved(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_kernel::LevelVec;

    #[test]
    fn test_predicates() {
        let p = Expr::const_("True.intro", LevelVec::new());
        assert!(ActionResult::failed().is_failed());
        assert!(ActionResult::solved(p.clone()).is_solved());
        assert!(!ActionResult::new_branch().is_solved());
        assert_eq!(ActionResult::solved(p.clone()).proof(), Some(&p));
        assert_eq!(ActionResult::new_branch().proof(), None);
    }
}
