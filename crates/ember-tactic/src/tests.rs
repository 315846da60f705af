//! Shared test fixtures for the tactic crate

use crate::simp::{SimpLemma, SimpRuleSet};
use crate::step::Relation;
use ember_kernel::{Environment, Expr, LevelVec, Name};

/// Constant with no universe levels
pub(crate) fn c(name: &str) -> Expr {
    Expr::const_(name, LevelVec::new())
}

/// `a ↔ b`
pub(crate) fn iff(a: Expr, b: Expr) -> Expr {
    Expr::apps(c("Iff"), [a, b])
}

/// Logic prelude plus two proposition constants `P` and `Q`
pub(crate) fn logic_env() -> Environment {
    let mut env = Environment::new();
    env.init_logic().unwrap();
    env.add_axiom("P", Expr::prop()).unwrap();
    env.add_axiom("Q", Expr::prop()).unwrap();
    env
}

/// Build an `Iff` rule set from `(proof_constant, lhs, rhs)` triples.
/// The proof constant is expected to be declared in the environment
/// with type `lhs ↔ rhs`.
pub(crate) fn iff_rule_set(rules: &[(&str, Expr, Expr)]) -> SimpRuleSet {
    let mut set = SimpRuleSet::new();
    for (name, lhs, rhs) in rules {
        set.add(SimpLemma {
            name: Name::from_string(name),
            relation: Relation::Iff,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            proof: c(name),
        });
    }
    set
}
