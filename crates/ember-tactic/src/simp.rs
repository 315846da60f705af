//! Simplifier
//!
//! The input/output contract the simplify-target action consumes: a
//! relation, a target, and a rule set go in; a possibly-new term and
//! an optional equivalence certificate come out. If no certificate is
//! produced, no progress was made and the returned term equals the
//! input.
//!
//! The implementation here is a deliberately small ground rewriter:
//! it rewrites the target at the root with the first applicable lemma
//! of the requested relation and chains successive certificates with
//! the relation's transitivity lemma. Rule indexing and congruence
//! rewriting live behind this contract and are not this module's
//! concern.

use crate::app_builder::AppBuilder;
use crate::step::Relation;
use ember_kernel::{Environment, Expr, LocalTypes, Name, TypeInferer};

/// Rewrite-fixpoint guard against cyclic rule sets
const MAX_REWRITES: usize = 64;

/// A single rewrite lemma: `proof : relation(lhs, rhs)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpLemma {
    pub name: Name,
    pub relation: Relation,
    pub lhs: Expr,
    pub rhs: Expr,
    pub proof: Expr,
}

/// An ordered collection of rewrite lemmas
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpRuleSet {
    lemmas: Vec<SimpLemma>,
}

impl SimpRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, lemma: SimpLemma) {
        self.lemmas.push(lemma);
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// The lemmas applicable under the given relation, in insertion order
    pub fn lemmas_for(&self, relation: Relation) -> impl Iterator<Item = &SimpLemma> {
        self.lemmas.iter().filter(move |l| l.relation == relation)
    }
}

/// Result of a simplification call.
///
/// Invariant: `proof.is_none()` means no progress, and `new_expr`
/// equals the original target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpResult {
    pub new_expr: Expr,
    pub proof: Option<Expr>,
}

impl SimpResult {
    pub fn has_proof(&self) -> bool {
        self.proof.is_some()
    }
}

/// Rewrite `target` under `relation` using `rules`.
///
/// Applies root rewrites to a fixpoint, composing certificates with
/// the relation's transitivity lemma. Deterministic: the same state
/// and rules always produce the same result.
pub fn simplify(
    env: &Environment,
    locals: &LocalTypes,
    relation: Relation,
    target: &Expr,
    rules: &SimpRuleSet,
) -> SimpResult {
    let tc = TypeInferer::with_locals(env, locals.clone());
    let builder = AppBuilder::new(env, locals);

    let mut current = target.clone();
    let mut proof: Option<Expr> = None;

    for _ in 0..MAX_REWRITES {
        let Some(lemma) = rules
            .lemmas_for(relation)
            .find(|l| tc.is_def_eq(&l.lhs, &current))
        else {
            break;
        };
        if tc.is_def_eq(&lemma.rhs, &current) {
            // Lemma would not change the target; stop rather than spin
            break;
        }
        let next_proof = match &proof {
            None => lemma.proof.clone(),
            Some(p) => {
                match builder.mk_app(relation.trans(), &[p.clone(), lemma.proof.clone()]) {
                    Ok(q) => q,
                    Err(err) => {
                        // Keep the sound prefix already certified
                        tracing::debug!(lemma = %lemma.name, %err, "could not chain certificate");
                        return SimpResult {
                            new_expr: current,
                            proof,
                        };
                    }
                }
            }
        };
        tracing::trace!(lemma = %lemma.name, "rewrote target");
        proof = Some(next_proof);
        current = lemma.rhs.clone();
    }

    SimpResult {
        new_expr: current,
        proof,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{c, iff, logic_env};
    use ember_kernel::TypeInferer;

    #[test]
    fn test_no_rules_no_progress() {
        let env = logic_env();
        let locals = LocalTypes::new();
        let target = c("P");
        let r = simplify(&env, &locals, Relation::Iff, &target, &SimpRuleSet::new());
        assert!(!r.has_proof());
        assert_eq!(r.new_expr, target);
    }

    #[test]
    fn test_single_rewrite_returns_lemma_proof() {
        let mut env = logic_env();
        env.add_axiom("e", iff(c("P"), c("True"))).unwrap();
        let mut rules = SimpRuleSet::new();
        rules.add(SimpLemma {
            name: Name::from_string("e"),
            relation: Relation::Iff,
            lhs: c("P"),
            rhs: c("True"),
            proof: c("e"),
        });
        let locals = LocalTypes::new();
        let r = simplify(&env, &locals, Relation::Iff, &c("P"), &rules);
        assert_eq!(r.new_expr, c("True"));
        assert_eq!(r.proof, Some(c("e")));
    }

    #[test]
    fn test_chained_rewrites_compose_with_trans() {
        let mut env = logic_env();
        env.add_axiom("pq", iff(c("P"), c("Q"))).unwrap();
        env.add_axiom("qt", iff(c("Q"), c("True"))).unwrap();
        let mut rules = SimpRuleSet::new();
        rules.add(SimpLemma {
            name: Name::from_string("pq"),
            relation: Relation::Iff,
            lhs: c("P"),
            rhs: c("Q"),
            proof: c("pq"),
        });
        rules.add(SimpLemma {
            name: Name::from_string("qt"),
            relation: Relation::Iff,
            lhs: c("Q"),
            rhs: c("True"),
            proof: c("qt"),
        });
        let locals = LocalTypes::new();
        let r = simplify(&env, &locals, Relation::Iff, &c("P"), &rules);
        assert_eq!(r.new_expr, c("True"));
        // The composed certificate proves P ↔ True
        let proof = r.proof.expect("progress was made");
        let tc = TypeInferer::new(&env);
        assert_eq!(
            tc.infer_type(&proof).unwrap(),
            iff(c("P"), c("True"))
        );
    }

    #[test]
    fn test_relation_filter_ignores_other_relation() {
        let mut env = logic_env();
        env.add_axiom("e", iff(c("P"), c("True"))).unwrap();
        let mut rules = SimpRuleSet::new();
        rules.add(SimpLemma {
            name: Name::from_string("e"),
            relation: Relation::Iff,
            lhs: c("P"),
            rhs: c("True"),
            proof: c("e"),
        });
        let locals = LocalTypes::new();
        // Asking for Eq must not use the Iff lemma
        let r = simplify(&env, &locals, Relation::Eq, &c("P"), &rules);
        assert!(!r.has_proof());
        assert_eq!(r.new_expr, c("P"));
    }

    #[test]
    fn test_identity_lemma_terminates() {
        let mut env = logic_env();
        env.add_axiom("pp", iff(c("P"), c("P"))).unwrap();
        let mut rules = SimpRuleSet::new();
        rules.add(SimpLemma {
            name: Name::from_string("pp"),
            relation: Relation::Iff,
            lhs: c("P"),
            rhs: c("P"),
            proof: c("pp"),
        });
        let locals = LocalTypes::new();
        let r = simplify(&env, &locals, Relation::Iff, &c("P"), &rules);
        assert!(!r.has_proof());
        assert_eq!(r.new_expr, c("P"));
    }
}
