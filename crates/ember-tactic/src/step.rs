//! Proof steps
//!
//! A proof step is pushed whenever an action transforms the goal
//! without solving it. It captures, at push time, everything needed
//! to turn a proof of the transformed goal back into a proof of the
//! original goal. Resolution reads the state but never mutates it.

use crate::action::ActionResult;
use crate::app_builder::AppBuilder;
use ember_kernel::{Environment, Expr, LocalTypes, Name};

/// Which equivalence notion a simplification certificate witnesses.
///
/// The tag must travel with the certificate so reconstruction uses
/// the matching converse lemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Iff,
}

impl Relation {
    /// The relation's head constant
    pub fn name(self) -> Name {
        match self {
            Relation::Eq => Name::from_string("Eq"),
            Relation::Iff => Name::from_string("Iff"),
        }
    }

    /// The converse lemma used to map a proof of the rewritten goal
    /// back to the original (`Iff.mpr` / `Eq.mpr`)
    pub fn mpr(self) -> Name {
        match self {
            Relation::Eq => Name::from_string("Eq.mpr"),
            Relation::Iff => Name::from_string("Iff.mpr"),
        }
    }

    /// The transitivity lemma used to chain successive certificates
    pub fn trans(self) -> Name {
        match self {
            Relation::Eq => Name::from_string("Eq.trans"),
            Relation::Iff => Name::from_string("Iff.trans"),
        }
    }
}

/// A pending reconstruction step on the proof-state stack.
///
/// Closed enum: new step kinds are added as new variants, each
/// carrying its own captured payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofStep {
    /// Pushed by the simplify-target action: the target was rewritten
    /// to an equivalent one, witnessed by `equiv_proof` under
    /// `relation`.
    SimplifyTarget {
        relation: Relation,
        equiv_proof: Expr,
    },
}

impl ProofStep {
    /// Turn a proof of the transformed goal into a result for the
    /// enclosing search level.
    ///
    /// Building the converse-lemma application can fail if
    /// elaboration cannot complete (a mismatched certificate, a
    /// misused rule set); that is an ordinary recoverable failure,
    /// not a crash.
    pub fn resolve(&self, env: &Environment, locals: &LocalTypes, proof: Expr) -> ActionResult {
        match self {
            ProofStep::SimplifyTarget {
                relation,
                equiv_proof,
            } => {
                let builder = AppBuilder::new(env, locals);
                match builder.mk_app(relation.mpr(), &[equiv_proof.clone(), proof]) {
                    Ok(term) => ActionResult::solved(term),
                    Err(err) => {
                        tracing::debug!(%err, "proof step resolution failed");
                        ActionResult::failed()
                    }
                }
            }
        }
    }
}
