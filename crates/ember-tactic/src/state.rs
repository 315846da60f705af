//! Proof state
//!
//! The single in-progress search owns exactly one `ProofState`. It
//! holds the current target, the hypothesis context, the active rule
//! set, and the ordered reconstruction stack of pending proof steps.
//! Actions receive it by mutable reference; there is no ambient or
//! global state.

use crate::action::ActionResult;
use crate::simp::SimpRuleSet;
use crate::step::ProofStep;
use ember_kernel::{Environment, Expr, FVarId, LocalTypes};

/// A hypothesis in the goal's local context
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hypothesis {
    /// Free variable standing for this hypothesis in proof terms
    pub fvar: FVarId,
    /// Name for display
    pub name: String,
    /// Type of the hypothesis
    pub ty: Expr,
}

/// The mutable state threaded through a proof search
#[derive(Clone, Debug, PartialEq)]
pub struct ProofState {
    env: Environment,
    target: Expr,
    hypotheses: Vec<Hypothesis>,
    rules: SimpRuleSet,
    steps: Vec<ProofStep>,
    next_fvar: u64,
}

impl ProofState {
    /// Create a state for a fresh top-level goal
    pub fn new(env: Environment, target: Expr) -> Self {
        ProofState {
            env,
            target,
            hypotheses: Vec::new(),
            rules: SimpRuleSet::new(),
            steps: Vec::new(),
            next_fvar: 0,
        }
    }

    pub fn with_rules(env: Environment, target: Expr, rules: SimpRuleSet) -> Self {
        ProofState {
            rules,
            ..ProofState::new(env, target)
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn target(&self) -> &Expr {
        &self.target
    }

    /// Replace the target. Only actions do this, and only together
    /// with pushing the matching proof step.
    pub fn set_target(&mut self, target: Expr) {
        self.target = target;
    }

    pub fn rules(&self) -> &SimpRuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut SimpRuleSet {
        &mut self.rules
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Add a hypothesis to the local context, returning its fvar
    pub fn add_hypothesis(&mut self, name: impl Into<String>, ty: Expr) -> FVarId {
        let fvar = FVarId(self.next_fvar);
        self.next_fvar += 1;
        self.hypotheses.push(Hypothesis {
            fvar,
            name: name.into(),
            ty,
        });
        fvar
    }

    /// Project the hypothesis context into the kernel's fvar-type map
    pub fn local_types(&self) -> LocalTypes {
        let mut locals = LocalTypes::new();
        for hyp in &self.hypotheses {
            locals.insert(hyp.fvar, hyp.ty.clone());
        }
        locals
    }

    /// Number of pending reconstruction steps
    pub fn pending_steps(&self) -> usize {
        self.steps.len()
    }

    /// Push a reconstruction step; ownership of its captured data
    /// moves to the stack.
    pub fn push_proof_step(&mut self, step: ProofStep) {
        self.steps.push(step);
    }

    /// Pop the top step and resolve it against a proof of the current
    /// (transformed) goal. `Failed` if the stack is empty.
    pub fn pop_and_resolve(&mut self, proof: Expr) -> ActionResult {
        match self.steps.pop() {
            Some(step) => step.resolve(&self.env, &self.local_types(), proof),
            None => ActionResult::failed(),
        }
    }

    /// Drive resolution to a terminal result: while steps remain and
    /// each resolution yields `Solved`, keep popping. A step may in
    /// general defer again; `Failed` and `NewBranch` are returned to
    /// the caller as-is.
    pub fn resolve_solved(&mut self, proof: Expr) -> ActionResult {
        let mut current = proof;
        while !self.steps.is_empty() {
            match self.pop_and_resolve(current) {
                ActionResult::Solved(p) => current = p,
                other => return other,
            }
        }
        ActionResult::solved(current)
    }
}
