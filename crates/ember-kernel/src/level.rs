//! Universe levels
//!
//! `Sort Zero` is `Prop`, `Sort (Succ Zero)` is `Type`.

use crate::name::Name;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A universe level expression
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Level 0 (the universe of `Prop`)
    Zero,
    /// Successor level
    Succ(Arc<Level>),
    /// Maximum of two levels
    Max(Arc<Level>, Arc<Level>),
    /// A level parameter of a polymorphic constant
    Param(Name),
}

impl Level {
    pub fn zero() -> Self {
        Level::Zero
    }

    pub fn one() -> Self {
        Level::Succ(Arc::new(Level::Zero))
    }

    pub fn succ(l: Level) -> Self {
        Level::Succ(Arc::new(l))
    }

    pub fn param(name: impl Into<Name>) -> Self {
        Level::Param(name.into())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Level::Zero)
    }

    /// Substitute level parameters by name
    pub fn instantiate_params(&self, subst: &[(Name, Level)]) -> Level {
        match self {
            Level::Zero => Level::Zero,
            Level::Succ(l) => Level::succ(l.instantiate_params(subst)),
            Level::Max(a, b) => Level::Max(
                Arc::new(a.instantiate_params(subst)),
                Arc::new(b.instantiate_params(subst)),
            ),
            Level::Param(n) => subst
                .iter()
                .find(|(p, _)| p == n)
                .map(|(_, l)| l.clone())
                .unwrap_or_else(|| self.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_zero() {
        assert!(Level::zero().is_zero());
        assert!(!Level::one().is_zero());
    }

    #[test]
    fn test_instantiate_params() {
        let u = Name::from_string("u");
        let l = Level::succ(Level::param(u.clone()));
        let inst = l.instantiate_params(&[(u, Level::zero())]);
        assert_eq!(inst, Level::one());
    }
}
