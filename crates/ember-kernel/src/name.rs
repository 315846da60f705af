//! Name representation
//!
//! Hierarchical names like `Iff.mpr` or `Nat.add`, stored as an
//! `Arc`-shared cons list so cloning a name is a pointer bump.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Inner representation of a hierarchical name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameInner {
    /// The empty name (root of the hierarchy)
    Anonymous,
    /// A string component appended to a parent name
    Str(Name, String),
}

/// A hierarchical, dot-separated name.
///
/// Equality and hashing are structural; two names built from the same
/// components compare equal regardless of how they were constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name(Arc<NameInner>);

impl Name {
    /// The anonymous (empty) name
    pub fn anonymous() -> Self {
        Name(Arc::new(NameInner::Anonymous))
    }

    /// Append a string component to this name
    pub fn str(self, component: impl Into<String>) -> Self {
        Name(Arc::new(NameInner::Str(self, component.into())))
    }

    /// Parse a dotted string like `"Iff.mpr"` into a hierarchical name
    pub fn from_string(s: &str) -> Self {
        let mut name = Name::anonymous();
        for component in s.split('.') {
            if !component.is_empty() {
                name = name.str(component);
            }
        }
        name
    }

    /// Whether this is the anonymous name
    pub fn is_anonymous(&self) -> bool {
        matches!(&*self.0, NameInner::Anonymous)
    }

    /// The components of this name, outermost first
    pub fn components(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut cur = self;
        while let NameInner::Str(parent, s) = &*cur.0 {
            out.push(s.as_str());
            cur = parent;
        }
        out.reverse();
        out
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            NameInner::Anonymous => write!(f, "[anonymous]"),
            NameInner::Str(parent, s) => {
                if parent.is_anonymous() {
                    write!(f, "{s}")
                } else {
                    write!(f, "{parent}.{s}")
                }
            }
        }
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_roundtrip() {
        let n = Name::from_string("Iff.mpr");
        assert_eq!(n.to_string(), "Iff.mpr");
        assert_eq!(n.components(), vec!["Iff", "mpr"]);
    }

    #[test]
    fn test_structural_equality() {
        let a = Name::from_string("Eq.mpr");
        let b = Name::anonymous().str("Eq").str("mpr");
        assert_eq!(a, b);
    }

    #[test]
    fn test_anonymous() {
        assert!(Name::anonymous().is_anonymous());
        assert!(!Name::from_string("x").is_anonymous());
        assert_eq!(Name::from_string(""), Name::anonymous());
    }
}
