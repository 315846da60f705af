//! Environment and declarations
//!
//! The environment maps constant names to their declarations and
//! carries the ambient logic mode. The proof core reads it; only
//! `add_decl` extends it.

use crate::expr::{BinderInfo, Expr, LevelVec};
use crate::level::Level;
use crate::name::Name;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Errors produced by the kernel substrate
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("constant already declared: {0}")]
    AlreadyDeclared(Name),
    #[error("unknown constant: {0}")]
    UnknownConstant(Name),
    #[error("unknown free variable: {0:?}")]
    UnknownFVar(crate::expr::FVarId),
    #[error("loose bound variable outside any binder")]
    LooseBVar,
    #[error("expected {expected} universe levels for {name}, got {actual}")]
    LevelArity {
        name: Name,
        expected: usize,
        actual: usize,
    },
    #[error("expression is not a function: {0:?}")]
    NotAFunction(Expr),
    #[error("type mismatch: expected {expected:?}, got {actual:?}")]
    TypeMismatch { expected: Expr, actual: Expr },
}

/// A declaration in the environment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    /// A constant with a type but no value
    Axiom {
        name: Name,
        level_params: Vec<Name>,
        type_: Expr,
    },
    /// A constant with a type and an unfoldable value
    Definition {
        name: Name,
        level_params: Vec<Name>,
        type_: Expr,
        value: Expr,
    },
}

impl Declaration {
    pub fn name(&self) -> &Name {
        match self {
            Declaration::Axiom { name, .. } | Declaration::Definition { name, .. } => name,
        }
    }

    pub fn level_params(&self) -> &[Name] {
        match self {
            Declaration::Axiom { level_params, .. }
            | Declaration::Definition { level_params, .. } => level_params,
        }
    }

    pub fn type_(&self) -> &Expr {
        match self {
            Declaration::Axiom { type_, .. } | Declaration::Definition { type_, .. } => type_,
        }
    }

    /// The unfoldable value, if this is a definition
    pub fn value(&self) -> Option<&Expr> {
        match self {
            Declaration::Axiom { .. } => None,
            Declaration::Definition { value, .. } => Some(value),
        }
    }
}

/// The ambient logic configuration.
///
/// `Standard` is the classical, proof-irrelevant mode in which a
/// propositional equivalence (`Iff`) can stand in for equality of
/// propositions. In `Constructive` mode that identification is not
/// available and rewriting must go through `Eq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicMode {
    Standard,
    Constructive,
}

/// The global environment of declarations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    decls: HashMap<Name, Declaration>,
    mode: LogicMode,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an empty environment in standard mode
    pub fn new() -> Self {
        Environment {
            decls: HashMap::new(),
            mode: LogicMode::Standard,
        }
    }

    /// Create an empty environment with an explicit logic mode
    pub fn with_mode(mode: LogicMode) -> Self {
        Environment {
            decls: HashMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> LogicMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LogicMode) {
        self.mode = mode;
    }

    /// Whether the environment is in standard (classical,
    /// proof-irrelevant) mode
    pub fn is_standard(&self) -> bool {
        self.mode == LogicMode::Standard
    }

    /// Add a declaration; duplicate names are rejected
    pub fn add_decl(&mut self, decl: Declaration) -> Result<(), KernelError> {
        let name = decl.name().clone();
        if self.decls.contains_key(&name) {
            return Err(KernelError::AlreadyDeclared(name));
        }
        self.decls.insert(name, decl);
        Ok(())
    }

    pub fn get_const(&self, name: &Name) -> Option<&Declaration> {
        self.decls.get(name)
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.decls.contains_key(name)
    }

    /// Declare an axiom without universe parameters
    pub fn add_axiom(&mut self, name: &str, type_: Expr) -> Result<(), KernelError> {
        self.add_decl(Declaration::Axiom {
            name: Name::from_string(name),
            level_params: vec![],
            type_,
        })
    }

    /// Seed the logical prelude the proof core's well-known lemmas
    /// refer to (`True`, `Iff.mpr`, `Eq.mpr`, transitivity, and the
    /// propositional connectives).
    pub fn init_logic(&mut self) -> Result<(), KernelError> {
        let prop = Expr::prop();
        let prop2 = Expr::arrow(prop.clone(), Expr::arrow(prop.clone(), prop.clone()));

        self.add_axiom("True", prop.clone())?;
        self.add_axiom("False", prop.clone())?;
        self.add_axiom("True.intro", Expr::const_("True", LevelVec::new()))?;
        self.add_axiom("Not", Expr::arrow(prop.clone(), prop.clone()))?;
        self.add_axiom("And", prop2.clone())?;
        self.add_axiom("Or", prop2.clone())?;
        self.add_axiom("Iff", prop2)?;

        let iff = |a: Expr, b: Expr| Expr::apps(Expr::const_("Iff", LevelVec::new()), [a, b]);

        // Iff.mpr : {a b : Prop} → (a ↔ b) → b → a
        self.add_axiom(
            "Iff.mpr",
            Expr::pi(
                BinderInfo::Implicit,
                prop.clone(),
                Expr::pi(
                    BinderInfo::Implicit,
                    prop.clone(),
                    Expr::pi(
                        BinderInfo::Default,
                        iff(Expr::bvar(1), Expr::bvar(0)),
                        Expr::pi(BinderInfo::Default, Expr::bvar(1), Expr::bvar(3)),
                    ),
                ),
            ),
        )?;

        // Iff.trans : {a b c : Prop} → (a ↔ b) → (b ↔ c) → (a ↔ c)
        self.add_axiom(
            "Iff.trans",
            Expr::pi(
                BinderInfo::Implicit,
                prop.clone(),
                Expr::pi(
                    BinderInfo::Implicit,
                    prop.clone(),
                    Expr::pi(
                        BinderInfo::Implicit,
                        prop.clone(),
                        Expr::pi(
                            BinderInfo::Default,
                            iff(Expr::bvar(2), Expr::bvar(1)),
                            Expr::pi(
                                BinderInfo::Default,
                                iff(Expr::bvar(2), Expr::bvar(1)),
                                iff(Expr::bvar(4), Expr::bvar(2)),
                            ),
                        ),
                    ),
                ),
            ),
        )?;

        let u = Name::from_string("u");
        let sort_u = Expr::sort(Level::param(u.clone()));
        let eq_at = |level: Level, ty: Expr, a: Expr, b: Expr| {
            Expr::apps(Expr::const_("Eq", vec![level]), [ty, a, b])
        };

        // Eq : {α : Sort u} → α → α → Prop
        self.add_decl(Declaration::Axiom {
            name: Name::from_string("Eq"),
            level_params: vec![u.clone()],
            type_: Expr::pi(
                BinderInfo::Implicit,
                sort_u.clone(),
                Expr::pi(
                    BinderInfo::Default,
                    Expr::bvar(0),
                    Expr::pi(BinderInfo::Default, Expr::bvar(1), prop.clone()),
                ),
            ),
        })?;

        // Eq.mpr : {α β : Sort u} → α = β → β → α
        // The equation lives one universe up, at `Eq.{u+1} (Sort u)`.
        self.add_decl(Declaration::Axiom {
            name: Name::from_string("Eq.mpr"),
            level_params: vec![u.clone()],
            type_: Expr::pi(
                BinderInfo::Implicit,
                sort_u.clone(),
                Expr::pi(
                    BinderInfo::Implicit,
                    sort_u.clone(),
                    Expr::pi(
                        BinderInfo::Default,
                        eq_at(
                            Level::succ(Level::param(u.clone())),
                            sort_u.clone(),
                            Expr::bvar(1),
                            Expr::bvar(0),
                        ),
                        Expr::pi(BinderInfo::Default, Expr::bvar(1), Expr::bvar(3)),
                    ),
                ),
            ),
        })?;

        // Eq.trans : {α : Sort u} {a b c : α} → a = b → b = c → a = c
        let u_lvl = Level::param(u.clone());
        self.add_decl(Declaration::Axiom {
            name: Name::from_string("Eq.trans"),
            level_params: vec![u],
            type_: Expr::pi(
                BinderInfo::Implicit,
                sort_u,
                Expr::pi(
                    BinderInfo::Implicit,
                    Expr::bvar(0),
                    Expr::pi(
                        BinderInfo::Implicit,
                        Expr::bvar(1),
                        Expr::pi(
                            BinderInfo::Implicit,
                            Expr::bvar(2),
                            Expr::pi(
                                BinderInfo::Default,
                                eq_at(
                                    u_lvl.clone(),
                                    Expr::bvar(3),
                                    Expr::bvar(2),
                                    Expr::bvar(1),
                                ),
                                Expr::pi(
                                    BinderInfo::Default,
                                    eq_at(
                                        u_lvl.clone(),
                                        Expr::bvar(4),
                                        Expr::bvar(2),
                                        Expr::bvar(1),
                                    ),
                                    eq_at(u_lvl, Expr::bvar(5), Expr::bvar(4), Expr::bvar(2)),
                                ),
                            ),
                        ),
                    ),
                ),
            ),
        })?;

        Ok(())
    }
}
