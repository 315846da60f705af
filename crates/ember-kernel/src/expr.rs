//! Expression representation
//!
//! The core expression type used throughout ember.
//! Uses de Bruijn indices for bound variables. Expressions are
//! immutable and structurally shared via `Arc`; equality is
//! structural.

use crate::level::Level;
use crate::name::Name;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Type alias for universe level lists in `Expr::Const`.
///
/// Most constants carry 0-2 universe levels, so `SmallVec` avoids a
/// heap allocation for the common case.
pub type LevelVec = SmallVec<[Level; 2]>;

/// Binder information (how a variable is bound)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinderInfo {
    /// Regular explicit binding
    Default,
    /// Implicit binding (inferred from later arguments) `{x : T}`
    Implicit,
}

/// Unique identifier for free variables
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FVarId(pub u64);

/// Core expression type
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// Bound variable (de Bruijn index, 0 = innermost)
    BVar(u32),
    /// Free variable
    FVar(FVarId),
    /// Sort (`Type u` or `Prop`)
    Sort(Level),
    /// Constant with universe level instantiation
    Const(Name, LevelVec),
    /// Function application
    App(Arc<Expr>, Arc<Expr>),
    /// Lambda abstraction: `λ (x : A), body`
    Lam(BinderInfo, Arc<Expr>, Arc<Expr>),
    /// Pi/forall type: `(x : A) → B`
    Pi(BinderInfo, Arc<Expr>, Arc<Expr>),
}

impl Expr {
    pub fn bvar(idx: u32) -> Self {
        Expr::BVar(idx)
    }

    pub fn fvar(id: FVarId) -> Self {
        Expr::FVar(id)
    }

    pub fn sort(level: Level) -> Self {
        Expr::Sort(level)
    }

    /// `Prop` (i.e. `Sort 0`)
    pub fn prop() -> Self {
        Expr::Sort(Level::zero())
    }

    /// `Type` (i.e. `Sort 1`)
    pub fn type_() -> Self {
        Expr::Sort(Level::one())
    }

    pub fn const_(name: impl Into<Name>, levels: impl Into<LevelVec>) -> Self {
        Expr::Const(name.into(), levels.into())
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App(Arc::new(func), Arc::new(arg))
    }

    /// Apply a function to several arguments, left-associated
    pub fn apps(func: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        args.into_iter().fold(func, Expr::app)
    }

    pub fn lam(bi: BinderInfo, ty: Expr, body: Expr) -> Self {
        Expr::Lam(bi, Arc::new(ty), Arc::new(body))
    }

    pub fn pi(bi: BinderInfo, ty: Expr, body: Expr) -> Self {
        Expr::Pi(bi, Arc::new(ty), Arc::new(body))
    }

    /// Non-dependent function type `from → to`
    pub fn arrow(from: Expr, to: Expr) -> Self {
        Expr::pi(BinderInfo::Default, from, to.lift(1))
    }

    /// Whether this expression is a sort
    pub fn is_sort(&self) -> bool {
        matches!(self, Expr::Sort(_))
    }

    /// Whether this expression is the sort `Prop` itself
    pub fn is_prop(&self) -> bool {
        matches!(self, Expr::Sort(l) if l.is_zero())
    }

    /// The head of an application spine (`f` in `f a b c`)
    pub fn get_app_fn(&self) -> &Expr {
        let mut e = self;
        while let Expr::App(f, _) = e {
            e = f;
        }
        e
    }

    /// The arguments of an application spine, outermost function first
    pub fn get_app_args(&self) -> Vec<&Expr> {
        let mut args = Vec::new();
        let mut e = self;
        while let Expr::App(f, a) = e {
            args.push(a.as_ref());
            e = f;
        }
        args.reverse();
        args
    }

    /// Instantiate bound variable 0 with `val` (used when crossing a binder)
    pub fn instantiate(&self, val: &Expr) -> Expr {
        self.instantiate_at(val, 0)
    }

    fn instantiate_at(&self, val: &Expr, depth: u32) -> Expr {
        match self {
            Expr::BVar(idx) => {
                if *idx == depth {
                    val.lift(depth)
                } else if *idx > depth {
                    // A binder was removed above this variable
                    Expr::BVar(idx - 1)
                } else {
                    self.clone()
                }
            }
            Expr::FVar(_) | Expr::Sort(_) | Expr::Const(_, _) => self.clone(),
            Expr::App(f, a) => Expr::app(f.instantiate_at(val, depth), a.instantiate_at(val, depth)),
            Expr::Lam(bi, ty, body) => Expr::lam(
                *bi,
                ty.instantiate_at(val, depth),
                body.instantiate_at(val, depth + 1),
            ),
            Expr::Pi(bi, ty, body) => Expr::pi(
                *bi,
                ty.instantiate_at(val, depth),
                body.instantiate_at(val, depth + 1),
            ),
        }
    }

    /// Lift loose bound variables by `amount`
    pub fn lift(&self, amount: u32) -> Expr {
        if amount == 0 {
            return self.clone();
        }
        self.lift_at(0, amount)
    }

    fn lift_at(&self, start: u32, amount: u32) -> Expr {
        match self {
            Expr::BVar(idx) => {
                if *idx >= start {
                    Expr::BVar(idx + amount)
                } else {
                    self.clone()
                }
            }
            Expr::FVar(_) | Expr::Sort(_) | Expr::Const(_, _) => self.clone(),
            Expr::App(f, a) => Expr::app(f.lift_at(start, amount), a.lift_at(start, amount)),
            Expr::Lam(bi, ty, body) => Expr::lam(
                *bi,
                ty.lift_at(start, amount),
                body.lift_at(start + 1, amount),
            ),
            Expr::Pi(bi, ty, body) => Expr::pi(
                *bi,
                ty.lift_at(start, amount),
                body.lift_at(start + 1, amount),
            ),
        }
    }

    /// Whether the expression contains bound variables not bound within it
    pub fn has_loose_bvars(&self) -> bool {
        self.has_loose_bvars_at(0)
    }

    fn has_loose_bvars_at(&self, depth: u32) -> bool {
        match self {
            Expr::BVar(idx) => *idx >= depth,
            Expr::FVar(_) | Expr::Sort(_) | Expr::Const(_, _) => false,
            Expr::App(f, a) => f.has_loose_bvars_at(depth) || a.has_loose_bvars_at(depth),
            Expr::Lam(_, ty, body) | Expr::Pi(_, ty, body) => {
                ty.has_loose_bvars_at(depth) || body.has_loose_bvars_at(depth + 1)
            }
        }
    }

    /// Replace free variable `id` with bound variable 0 (for re-binding)
    pub fn abstract_fvar(&self, id: FVarId) -> Expr {
        self.abstract_fvar_at(id, 0)
    }

    fn abstract_fvar_at(&self, id: FVarId, depth: u32) -> Expr {
        match self {
            Expr::BVar(_) | Expr::Sort(_) | Expr::Const(_, _) => self.clone(),
            Expr::FVar(fid) => {
                if *fid == id {
                    Expr::BVar(depth)
                } else {
                    self.clone()
                }
            }
            Expr::App(f, a) => {
                Expr::app(f.abstract_fvar_at(id, depth), a.abstract_fvar_at(id, depth))
            }
            Expr::Lam(bi, ty, body) => Expr::lam(
                *bi,
                ty.abstract_fvar_at(id, depth),
                body.abstract_fvar_at(id, depth + 1),
            ),
            Expr::Pi(bi, ty, body) => Expr::pi(
                *bi,
                ty.abstract_fvar_at(id, depth),
                body.abstract_fvar_at(id, depth + 1),
            ),
        }
    }

    /// Substitute level parameters throughout the expression
    pub fn instantiate_level_params(&self, subst: &[(Name, Level)]) -> Expr {
        if subst.is_empty() {
            return self.clone();
        }
        match self {
            Expr::BVar(_) | Expr::FVar(_) => self.clone(),
            Expr::Sort(l) => Expr::Sort(l.instantiate_params(subst)),
            Expr::Const(n, levels) => Expr::Const(
                n.clone(),
                levels.iter().map(|l| l.instantiate_params(subst)).collect(),
            ),
            Expr::App(f, a) => Expr::app(
                f.instantiate_level_params(subst),
                a.instantiate_level_params(subst),
            ),
            Expr::Lam(bi, ty, body) => Expr::lam(
                *bi,
                ty.instantiate_level_params(subst),
                body.instantiate_level_params(subst),
            ),
            Expr::Pi(bi, ty, body) => Expr::pi(
                *bi,
                ty.instantiate_level_params(subst),
                body.instantiate_level_params(subst),
            ),
        }
    }
}
