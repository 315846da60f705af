//! Type inference
//!
//! A small checker over the core fragment: enough to type application
//! spines of declared constants, decide proposition-hood of a target,
//! and verify reconstructed proof terms in tests. Reduction is beta
//! plus delta-unfolding of `Definition`s.

use crate::env::{Environment, KernelError};
use crate::expr::{Expr, FVarId};
use crate::level::Level;
use hashbrown::HashMap;

/// Types of the free variables in scope (the hypothesis context seen
/// by the kernel).
#[derive(Clone, Debug, Default)]
pub struct LocalTypes {
    types: HashMap<FVarId, Expr>,
}

impl LocalTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FVarId, ty: Expr) {
        self.types.insert(id, ty);
    }

    pub fn get(&self, id: FVarId) -> Option<&Expr> {
        self.types.get(&id)
    }

    /// An fvar id not used by any local (for inference under binders)
    fn fresh_id(&self) -> FVarId {
        FVarId(self.types.keys().map(|k| k.0 + 1).max().unwrap_or(0))
    }
}

/// Infers types against an environment and a local context.
pub struct TypeInferer<'a> {
    env: &'a Environment,
    locals: LocalTypes,
}

impl<'a> TypeInferer<'a> {
    pub fn new(env: &'a Environment) -> Self {
        TypeInferer {
            env,
            locals: LocalTypes::new(),
        }
    }

    pub fn with_locals(env: &'a Environment, locals: LocalTypes) -> Self {
        TypeInferer { env, locals }
    }

    /// Weak-head normal form: beta reduction at the head plus
    /// delta-unfolding of definitions.
    pub fn whnf(&self, e: &Expr) -> Expr {
        let mut cur = e.clone();
        loop {
            let next = match &cur {
                Expr::App(f, a) => {
                    let f_whnf = self.whnf(f);
                    if let Expr::Lam(_, _, body) = f_whnf {
                        Some(body.instantiate(a))
                    } else {
                        // Head is not a redex; try unfolding a definition head
                        self.unfold_head(&cur)
                    }
                }
                Expr::Const(_, _) => self.unfold_head(&cur),
                _ => None,
            };
            match next {
                Some(n) => cur = n,
                None => return cur,
            }
        }
    }

    fn unfold_head(&self, e: &Expr) -> Option<Expr> {
        if let Expr::Const(name, levels) = e.get_app_fn() {
            let decl = self.env.get_const(name)?;
            let value = decl.value()?;
            let subst: Vec<_> = decl
                .level_params()
                .iter()
                .cloned()
                .zip(levels.iter().cloned())
                .collect();
            let mut unfolded = value.instantiate_level_params(&subst);
            for arg in e.get_app_args() {
                unfolded = Expr::app(unfolded, arg.clone());
            }
            Some(unfolded)
        } else {
            None
        }
    }

    /// Definitional equality: structural comparison after whnf
    pub fn is_def_eq(&self, a: &Expr, b: &Expr) -> bool {
        let a = self.whnf(a);
        let b = self.whnf(b);
        match (&a, &b) {
            (Expr::App(f1, a1), Expr::App(f2, a2)) => {
                self.is_def_eq(f1, f2) && self.is_def_eq(a1, a2)
            }
            (Expr::Lam(_, t1, b1), Expr::Lam(_, t2, b2))
            | (Expr::Pi(_, t1, b1), Expr::Pi(_, t2, b2)) => {
                self.is_def_eq(t1, t2) && self.is_def_eq(b1, b2)
            }
            _ => a == b,
        }
    }

    /// Infer the type of an expression
    pub fn infer_type(&self, e: &Expr) -> Result<Expr, KernelError> {
        match e {
            Expr::BVar(_) => Err(KernelError::LooseBVar),
            Expr::FVar(id) => self
                .locals
                .get(*id)
                .cloned()
                .ok_or(KernelError::UnknownFVar(*id)),
            Expr::Sort(l) => Ok(Expr::sort(Level::succ(l.clone()))),
            Expr::Const(name, levels) => {
                let decl = self
                    .env
                    .get_const(name)
                    .ok_or_else(|| KernelError::UnknownConstant(name.clone()))?;
                if decl.level_params().len() != levels.len() {
                    return Err(KernelError::LevelArity {
                        name: name.clone(),
                        expected: decl.level_params().len(),
                        actual: levels.len(),
                    });
                }
                let subst: Vec<_> = decl
                    .level_params()
                    .iter()
                    .cloned()
                    .zip(levels.iter().cloned())
                    .collect();
                Ok(decl.type_().instantiate_level_params(&subst))
            }
            Expr::App(f, a) => {
                let f_ty = self.whnf(&self.infer_type(f)?);
                match f_ty {
                    Expr::Pi(_, domain, codomain) => {
                        let a_ty = self.infer_type(a)?;
                        if !self.is_def_eq(&domain, &a_ty) {
                            return Err(KernelError::TypeMismatch {
                                expected: (*domain).clone(),
                                actual: a_ty,
                            });
                        }
                        Ok(codomain.instantiate(a))
                    }
                    _ => Err(KernelError::NotAFunction((**f).clone())),
                }
            }
            Expr::Lam(bi, ty, body) => {
                let fvar = self.locals.fresh_id();
                let mut inner = TypeInferer::with_locals(self.env, self.locals.clone());
                inner.locals.insert(fvar, (**ty).clone());
                let body_ty = inner.infer_type(&body.instantiate(&Expr::fvar(fvar)))?;
                Ok(Expr::Pi(
                    *bi,
                    ty.clone(),
                    body_ty.abstract_fvar(fvar).into(),
                ))
            }
            Expr::Pi(_, ty, body) => {
                let ty_sort = self.infer_sort(ty)?;
                let fvar = self.locals.fresh_id();
                let mut inner = TypeInferer::with_locals(self.env, self.locals.clone());
                inner.locals.insert(fvar, (**ty).clone());
                let body_sort = inner.infer_sort(&body.instantiate(&Expr::fvar(fvar)))?;
                // Impredicative Prop: a Pi into Prop is itself Prop
                if body_sort.is_zero() {
                    Ok(Expr::prop())
                } else {
                    Ok(Expr::Sort(Level::Max(ty_sort.into(), body_sort.into())))
                }
            }
        }
    }

    fn infer_sort(&self, e: &Expr) -> Result<Level, KernelError> {
        match self.whnf(&self.infer_type(e)?) {
            Expr::Sort(l) => Ok(l),
            other => Err(KernelError::TypeMismatch {
                expected: Expr::type_(),
                actual: other,
            }),
        }
    }

    /// Whether `e` is proposition-valued (its type is `Prop`).
    ///
    /// Inference failure means we cannot certify proposition-hood, so
    /// the answer is `false`; callers then fall back to `Eq`.
    pub fn is_proposition(&self, e: &Expr) -> bool {
        match self.infer_type(e) {
            Ok(ty) => self.whnf(&ty).is_prop(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Declaration;
    use crate::expr::LevelVec;
    use crate::name::Name;

    fn c(name: &str) -> Expr {
        Expr::const_(name, LevelVec::new())
    }

    fn logic_env() -> Environment {
        let mut env = Environment::new();
        env.init_logic().unwrap();
        env.add_axiom("P", Expr::prop()).unwrap();
        env.add_axiom("Q", Expr::prop()).unwrap();
        env
    }

    #[test]
    fn test_infer_const_and_app() {
        let env = logic_env();
        let tc = TypeInferer::new(&env);
        let and_pq = Expr::apps(c("And"), [c("P"), c("Q")]);
        assert_eq!(tc.infer_type(&and_pq).unwrap(), Expr::prop());
    }

    #[test]
    fn test_is_proposition() {
        let env = logic_env();
        let tc = TypeInferer::new(&env);
        assert!(tc.is_proposition(&c("P")));
        assert!(tc.is_proposition(&c("True")));
        // `Prop` itself is a sort, not a proposition
        assert!(!tc.is_proposition(&Expr::prop()));
    }

    #[test]
    fn test_app_domain_mismatch() {
        let env = logic_env();
        let tc = TypeInferer::new(&env);
        // And expects a Prop, feed it a Sort
        let bad = Expr::app(c("And"), Expr::prop());
        assert!(matches!(
            tc.infer_type(&bad),
            Err(KernelError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_whnf_unfolds_definition() {
        let mut env = logic_env();
        env.add_decl(Declaration::Definition {
            name: Name::from_string("myTrue"),
            level_params: vec![],
            type_: Expr::prop(),
            value: c("True"),
        })
        .unwrap();
        let tc = TypeInferer::new(&env);
        assert_eq!(tc.whnf(&c("myTrue")), c("True"));
        assert!(tc.is_def_eq(&c("myTrue"), &c("True")));
    }

    #[test]
    fn test_infer_eq_proposition() {
        let env = logic_env();
        let tc = TypeInferer::new(&env);
        // Eq.{1} Prop P Q : Prop
        let eq = Expr::apps(
            Expr::const_("Eq", vec![Level::one()]),
            [Expr::prop(), c("P"), c("Q")],
        );
        assert_eq!(tc.whnf(&tc.infer_type(&eq).unwrap()), Expr::prop());
    }

    #[test]
    fn test_fvar_types_come_from_locals() {
        let env = logic_env();
        let mut locals = LocalTypes::new();
        locals.insert(FVarId(0), c("P"));
        let tc = TypeInferer::with_locals(&env, locals);
        assert_eq!(tc.infer_type(&Expr::fvar(FVarId(0))).unwrap(), c("P"));
        assert!(matches!(
            tc.infer_type(&Expr::fvar(FVarId(9))),
            Err(KernelError::UnknownFVar(_))
        ));
    }
}
