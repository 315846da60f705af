//! App builder
//!
//! Elaborates a fully-applied, type-correct application of a declared
//! constant from its explicit arguments, inferring implicit arguments
//! and universe levels by first-order matching of the constant's
//! binder telescope against the inferred types of the explicit
//! arguments.
//!
//! Failure is a `Result`, never a panic: callers pattern-match and
//! convert errors to ordinary action failure.

use ember_kernel::{Environment, Expr, FVarId, Level, LocalTypes, Name};
use ember_kernel::{BinderInfo, KernelError, LevelVec, TypeInferer};
use hashbrown::HashMap;

/// Base of the fvar id range reserved for implicit-argument holes.
/// Hypothesis fvars are allocated from 0 upward and never reach it.
const HOLE_BASE: u64 = 1 << 63;

fn is_hole(id: FVarId) -> bool {
    id.0 >= HOLE_BASE
}

fn is_level_hole(name: &Name) -> bool {
    name.components()
        .first()
        .is_some_and(|c| c.starts_with('?'))
}

/// Errors from application elaboration
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppBuilderError {
    #[error("unknown constant: {0}")]
    UnknownConstant(Name),
    #[error("too many arguments for {0}")]
    TooManyArgs(Name),
    #[error("argument type mismatch while applying {name}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        name: Name,
        expected: Expr,
        actual: Expr,
    },
    #[error("cannot infer implicit arguments of {0}")]
    CannotInfer(Name),
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Elaborates constant applications against an environment and the
/// current hypothesis context.
pub struct AppBuilder<'a> {
    env: &'a Environment,
    locals: &'a LocalTypes,
}

impl<'a> AppBuilder<'a> {
    pub fn new(env: &'a Environment, locals: &'a LocalTypes) -> Self {
        AppBuilder { env, locals }
    }

    /// Build `name arg₀ … argₙ` with implicit binders and universe
    /// levels filled in.
    pub fn mk_app(
        &self,
        name: impl Into<Name>,
        explicit_args: &[Expr],
    ) -> Result<Expr, AppBuilderError> {
        let name = name.into();
        let decl = self
            .env
            .get_const(&name)
            .ok_or_else(|| AppBuilderError::UnknownConstant(name.clone()))?;

        // Replace the declaration's level parameters with hole params
        let level_holes: Vec<Name> = (0..decl.level_params().len())
            .map(|i| Name::from_string(&format!("?u{i}")))
            .collect();
        let subst: Vec<(Name, Level)> = decl
            .level_params()
            .iter()
            .cloned()
            .zip(level_holes.iter().cloned().map(Level::Param))
            .collect();

        let tc = TypeInferer::with_locals(self.env, self.locals.clone());
        let mut ty = decl.type_().instantiate_level_params(&subst);
        let mut telescope: Vec<Expr> = Vec::new();
        let mut hole_count: u64 = 0;
        let mut assign: HashMap<FVarId, Expr> = HashMap::new();
        let mut level_assign: HashMap<Name, Level> = HashMap::new();

        let mut rest = explicit_args.iter();
        let mut next = rest.next();
        while let Some(arg) = next {
            let Expr::Pi(bi, domain, codomain) = tc.whnf(&ty) else {
                return Err(AppBuilderError::TooManyArgs(name));
            };
            match bi {
                BinderInfo::Implicit => {
                    let hole = Expr::fvar(FVarId(HOLE_BASE + hole_count));
                    hole_count += 1;
                    telescope.push(hole.clone());
                    ty = codomain.instantiate(&hole);
                }
                BinderInfo::Default => {
                    let arg_ty = tc.whnf(&tc.infer_type(arg)?);
                    if !self.match_expr(&tc, &domain, &arg_ty, &mut assign, &mut level_assign) {
                        return Err(AppBuilderError::TypeMismatch {
                            name,
                            expected: (*domain).clone(),
                            actual: arg_ty,
                        });
                    }
                    telescope.push(arg.clone());
                    ty = codomain.instantiate(arg);
                    next = rest.next();
                }
            }
        }

        // Zonk the telescope: every hole the application mentions must
        // have been solved by now.
        let levels: LevelVec = level_holes
            .iter()
            .map(|h| {
                level_assign
                    .get(h)
                    .cloned()
                    .ok_or_else(|| AppBuilderError::CannotInfer(name.clone()))
            })
            .collect::<Result<_, _>>()?;
        let args: Vec<Expr> = telescope
            .iter()
            .map(|a| self.zonk(a, &assign, &name))
            .collect::<Result<_, _>>()?;

        Ok(Expr::apps(Expr::const_(name, levels), args))
    }

    /// First-order matching of a domain pattern (which may contain
    /// hole fvars and hole level params) against an actual type.
    fn match_expr(
        &self,
        tc: &TypeInferer<'_>,
        pattern: &Expr,
        actual: &Expr,
        assign: &mut HashMap<FVarId, Expr>,
        level_assign: &mut HashMap<Name, Level>,
    ) -> bool {
        if let Expr::FVar(id) = pattern {
            if is_hole(*id) {
                return match assign.get(id) {
                    Some(prev) => tc.is_def_eq(prev, actual),
                    None => {
                        assign.insert(*id, actual.clone());
                        true
                    }
                };
            }
        }
        if !has_holes(pattern) {
            return tc.is_def_eq(pattern, actual);
        }
        match (pattern, &tc.whnf(actual)) {
            (Expr::App(f1, a1), Expr::App(f2, a2)) => {
                self.match_expr(tc, f1, f2, assign, level_assign)
                    && self.match_expr(tc, a1, a2, assign, level_assign)
            }
            (Expr::Sort(l1), Expr::Sort(l2)) => match_level(l1, l2, level_assign),
            (Expr::Const(n1, l1), Expr::Const(n2, l2)) => {
                n1 == n2
                    && l1.len() == l2.len()
                    && l1
                        .iter()
                        .zip(l2.iter())
                        .all(|(a, b)| match_level(a, b, level_assign))
            }
            (Expr::Pi(_, t1, b1), Expr::Pi(_, t2, b2))
            | (Expr::Lam(_, t1, b1), Expr::Lam(_, t2, b2)) => {
                self.match_expr(tc, t1, t2, assign, level_assign)
                    && self.match_expr(tc, b1, b2, assign, level_assign)
            }
            (p, a) => p == a,
        }
    }

    /// Replace solved holes; unsolved holes are an inference failure.
    fn zonk(
        &self,
        e: &Expr,
        assign: &HashMap<FVarId, Expr>,
        name: &Name,
    ) -> Result<Expr, AppBuilderError> {
        match e {
            Expr::FVar(id) if is_hole(*id) => assign
                .get(id)
                .cloned()
                .ok_or_else(|| AppBuilderError::CannotInfer(name.clone())),
            Expr::BVar(_) | Expr::FVar(_) | Expr::Sort(_) | Expr::Const(_, _) => Ok(e.clone()),
            Expr::App(f, a) => Ok(Expr::app(
                self.zonk(f, assign, name)?,
                self.zonk(a, assign, name)?,
            )),
            Expr::Lam(bi, ty, body) => Ok(Expr::lam(
                *bi,
                self.zonk(ty, assign, name)?,
                self.zonk(body, assign, name)?,
            )),
            Expr::Pi(bi, ty, body) => Ok(Expr::pi(
                *bi,
                self.zonk(ty, assign, name)?,
                self.zonk(body, assign, name)?,
            )),
        }
    }
}

fn has_holes(e: &Expr) -> bool {
    match e {
        Expr::FVar(id) => is_hole(*id),
        Expr::BVar(_) => false,
        Expr::Sort(l) => level_has_holes(l),
        Expr::Const(_, levels) => levels.iter().any(level_has_holes),
        Expr::App(f, a) => has_holes(f) || has_holes(a),
        Expr::Lam(_, ty, body) | Expr::Pi(_, ty, body) => has_holes(ty) || has_holes(body),
    }
}

fn level_has_holes(l: &Level) -> bool {
    match l {
        Level::Zero => false,
        Level::Succ(inner) => level_has_holes(inner),
        Level::Max(a, b) => level_has_holes(a) || level_has_holes(b),
        Level::Param(n) => is_level_hole(n),
    }
}

fn match_level(pattern: &Level, actual: &Level, assign: &mut HashMap<Name, Level>) -> bool {
    match (pattern, actual) {
        (Level::Param(n), _) if is_level_hole(n) => match assign.get(n) {
            Some(prev) => prev == actual,
            None => {
                assign.insert(n.clone(), actual.clone());
                true
            }
        },
        (Level::Zero, Level::Zero) => true,
        (Level::Succ(a), Level::Succ(b)) => match_level(a, b, assign),
        (Level::Max(a1, b1), Level::Max(a2, b2)) => {
            match_level(a1, a2, assign) && match_level(b1, b2, assign)
        }
        (Level::Param(a), Level::Param(b)) => a == b,
        _ => false,
    }
}
