//! Type inference and checking for MPPL.
//!
//! Two interleaved passes over the syntax tree, driven by the resolver's
//! maps: declarations are typed on entry (variables, parameters, and the
//! procedure types assembled from them), expressions on exit in post-order.
//! Every violated operator rule raises one report; the walk continues so a
//! single run surfaces as many errors as possible.

mod check;
pub mod ty;

pub use ty::Ty;

use mppl_common::span::Span;
use mppl_parser::Parse;
use mppl_report::Report;
use mppl_resolver::{DefId, Resolution};
use rustc_hash::FxHashMap;

/// The checker's output: types for definitions and for every expression
/// element the walk could type. Each entry is assigned exactly once.
#[derive(Debug, Default)]
pub struct Inference {
    def_types: FxHashMap<DefId, Ty>,
    expr_types: FxHashMap<Span, Ty>,
}

impl Inference {
    pub fn def_type(&self, id: DefId) -> Option<&Ty> {
        self.def_types.get(&id)
    }

    /// Type of the expression node or literal token at `span`.
    pub fn expr_type(&self, span: Span) -> Option<&Ty> {
        self.expr_types.get(&span)
    }

    fn record_def_type(&mut self, id: DefId, ty: Ty) {
        let previous = self.def_types.insert(id, ty);
        debug_assert!(previous.is_none(), "definition typed twice");
    }

    fn record_expr_type(&mut self, span: Span, ty: Ty) {
        let previous = self.expr_types.insert(span, ty);
        debug_assert!(previous.is_none(), "expression at {span:?} typed twice");
    }
}

/// Checking outcome. Per the propagation policy, callers must not use the
/// inference when `errors` is non-empty.
#[derive(Debug)]
pub struct CheckResult {
    pub inference: Inference,
    pub errors: Vec<Report>,
}

impl CheckResult {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Type-check a resolved program.
pub fn check(parse: &Parse, resolution: &Resolution) -> CheckResult {
    check::run(parse, resolution)
}
