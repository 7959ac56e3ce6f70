//! Name resolution for MPPL.
//!
//! One pre-order/post-order walk over the syntax tree with a stack of
//! scopes. Binders (program, procedure, variable, parameter) create
//! definitions; uses (variable references and call statements) record a
//! reference to the nearest visible definition. All names share a single
//! namespace, so a procedure may conflict with a variable.
//!
//! Errors never abort the walk; the phase reports every problem it can
//! find in one run.

mod def;

pub use def::{Def, DefId, DefKind};

use mppl_common::span::Span;
use mppl_parser::ast::decl::{FmlParamSec, ProcDecl, Program, VarDecl};
use mppl_parser::ast::expr::{EntireVar, IndexedVar};
use mppl_parser::ast::stmt::CallStmt;
use mppl_parser::ast::{token_span, trimmed_span, AstNode};
use mppl_parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken};
use mppl_report::Report;
use rustc_hash::FxHashMap;

/// The resolver's output: the definition arena plus the two associations
/// from name-token spans to definitions (one at binders, one at uses).
#[derive(Debug, Default)]
pub struct Resolution {
    defs: Vec<Def>,
    def_at: FxHashMap<Span, DefId>,
    ref_at: FxHashMap<Span, DefId>,
}

impl Resolution {
    pub fn def(&self, id: DefId) -> &Def {
        &self.defs[id.0 as usize]
    }

    /// The definition created at this binding name token, if any.
    pub fn def_at(&self, span: Span) -> Option<DefId> {
        self.def_at.get(&span).copied()
    }

    /// The definition referenced from this use name token, if any.
    pub fn ref_at(&self, span: Span) -> Option<DefId> {
        self.ref_at.get(&span).copied()
    }

    pub fn defs(&self) -> impl Iterator<Item = (DefId, &Def)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(index, def)| (DefId(index as u32), def))
    }
}

/// Resolution outcome: the maps plus any errors. Per the propagation
/// policy, callers must not run later phases when `errors` is non-empty.
#[derive(Debug)]
pub struct ResolveResult {
    pub resolution: Resolution,
    pub errors: Vec<Report>,
}

impl ResolveResult {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve every name in a parsed program.
pub fn resolve(parse: &Parse) -> ResolveResult {
    let mut resolver = Resolver {
        scopes: Vec::new(),
        resolution: Resolution::default(),
        errors: Vec::new(),
    };
    resolver.visit(&parse.syntax());
    ResolveResult {
        resolution: resolver.resolution,
        errors: resolver.errors,
    }
}

struct Resolver {
    /// Innermost scope last. Each scope maps a name to its definition.
    scopes: Vec<FxHashMap<String, DefId>>,
    resolution: Resolution,
    errors: Vec<Report>,
}

impl Resolver {
    fn visit(&mut self, node: &SyntaxNode) {
        if self.enter(node) {
            for child in node.children() {
                self.visit(&child);
            }
        }
        self.exit(node);
    }

    /// Returns whether to descend into the node's children.
    fn enter(&mut self, node: &SyntaxNode) -> bool {
        match node.kind() {
            SyntaxKind::PROGRAM => {
                let program = Program::cast(node.clone()).expect("kind checked");
                if let Some(name) = program.name() {
                    // Created outside any scope: the program name is not
                    // referenceable from the body.
                    self.create_def(DefKind::Program, node, &name);
                }
                self.scopes.push(FxHashMap::default());
                true
            }

            SyntaxKind::PROC_DECL => {
                let decl = ProcDecl::cast(node.clone()).expect("kind checked");
                if let Some(name) = decl.name() {
                    self.create_def(DefKind::Procedure, node, &name);
                }
                self.scopes.push(FxHashMap::default());
                true
            }

            SyntaxKind::VAR_DECL => {
                let decl = VarDecl::cast(node.clone()).expect("kind checked");
                let names: Vec<SyntaxToken> = decl.names().collect();
                for name in names {
                    self.create_def(DefKind::Variable, node, &name);
                }
                false
            }

            SyntaxKind::FML_PARAM_SEC => {
                let sec = FmlParamSec::cast(node.clone()).expect("kind checked");
                let names: Vec<SyntaxToken> = sec.names().collect();
                for name in names {
                    self.create_def(DefKind::Parameter, node, &name);
                }
                false
            }

            SyntaxKind::ENTIRE_VAR => {
                let var = EntireVar::cast(node.clone()).expect("kind checked");
                if let Some(name) = var.name() {
                    self.record_ref(&name, false);
                }
                true
            }

            SyntaxKind::INDEXED_VAR => {
                let var = IndexedVar::cast(node.clone()).expect("kind checked");
                if let Some(name) = var.name() {
                    self.record_ref(&name, false);
                }
                // Descend for the index expression.
                true
            }

            SyntaxKind::CALL_STMT => {
                let stmt = CallStmt::cast(node.clone()).expect("kind checked");
                if let Some(name) = stmt.name() {
                    if let Some(id) = self.record_ref(&name, true) {
                        self.check_recursion(node, id, &name);
                    }
                }
                // Descend for the actual parameter expressions.
                true
            }

            _ => true,
        }
    }

    fn exit(&mut self, node: &SyntaxNode) {
        if matches!(node.kind(), SyntaxKind::PROGRAM | SyntaxKind::PROC_DECL) {
            self.scopes.pop();
        }
    }

    fn create_def(&mut self, kind: DefKind, item: &SyntaxNode, name: &SyntaxToken) {
        let name_span = token_span(name);
        let text = name.text();

        if let Some(scope) = self.scopes.last() {
            if let Some(&existing) = scope.get(text) {
                let previous = self.resolution.def(existing).clone();
                self.error_def_conflict(&previous, name_span);
                return;
            }
        }

        let id = DefId(self.resolution.defs.len() as u32);
        self.resolution.defs.push(Def {
            kind,
            name: text.to_string(),
            name_span,
            decl_span: trimmed_span(item),
        });
        self.resolution.def_at.insert(name_span, id);
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(text.to_string(), id);
        }
    }

    fn lookup(&self, name: &str) -> Option<DefId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    fn record_ref(&mut self, name: &SyntaxToken, is_proc: bool) -> Option<DefId> {
        let span = token_span(name);
        match self.lookup(name.text()) {
            Some(id) => {
                self.resolution.ref_at.insert(span, id);
                Some(id)
            }
            None => {
                self.error_res_failure(name.text(), span, is_proc);
                None
            }
        }
    }

    /// A call statement whose target's declaration encloses the call site
    /// is a (prohibited) recursive call.
    fn check_recursion(&mut self, call: &SyntaxNode, target: DefId, name: &SyntaxToken) {
        let def = self.resolution.def(target);
        if def.kind != DefKind::Procedure {
            return;
        }
        let body_span = def.decl_span;
        let proc_name = def.name.clone();
        let mut ancestor = call.parent();
        while let Some(node) = ancestor {
            if node.kind() == SyntaxKind::PROC_DECL && trimmed_span(&node) == body_span {
                let span = token_span(name);
                self.errors.push(
                    Report::error(span.start, "recursion is prohibited").with_annotation(
                        span.start,
                        span.end,
                        format!("recursive call to `{proc_name}`"),
                    ),
                );
                return;
            }
            ancestor = node.parent();
        }
    }

    fn error_def_conflict(&mut self, previous: &Def, conflict: Span) {
        let name = &previous.name;
        let report = Report::error(conflict.start, format!("conflicting definition of `{name}`"))
            .with_annotation(
                previous.name_span.start,
                previous.name_span.end,
                format!("previous definition of `{name}`"),
            )
            .with_annotation(
                conflict.start,
                conflict.end,
                format!("redefinition of `{name}`"),
            );
        self.errors.push(report);
    }

    fn error_res_failure(&mut self, name: &str, span: Span, is_proc: bool) {
        let annotation = if is_proc {
            format!("use of undeclared procedure `{name}`")
        } else {
            format!("use of undeclared variable or parameter `{name}`")
        };
        let report = Report::error(span.start, format!("failed to resolve `{name}`"))
            .with_annotation(span.start, span.end, annotation);
        self.errors.push(report);
    }
}
