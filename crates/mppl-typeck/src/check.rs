//! The checking walk: definition typing on entry, expression typing on
//! exit.

use mppl_parser::ast::decl::{ProcDecl, TypeSyntax, VarDecl};
use mppl_parser::ast::expr::{
    BinaryExpr, CastExpr, EntireVar, IndexedVar, NotExpr, ParenExpr, UnaryExpr,
};
use mppl_parser::ast::stmt::AssignStmt;
use mppl_parser::ast::{element_span, token_span, trimmed_span, AstNode};
use mppl_parser::{Parse, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use mppl_report::Report;
use mppl_resolver::Resolution;

use crate::{CheckResult, Inference, Ty};

pub(crate) fn run(parse: &Parse, resolution: &Resolution) -> CheckResult {
    let mut checker = Checker {
        resolution,
        inference: Inference::default(),
        errors: Vec::new(),
    };
    checker.visit(&parse.syntax());
    CheckResult {
        inference: checker.inference,
        errors: checker.errors,
    }
}

struct Checker<'a> {
    resolution: &'a Resolution,
    inference: Inference,
    errors: Vec<Report>,
}

impl Checker<'_> {
    fn visit(&mut self, node: &SyntaxNode) {
        if self.enter(node) {
            for child in node.children_with_tokens() {
                match child {
                    rowan::NodeOrToken::Node(child) => self.visit(&child),
                    rowan::NodeOrToken::Token(token) => self.visit_token(&token),
                }
            }
        }
        self.exit(node);
    }

    /// Returns whether to descend. Declarations are typed here and their
    /// insides (type syntax, name lists) need no expression checking.
    fn enter(&mut self, node: &SyntaxNode) -> bool {
        match node.kind() {
            SyntaxKind::PROC_DECL => {
                let decl = ProcDecl::cast(node.clone()).expect("kind checked");
                self.infer_proc(&decl);
                true
            }
            SyntaxKind::VAR_DECL => {
                let decl = VarDecl::cast(node.clone()).expect("kind checked");
                self.infer_var(&decl);
                false
            }
            SyntaxKind::FML_PARAM_SEC => false,
            _ => true,
        }
    }

    /// Literals carry their type on their own token.
    fn visit_token(&mut self, token: &SyntaxToken) {
        let ty = match token.kind() {
            SyntaxKind::NUMBER_LIT => Ty::Integer,
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => Ty::Boolean,
            SyntaxKind::STRING_LIT => {
                if string_content(token.text()).len() == 1 {
                    Ty::Char
                } else {
                    Ty::String
                }
            }
            _ => return,
        };
        self.inference.record_expr_type(token_span(token), ty);
    }

    fn exit(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::ASSIGN_STMT => {
                let stmt = AssignStmt::cast(node.clone()).expect("kind checked");
                self.check_assign(&stmt);
            }
            SyntaxKind::BINARY_EXPR => {
                let expr = BinaryExpr::cast(node.clone()).expect("kind checked");
                self.check_binary(&expr);
            }
            SyntaxKind::UNARY_EXPR => {
                let expr = UnaryExpr::cast(node.clone()).expect("kind checked");
                self.check_unary(&expr);
            }
            SyntaxKind::NOT_EXPR => {
                let expr = NotExpr::cast(node.clone()).expect("kind checked");
                self.check_not(&expr);
            }
            SyntaxKind::PAREN_EXPR => {
                let expr = ParenExpr::cast(node.clone()).expect("kind checked");
                self.check_paren(&expr);
            }
            SyntaxKind::CAST_EXPR => {
                let expr = CastExpr::cast(node.clone()).expect("kind checked");
                self.check_cast(&expr);
            }
            SyntaxKind::ENTIRE_VAR => {
                let var = EntireVar::cast(node.clone()).expect("kind checked");
                self.check_entire_var(&var);
            }
            SyntaxKind::INDEXED_VAR => {
                let var = IndexedVar::cast(node.clone()).expect("kind checked");
                self.check_indexed_var(&var);
            }
            _ => {}
        }
    }

    // ── Definition typing ──────────────────────────────────────────────

    fn infer_var(&mut self, decl: &VarDecl) {
        let Some(ty) = type_from_syntax(decl.ty()) else {
            return;
        };
        for name in decl.names() {
            if let Some(id) = self.resolution.def_at(token_span(&name)) {
                self.inference.record_def_type(id, ty.clone());
            }
        }
    }

    fn infer_proc(&mut self, decl: &ProcDecl) {
        let mut params = Vec::new();
        if let Some(list) = decl.param_list() {
            for sec in list.secs() {
                let Some(ty) = type_from_syntax(sec.ty()) else {
                    continue;
                };
                for name in sec.names() {
                    if let Some(id) = self.resolution.def_at(token_span(&name)) {
                        self.inference.record_def_type(id, ty.clone());
                    }
                    params.push(ty.clone());
                }
            }
        }
        if let Some(name) = decl.name() {
            if let Some(id) = self.resolution.def_at(token_span(&name)) {
                self.inference.record_def_type(id, Ty::Proc(params));
            }
        }
    }

    // ── Expression typing ──────────────────────────────────────────────

    fn expr_ty(&self, element: &SyntaxElement) -> Option<Ty> {
        self.inference.expr_type(element_span(element)).cloned()
    }

    fn ref_ty(&self, name: &SyntaxToken) -> Option<Ty> {
        let id = self.resolution.ref_at(token_span(name))?;
        self.inference.def_type(id).cloned()
    }

    fn check_assign(&mut self, stmt: &AssignStmt) {
        let (Some(lhs), Some(rhs)) = (stmt.lhs(), stmt.rhs()) else {
            return;
        };
        let (Some(lhs_ty), Some(rhs_ty)) = (self.expr_ty(&lhs), self.expr_ty(&rhs)) else {
            return;
        };

        if !lhs_ty.is_std() {
            let span = element_span(&lhs);
            self.errors.push(
                Report::error(
                    span.start,
                    format!("assignment operation cannot be applied to `{lhs_ty}`"),
                )
                .with_annotation(
                    span.start,
                    span.end,
                    "left operand of assignment statement should be a variable of standard type",
                ),
            );
        } else if lhs_ty != rhs_ty {
            let lhs_span = element_span(&lhs);
            let rhs_span = element_span(&rhs);
            let offset = trimmed_span(stmt.syntax()).start;
            self.errors.push(
                Report::error(offset, "mismatched types")
                    .with_annotation(lhs_span.start, lhs_span.end, format!("`{lhs_ty}`"))
                    .with_annotation(
                        rhs_span.start,
                        rhs_span.end,
                        format!("expected type `{lhs_ty}`, but found type `{rhs_ty}`"),
                    ),
            );
        }
    }

    fn check_binary(&mut self, expr: &BinaryExpr) {
        let (Some(op), Some(lhs), Some(rhs)) = (expr.op(), expr.lhs(), expr.rhs()) else {
            return;
        };
        let (Some(lhs_ty), Some(rhs_ty)) = (self.expr_ty(&lhs), self.expr_ty(&rhs)) else {
            return;
        };

        match op.kind() {
            SyntaxKind::EQUAL
            | SyntaxKind::NOTEQ
            | SyntaxKind::LESS
            | SyntaxKind::LESSEQ
            | SyntaxKind::GREATER
            | SyntaxKind::GREATEREQ => {
                let lhs_invalid = !lhs_ty.is_std();
                let rhs_invalid = !rhs_ty.is_std();
                if lhs_invalid || rhs_invalid {
                    self.error_binary_invalid_operand(
                        expr,
                        &op,
                        lhs_invalid,
                        &lhs,
                        &lhs_ty,
                        rhs_invalid,
                        &rhs,
                        &rhs_ty,
                        "`integer`, `char` or `boolean`",
                    );
                } else if lhs_ty != rhs_ty {
                    self.error_relational_mismatch(expr, &lhs, &lhs_ty, &rhs, &rhs_ty);
                } else {
                    self.inference
                        .record_expr_type(trimmed_span(expr.syntax()), Ty::Boolean);
                }
            }

            SyntaxKind::PLUS | SyntaxKind::MINUS | SyntaxKind::STAR | SyntaxKind::DIV_KW => {
                let lhs_invalid = lhs_ty != Ty::Integer;
                let rhs_invalid = rhs_ty != Ty::Integer;
                if lhs_invalid || rhs_invalid {
                    self.error_binary_invalid_operand(
                        expr,
                        &op,
                        lhs_invalid,
                        &lhs,
                        &lhs_ty,
                        rhs_invalid,
                        &rhs,
                        &rhs_ty,
                        "`integer`",
                    );
                } else {
                    self.inference
                        .record_expr_type(trimmed_span(expr.syntax()), Ty::Integer);
                }
            }

            SyntaxKind::AND_KW | SyntaxKind::OR_KW => {
                let lhs_invalid = lhs_ty != Ty::Boolean;
                let rhs_invalid = rhs_ty != Ty::Boolean;
                if lhs_invalid || rhs_invalid {
                    self.error_binary_invalid_operand(
                        expr,
                        &op,
                        lhs_invalid,
                        &lhs,
                        &lhs_ty,
                        rhs_invalid,
                        &rhs,
                        &rhs_ty,
                        "`boolean`",
                    );
                } else {
                    self.inference
                        .record_expr_type(trimmed_span(expr.syntax()), Ty::Boolean);
                }
            }

            _ => {}
        }
    }

    fn check_unary(&mut self, expr: &UnaryExpr) {
        let (Some(op), Some(operand)) = (expr.op(), expr.operand()) else {
            return;
        };
        let Some(operand_ty) = self.expr_ty(&operand) else {
            return;
        };

        if operand_ty != Ty::Integer {
            let op_span = token_span(&op);
            let operand_span = element_span(&operand);
            let offset = trimmed_span(expr.syntax()).start;
            self.errors.push(
                Report::error(
                    offset,
                    format!(
                        "unary operation `{}` cannot be applied to `{operand_ty}`",
                        op.text()
                    ),
                )
                .with_annotation(
                    op_span.start,
                    op_span.end,
                    format!("unary operation `{}` can be applied to `integer`", op.text()),
                )
                .with_annotation(operand_span.start, operand_span.end, format!("`{operand_ty}`")),
            );
        } else {
            self.inference
                .record_expr_type(trimmed_span(expr.syntax()), Ty::Integer);
        }
    }

    fn check_not(&mut self, expr: &NotExpr) {
        let Some(operand) = expr.operand() else {
            return;
        };
        let Some(operand_ty) = self.expr_ty(&operand) else {
            return;
        };

        if operand_ty != Ty::Boolean {
            let operand_span = element_span(&operand);
            let offset = trimmed_span(expr.syntax()).start;
            let mut report = Report::error(
                offset,
                format!("`not` operation cannot be applied to `{operand_ty}`"),
            );
            if let Some(not_token) = expr.not_token() {
                let span = token_span(&not_token);
                report = report.with_annotation(
                    span.start,
                    span.end,
                    "`not` operation can be applied to `boolean`",
                );
            }
            report = report.with_annotation(
                operand_span.start,
                operand_span.end,
                format!("`{operand_ty}`"),
            );
            self.errors.push(report);
        } else {
            self.inference
                .record_expr_type(trimmed_span(expr.syntax()), Ty::Boolean);
        }
    }

    fn check_paren(&mut self, expr: &ParenExpr) {
        let Some(inner) = expr.inner() else {
            return;
        };
        if let Some(ty) = self.expr_ty(&inner) {
            self.inference
                .record_expr_type(trimmed_span(expr.syntax()), ty);
        }
    }

    fn check_cast(&mut self, expr: &CastExpr) {
        let (Some(ty_token), Some(operand)) = (expr.ty(), expr.operand()) else {
            return;
        };
        let Some(operand_ty) = self.expr_ty(&operand) else {
            return;
        };

        if !operand_ty.is_std() {
            let span = element_span(&operand);
            let offset = trimmed_span(expr.syntax()).start;
            self.errors.push(
                Report::error(offset, "non-standard type cast").with_annotation(
                    span.start,
                    span.end,
                    "expression to be cast should be `integer`, `boolean` or `char`",
                ),
            );
        } else {
            let target = std_ty(ty_token.kind());
            self.inference
                .record_expr_type(trimmed_span(expr.syntax()), target);
        }
    }

    fn check_entire_var(&mut self, var: &EntireVar) {
        let Some(name) = var.name() else {
            return;
        };
        if let Some(ty) = self.ref_ty(&name) {
            self.inference
                .record_expr_type(trimmed_span(var.syntax()), ty);
        }
    }

    fn check_indexed_var(&mut self, var: &IndexedVar) {
        let (Some(name), Some(index)) = (var.name(), var.index()) else {
            return;
        };
        let Some(def_ty) = self.ref_ty(&name) else {
            return;
        };
        let Some(index_ty) = self.expr_ty(&index) else {
            return;
        };

        match def_ty {
            Ty::Array { elem, .. } => {
                if index_ty != Ty::Integer {
                    let span = element_span(&index);
                    self.errors.push(
                        Report::error(span.start, "array index should be an `integer`")
                            .with_annotation(span.start, span.end, format!("`{index_ty}`")),
                    );
                } else {
                    self.inference
                        .record_expr_type(trimmed_span(var.syntax()), *elem);
                }
            }
            _ => {
                let span = token_span(&name);
                self.errors.push(
                    Report::error(
                        span.start,
                        format!("variable of type `{def_ty}` cannot be indexed"),
                    )
                    .with_annotation(
                        span.start,
                        span.end,
                        "variable to be indexed should be an `array`",
                    ),
                );
            }
        }
    }

    // ── Error helpers ──────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn error_binary_invalid_operand(
        &mut self,
        expr: &BinaryExpr,
        op: &SyntaxToken,
        lhs_invalid: bool,
        lhs: &SyntaxElement,
        lhs_ty: &Ty,
        rhs_invalid: bool,
        rhs: &SyntaxElement,
        rhs_ty: &Ty,
        applicable: &str,
    ) {
        let op_text = op.text();
        let lhs_span = element_span(lhs);
        let rhs_span = element_span(rhs);
        let op_span = token_span(op);

        let report = if lhs_invalid && rhs_invalid {
            Report::error(
                trimmed_span(expr.syntax()).start,
                format!("binary operation `{op_text}` cannot be applied to `{lhs_ty}` and `{rhs_ty}`"),
            )
        } else if lhs_invalid {
            Report::error(
                lhs_span.start,
                format!("binary operation `{op_text}` cannot be applied to `{lhs_ty}`"),
            )
        } else {
            Report::error(
                rhs_span.start,
                format!("binary operation `{op_text}` cannot be applied to `{rhs_ty}`"),
            )
        };

        self.errors.push(
            report
                .with_annotation(lhs_span.start, lhs_span.end, format!("`{lhs_ty}`"))
                .with_annotation(
                    op_span.start,
                    op_span.end,
                    format!("binary operation `{op_text}` can be applied to {applicable}"),
                )
                .with_annotation(rhs_span.start, rhs_span.end, format!("`{rhs_ty}`")),
        );
    }

    fn error_relational_mismatch(
        &mut self,
        expr: &BinaryExpr,
        lhs: &SyntaxElement,
        lhs_ty: &Ty,
        rhs: &SyntaxElement,
        rhs_ty: &Ty,
    ) {
        let lhs_span = element_span(lhs);
        let rhs_span = element_span(rhs);
        self.errors.push(
            Report::error(trimmed_span(expr.syntax()).start, "mismatched types")
                .with_annotation(lhs_span.start, lhs_span.end, format!("`{lhs_ty}`"))
                .with_annotation(rhs_span.start, rhs_span.end, format!("`{rhs_ty}`")),
        );
    }
}

/// The declared type denoted by a piece of type syntax.
fn type_from_syntax(syntax: Option<TypeSyntax>) -> Option<Ty> {
    match syntax? {
        TypeSyntax::Std(token) => Some(std_ty(token.kind())),
        TypeSyntax::Array(array) => {
            let elem = std_ty(array.elem()?.kind());
            let size = array.size()?.text().parse().ok()?;
            Some(Ty::Array {
                elem: Box::new(elem),
                size,
            })
        }
    }
}

fn std_ty(kind: SyntaxKind) -> Ty {
    match kind {
        SyntaxKind::INTEGER_KW => Ty::Integer,
        SyntaxKind::BOOLEAN_KW => Ty::Boolean,
        SyntaxKind::CHAR_KW => Ty::Char,
        _ => unreachable!("standard type token expected, got {kind:?}"),
    }
}

/// Content of a string literal token: quotes stripped, `''` unescaped.
fn string_content(text: &str) -> String {
    let inner = text
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(text);
    inner.replace("''", "'")
}
