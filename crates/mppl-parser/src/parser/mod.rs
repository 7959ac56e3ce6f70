//! Event-based parser for MPPL.
//!
//! The parser consumes the lexer's token stream and produces a flat list of
//! events (Open/Close/Advance) that [`Parser::finish`] converts into a rowan
//! green tree. Grammar rules open a node, consume tokens, and close the
//! node with its final kind; [`Parser::checkpoint`]/[`Parser::close_at`]
//! retroactively wrap already-emitted events into a new node, which is how
//! left-associative operator chains and other commit-after-lookahead
//! decisions are built.
//!
//! Lookahead skips trivia; `advance` emits events for the skipped trivia so
//! every source byte ends up in the tree. The grammar is LL(1): a rule that
//! cannot start never consumes anything, and the caller tries the next
//! alternative. Once any token of a rule is consumed, a mismatch is a parse
//! error: the parser records one report built from the accumulated
//! expected-token set and stops.

pub(crate) mod declarations;
pub(crate) mod expressions;
pub(crate) mod statements;

use mppl_common::error::LexErrorKind;
use mppl_common::span::Span;
use mppl_common::token::TokenKind;
use mppl_lexer::Lexed;
use mppl_report::Report;

use crate::syntax_kind::SyntaxKind;

/// Standard type keywords, shared by declaration and cast parsing.
pub(crate) const STD_TYPE_FIRST: [TokenKind; 3] = [
    TokenKind::IntegerKw,
    TokenKind::BooleanKw,
    TokenKind::CharKw,
];

/// A parser event, later replayed into a `GreenNodeBuilder`.
#[derive(Debug)]
enum Event {
    /// Start a CST node. Opened via `open()` as `TOMBSTONE` and patched by
    /// `close()`, or inserted fully-formed by `close_at()`.
    Open { kind: SyntaxKind },
    /// Finish the current CST node.
    Close,
    /// Consume one raw token (trivia included) from the stream.
    Advance,
}

/// An opened but not yet closed node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

/// A position in the event stream that a later `close_at` can wrap from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    index: usize,
}

pub(crate) struct Parser<'src> {
    /// All tokens from the lexer, trivia and EOF included.
    tokens: Vec<Lexed>,
    /// Current position in the token stream.
    pos: usize,
    events: Vec<Event>,
    source: &'src str,
    /// Bitset of token kinds tested since the last successful advance,
    /// indexed by `TokenKind` discriminant.
    expected: u64,
    /// Lexical reports, then at most one syntax report.
    errors: Vec<Report>,
    /// Set on the first parse error; the grammar unwinds without emitting
    /// further reports.
    failed: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(tokens: Vec<Lexed>, source: &'src str) -> Self {
        let mut errors = Vec::new();
        for lexed in &tokens {
            if let Some(kind) = lexed.error {
                errors.push(lexical_report(kind, lexed.span));
            }
        }
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            source,
            expected: 0,
            errors,
            failed: false,
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    fn significant_pos(&self) -> usize {
        let mut pos = self.pos;
        while pos < self.tokens.len() && self.tokens[pos].kind.is_trivia() {
            pos += 1;
        }
        pos
    }

    /// Kind of the current significant token.
    pub(crate) fn current(&self) -> TokenKind {
        self.tokens
            .get(self.significant_pos())
            .map_or(TokenKind::Eof, |lexed| lexed.kind)
    }

    /// Span of the current significant token.
    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.significant_pos())
            .map_or_else(
                || {
                    let end = self.source.len() as u32;
                    Span::new(end, end)
                },
                |lexed| lexed.span,
            )
    }

    /// Text of the current significant token.
    pub(crate) fn current_text(&self) -> &str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    /// Test the current token, recording `kind` in the expected set.
    pub(crate) fn at(&mut self, kind: TokenKind) -> bool {
        self.expected |= bit(kind);
        self.current() == kind
    }

    /// Test the current token against several kinds, recording all of them.
    pub(crate) fn at_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            self.expected |= bit(kind);
        }
        kinds.contains(&self.current())
    }

    /// Record kinds as expected without testing, for rules whose dispatch
    /// happens through `match` rather than `at` chains.
    pub(crate) fn note_expected(&mut self, kinds: &[TokenKind]) {
        for &kind in kinds {
            self.expected |= bit(kind);
        }
    }

    // ── Node management ────────────────────────────────────────────────

    /// Start a new CST node at the current position.
    ///
    /// Pending trivia is attached to the enclosing node first, so the new
    /// node's range starts at its first significant token. The root node
    /// has no enclosing node; it keeps the file-leading trivia itself.
    pub(crate) fn open(&mut self) -> MarkOpened {
        if !self.events.is_empty() {
            self.flush_trivia();
        }
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
        });
        mark
    }

    /// Close a node opened with [`Parser::open`], patching in its kind.
    pub(crate) fn close(&mut self, mark: MarkOpened, kind: SyntaxKind) {
        if let Event::Open { kind: slot } = &mut self.events[mark.index] {
            *slot = kind;
        }
        self.events.push(Event::Close);
    }

    /// Capture the current end of the event stream.
    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        Checkpoint {
            index: self.events.len(),
        }
    }

    /// Wrap everything emitted since `checkpoint` into a new node.
    ///
    /// Safe as long as no node opened before the checkpoint closes between
    /// taking it and wrapping, which the grammar guarantees by construction.
    pub(crate) fn close_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.events.insert(checkpoint.index, Event::Open { kind });
        self.events.push(Event::Close);
    }

    /// Emit a zero-width `EMPTY` node marking a missing optional child.
    pub(crate) fn empty(&mut self) {
        let mark = self.open();
        self.close(mark, SyntaxKind::EMPTY);
    }

    // ── Token consumption ──────────────────────────────────────────────

    fn flush_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    /// Consume the current significant token (and any trivia before it),
    /// clearing the expected-token set.
    pub(crate) fn advance(&mut self) {
        self.flush_trivia();
        if self.pos < self.tokens.len() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
        self.expected = 0;
    }

    /// Consume the current token if it matches, recording it as expected
    /// otherwise.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require the current token to match; a mismatch is a parse error.
    pub(crate) fn expect(&mut self, kind: TokenKind) {
        if self.at(kind) {
            self.advance();
        } else {
            self.error();
        }
    }

    // ── Error reporting ────────────────────────────────────────────────

    /// Record the parse error and put the parser into its failed state.
    ///
    /// The report lists every token kind accumulated in the expected set.
    /// No report is added when the offending token is a bad token: the
    /// lexical error for it has already been reported.
    pub(crate) fn error(&mut self) {
        if self.failed {
            return;
        }
        self.failed = true;

        let found_kind = self.current();
        if found_kind == TokenKind::Bad {
            self.expected = 0;
            return;
        }

        let names: Vec<String> = TOKEN_KINDS
            .iter()
            .filter(|&&kind| self.expected & bit(kind) != 0)
            .map(|kind| kind.to_string())
            .collect();
        let expected_part = match names.len() {
            0 => String::from("unexpected token"),
            1 => format!("expected {}", names[0]),
            _ => format!("expected one of {}", names.join(", ")),
        };
        let found = if found_kind == TokenKind::Eof {
            String::from("end of file")
        } else {
            format!("`{}`", self.current_text())
        };

        let span = self.current_span();
        let report = Report::error(span.start, format!("{expected_part}, but found {found}"))
            .with_annotation(span.start, span.end, expected_part);
        self.errors.push(report);
        self.expected = 0;
    }

    /// Whether a parse error has been recorded. Rules bail out early once
    /// this is set.
    pub(crate) fn failed(&self) -> bool {
        self.failed
    }

    // ── Tree building ──────────────────────────────────────────────────

    /// Replay the events into a green tree. Consumes the parser.
    pub(crate) fn finish(self) -> (rowan::GreenNode, Vec<Report>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut token_pos = 0usize;

        for event in &self.events {
            match event {
                Event::Open { kind } => {
                    builder.start_node(rowan::SyntaxKind(*kind as u16));
                }
                Event::Close => {
                    builder.finish_node();
                }
                Event::Advance => {
                    let lexed = &self.tokens[token_pos];
                    let kind = SyntaxKind::from(lexed.kind);
                    let text =
                        &self.source[lexed.span.start as usize..lexed.span.end as usize];
                    builder.token(rowan::SyntaxKind(kind as u16), text);
                    token_pos += 1;
                }
            }
        }

        (builder.finish(), self.errors)
    }
}

fn bit(kind: TokenKind) -> u64 {
    1u64 << kind as u16
}

/// Every kind that can appear in an expected set, in display order.
const TOKEN_KINDS: &[TokenKind] = &[
    TokenKind::Ident,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Equal,
    TokenKind::NotEq,
    TokenKind::Less,
    TokenKind::LessEq,
    TokenKind::Greater,
    TokenKind::GreaterEq,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Assign,
    TokenKind::Dot,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::Semi,
    TokenKind::ProgramKw,
    TokenKind::VarKw,
    TokenKind::ArrayKw,
    TokenKind::OfKw,
    TokenKind::BeginKw,
    TokenKind::EndKw,
    TokenKind::IfKw,
    TokenKind::ThenKw,
    TokenKind::ElseKw,
    TokenKind::ProcedureKw,
    TokenKind::ReturnKw,
    TokenKind::CallKw,
    TokenKind::WhileKw,
    TokenKind::DoKw,
    TokenKind::NotKw,
    TokenKind::OrKw,
    TokenKind::DivKw,
    TokenKind::AndKw,
    TokenKind::CharKw,
    TokenKind::IntegerKw,
    TokenKind::BooleanKw,
    TokenKind::ReadKw,
    TokenKind::WriteKw,
    TokenKind::ReadlnKw,
    TokenKind::WritelnKw,
    TokenKind::TrueKw,
    TokenKind::FalseKw,
    TokenKind::BreakKw,
    TokenKind::Eof,
];

fn lexical_report(kind: LexErrorKind, span: Span) -> Report {
    let annotation = match kind {
        LexErrorKind::StrayChar => "this character matches no token",
        LexErrorKind::TooBigNumber => "the maximum number is 32767",
        LexErrorKind::UnterminatedString => "this string is not terminated",
        LexErrorKind::NongraphicChar => "only graphic characters may appear in a string",
        LexErrorKind::UnterminatedComment => "this comment is not terminated",
        LexErrorKind::TooLongString => "the maximum string length is 1023",
    };
    Report::error(span.start, kind.to_string()).with_annotation(span.start, span.end, annotation)
}

// ── Top-level rule ─────────────────────────────────────────────────────

/// `program NAME ; { var-part | proc-decl } compound .`
///
/// Always leaves the event stream covering the entire token stream, parse
/// error or not, so the tree reproduces the source byte for byte.
pub(crate) fn parse_program(p: &mut Parser) {
    let root = p.open();

    p.expect(TokenKind::ProgramKw);
    if !p.failed() {
        p.expect(TokenKind::Ident);
    }
    if !p.failed() {
        p.expect(TokenKind::Semi);
    }

    while !p.failed() {
        if p.at(TokenKind::VarKw) {
            declarations::parse_var_decl_part(p);
        } else if p.at(TokenKind::ProcedureKw) {
            declarations::parse_proc_decl(p);
        } else {
            break;
        }
    }

    if !p.failed() {
        statements::parse_comp_stmt(p);
    }
    if !p.failed() {
        p.expect(TokenKind::Dot);
    }
    if !p.failed() && !p.at(TokenKind::Eof) {
        p.error();
    }

    // Attach whatever remains, trailing trivia and EOF included.
    while p.current() != TokenKind::Eof {
        p.advance();
    }
    p.advance();

    p.close(root, SyntaxKind::PROGRAM);
}
