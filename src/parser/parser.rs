//! Parser implementation for building the Abstract Syntax Tree.
//!
//! The parser pulls tokens from a [`Lexer`] on demand and keeps exactly two
//! of them in view: the current token and one token of lookahead. It
//! maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Syntax errors never abort the parse. A statement that fails contributes
//! no node, its error is recorded, and parsing resumes at the next token.

use std::{collections::HashMap, mem};

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// A parser owns its lexer exclusively for the whole parse.
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// The token under examination
    cur_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Every syntax error recorded so far, in order
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Number of `parse_expr` calls currently on the stack
    depth: usize,
}

/// Deepest expression nesting accepted before the parse fails with
/// `NestingTooDeep`. Keeps recursion well inside a 2 MiB thread stack.
pub const MAX_NESTING_DEPTH: usize = 64;

impl Parser {
    /// Creates a new Parser with the current and lookahead tokens primed
    /// and every handler registered.
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.cur_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cur_token.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Shifts the lookahead into the current slot and reads a new lookahead.
    pub fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = mem::replace(&mut self.peek_token, next);
    }

    /// Advances only if the lookahead is of the expected kind.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error positioned at
    /// the lookahead when it does not match. Nothing is consumed on error.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_token_is(expected_kind) {
            self.next_token();
            Ok(self.cur_token.clone())
        } else {
            Err(self.peek_error(expected_kind))
        }
    }

    fn peek_error(&self, expected_kind: TokenKind) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                received: self.peek_token.kind,
            },
            self.peek_token.span.start.clone(),
        )
    }

    /// Binding power of the current token, `Lowest` if it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.cur_token.kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    /// Binding power of the lookahead token, `Lowest` if it is not an operator.
    pub fn peek_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.peek_token.kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Enters one level of expression nesting, failing once the limit is hit.
    ///
    /// Every successful call must be paired with [`Parser::exit_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.cur_token.span.start.clone()
    }

    pub fn record_error(&mut self, error: Error) {
        debug!("syntax error at {}: {}", error.get_position().0, error);
        self.errors.push(error);
    }

    /// Messages of every recorded syntax error, in the order encountered.
    /// Empty means the parse was structurally clean.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// The recorded syntax errors with their source positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    /// Parses statements until EOF.
    ///
    /// Each iteration consumes at least one token, so the loop always
    /// terminates. Callers must check [`Parser::errors`] even though a
    /// `Program` is always returned; it may be partial.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => self.record_error(error),
            }
            self.next_token();
        }

        debug!(
            "parsed {} statements with {} errors",
            program.statements.len(),
            self.errors.len()
        );

        program
    }
}

/// Parses source text into a Program.
///
/// This is the main entry point for parsing. It creates a lexer and a
/// parser and runs the parser to EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Program (possibly partial)
/// - Every syntax error, empty on success
pub fn parse(source: &str, file: Option<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source.to_string(), file));
    let program = parser.parse_program();

    (program, parser.errors)
}
