use log::trace;

use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement starting at the current token.
///
/// On success the current token is the last token of the statement
/// (its `;` when present).
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!("parse_stmt at {}", parser.current_token());

    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.next_token();
    }

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// `let <ident> = <expr>;` with a mandatory semicolon.
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = Identifier {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.next_token();

    let value = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::Semicolon)?;

    Ok(Stmt::Let(LetStmt {
        token,
        name,
        value: Some(value),
    }))
}

/// `return <expr>;`
///
/// A missing semicolon is tolerated: anything left before the next `;` is
/// skipped, stopping early at `}` or EOF so an enclosing block stays intact.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let value = if ends_return(parser.peek_token_kind()) {
        None
    } else {
        parser.next_token();
        Some(parse_expr(parser, BindingPower::Lowest)?)
    };

    while !ends_return(parser.peek_token_kind()) {
        parser.next_token();
    }
    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.next_token();
    }

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

fn ends_return(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF
    )
}

/// Parses `{ ... }` with the current token on the `{`.
///
/// Statements inside the block recover from errors the same way top-level
/// statements do. Reaching EOF before `}` fails the block.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    let mut body = Vec::new();

    parser.next_token();

    while !parser.current_token_is(TokenKind::CloseCurly) {
        if parser.current_token_is(TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: TokenKind::CloseCurly,
                    received: TokenKind::EOF,
                },
                parser.get_position(),
            ));
        }

        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => parser.record_error(error),
        }
        parser.next_token();
    }

    Ok(BlockStmt { token, body })
}
