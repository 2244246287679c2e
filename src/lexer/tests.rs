//! Unit tests for the lexer module.
//!
//! Covers operators and punctuation, the `==`/`!=` lookahead, keywords,
//! identifiers, integers, ILLEGAL bytes and the EOF tail.

use super::{
    lexer::{tokenize, Lexer},
    tokens::{lookup_ident, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.ape".to_string()))
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_single_characters() {
    let cases = [
        ("=", TokenKind::Assignment),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Dash),
        ("!", TokenKind::Not),
        ("*", TokenKind::Star),
        ("/", TokenKind::Slash),
        ("<", TokenKind::Less),
        (">", TokenKind::Greater),
        ("(", TokenKind::OpenParen),
        (")", TokenKind::CloseParen),
        ("{", TokenKind::OpenCurly),
        ("}", TokenKind::CloseCurly),
        (",", TokenKind::Comma),
        (";", TokenKind::Semicolon),
    ];

    for (source, kind) in cases {
        let tokens = tokenize(source.to_string(), None);

        assert_eq!(tokens.len(), 2, "{}", source);
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].value, source);
        assert_eq!(tokens[1].kind, TokenKind::EOF);
    }
}

#[test]
fn test_tokenize_basic_sequence() {
    let tokens = tokenize("=+(){},;".to_string(), None);
    let expected = [
        (TokenKind::Assignment, "="),
        (TokenKind::Plus, "+"),
        (TokenKind::OpenParen, "("),
        (TokenKind::CloseParen, ")"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Comma, ","),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, value)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.value, value);
    }
}

#[test]
fn test_tokenize_two_character_operators() {
    let tokens = tokenize("10 == 10; 10 != 9;".to_string(), None);

    assert_eq!(tokens[1].kind, TokenKind::Equals);
    assert_eq!(tokens[1].value, "==");
    assert_eq!(tokens[5].kind, TokenKind::NotEquals);
    assert_eq!(tokens[5].value, "!=");
}

#[test]
fn test_assign_without_lookahead_match() {
    assert_eq!(
        kinds("=5 = !x !"),
        vec![
            TokenKind::Assignment,
            TokenKind::Int,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("=!==="),
        vec![
            TokenKind::Assignment,
            TokenKind::NotEquals,
            TokenKind::Equals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn let true false if else return"),
        vec![
            TokenKind::Fn,
            TokenKind::Let,
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_lookup_ident() {
    assert_eq!(lookup_ident("fn"), TokenKind::Fn);
    assert_eq!(lookup_ident("let"), TokenKind::Let);
    assert_eq!(lookup_ident("true"), TokenKind::True);
    assert_eq!(lookup_ident("false"), TokenKind::False);
    assert_eq!(lookup_ident("if"), TokenKind::If);
    assert_eq!(lookup_ident("else"), TokenKind::Else);
    assert_eq!(lookup_ident("return"), TokenKind::Return);

    assert_eq!(lookup_ident("foobar"), TokenKind::Identifier);
    assert_eq!(lookup_ident("Let"), TokenKind::Identifier);
    assert_eq!(lookup_ident("returns"), TokenKind::Identifier);
    assert_eq!(lookup_ident("_"), TokenKind::Identifier);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_baz _under CamelCase".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_baz");
    assert_eq!(tokens[2].value, "_under");
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_identifier_stops_at_digit() {
    let tokens = tokenize("abc123".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "abc");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "123");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("5 10 993322 0".to_string(), None);

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "5");
    assert_eq!(tokens[1].value, "10");
    assert_eq!(tokens[2].value, "993322");
    assert_eq!(tokens[3].value, "0");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_program() {
    let source = "
        let five = 5;
        let add = fn(x, y) {
            x + y;
        };

        let result = add(five, 10);
    ";
    let expected = [
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "five"),
        (TokenKind::Assignment, "="),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "add"),
        (TokenKind::Assignment, "="),
        (TokenKind::Fn, "fn"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "x"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "y"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::Identifier, "x"),
        (TokenKind::Plus, "+"),
        (TokenKind::Identifier, "y"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "result"),
        (TokenKind::Assignment, "="),
        (TokenKind::Identifier, "add"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "five"),
        (TokenKind::Comma, ","),
        (TokenKind::Int, "10"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    let tokens = tokenize(source.to_string(), None);

    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, value)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.value, value);
    }
}

#[test]
fn test_tokenize_whitespace_handling() {
    assert_eq!(
        kinds(" \t let\r\n  x\n=\t42  "),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Int,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_illegal_characters() {
    let tokens = tokenize("let x = @#5;".to_string(), None);

    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].value, "@");
    assert_eq!(tokens[4].kind, TokenKind::Illegal);
    assert_eq!(tokens[4].value, "#");
    assert_eq!(tokens[5].kind, TokenKind::Int);
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_nul_byte_is_illegal() {
    assert_eq!(
        kinds("a\0b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Illegal,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_multibyte_input_does_not_panic() {
    // "é" is two bytes; each becomes its own ILLEGAL token.
    let tokens = tokenize("aé b".to_string(), None);

    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "\u{c3}");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[2].value, "\u{a9}");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "b");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    for _ in 0..5 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.value, "");
    }
}

#[test]
fn test_empty_input() {
    let mut lexer = Lexer::new(String::new(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_iterator_stops_at_eof() {
    let mut lexer = Lexer::new("let x;".to_string(), None);
    let collected: Vec<TokenKind> = lexer.by_ref().map(|token| token.kind).collect();

    assert_eq!(
        collected,
        vec![TokenKind::Let, TokenKind::Identifier, TokenKind::Semicolon]
    );
    assert!(lexer.next().is_none());
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let ab == 7".to_string(), Some("spans.ape".to_string()));

    assert_eq!((tokens[0].span.start.0, tokens[0].span.end.0), (0, 3));
    assert_eq!((tokens[1].span.start.0, tokens[1].span.end.0), (4, 6));
    assert_eq!((tokens[2].span.start.0, tokens[2].span.end.0), (7, 9));
    assert_eq!((tokens[3].span.start.0, tokens[3].span.end.0), (10, 11));
    assert_eq!((tokens[4].span.start.0, tokens[4].span.end.0), (11, 11));
    assert_eq!(*tokens[0].span.start.1, "spans.ape");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x".to_string(), None);
    assert_eq!(*tokens[0].span.start.1, "shell");
}

#[test]
fn test_token_display() {
    let tokens = tokenize("let".to_string(), None);
    assert_eq!(tokens[0].to_string(), "Token { kind: LET, value: \"let\" }");
}
