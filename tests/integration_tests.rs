//! Integration tests for the end-to-end front end.
//!
//! These tests drive the public API the way the binary does: source text
//! through the lexer and parser into a rendered program, plus the shell.

use std::io::Cursor;

use ape::{
    ast::ast::{Expr, Stmt},
    format_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::parser::{parse, Parser},
    repl::{self, ReplMode, PROMPT},
};

fn run_repl(input: &str, mode: ReplMode) -> String {
    let mut output = Vec::new();
    repl::start(Cursor::new(input), &mut output, mode).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_parse_full_program() {
    let source = "
        let five = 5;
        let add = fn(x, y) {
            return x + y;
        };
        let result = add(five, 10 * 2);
        if (result > 10) { true } else { false }
    ";

    let (program, errors) = parse(source, Some("main.ape".to_string()));
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(program.len(), 4);

    assert_eq!(
        program.to_string(),
        "let five = 5;\
         let add = fn(x, y) return (x + y);;\
         let result = add(five, (10 * 2));\
         if(result > 10) trueelse false"
    );
}

#[test]
fn test_tokens_feed_parser() {
    let tokens = tokenize("let x = 1 + 2;".to_string(), None);
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Int,
            TokenKind::Plus,
            TokenKind::Int,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );

    let mut parser = Parser::new(Lexer::new("let x = 1 + 2;".to_string(), None));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());

    match &program.statements[0] {
        Stmt::Let(stmt) => {
            assert_eq!(stmt.name.value, "x");
            assert!(matches!(stmt.value, Some(Expr::Infix(_))));
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_reports_and_recovers() {
    let source = "let = 10;\nlet y = 3;";
    let (program, errors) = parse(source, Some("broken.ape".to_string()));

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].to_string(),
        "expected next token to be IDENT, got = instead"
    );
    assert_eq!(errors[1].to_string(), "no prefix parse function for = found");
    assert!(program.to_string().ends_with("let y = 3;"));

    let rendered = format_error(&errors[0], source, "broken.ape");
    assert!(rendered.starts_with("Error: expected next token to be IDENT, got = instead"));
    assert!(rendered.contains("-> broken.ape"));
    assert!(rendered.contains("1 | let = 10;"));
    assert!(rendered.ends_with("----^"));
}

#[test]
fn test_unclosed_block_reports_eof() {
    let (_, errors) = parse("if (x) { x", None);

    assert_eq!(
        errors.last().map(|error| error.to_string()),
        Some("expected next token to be }, got EOF instead".to_string())
    );
}

#[test]
fn test_repl_tokens_mode() {
    let output = run_repl("let x = 5;\n", ReplMode::Tokens);

    let expected = format!(
        "{prompt}\
         Token {{ kind: LET, value: \"let\" }}\n\
         Token {{ kind: IDENT, value: \"x\" }}\n\
         Token {{ kind: =, value: \"=\" }}\n\
         Token {{ kind: INT, value: \"5\" }}\n\
         Token {{ kind: ;, value: \";\" }}\n\
         {prompt}",
        prompt = PROMPT
    );
    assert_eq!(output, expected);
}

#[test]
fn test_repl_ast_mode() {
    let output = run_repl("let x = 5 * (2 + y);\n-a\n", ReplMode::Ast);

    assert_eq!(
        output,
        format!(
            "{p}let x = (5 * (2 + y));\n{p}(-a)\n{p}",
            p = PROMPT
        )
    );
}

#[test]
fn test_repl_ast_mode_prints_errors() {
    let output = run_repl("let 5;\n", ReplMode::Ast);

    assert!(output.contains("\texpected next token to be IDENT, got INT instead\n"));
    assert!(output.ends_with(PROMPT));
}

#[test]
fn test_repl_lines_are_independent() {
    let output = run_repl("let a = (1\n2;\n", ReplMode::Ast);
    let lines: Vec<&str> = output.split(PROMPT).filter(|s| !s.is_empty()).collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('\t'));
    assert_eq!(lines[1], "2\n");
}

#[test]
fn test_repl_empty_input() {
    assert_eq!(run_repl("", ReplMode::Tokens), PROMPT);
}

#[test]
fn test_pathological_nesting_reports_errors() {
    for source in [format!("{}1", "(".repeat(10_000)), format!("{}1", "-".repeat(10_000))] {
        let (_, errors) = parse(&source, None);

        assert!(!errors.is_empty());
        assert_eq!(errors[0].get_error_name(), "NestingTooDeep");
    }
}
