use std::{iter::FusedIterator, rc::Rc};

use lazy_static::lazy_static;
use log::debug;
use regex::bytes::Regex;

use crate::{Position, Span, MK_SPAN, MK_TOKEN};

use super::tokens::{lookup_ident, Token, TokenKind};

lazy_static! {
    // Byte-level so that any offset is a valid place to resume matching.
    static ref SYMBOL_PATTERN: Regex = Regex::new("^[a-zA-Z_]+").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// A single-pass cursor over ASCII source text.
///
/// Each call to [`Lexer::next_token`] classifies and consumes one lexeme.
/// Once the input is exhausted every further call yields an EOF token.
/// Multi-byte characters are not decoded; each of their bytes becomes an
/// ILLEGAL token. The literal of such a token is the byte read as a Latin-1
/// character, so `0xC3` shows up as `Ã`.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    /// Offset of `ch`
    pos: usize,
    /// Offset of the byte after `ch`
    read_pos: usize,
    /// `None` once the input is exhausted
    ch: Option<u8>,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        debug!("lexing {} bytes from {}", source.len(), file_name);

        let mut lexer = Lexer {
            source,
            pos: 0,
            read_pos: 0,
            ch: None,
            file: file_name,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.pos = self.read_pos;
        self.ch = self.source.as_bytes().get(self.pos).copied();

        if self.ch.is_some() {
            self.read_pos += 1;
        }
    }

    fn peek_char(&self) -> Option<u8> {
        self.source.as_bytes().get(self.read_pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.read_char();
        }
    }

    /// Picks the two-character kind when the next byte is `next`, consuming it.
    fn either(&mut self, next: u8, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.peek_char() == Some(next) {
            self.read_char();
            two
        } else {
            one
        }
    }

    /// Consumes a greedy run matched by `pattern` starting at the current byte.
    fn read_run(&mut self, pattern: &Regex) -> String {
        let start = self.pos;
        let length = pattern
            .find(&self.source.as_bytes()[start..])
            .map_or(1, |matched| matched.end());

        self.read_pos = start + length;
        self.read_char();

        String::from_utf8_lossy(&self.source.as_bytes()[start..self.pos]).into_owned()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let ch = match self.ch {
            Some(ch) => ch,
            None => return MK_TOKEN!(TokenKind::EOF, String::new(), MK_SPAN!(start, start, self.file)),
        };

        let kind = match ch {
            b'=' => self.either(b'=', TokenKind::Equals, TokenKind::Assignment),
            b'!' => self.either(b'=', TokenKind::NotEquals, TokenKind::Not),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Dash,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            ch if is_letter(ch) => {
                let value = self.read_run(&SYMBOL_PATTERN);
                return MK_TOKEN!(lookup_ident(&value), value, MK_SPAN!(start, self.pos, self.file));
            }
            ch if ch.is_ascii_digit() => {
                let value = self.read_run(&NUMBER_PATTERN);
                return MK_TOKEN!(TokenKind::Int, value, MK_SPAN!(start, self.pos, self.file));
            }
            _ => TokenKind::Illegal,
        };

        self.read_char();

        let value = if kind == TokenKind::Illegal {
            (ch as char).to_string()
        } else {
            String::from_utf8_lossy(&self.source.as_bytes()[start..self.pos]).into_owned()
        };

        MK_TOKEN!(kind, value, MK_SPAN!(start, self.pos, self.file))
    }
}

/// Yields tokens up to, but not including, EOF.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenKind::EOF) {
            None
        } else {
            Some(token)
        }
    }
}

impl FusedIterator for Lexer {}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Collects the whole token stream, including the single trailing EOF token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let at_eof = token.is(TokenKind::EOF);
        tokens.push(token);

        if at_eof {
            break;
        }
    }

    tokens
}
