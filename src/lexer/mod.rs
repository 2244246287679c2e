//! Lexical analysis.
//!
//! Converts source text into a stream of tokens for parsing:
//!
//! - Single and double character operators and punctuation
//! - Identifiers, resolved against the keyword table
//! - Integer literals (text only, conversion happens in the parser)
//! - ILLEGAL tokens for anything unrecognised; the lexer itself never fails

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
