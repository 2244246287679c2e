//! Read, Eval, Print, Loop
//!
//! Reads one line at a time and runs it through a fresh lexer. Nothing is
//! carried over between lines.

use std::io::{self, BufRead, Write};

use log::info;

use crate::{lexer::lexer::Lexer, parser::parser::Parser};

pub const PROMPT: &str = ">> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplMode {
    /// Echo every token of the line
    #[default]
    Tokens,
    /// Parse the line and print the rendered program or its errors
    Ast,
}

/// Runs the shell until `input` is exhausted.
pub fn start<R: BufRead, W: Write>(input: R, mut output: W, mode: ReplMode) -> io::Result<()> {
    info!("starting shell in {:?} mode", mode);

    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let lexer = Lexer::new(line, None);

        match mode {
            ReplMode::Tokens => {
                for token in lexer {
                    writeln!(output, "{}", token)?;
                }
            }
            ReplMode::Ast => {
                let mut parser = Parser::new(lexer);
                let program = parser.parse_program();

                if parser.errors().is_empty() {
                    writeln!(output, "{}", program)?;
                } else {
                    for message in parser.errors() {
                        writeln!(output, "\t{}", message)?;
                    }
                }
            }
        }
    }
}
