//! Syntax error types for the parser.
//!
//! This module defines:
//!
//! - Error structures with source position information
//! - The error variants the parser can accumulate
//! - Helpful suggestions for rendering diagnostics
//!
//! The lexer never fails; unknown characters become ILLEGAL tokens and
//! surface here only once the parser trips over them.

pub mod errors;
