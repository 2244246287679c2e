//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span over a byte range of the lexer's file

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Span from two byte offsets and a shared file name.
///
/// Offsets that do not fit in a `u32` saturate at `u32::MAX`.
///
/// ```ignore
/// let span = MK_SPAN!(start, lexer.pos, lexer.file);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $end:expr, $file:expr) => {
        Span {
            start: Position(u32::try_from($start).unwrap_or(u32::MAX), Rc::clone(&$file)),
            end: Position(u32::try_from($end).unwrap_or(u32::MAX), Rc::clone(&$file)),
        }
    };
}
