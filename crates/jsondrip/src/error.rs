use thiserror::Error;

/// A parse failure, frozen at the position of the offending character.
///
/// Errors are sticky: the first one recorded on a context stands until the
/// context is reset, and later input is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {line}:{column}")]
pub struct JsonError {
    /// Which of the three error classes occurred.
    pub kind: JsonErrorKind,
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column of the offending character.
    pub column: usize,
}

/// The three mutually exclusive parse error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JsonErrorKind {
    /// A character was invalid for the current lexer state.
    #[error("unexpected lexical token")]
    Lex,
    /// A token was invalid for the current grammar state, or the sink
    /// rejected an event.
    #[error("unexpected syntax token")]
    Syntax,
    /// Non-whitespace input arrived after a complete document.
    #[error("input past end of document")]
    PastEnd,
}
