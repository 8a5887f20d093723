//! Token classifier: a character-at-a-time lexer state machine.
//!
//! Each step maps `(state, character)` to a successor state, an optional
//! token forwarded to the grammar driver, and a redispatch flag. Redispatch
//! exists because the end of a number is only detected by the first
//! character that does not belong to it — that character must still be
//! handled by `Initial`.

use crate::context::JsonContextImpl;
use crate::error::JsonErrorKind;
use crate::sink::ParseSink;
use crate::syntax::{SynState, Token};

/// Lexer states. Number lexing goes through a "first digit required" entry
/// state for every phase, mirroring the JSON number grammar (`.` and the
/// exponent marker must be followed by at least one digit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexState {
    Initial,
    NumberEntry(NumberPhase),
    Number(NumberPhase),
    ExpSign,
    Str,
    StrEscape,
    Keyword(Keyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberPhase {
    Integer,
    Fraction,
    Exponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    True,
    False,
    Null,
}

impl Keyword {
    fn literal(self) -> &'static [u8] {
        match self {
            Self::True => b"true",
            Self::False => b"false",
            Self::Null => b"null",
        }
    }

    fn token(self) -> Token {
        match self {
            Self::True => Token::True,
            Self::False => Token::False,
            Self::Null => Token::Null,
        }
    }
}

/// Outcome of one lexer step. `next == None` halts the machine.
pub(crate) struct LexStep {
    next: Option<LexState>,
    redispatch: bool,
}

impl LexStep {
    fn to(state: LexState) -> Self {
        Self {
            next: Some(state),
            redispatch: false,
        }
    }

    fn again(state: LexState) -> Self {
        Self {
            next: Some(state),
            redispatch: true,
        }
    }

    fn halt() -> Self {
        Self {
            next: None,
            redispatch: false,
        }
    }
}

impl<S: ParseSink> JsonContextImpl<S> {
    /// Runs one input character through the lexer, re-running the successor
    /// state on the same character while a step requests it, then appends
    /// the character to the glue buffer if accumulation is active.
    pub(crate) fn lex_dispatch(&mut self, ch: char) {
        while let Some(state) = self.lex {
            let step = self.lex_step(state, ch);
            self.lex = step.next;
            if !step.redispatch {
                break;
            }
        }
        if self.glue_on {
            self.glue.push(ch);
        }
    }

    fn lex_step(&mut self, state: LexState, ch: char) -> LexStep {
        match state {
            LexState::Initial => self.lex_initial(ch),
            LexState::NumberEntry(phase) => {
                self.glue_on = true;
                if ch.is_ascii_digit() {
                    LexStep::to(LexState::Number(phase))
                } else {
                    self.lex_error()
                }
            }
            LexState::Number(phase) => self.lex_number(phase, ch),
            LexState::ExpSign => match ch {
                '0'..='9' => LexStep::again(LexState::NumberEntry(NumberPhase::Exponent)),
                '+' | '-' => LexStep::to(LexState::NumberEntry(NumberPhase::Exponent)),
                _ => self.lex_error(),
            },
            LexState::Str => {
                self.glue_on = true;
                match ch {
                    '\\' => LexStep::to(LexState::StrEscape),
                    '"' => {
                        self.syntax_dispatch(Token::Str);
                        LexStep::to(LexState::Initial)
                    }
                    _ => LexStep::to(LexState::Str),
                }
            }
            // The escaped character is accepted verbatim, not decoded; the
            // backslash stays in the token text.
            LexState::StrEscape => LexStep::to(LexState::Str),
            LexState::Keyword(word) => self.lex_keyword(word, ch),
        }
    }

    fn lex_initial(&mut self, ch: char) -> LexStep {
        if self.glue_on {
            self.glue.clear();
            self.glue_on = false;
        }

        if ch == '\n' {
            self.line += 1;
            self.col = 0;
            return LexStep::to(LexState::Initial);
        }
        if matches!(ch, '\r' | '\t' | ' ') {
            return LexStep::to(LexState::Initial);
        }

        // A completed document accepts nothing but trailing whitespace.
        if self.syn == Some(SynState::End) {
            self.record_error(JsonErrorKind::PastEnd);
            self.syn = None;
            return LexStep::halt();
        }

        match ch {
            '{' => self.forward(Token::ObjOpen),
            '}' => self.forward(Token::ObjClose),
            '[' => self.forward(Token::ArrOpen),
            ']' => self.forward(Token::ArrClose),
            ',' => self.forward(Token::Comma),
            ':' => self.forward(Token::Colon),
            '"' => LexStep::to(LexState::Str),
            '0'..='9' => LexStep::again(LexState::NumberEntry(NumberPhase::Integer)),
            '-' => {
                self.glue_on = true;
                LexStep::to(LexState::NumberEntry(NumberPhase::Integer))
            }
            't' => LexStep::again(LexState::Keyword(Keyword::True)),
            'f' => LexStep::again(LexState::Keyword(Keyword::False)),
            'n' => LexStep::again(LexState::Keyword(Keyword::Null)),
            _ => self.lex_error(),
        }
    }

    /// Structural characters are forwarded as tokens straight from the
    /// initial state; the lexer state does not change.
    fn forward(&mut self, token: Token) -> LexStep {
        self.syntax_dispatch(token);
        LexStep::to(LexState::Initial)
    }

    fn lex_number(&mut self, phase: NumberPhase, ch: char) -> LexStep {
        match (phase, ch) {
            (_, '0'..='9') => LexStep::to(LexState::Number(phase)),
            (NumberPhase::Integer | NumberPhase::Fraction, 'e' | 'E') => {
                LexStep::to(LexState::ExpSign)
            }
            (NumberPhase::Integer, '.') => LexStep::to(LexState::NumberEntry(NumberPhase::Fraction)),
            _ => {
                // First non-number character ends the token; it still has to
                // be dispatched in the initial state.
                self.syntax_dispatch(Token::Num);
                LexStep::again(LexState::Initial)
            }
        }
    }

    fn lex_keyword(&mut self, word: Keyword, ch: char) -> LexStep {
        self.glue_on = true;

        // Progress through the literal is measured by the glue buffer: the
        // current character is only appended after this step runs.
        let literal = word.literal();
        let at = self.glue.len();
        if at >= literal.len() || char::from(literal[at]) != ch {
            return self.lex_error();
        }
        if at == literal.len() - 1 {
            self.syntax_dispatch(word.token());
            return LexStep::to(LexState::Initial);
        }
        LexStep::to(LexState::Keyword(word))
    }

    fn lex_error(&mut self) -> LexStep {
        self.record_error(JsonErrorKind::Lex);
        LexStep::halt()
    }
}
