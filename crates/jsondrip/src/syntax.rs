//! Grammar driver: enforces the JSON grammar over the lexer's token stream
//! and turns accepted tokens into sink events.
//!
//! Nesting is tracked with an explicit stack of `(handle, kind)` parent
//! frames. A PAIR frame is transient: as soon as the pair's value closes,
//! the driver pops back through it to the enclosing object's "next" state —
//! pairs are never an ongoing context the way objects and arrays are.

use crate::context::JsonContextImpl;
use crate::error::JsonErrorKind;
use crate::sink::{ParseEvent, ParseSink};
use crate::value::JsonType;

/// Lexical tokens handed to the grammar driver. Consumed immediately, never
/// retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Str,
    Num,
    True,
    False,
    Null,
    ObjOpen,
    ObjClose,
    ArrOpen,
    ArrClose,
    Comma,
    Colon,
}

/// Grammar states. `End` is terminal and accepting; the dead (error) state
/// is the machine slot holding `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SynState {
    Entry,
    Value,
    NewObject,
    ObjectName,
    ObjectColon,
    ObjectNext,
    ArrayNext,
    End,
}

/// Outcome of one grammar step. `next == None` halts the machine.
pub(crate) struct SynStep {
    next: Option<SynState>,
    redispatch: bool,
}

impl SynStep {
    fn to(state: SynState) -> Self {
        Self {
            next: Some(state),
            redispatch: false,
        }
    }

    fn again(state: SynState) -> Self {
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
    /// Runs one token through the grammar machine, re-running the successor
    /// state on the same token while a step requests it.
    pub(crate) fn syntax_dispatch(&mut self, token: Token) {
        while let Some(state) = self.syn {
            let step = self.syn_step(state, token);
            self.syn = step.next;
            if !step.redispatch {
                break;
            }
        }
    }

    fn syn_step(&mut self, state: SynState, token: Token) -> SynStep {
        match state {
            SynState::Entry => match token {
                // A document is exactly one object or array.
                Token::ObjOpen | Token::ArrOpen => SynStep::again(SynState::Value),
                _ => self.syntax_error(),
            },
            SynState::Value => self.syn_value(token),
            SynState::NewObject => match token {
                Token::ObjClose => SynStep::again(SynState::Value),
                Token::Str => SynStep::again(SynState::ObjectName),
                _ => self.syntax_error(),
            },
            SynState::ObjectName => self.syn_object_name(token),
            SynState::ObjectColon => match token {
                Token::Colon => SynStep::to(SynState::Value),
                _ => self.syntax_error(),
            },
            SynState::ObjectNext => match token {
                Token::Comma => SynStep::to(SynState::ObjectName),
                Token::ObjClose => SynStep::again(SynState::Value),
                _ => self.syntax_error(),
            },
            SynState::ArrayNext => match token {
                Token::Comma => SynStep::to(SynState::Value),
                Token::ArrClose => SynStep::again(SynState::Value),
                _ => self.syntax_error(),
            },
            SynState::End => {
                self.record_error(JsonErrorKind::PastEnd);
                SynStep::halt()
            }
        }
    }

    fn syn_value(&mut self, token: Token) -> SynStep {
        let event = match token {
            Token::ObjClose | Token::ArrClose => {
                let Some(popped) = self.stack.pop() else {
                    // Top-level value fully closed.
                    return SynStep::to(SynState::End);
                };
                self.parent = Some(popped);
                return self.resume_after_value();
            }
            Token::ObjOpen => return self.syn_open(JsonType::Object),
            Token::ArrOpen => return self.syn_open(JsonType::Array),
            Token::Str => ParseEvent::String(self.glue.as_str()),
            Token::Num => ParseEvent::Number(self.glue.as_str()),
            Token::True => ParseEvent::Boolean(true),
            Token::False => ParseEvent::Boolean(false),
            Token::Null => ParseEvent::Null,
            Token::Comma | Token::Colon => return self.syntax_error(),
        };

        let parent = self.parent.as_ref().map(|(handle, _)| handle);
        if self.sink.event(event, parent).is_none() {
            return self.syntax_error();
        }
        self.resume_after_value()
    }

    /// Descends into a new object or array: the current parent frame is
    /// pushed and the fresh container becomes the parent.
    fn syn_open(&mut self, kind: JsonType) -> SynStep {
        let event = if kind == JsonType::Object {
            ParseEvent::ObjectOpen
        } else {
            ParseEvent::ArrayOpen
        };
        let parent = self.parent.as_ref().map(|(handle, _)| handle);
        let Some(handle) = self.sink.event(event, parent) else {
            return self.syntax_error();
        };

        if let Some(previous) = self.parent.take() {
            self.stack.push(previous);
        }
        self.parent = Some((handle, kind));
        if kind == JsonType::Object {
            SynStep::to(SynState::NewObject)
        } else {
            // Arrays nest straight back into value expectation.
            SynStep::to(SynState::Value)
        }
    }

    fn syn_object_name(&mut self, token: Token) -> SynStep {
        if token != Token::Str {
            return self.syntax_error();
        }
        let Some((parent_handle, parent_kind)) = self.parent.clone() else {
            return self.syntax_error();
        };
        let Some(handle) = self
            .sink
            .event(ParseEvent::PairName(self.glue.as_str()), Some(&parent_handle))
        else {
            return self.syntax_error();
        };
        self.stack.push((parent_handle, parent_kind));
        self.parent = Some((handle, JsonType::Pair));
        SynStep::to(SynState::ObjectColon)
    }

    /// Chooses the "next element" state after a value closed, popping
    /// transparently through an enclosing PAIR frame.
    fn resume_after_value(&mut self) -> SynStep {
        if matches!(self.parent, Some((_, JsonType::Pair))) {
            self.parent = self.stack.pop();
        }
        match self.parent {
            Some((_, JsonType::Object)) => SynStep::to(SynState::ObjectNext),
            _ => SynStep::to(SynState::ArrayNext),
        }
    }

    fn syntax_error(&mut self) -> SynStep {
        self.record_error(JsonErrorKind::Syntax);
        SynStep::halt()
    }
}
