//! The event interface between the grammar driver and value consumers.

use crate::value::JsonValue;

/// One semantic parse event.
///
/// Exactly one event is delivered per scalar, per object/array open and per
/// object member key; closing delimiters produce no event — closing is
/// implicit when the parser pops back to the enclosing container. Borrowed
/// text points into the context's token buffer and is only valid for the
/// duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    /// The `null` literal.
    Null,
    /// A `true` or `false` literal.
    Boolean(bool),
    /// A number, as written in the input (sign, digits, exponent).
    Number(&'a str),
    /// A string value. Escape sequences are passed through raw.
    String(&'a str),
    /// An object member key; the pair becomes the parent of its value.
    PairName(&'a str),
    /// Start of an object.
    ObjectOpen,
    /// Start of an array.
    ArrayOpen,
}

/// Receiver for parse events: either the built-in [`TreeBuilder`] (DOM mode)
/// or a caller-supplied handler (SAX mode).
pub trait ParseSink {
    /// Opaque identifier threaded back as the `parent` of nested events.
    type Handle: Clone;

    /// Handles one event. `parent` is `None` exactly once per document, for
    /// the root value.
    ///
    /// The returned handle is retained only for [`ParseEvent::PairName`],
    /// [`ParseEvent::ObjectOpen`] and [`ParseEvent::ArrayOpen`]; handles
    /// returned for scalars are dropped. Returning `None` aborts parsing
    /// with a syntax error.
    fn event(&mut self, event: ParseEvent<'_>, parent: Option<&Self::Handle>)
    -> Option<Self::Handle>;

    /// Called when the owning context is reset.
    fn reset(&mut self) {}
}

/// The built-in sink for DOM mode: materializes events into a [`JsonValue`]
/// tree and keeps the root until the context's `tree_take`.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Option<JsonValue>,
}

impl TreeBuilder {
    pub(crate) fn has_root(&self) -> bool {
        self.root.is_some()
    }

    pub(crate) fn take_root(&mut self) -> Option<JsonValue> {
        self.root.take()
    }
}

impl ParseSink for TreeBuilder {
    type Handle = JsonValue;

    fn event(&mut self, event: ParseEvent<'_>, parent: Option<&JsonValue>) -> Option<JsonValue> {
        let value = match event {
            ParseEvent::Null => JsonValue::null(),
            ParseEvent::Boolean(flag) => JsonValue::boolean(flag),
            ParseEvent::Number(text) => JsonValue::number(text.parse().ok()?),
            ParseEvent::String(text) => JsonValue::string(text),
            ParseEvent::PairName(name) => JsonValue::pair(name),
            ParseEvent::ObjectOpen => JsonValue::object(),
            ParseEvent::ArrayOpen => JsonValue::array(),
        };
        match parent {
            Some(container) => container.attach_parsed(value.clone())?,
            None => self.root = Some(value.clone()),
        }
        Some(value)
    }

    fn reset(&mut self) {
        self.root = None;
    }
}
