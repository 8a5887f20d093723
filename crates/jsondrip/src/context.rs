//! Parse contexts: incremental feeding, status queries and lifecycle.

use crate::error::{JsonError, JsonErrorKind};
use crate::glue::TokenBuf;
use crate::lexer::LexState;
use crate::sink::{ParseSink, TreeBuilder};
use crate::syntax::SynState;
use crate::value::{JsonType, JsonValue};

/// A parse context generic over its event sink.
///
/// The context owns both state machines, the parent stack, the token buffer
/// and the position/error state, so parsing can stop between any two
/// characters and resume with the next chunk. One context parses exactly one
/// document; [`reset`](Self::reset) recycles it for another.
///
/// Contexts are single-threaded: all feeding happens on the calling thread,
/// with no interior synchronization.
pub struct JsonContextImpl<S: ParseSink> {
    pub(crate) sink: S,
    pub(crate) lex: Option<LexState>,
    pub(crate) syn: Option<SynState>,
    pub(crate) parent: Option<(S::Handle, JsonType)>,
    pub(crate) stack: Vec<(S::Handle, JsonType)>,
    pub(crate) glue: TokenBuf,
    pub(crate) glue_on: bool,
    pub(crate) error: Option<JsonError>,
    pub(crate) line: usize,
    pub(crate) col: usize,
}

/// A DOM-mode parse context using the built-in [`TreeBuilder`].
pub type JsonContext = JsonContextImpl<TreeBuilder>;

impl JsonContextImpl<TreeBuilder> {
    /// Creates a DOM-mode context. The parsed tree is collected internally
    /// and handed out once by [`tree_take`](Self::tree_take).
    #[must_use]
    pub fn dom() -> Self {
        Self::sax(TreeBuilder::default())
    }

    /// Takes ownership of the completed document tree.
    ///
    /// Returns `None` (and logs a diagnostic) if parsing is not complete or
    /// the tree was already taken.
    pub fn tree_take(&mut self) -> Option<JsonValue> {
        if !self.completed() {
            log::error!("taking the document tree from an erroneous or incomplete parse context");
            return None;
        }
        if !self.sink.has_root() {
            log::error!("document tree was already taken from this parse context");
            return None;
        }
        self.sink.take_root()
    }
}

impl<S: ParseSink> JsonContextImpl<S> {
    /// Creates a SAX-mode context delivering events to `sink`.
    pub fn sax(sink: S) -> Self {
        Self {
            sink,
            lex: Some(LexState::Initial),
            syn: Some(SynState::Entry),
            parent: None,
            stack: Vec::new(),
            glue: TokenBuf::new(),
            glue_on: false,
            error: None,
            line: 1,
            col: 1,
        }
    }

    /// Feeds the next chunk of input.
    ///
    /// Chunk boundaries may fall anywhere, including mid-token. An empty
    /// chunk does no work but still reports the current error state. Once an
    /// error is recorded the context is stuck: further feeding does nothing
    /// and returns the same error until [`reset`](Self::reset).
    ///
    /// The returned error is a convenience; completion has to be queried
    /// with [`completed`](Self::completed) / [`unfinished`](Self::unfinished).
    pub fn feed(&mut self, text: &str) -> Result<(), JsonError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        for ch in text.chars() {
            self.lex_dispatch(ch);
            if let Some(error) = &self.error {
                return Err(error.clone());
            }
            self.col += 1;
        }
        Ok(())
    }

    /// Current line, 1-based.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column, 1-based; reset on each newline. After an error this
    /// is frozen at the offending character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.col
    }

    /// The sticky error, if one was recorded.
    #[must_use]
    pub fn error(&self) -> Option<&JsonError> {
        self.error.as_ref()
    }

    /// Whether a single document was parsed to completion without error.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.syn == Some(SynState::End)
    }

    /// Whether the context still expects input: neither completed nor
    /// erroneous.
    #[must_use]
    pub fn unfinished(&self) -> bool {
        !self.completed() && self.error.is_none()
    }

    /// Returns the context to its freshly created state, ready for a new
    /// document. A completed-but-untaken tree is discarded.
    pub fn reset(&mut self) {
        self.lex = Some(LexState::Initial);
        self.syn = Some(SynState::Entry);
        self.parent = None;
        self.stack.clear();
        self.glue.clear();
        self.glue_on = false;
        self.error = None;
        self.line = 1;
        self.col = 1;
        self.sink.reset();
    }

    /// Consumes the context and returns its sink, with whatever the sink
    /// accumulated.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Records the first error at the current position; later errors are
    /// suppressed, the first diagnosis stands.
    pub(crate) fn record_error(&mut self, kind: JsonErrorKind) {
        if self.error.is_none() {
            self.error = Some(JsonError {
                kind,
                line: self.line,
                column: self.col,
            });
        }
    }
}

/// Parses a complete document in one call.
///
/// Returns the document tree, or `None` if parsing did not complete exactly
/// at the end of input (any error, or trailing unparsed input).
#[must_use]
pub fn parse(text: &str) -> Option<JsonValue> {
    let mut ctx = JsonContext::dom();
    let _ = ctx.feed(text);
    if ctx.completed() { ctx.tree_take() } else { None }
}
