//! A streaming JSON parser built from two coupled state machines.
//!
//! Input is consumed incrementally — one byte or one megabyte at a time —
//! through a lexical scanner and a syntax analyzer that both keep their full
//! state on the parse context. A chunk boundary may fall in the middle of a
//! string, number or keyword; the machines simply continue where the last
//! character left them, so nothing is ever re-parsed or buffered beyond the
//! current token.
//!
//! Two modes share the same core:
//!
//! - **DOM**: [`JsonContext::dom`] materializes the document as a
//!   [`JsonValue`] tree, taken with [`JsonContext::tree_take`] after
//!   completion.
//! - **SAX**: [`JsonContextImpl::sax`] delivers one [`ParseEvent`] per
//!   semantic element to a caller-supplied [`ParseSink`] and builds nothing.
//!
//! ```
//! use jsondrip::JsonContext;
//!
//! let mut ctx = JsonContext::dom();
//! ctx.feed("{\"greeting\":\"hel").unwrap();
//! ctx.feed("lo\"}").unwrap();
//! assert!(ctx.completed());
//!
//! let tree = ctx.tree_take().unwrap();
//! assert_eq!(tree.to_string(), "{\"greeting\":\"hello\"}");
//! ```

mod context;
mod error;
mod glue;
mod lexer;
mod sink;
mod syntax;
mod value;

pub use context::{JsonContext, JsonContextImpl, parse};
pub use error::{JsonError, JsonErrorKind};
pub use sink::{ParseEvent, ParseSink, TreeBuilder};
pub use value::{Children, JsonFormat, JsonType, JsonValue};
