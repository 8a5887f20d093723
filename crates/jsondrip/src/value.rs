//! The document value tree: construction, traversal, mutation and
//! serialization.
//!
//! Nodes are reference counted; a [`JsonValue`] is a cheap cloneable handle
//! to one node. Every node keeps a weak back-reference to its owner, which
//! backs the single-owner rule: a value that already sits inside a container
//! cannot be attached anywhere else, and the failed attempt leaves both
//! containers untouched.

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::rc::{Rc, Weak};

/// Discriminates the seven node kinds of a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    /// The `null` literal.
    Null,
    /// A double-precision number.
    Number,
    /// A string value.
    String,
    /// A `true`/`false` value.
    Boolean,
    /// An object member: a key plus its value.
    Pair,
    /// An ordered collection of pairs.
    Object,
    /// An ordered collection of values.
    Array,
}

/// Output styles for [`JsonValue::to_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// One line, no whitespace between delimiters.
    Packed,
    /// Human-readable: two spaces of indent per nesting level.
    Basic,
}

/// A handle to one node of a document tree.
///
/// Handles share the node: cloning a `JsonValue` does not copy the tree.
/// Dropping the last handle to an unattached node frees it and, recursively,
/// every child it owns.
#[derive(Clone)]
pub struct JsonValue {
    node: Rc<RefCell<Node>>,
}

struct Node {
    parent: Option<Weak<RefCell<Node>>>,
    kind: NodeKind,
}

enum NodeKind {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Pair { name: String, value: Option<JsonValue> },
    Object(Vec<JsonValue>),
    Array(Vec<JsonValue>),
}

impl JsonValue {
    fn from_kind(kind: NodeKind) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node { parent: None, kind })),
        }
    }

    /// Creates a null value.
    #[must_use]
    pub fn null() -> Self {
        Self::from_kind(NodeKind::Null)
    }

    /// Creates a boolean value.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::from_kind(NodeKind::Boolean(value))
    }

    /// Creates a number value.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::from_kind(NodeKind::Number(value))
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::String(value.into()))
    }

    /// Creates an empty object.
    #[must_use]
    pub fn object() -> Self {
        Self::from_kind(NodeKind::Object(Vec::new()))
    }

    /// Creates an empty array.
    #[must_use]
    pub fn array() -> Self {
        Self::from_kind(NodeKind::Array(Vec::new()))
    }

    /// A pair with no value yet; only the parser builds these, and the
    /// grammar guarantees the value arrives before the pair closes.
    pub(crate) fn pair(name: &str) -> Self {
        Self::from_kind(NodeKind::Pair {
            name: name.to_owned(),
            value: None,
        })
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> JsonType {
        match self.node.borrow().kind {
            NodeKind::Null => JsonType::Null,
            NodeKind::Boolean(_) => JsonType::Boolean,
            NodeKind::Number(_) => JsonType::Number,
            NodeKind::String(_) => JsonType::String,
            NodeKind::Pair { .. } => JsonType::Pair,
            NodeKind::Object(_) => JsonType::Object,
            NodeKind::Array(_) => JsonType::Array,
        }
    }

    /// Returns the number payload, or `None` on a kind mismatch.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self.node.borrow().kind {
            NodeKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the boolean payload, or `None` on a kind mismatch.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self.node.borrow().kind {
            NodeKind::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Returns a copy of the string payload, or `None` on a kind mismatch.
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        match &self.node.borrow().kind {
            NodeKind::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Replaces the number payload. Returns `false` on a kind mismatch.
    pub fn set_number(&self, value: f64) -> bool {
        match &mut self.node.borrow_mut().kind {
            NodeKind::Number(n) => {
                *n = value;
                true
            }
            _ => false,
        }
    }

    /// Replaces the boolean payload. Returns `false` on a kind mismatch.
    pub fn set_boolean(&self, value: bool) -> bool {
        match &mut self.node.borrow_mut().kind {
            NodeKind::Boolean(b) => {
                *b = value;
                true
            }
            _ => false,
        }
    }

    /// Replaces the string payload. Returns `false` on a kind mismatch.
    pub fn set_string(&self, value: &str) -> bool {
        match &mut self.node.borrow_mut().kind {
            NodeKind::String(s) => {
                s.clear();
                s.push_str(value);
                true
            }
            _ => false,
        }
    }

    /// Returns the key of a pair, or `None` on a kind mismatch.
    #[must_use]
    pub fn pair_name(&self) -> Option<String> {
        match &self.node.borrow().kind {
            NodeKind::Pair { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// Returns the value of a pair, or `None` on a kind mismatch.
    #[must_use]
    pub fn pair_value(&self) -> Option<JsonValue> {
        match &self.node.borrow().kind {
            NodeKind::Pair { value, .. } => value.clone(),
            _ => None,
        }
    }

    /// Number of children of an object or array; 0 for any other kind.
    #[must_use]
    pub fn count(&self) -> usize {
        match &self.node.borrow().kind {
            NodeKind::Object(children) | NodeKind::Array(children) => children.len(),
            _ => 0,
        }
    }

    /// Returns the child at `index`, in insertion order. Object children are
    /// pairs.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<JsonValue> {
        match &self.node.borrow().kind {
            NodeKind::Object(children) | NodeKind::Array(children) => {
                children.get(index).cloned()
            }
            _ => None,
        }
    }

    /// Detaches and drops the child at `index` together with its subtree.
    /// Returns `false` if `index` is out of range or the kind mismatches.
    pub fn nth_remove(&self, index: usize) -> bool {
        let removed = match &mut self.node.borrow_mut().kind {
            NodeKind::Object(children) | NodeKind::Array(children) => {
                if index >= children.len() {
                    return false;
                }
                children.remove(index)
            }
            _ => return false,
        };
        removed.node.borrow_mut().parent = None;
        true
    }

    /// Iterates over the children of an object or array, in insertion order.
    /// Empty for any other kind.
    #[must_use]
    pub fn iter(&self) -> Children {
        let items = match &self.node.borrow().kind {
            NodeKind::Object(children) | NodeKind::Array(children) => children.clone(),
            _ => Vec::new(),
        };
        Children {
            items: items.into_iter(),
        }
    }

    /// Appends `key: value` to the end of an object, returning the new pair.
    ///
    /// Fails if this is not an object, if `value` is itself a pair, or if
    /// `value` already belongs to a container (the single-owner rule); on
    /// failure nothing is mutated.
    pub fn object_append(&self, key: &str, value: JsonValue) -> Option<JsonValue> {
        if self.kind() != JsonType::Object || value.kind() == JsonType::Pair {
            log::warn!("object append expects an object container and a non-pair value");
            return None;
        }
        if !self.guard_attach(&value) {
            return None;
        }
        let pair = JsonValue::pair(key);
        pair.set_pair_value(value);
        self.push_child(pair.clone());
        Some(pair)
    }

    /// Inserts `key: value` so the new pair sits at `index`, returning it.
    ///
    /// `index` must name an existing child; index 0 on an empty object
    /// appends. Same failure rules as [`JsonValue::object_append`].
    pub fn object_insert(&self, index: usize, key: &str, value: JsonValue) -> Option<JsonValue> {
        if self.kind() != JsonType::Object || value.kind() == JsonType::Pair {
            log::warn!("object insert expects an object container and a non-pair value");
            return None;
        }
        if !self.insert_in_range(index) {
            log::warn!("object insert position {index} is out of range");
            return None;
        }
        if !self.guard_attach(&value) {
            return None;
        }
        let pair = JsonValue::pair(key);
        pair.set_pair_value(value);
        self.insert_child(index, pair.clone());
        Some(pair)
    }

    /// Appends a value to the end of an array, returning it.
    ///
    /// Fails if this is not an array, if `value` is a pair, or if `value`
    /// already belongs to a container; on failure nothing is mutated.
    pub fn array_append(&self, value: JsonValue) -> Option<JsonValue> {
        if self.kind() != JsonType::Array || value.kind() == JsonType::Pair {
            log::warn!("array append expects an array container and a non-pair value");
            return None;
        }
        if !self.guard_attach(&value) {
            return None;
        }
        self.push_child(value.clone());
        Some(value)
    }

    /// Inserts a value at `index` in an array, returning it.
    ///
    /// `index` must name an existing child; index 0 on an empty array
    /// appends. Same failure rules as [`JsonValue::array_append`].
    pub fn array_insert(&self, index: usize, value: JsonValue) -> Option<JsonValue> {
        if self.kind() != JsonType::Array || value.kind() == JsonType::Pair {
            log::warn!("array insert expects an array container and a non-pair value");
            return None;
        }
        if !self.insert_in_range(index) {
            log::warn!("array insert position {index} is out of range");
            return None;
        }
        if !self.guard_attach(&value) {
            return None;
        }
        self.insert_child(index, value.clone());
        Some(value)
    }

    /// Walks nested objects by key, returning the value of the first pair
    /// matching each key in turn. `None` for an empty key list, a kind
    /// mismatch along the way, or a missing key.
    #[must_use]
    pub fn lookup(&self, keys: &[&str]) -> Option<JsonValue> {
        if keys.is_empty() {
            return None;
        }
        let mut cursor = self.clone();
        for key in keys {
            if cursor.kind() != JsonType::Object {
                return None;
            }
            let mut found = None;
            for pair in cursor.iter() {
                if pair.pair_name().as_deref() == Some(*key) {
                    found = pair.pair_value();
                    break;
                }
            }
            cursor = found?;
        }
        Some(cursor)
    }

    /// Serializes the subtree in the requested format.
    #[must_use]
    pub fn to_text(&self, format: JsonFormat) -> String {
        let mut out = String::new();
        let _ = write_value(self, &mut out, 0, format == JsonFormat::Basic);
        out
    }

    // ---- internal plumbing -------------------------------------------------

    /// Attaches a freshly parsed child below this node. Used only by the
    /// tree builder, which never re-attaches an owned value.
    pub(crate) fn attach_parsed(&self, child: JsonValue) -> Option<()> {
        child.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        match &mut self.node.borrow_mut().kind {
            NodeKind::Pair { value, .. } => *value = Some(child),
            NodeKind::Object(children) | NodeKind::Array(children) => children.push(child),
            _ => return None,
        }
        Some(())
    }

    fn set_pair_value(&self, value: JsonValue) {
        value.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        if let NodeKind::Pair { value: slot, .. } = &mut self.node.borrow_mut().kind {
            *slot = Some(value);
        }
    }

    fn push_child(&self, child: JsonValue) {
        child.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        if let NodeKind::Object(children) | NodeKind::Array(children) =
            &mut self.node.borrow_mut().kind
        {
            children.push(child);
        }
    }

    fn insert_child(&self, index: usize, child: JsonValue) {
        child.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        if let NodeKind::Object(children) | NodeKind::Array(children) =
            &mut self.node.borrow_mut().kind
        {
            if index >= children.len() {
                children.push(child);
            } else {
                children.insert(index, child);
            }
        }
    }

    /// Valid insertion slots are existing child positions, plus 0 on an
    /// empty container (which appends).
    fn insert_in_range(&self, index: usize) -> bool {
        index == 0 || index < self.count()
    }

    fn is_attached(&self) -> bool {
        match &self.node.borrow().parent {
            Some(weak) => weak.upgrade().is_some(),
            None => false,
        }
    }

    fn guard_attach(&self, value: &JsonValue) -> bool {
        if value.is_attached() {
            log::error!("value already belongs to another container; refusing to attach");
            return false;
        }
        // Attaching a node below itself would make the tree cyclic.
        let mut cursor = Some(Rc::clone(&self.node));
        while let Some(node) = cursor {
            if Rc::ptr_eq(&node, &value.node) {
                log::error!("value is an ancestor of the target container; refusing to attach");
                return false;
            }
            cursor = node.borrow().parent.as_ref().and_then(Weak::upgrade);
        }
        true
    }
}

/// Iterator over a container's children, in insertion order.
///
/// The iterator snapshots the child list; mutating the container while
/// iterating affects the tree, not the snapshot.
pub struct Children {
    items: std::vec::IntoIter<JsonValue>,
}

impl Iterator for Children {
    type Item = JsonValue;

    fn next(&mut self) -> Option<JsonValue> {
        self.items.next()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_number<W: fmt::Write>(n: f64, out: &mut W) -> fmt::Result {
    if n.ceil() == n {
        write!(out, "{}", n as i64)
    } else {
        write!(out, "{n:.2}")
    }
}

fn write_value<W: fmt::Write>(
    value: &JsonValue,
    out: &mut W,
    indent: usize,
    pretty: bool,
) -> fmt::Result {
    let node = value.node.borrow();
    match &node.kind {
        NodeKind::Null => out.write_str("null"),
        NodeKind::Boolean(b) => out.write_str(if *b { "true" } else { "false" }),
        NodeKind::Number(n) => write_number(*n, out),
        // Stored text kept escape sequences raw, so none are added here.
        NodeKind::String(s) => write!(out, "\"{s}\""),
        NodeKind::Pair { name, value } => {
            write!(out, "\"{name}\":")?;
            if let Some(value) = value {
                if pretty && value.kind() == JsonType::Object {
                    write!(out, "\n{:indent$}", "")?;
                }
                write_value(value, out, indent, pretty)?;
            }
            Ok(())
        }
        NodeKind::Array(children) => {
            out.write_char('[')?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.write_str(if pretty { ", " } else { "," })?;
                }
                write_value(child, out, indent, pretty)?;
            }
            out.write_char(']')
        }
        NodeKind::Object(children) => {
            if children.is_empty() {
                return out.write_str("{}");
            }
            let inner = indent + 2;
            out.write_char('{')?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                if pretty {
                    write!(out, "\n{:inner$}", "")?;
                }
                write_value(child, out, inner, pretty)?;
            }
            if pretty {
                write!(out, "\n{:indent$}", "")?;
            }
            out.write_char('}')
        }
    }
}

impl fmt::Display for JsonValue {
    /// Packed serialization of the subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f, 0, false)
    }
}

impl fmt::Debug for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonValue({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonFormat, JsonType, JsonValue};

    fn packed(value: &JsonValue) -> String {
        value.to_text(JsonFormat::Packed)
    }

    #[test]
    fn number_formatting() {
        assert_eq!(packed(&JsonValue::number(2.0)), "2");
        assert_eq!(packed(&JsonValue::number(3.45)), "3.45");
        assert_eq!(packed(&JsonValue::number(-467.0)), "-467");
        assert_eq!(packed(&JsonValue::number(0.5)), "0.50");
        assert_eq!(packed(&JsonValue::number(-0.125)), "-0.12");
        assert_eq!(packed(&JsonValue::number(0.0)), "0");
    }

    #[test]
    fn scalar_accessors_check_kind() {
        let n = JsonValue::number(7.0);
        assert_eq!(n.kind(), JsonType::Number);
        assert_eq!(n.as_number(), Some(7.0));
        assert_eq!(n.as_boolean(), None);
        assert_eq!(n.as_string(), None);
        assert!(!n.set_boolean(true));
        assert!(n.set_number(8.0));
        assert_eq!(n.as_number(), Some(8.0));

        let s = JsonValue::string("hi");
        assert!(s.set_string("bye"));
        assert_eq!(s.as_string().as_deref(), Some("bye"));
        assert!(!s.set_number(1.0));
    }

    #[test]
    fn append_builds_in_insertion_order() {
        let obj = JsonValue::object();
        assert!(obj.object_append("a", JsonValue::number(1.0)).is_some());
        assert!(obj.object_append("b", JsonValue::boolean(false)).is_some());
        assert_eq!(obj.count(), 2);
        assert_eq!(packed(&obj), "{\"a\":1,\"b\":false}");

        let arr = JsonValue::array();
        assert!(arr.array_append(JsonValue::null()).is_some());
        assert!(arr.array_append(JsonValue::string("x")).is_some());
        assert_eq!(packed(&arr), "[null,\"x\"]");
    }

    #[test]
    fn insert_requires_an_existing_slot() {
        let arr = JsonValue::array();
        assert!(arr.array_insert(1, JsonValue::number(1.0)).is_none());
        assert!(arr.array_insert(0, JsonValue::number(1.0)).is_some());
        // Inserting at count() is out of range on a non-empty container.
        assert!(arr.array_insert(1, JsonValue::number(2.0)).is_none());
        assert!(arr.array_insert(0, JsonValue::number(0.0)).is_some());
        assert_eq!(packed(&arr), "[0,1]");
    }

    #[test]
    fn single_owner_rule() {
        let a = JsonValue::array();
        let b = JsonValue::array();
        let v = JsonValue::number(4.0);
        assert!(a.array_append(v.clone()).is_some());
        assert!(b.array_append(v.clone()).is_none());
        assert!(a.array_append(v).is_none());
        assert_eq!(a.count(), 1);
        assert_eq!(b.count(), 0);
    }

    #[test]
    fn detached_value_can_be_reattached() {
        let a = JsonValue::array();
        let v = JsonValue::number(4.0);
        assert!(a.array_append(v.clone()).is_some());
        assert!(a.nth_remove(0));
        let b = JsonValue::array();
        assert!(b.array_append(v).is_some());
        assert_eq!(packed(&b), "[4]");
    }

    #[test]
    fn cycles_are_refused() {
        let arr = JsonValue::array();
        assert!(arr.array_append(arr.clone()).is_none());

        let outer = JsonValue::array();
        let inner = JsonValue::array();
        assert!(outer.array_append(inner.clone()).is_some());
        assert!(inner.array_append(outer.clone()).is_none());
        assert_eq!(inner.count(), 0);
    }

    #[test]
    fn pairs_are_not_container_payload() {
        let obj = JsonValue::object();
        let pair = obj.object_append("k", JsonValue::null()).unwrap();
        assert_eq!(pair.kind(), JsonType::Pair);
        let arr = JsonValue::array();
        assert!(obj.object_append("p", pair.clone()).is_none());
        assert!(arr.array_append(pair).is_none());
    }

    #[test]
    fn basic_format_indents_object_members() {
        let obj = JsonValue::object();
        obj.object_append("a", JsonValue::number(1.0));
        let nested = JsonValue::object();
        nested.object_append("b", JsonValue::array());
        obj.object_append("n", nested);
        assert_eq!(
            obj.to_text(JsonFormat::Basic),
            "{\n  \"a\":1,\n  \"n\":\n  {\n    \"b\":[]\n  }\n}"
        );
    }

    #[test]
    fn basic_format_separates_array_members() {
        let arr = JsonValue::array();
        arr.array_append(JsonValue::number(1.0));
        arr.array_append(JsonValue::boolean(true));
        arr.array_append(JsonValue::string("z"));
        assert_eq!(arr.to_text(JsonFormat::Basic), "[1, true, \"z\"]");
    }
}
