//! Single-field encoding, the atomic building block of every request.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Loosely-typed input mapping (field name → value), as callers supply it.
pub type FieldMap = BTreeMap<String, Value>;

/// An already-encoded piece of XML. Fragments compose by concatenation
/// ([`XmlFragment::push`]) and by wrapping ([`XmlFragment::wrap`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlFragment(String);

impl XmlFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap text that is already XML. No checking is done.
    pub fn raw(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    pub fn push(&mut self, other: XmlFragment) {
        self.0.push_str(&other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for XmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The string form of an input value.
///
/// Strings pass through, numbers use their JSON text, booleans become the
/// `Y`/`N` flags the API expects, null is empty and composite values are
/// rendered as compact JSON.
pub fn field_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("Y"),
        Value::Bool(false) => Cow::Borrowed("N"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Cut `value` to at most `max_len` characters. Never fails.
pub fn truncate(value: &str, max_len: usize) -> &str {
    match value.char_indices().nth(max_len) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Encode `\n<NAME>value</NAME>`, truncating the value first when a limit is
/// given. Values are emitted as-is, without escaping.
pub fn encode_field(name: &str, value: &str, max_len: Option<usize>) -> XmlFragment {
    let value = match max_len {
        Some(max) => truncate(value, max),
        None => value,
    };
    XmlFragment(format!("\n<{name}>{value}</{name}>"))
}
