use std::collections::BTreeMap;

use crate::runtime::value::format_number;
use crate::syntax::splitter::is_ident_byte;

/// Identifier → number. Entries are only ever overwritten, never removed,
/// until the owning session starts a new parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(BTreeMap<String, f64>);

impl Variables {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn clear(&mut self) { self.0.clear(); }

    /// Replace every whole-word occurrence of a known variable in `text` with
    /// its current value. Words are maximal runs of `[A-Za-z0-9_]`.
    pub fn substitute(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < bytes.len() {
            if is_ident_byte(bytes[i]) {
                let start = i;
                while i < bytes.len() && is_ident_byte(bytes[i]) { i += 1; }
                let word = &text[start..i];
                match self.get(word) {
                    Some(v) => out.push_str(&format_number(v)),
                    None => out.push_str(word),
                }
            } else {
                let start = i;
                while i < bytes.len() && !is_ident_byte(bytes[i]) { i += 1; }
                out.push_str(&text[start..i]);
            }
        }
        out
    }
}
