//! Ordered, immutable set of sensitive field names.

use std::fmt;
use std::sync::Arc;

/// Field names whose values must be redacted.
///
/// Insertion order is preserved and duplicates are kept as given. The set is
/// immutable after construction; clones share the same backing storage.
/// An empty set is valid and makes every redactor the identity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldSet {
    fields: Arc<[String]>,
}

impl FieldSet {
    /// Build a field set from any sequence of names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self {
            fields: fields.into(),
        }
    }

    /// An empty field set.
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Iterate field names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(String::as_str)
    }

    /// Number of field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set holds no names.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `field` is one of the names.
    pub fn contains(&self, field: &str) -> bool {
        self.iter().any(|f| f == field)
    }

    /// Borrow the names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}
