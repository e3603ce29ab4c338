use super::Value;

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// An ordered set of named fields.
///
/// Records share their storage: cloning is cheap and the first write to a
/// shared record copies it. Two records are equal when they hold the same
/// fields with equal values, regardless of field order.
#[derive(Clone, Default, PartialEq)]
pub struct Record {
    fields: Arc<IndexMap<String, Value>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a mutable reference to a field, unsharing the record first.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        if !self.fields.contains_key(field) {
            return None;
        }
        Arc::make_mut(&mut self.fields).get_mut(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        Arc::make_mut(&mut self.fields).insert(field.into(), value.into())
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        if !self.fields.contains_key(field) {
            return None;
        }
        Arc::make_mut(&mut self.fields).shift_remove(field)
    }

    /// Returns the field's value, inserting `Null` when it is missing.
    pub(crate) fn entry(&mut self, field: &str) -> &mut Value {
        Arc::make_mut(&mut self.fields)
            .entry(field.to_string())
            .or_insert(Value::Null)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Returns `true` when both records share the same storage.
    pub fn ptr_eq(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: Arc::new(
                iter.into_iter()
                    .map(|(field, value)| (field.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        Arc::unwrap_or_clone(self.fields).into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_until_written() {
        let original: Record = [("a", 1)].into_iter().collect();
        let mut copy = original.clone();
        assert!(copy.ptr_eq(&original));

        copy.insert("b", 2);
        assert!(!copy.ptr_eq(&original));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn removing_missing_field_keeps_sharing() {
        let original: Record = [("a", 1)].into_iter().collect();
        let mut copy = original.clone();
        assert_eq!(copy.remove("b"), None);
        assert!(copy.ptr_eq(&original));
    }

    #[test]
    fn equality_ignores_order() {
        let a: Record = [("a", 1), ("b", 2)].into_iter().collect();
        let b: Record = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(a, b);
    }
}
