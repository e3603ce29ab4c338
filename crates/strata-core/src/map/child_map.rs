use super::{Map, MapRef, Mapped};
use crate::Value;

/// Applies a map to the value at one field of an item.
///
/// A field written as `items[]` holds many values: the inner map is applied
/// to each element of the list (or each value of a keyed record).
#[derive(Debug, Clone)]
pub struct ChildMap {
    field: String,
    inner: MapRef,
    many: bool,
}

impl ChildMap {
    pub fn new(field: &str, inner: MapRef) -> Self {
        let (field, many) = match field.strip_suffix("[]") {
            Some(field) => (field, true),
            None => (field, false),
        };

        Self {
            field: field.to_string(),
            inner,
            many,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_many(&self) -> bool {
        self.many
    }

    pub fn inner(&self) -> &MapRef {
        &self.inner
    }

    /// Splits a field below this child into the element index, for many
    /// children addressed as `items.3.name`, and the inner field.
    fn split<'a>(&self, field: &'a str) -> Option<(Option<&'a str>, &'a str)> {
        let rest = field
            .strip_prefix(self.field.as_str())?
            .strip_prefix('.')?;

        Some(match rest.split_once('.') {
            Some((index, rest)) if self.many && index.parse::<usize>().is_ok() => {
                (Some(index), rest)
            }
            _ => (None, rest),
        })
    }

    fn join(&self, index: Option<&str>, mapped: &str) -> String {
        match index {
            Some(index) => format!("{}.{index}.{mapped}", self.field),
            None => format!("{}.{mapped}", self.field),
        }
    }

    fn map_value(&self, item: &Value, f: impl Fn(&dyn Map, &Value) -> Value) -> Value {
        let Some(value) = item.get_path(&self.field) else {
            return item.clone();
        };

        let mapped = if self.many {
            map_each(value, |element| f(&*self.inner, element))
        } else {
            f(&*self.inner, value)
        };

        if mapped.is_same(value) {
            return item.clone();
        }

        let mut item = item.clone();
        item.set_path(&self.field, mapped);
        item
    }
}

impl Map for ChildMap {
    fn apply_to_field(&self, field: &str) -> Mapped {
        let Some((index, rest)) = self.split(field) else {
            return Mapped::Unmapped;
        };

        match self.inner.apply_to_field(rest) {
            Mapped::Field(mapped) => Mapped::Field(self.join(index, &mapped)),
            other => other,
        }
    }

    fn apply_to_pair(&self, field: &str, value: &Value) -> Option<Vec<(String, Value)>> {
        // The whole child value is mapped like a stored one
        if field == self.field {
            let mapped = if self.many {
                map_each(value, |element| self.inner.apply(element))
            } else {
                self.inner.apply(value)
            };
            return (!mapped.is_same(value)).then(|| vec![(field.to_string(), mapped)]);
        }

        let (index, rest) = self.split(field)?;
        let pairs = self.inner.apply_to_pair(rest, value)?;

        Some(
            pairs
                .into_iter()
                .map(|(mapped, value)| (self.join(index, &mapped), value))
                .collect(),
        )
    }

    fn apply(&self, item: &Value) -> Value {
        self.map_value(item, |map, value| map.apply(value))
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        self.map_value(item, |map, value| map.apply_inverse(value))
    }
}

/// Maps every element, returning the original value when nothing changed.
fn map_each(value: &Value, f: impl Fn(&Value) -> Value) -> Value {
    match value {
        Value::List(items) => {
            let mapped: Vec<Value> = items.iter().map(&f).collect();
            if mapped.iter().zip(items).all(|(a, b)| a.is_same(b)) {
                return value.clone();
            }
            Value::List(mapped)
        }
        Value::Record(record) => {
            let mapped: Vec<(&String, Value)> =
                record.iter().map(|(key, element)| (key, f(element))).collect();
            if mapped
                .iter()
                .all(|(key, element)| record.get(key).is_some_and(|b| element.is_same(b)))
            {
                return value.clone();
            }
            Value::Record(mapped.into_iter().map(|(key, element)| (key.clone(), element)).collect())
        }
        other => other.clone(),
    }
}
