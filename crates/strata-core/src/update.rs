use crate::{Record, Value};

pub const SET: &str = "set";
pub const INC: &str = "inc";
pub const PUSH: &str = "push";
pub const PULL: &str = "pull";
pub const UNSET: &str = "unset";

/// An update operator applied to a set of field/value pairs, e.g. `set {name: "Ada"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInstruction {
    operator: String,
    pairs: Record,
}

impl UpdateInstruction {
    pub fn new(operator: impl Into<String>, pairs: Record) -> Self {
        Self {
            operator: operator.into(),
            pairs,
        }
    }

    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(SET, field, value)
    }

    pub fn inc(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(INC, field, value)
    }

    pub fn push(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(PUSH, field, value)
    }

    pub fn pull(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(PULL, field, value)
    }

    pub fn unset<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            UNSET,
            fields.into_iter().map(|field| (field.into(), true)).collect(),
        )
    }

    fn single(operator: &str, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut pairs = Record::new();
        pairs.insert(field, value);
        Self::new(operator, pairs)
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn pairs(&self) -> &Record {
        &self.pairs
    }

    pub fn with_pairs(self, pairs: Record) -> Self {
        Self { pairs, ..self }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
