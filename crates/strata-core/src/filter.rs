use crate::{Error, Record, Result, Value};

/// A single filter condition.
///
/// An empty operator means equality. Raw input keys such as `"age (min)"`
/// arrive as items with an empty operator and are split into field and
/// operator by the filter parser.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterItem {
    field: String,
    operator: String,
    value: Value,
}

impl FilterItem {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn with_field(self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self
        }
    }

    pub fn with_value(self, value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..self
        }
    }

    pub fn into_parts(self) -> (String, String, Value) {
        (self.field, self.operator, self.value)
    }
}

/// The filter passed to a gateway: a list of conditions that must all hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    items: Vec<FilterItem>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: FilterItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl From<Vec<FilterItem>> for Filter {
    fn from(items: Vec<FilterItem>) -> Self {
        Self { items }
    }
}

/// Each field of the record becomes an item with an unparsed key.
impl From<Record> for Filter {
    fn from(record: Record) -> Self {
        record
            .into_iter()
            .map(|(key, value)| FilterItem::new(key, "", value))
            .collect()
    }
}

impl TryFrom<Value> for Filter {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Record(record) => Ok(record.into()),
            Value::Null => Ok(Filter::new()),
            other => Err(crate::err!("filter must be a record, got {other:?}")),
        }
    }
}

impl TryFrom<serde_json::Value> for Filter {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Filter::try_from(Value::from(value))
    }
}

impl FromIterator<FilterItem> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Filter {
    type Item = FilterItem;
    type IntoIter = std::vec::IntoIter<FilterItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
