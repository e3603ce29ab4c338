use super::{Record, Value};

use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        match src {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(v) => v
                .as_i64()
                .map(Self::I64)
                .or_else(|| v.as_f64().map(Self::F64))
                .unwrap_or(Self::Null),
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(v) => Self::List(v.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(v) => Self::Record(
                v.into_iter()
                    .map(|(field, value)| (field, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(src: Value) -> Self {
        match src {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(v),
            Value::I64(v) => Self::from(v),
            Value::F64(v) => serde_json::Number::from_f64(v)
                .map(Self::Number)
                .unwrap_or(Self::Null),
            Value::String(v) => Self::String(v),
            Value::List(v) => Self::Array(v.into_iter().map(Self::from).collect()),
            Value::Record(v) => Self::Object(
                v.into_iter()
                    .map(|(field, value)| (field, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Record {
    /// Converts a JSON object into a record. Anything else becomes an empty record.
    fn from(src: serde_json::Value) -> Self {
        match Value::from(src) {
            Value::Record(record) => record,
            _ => Record::new(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::List(v) => serializer.collect_seq(v),
            Value::Record(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}
