use crate::{MapRef, Value};

use std::sync::Arc;

/// The value of a setting option. Field maps are carried as shared handles.
#[derive(Debug, Clone)]
pub enum Setting {
    Value(Value),
    Map(MapRef),
}

impl Setting {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Self::Map(map) => Some(map),
            Self::Value(_) => None,
        }
    }
}

impl PartialEq for Setting {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingOption {
    name: String,
    value: Setting,
}

impl SettingOption {
    pub fn new(name: impl Into<String>, value: Setting) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Setting {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOption {
    name: String,
}

impl FlagOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
