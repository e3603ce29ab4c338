use super::{Map, Mapped};
use crate::Value;

/// The identity map.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMap;

impl Map for NoMap {
    fn apply_to_field(&self, _field: &str) -> Mapped {
        Mapped::Unmapped
    }

    fn apply(&self, item: &Value) -> Value {
        item.clone()
    }

    fn apply_inverse(&self, item: &Value) -> Value {
        item.clone()
    }

    fn is_identity(&self) -> bool {
        true
    }
}
