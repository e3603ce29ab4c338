/// A sub-document stored inside the items of a collection.
///
/// The sub-document is described by a collection of its own, whose map is
/// applied at `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    field: String,
    collection: String,
    many: bool,
}

impl Embedded {
    /// A single sub-document at `field`.
    pub fn one(field: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            collection: collection.into(),
            many: false,
        }
    }

    /// A list of sub-documents at `field`.
    pub fn many(field: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            many: true,
            ..Self::one(field, collection)
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn is_many(&self) -> bool {
        self.many
    }

    /// The field as written for a nested map: `field[]` for lists.
    pub fn map_field(&self) -> String {
        if self.many {
            format!("{}[]", self.field)
        } else {
            self.field.clone()
        }
    }
}
