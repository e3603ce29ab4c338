/// A projection: either the fields to return, or the fields to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsOption {
    fields: Vec<String>,
    negate: bool,
}

impl FieldsOption {
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            negate: false,
        }
    }

    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            negate: true,
            ..Self::include(fields)
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns `true` for an omit projection.
    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Returns `true` when `field`, or one of its parents, is listed.
    pub fn covers(&self, field: &str) -> bool {
        self.fields.iter().any(|listed| {
            field == listed
                || field
                    .strip_prefix(listed.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}
