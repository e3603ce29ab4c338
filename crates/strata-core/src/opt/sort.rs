#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    field: String,
    descending: bool,
}

impl SortField {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    fields: Vec<SortField>,
}

impl SortOption {
    pub fn new(fields: Vec<SortField>) -> Self {
        Self { fields }
    }

    /// Parses `["name", "~created"]` style sort keys.
    pub fn parse<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = keys
            .into_iter()
            .map(|key| {
                let key = key.as_ref().trim();
                match key.strip_prefix('~') {
                    Some(field) => SortField::desc(field.trim_start()),
                    None => SortField::asc(key),
                }
            })
            .collect();

        Self { fields }
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }
}
