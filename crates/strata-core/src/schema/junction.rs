use super::Matches;

/// The collection linking the two sides of a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junction {
    collection: String,
    related_matches: Matches,
}

impl Junction {
    /// `related_matches` pairs fields of the junction with fields of the
    /// related collection.
    pub fn new<I, K, V>(collection: impl Into<String>, related_matches: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            collection: collection.into(),
            related_matches: related_matches
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn related_matches(&self) -> &Matches {
        &self.related_matches
    }

    pub(super) fn with_related_matches(&self, related_matches: Matches) -> Self {
        Self {
            collection: self.collection.clone(),
            related_matches,
        }
    }
}
