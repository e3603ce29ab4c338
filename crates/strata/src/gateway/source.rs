use url::Url;

/// The storage location a gateway and its services work on: a named
/// collection, optionally on a server given by URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    collection: String,
    url: Option<Url>,
}

impl Source {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            url: None,
        }
    }

    pub fn with_url(self, url: Url) -> Self {
        Self {
            url: Some(url),
            ..self
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}
