use crate::gateway::Source;
use strata_core::{map::ConfiguredMap, Error, Result};

use serde::Deserialize;
use url::Url;

/// How to build a gateway: where the data lives, which driver talks to it,
/// and how fields are mapped.
///
/// ```json
/// {
///     "url": "mongodb://localhost/shop",
///     "collection": "orders",
///     "map": {"id": "_id", "items[]": {"qty": "quantity"}}
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub url: String,

    /// Driver name. Detected from the URL scheme when missing.
    #[serde(default)]
    pub driver: Option<String>,

    /// Defaults to the last segment of the URL path.
    #[serde(default)]
    pub collection: Option<String>,

    #[serde(default)]
    pub map: Option<ConfiguredMap>,
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            driver: None,
            collection: None,
            map: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            Error::from(err).context(Error::invalid_configuration("malformed gateway configuration"))
        })
    }

    pub fn with_driver(self, driver: impl Into<String>) -> Self {
        Self {
            driver: Some(driver.into()),
            ..self
        }
    }

    pub fn with_collection(self, collection: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            ..self
        }
    }

    pub fn with_map(self, map: ConfiguredMap) -> Self {
        Self {
            map: Some(map),
            ..self
        }
    }

    pub fn parse_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|err| {
            Error::invalid_configuration(format!("invalid url `{}`: {err}", self.url))
        })
    }

    pub fn source(&self) -> Result<Source> {
        let url = self.parse_url()?;

        let collection = match &self.collection {
            Some(collection) => collection.clone(),
            None => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::invalid_configuration(format!("no collection given for `{}`", self.url))
                })?,
        };

        Ok(Source::new(collection).with_url(url))
    }
}
