use crate::{
    gateway::{Blackhole, Gateway},
    Config,
};
use strata_core::{Error, Result, Value};

use std::{fmt::Debug, sync::Arc};
use url::Url;

/// Builds gateways for one kind of storage.
pub trait Driver: Debug + Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Returns `true` when the driver can connect to `url`.
    fn handles(&self, url: &Url) -> bool;

    fn create(&self, config: &Config) -> Result<Arc<dyn Gateway<Value>>>;
}

/// Creates gateways from configuration using the registered drivers.
#[derive(Debug, Clone)]
pub struct Factory {
    drivers: Vec<Arc<dyn Driver>>,
}

impl Factory {
    /// A factory with the built-in `blackhole` driver registered.
    pub fn new() -> Self {
        Self::empty().with_driver(BlackholeDriver)
    }

    pub fn empty() -> Self {
        Self { drivers: vec![] }
    }

    pub fn with_driver(mut self, driver: impl Driver) -> Self {
        self.drivers.push(Arc::new(driver));
        self
    }

    /// The driver named in the configuration, or else the single driver
    /// handling the URL.
    pub fn driver_for(&self, config: &Config) -> Result<&dyn Driver> {
        if let Some(name) = &config.driver {
            return self
                .drivers
                .iter()
                .find(|driver| driver.name() == name.as_str())
                .map(|driver| &**driver)
                .ok_or_else(|| Error::invalid_configuration(format!("unknown driver `{name}`")));
        }

        let url = config.parse_url()?;
        let candidates: Vec<&Arc<dyn Driver>> = self
            .drivers
            .iter()
            .filter(|driver| driver.handles(&url))
            .collect();

        match candidates.as_slice() {
            [driver] => Ok(&***driver),
            [] => Err(Error::invalid_configuration(format!(
                "no driver for scheme `{}`",
                url.scheme()
            ))),
            _ => Err(Error::invalid_configuration(format!(
                "ambiguous driver for scheme `{}`: {}",
                url.scheme(),
                candidates
                    .iter()
                    .map(|driver| driver.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    pub fn create(&self, config: &Config) -> Result<Arc<dyn Gateway<Value>>> {
        let driver = self.driver_for(config)?;
        tracing::debug!(driver = driver.name(), url = %config.url, "creating gateway");
        driver.create(config)
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles `blackhole:` URLs with a [`Blackhole`] gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackholeDriver;

impl Driver for BlackholeDriver {
    fn name(&self) -> &str {
        "blackhole"
    }

    fn handles(&self, url: &Url) -> bool {
        url.scheme() == "blackhole"
    }

    fn create(&self, _config: &Config) -> Result<Arc<dyn Gateway<Value>>> {
        Ok(Arc::new(Blackhole::<Value>::new()))
    }
}
