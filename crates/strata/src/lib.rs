pub mod config;
pub use config::Config;

pub mod driver;
pub use driver::{Driver, Factory};

pub mod gateway;
pub use gateway::Gateway;

pub mod query;
pub use query::{Compose, Composer};

mod result;
pub use result::QueryResult;

pub use strata_core::{
    map, opt, record, schema, Error, Filter, FilterItem, Map, MapRef, Mapped, Opt, Record, Result,
    Schema, UpdateInstruction, Value,
};

pub use async_trait::async_trait;
