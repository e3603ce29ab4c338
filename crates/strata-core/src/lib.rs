#[macro_use]
mod macros;

mod error;
pub use error::{Error, IntoError};

pub mod filter;
pub use filter::{Filter, FilterItem};

pub mod map;
pub use map::{Map, MapRef, Mapped};

pub mod opt;
pub use opt::Opt;

pub mod schema;
pub use schema::Schema;

pub mod update;
pub use update::UpdateInstruction;

pub mod value;
pub use value::{Record, Value};

/// A Result type alias that uses Strata's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
