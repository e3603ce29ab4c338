use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// What a save does when an item with the same identity already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Fail the save
    Fail,

    /// Keep the existing item
    Ignore,

    /// Replace the existing item
    Replace,

    /// Merge the new fields into the existing item
    Update,
}

impl ConflictResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "conflict",
            Self::Ignore => "ignore",
            Self::Replace => "replace",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictResolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "conflict" => Ok(Self::Fail),
            "ignore" => Ok(Self::Ignore),
            "replace" => Ok(Self::Replace),
            "update" => Ok(Self::Update),
            _ => Err(crate::err!("unknown conflict resolution `{s}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictResolutionOption {
    resolution: ConflictResolution,
}

impl ConflictResolutionOption {
    pub fn new(resolution: ConflictResolution) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> ConflictResolution {
        self.resolution
    }
}
