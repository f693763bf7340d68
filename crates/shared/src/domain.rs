use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);
    };
}

id_newtype!(WordId);

/// Prefix shared by every rendered word control element id.
pub const WORD_ELEMENT_PREFIX: &str = "w";

impl WordId {
    /// Element id used by renderers for this word's control, e.g. `w3`.
    pub fn element_id(self) -> String {
        format!("{WORD_ELEMENT_PREFIX}{}", self.0)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{WORD_ELEMENT_PREFIX}{}", self.0)
    }
}

/// Poetic relation that can link words in a poem specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Rhyme,
    Alliteration,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Rhyme, Device::Alliteration];

    pub fn as_str(self) -> &'static str {
        match self {
            Device::Rhyme => "rhyme",
            Device::Alliteration => "alliteration",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device '{0}'")]
pub struct UnknownDevice(pub String);

impl FromStr for Device {
    type Err = UnknownDevice;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Device::ALL
            .into_iter()
            .find(|device| device.as_str() == raw)
            .ok_or_else(|| UnknownDevice(raw.to_string()))
    }
}
