//! Security level selection and its wire tag

use core::fmt;
use pqe_api::{Error, Result};

/// Claimed security level of a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum SecurityLevel {
    /// 128-bit level
    L128,
    /// 192-bit level
    L192,
    /// 256-bit level
    L256,
}

impl SecurityLevel {
    /// All supported levels, weakest first
    pub const ALL: [SecurityLevel; 3] = [Self::L128, Self::L192, Self::L256];

    /// Select a level by its bit strength (128, 192 or 256)
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            128 => Ok(Self::L128),
            192 => Ok(Self::L192),
            256 => Ok(Self::L256),
            level => Err(Error::UnsupportedLevel { level }),
        }
    }

    /// Bit strength of this level
    pub const fn bits(self) -> u16 {
        match self {
            Self::L128 => 128,
            Self::L192 => 192,
            Self::L256 => 256,
        }
    }

    /// One-byte tag used as the first byte of every serialized object
    pub const fn tag(self) -> u8 {
        match self {
            Self::L128 => 0x01,
            Self::L192 => 0x02,
            Self::L256 => 0x03,
        }
    }

    /// Parse a serialized level tag
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0x01 => Ok(Self::L128),
            0x02 => Ok(Self::L192),
            0x03 => Ok(Self::L256),
            tag => Err(Error::UnsupportedFormat {
                context: "security level tag",
                tag,
            }),
        }
    }
}

impl TryFrom<u16> for SecurityLevel {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl From<SecurityLevel> for u16 {
    fn from(level: SecurityLevel) -> u16 {
        level.bits()
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.bits())
    }
}
