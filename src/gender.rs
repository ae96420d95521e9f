//! The closed set of genders an avatar can be drawn for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AvatarError;

/// Which per-person asset set to draw from.
///
/// Values outside this enum can only appear at the parsing boundary
/// ([`FromStr`], [`TryFrom<i32>`]), which is where [`AvatarError::UnsupportedGender`]
/// is raised before any catalog or RNG work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Directory name of this gender's assets under the asset root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Accepts `male`/`m` and `female`/`f`, case-insensitively.
impl FromStr for Gender {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(AvatarError::UnsupportedGender(s.to_string())),
        }
    }
}

/// Numeric codes: `0` is male, `1` is female.
impl TryFrom<i32> for Gender {
    type Error = AvatarError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Gender::Male),
            1 => Ok(Gender::Female),
            other => Err(AvatarError::UnsupportedGender(other.to_string())),
        }
    }
}
