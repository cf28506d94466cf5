use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{ConfigError, ConfigResult};
use crate::migrate::{downgrade, upgrade};

/// Repo schema version whose datastore is described by flat fields.
pub const FLAT_SCHEMA_VERSION: u32 = 5;
/// Repo schema version whose datastore is described by a nested `Spec`.
pub const SPEC_SCHEMA_VERSION: u32 = 6;

/// Which way to convert a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Version 5 to version 6 (`5-to-6`).
    Upgrade,
    /// Version 6 to version 5 (`6-to-5`).
    Downgrade,
}

impl Direction {
    /// All directions, in display order.
    pub const ALL: [Self; 2] = [Self::Upgrade, Self::Downgrade];

    /// Canonical command-line name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Upgrade => "5-to-6",
            Self::Downgrade => "6-to-5",
        }
    }

    /// Schema version of the input.
    #[must_use]
    pub fn from_version(self) -> u32 {
        match self {
            Self::Upgrade => FLAT_SCHEMA_VERSION,
            Self::Downgrade => SPEC_SCHEMA_VERSION,
        }
    }

    /// Schema version of the output.
    #[must_use]
    pub fn to_version(self) -> u32 {
        match self {
            Self::Upgrade => SPEC_SCHEMA_VERSION,
            Self::Downgrade => FLAT_SCHEMA_VERSION,
        }
    }

    /// Convert a `Datastore` subtree in place.
    ///
    /// # Errors
    ///
    /// See [`upgrade`] and [`downgrade`].
    pub fn apply(self, ds: &mut Map<String, Value>) -> ConfigResult<()> {
        match self {
            Self::Upgrade => upgrade(ds),
            Self::Downgrade => downgrade(ds),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ConfigError::UnknownDirection { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("5-to-6".parse::<Direction>().unwrap(), Direction::Upgrade);
        assert_eq!("6-to-5".parse::<Direction>().unwrap(), Direction::Downgrade);
        assert!(matches!(
            "6-to-7".parse::<Direction>(),
            Err(ConfigError::UnknownDirection { name }) if name == "6-to-7"
        ));
        assert!("5-TO-6".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.to_string().parse::<Direction>().unwrap(), direction);
        }
    }

    #[test]
    fn test_versions() {
        assert_eq!(Direction::Upgrade.from_version(), 5);
        assert_eq!(Direction::Upgrade.to_version(), 6);
        assert_eq!(Direction::Downgrade.from_version(), 6);
        assert_eq!(Direction::Downgrade.to_version(), 5);
    }
}
