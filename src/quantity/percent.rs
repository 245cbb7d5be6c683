use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Whole percent within `0..=100`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const MAX: Self = Self(100);

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn from_u8_clamped(value: u8) -> Self {
        if value > 100 { Self::MAX } else { Self(value) }
    }
}

impl TryFrom<u8> for Percent {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            Err(Error::InvalidInput(format!("{value}% is out of the 0–100 range")))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl FromStr for Percent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = s
            .strip_suffix('%')
            .unwrap_or(s)
            .trim()
            .parse::<u8>()
            .map_err(|error| Error::InvalidInput(format!("`{s}` is not a percentage: {error}")))?;
        Self::try_from(value)
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        assert_eq!("20".parse::<Percent>(), Ok(Percent(20)));
        assert_eq!(" 80% ".parse::<Percent>(), Ok(Percent(80)));
        assert_eq!("100".parse::<Percent>(), Ok(Percent::MAX));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!("101".parse::<Percent>(), Err(Error::InvalidInput(_))));
        assert!(matches!("-1".parse::<Percent>(), Err(Error::InvalidInput(_))));
        assert!(matches!("half".parse::<Percent>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Percent::from_u8_clamped(250), Percent::MAX);
        assert_eq!(Percent::from_u8_clamped(42).get(), 42);
    }
}
