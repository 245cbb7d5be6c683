use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{error::Error, quantity::power::Kilowatts};

/// Charging-power class offered for installation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargerTier {
    pub label: String,
    pub power: Kilowatts,
}

impl ChargerTier {
    pub const CANONICAL_POWERS: [f64; 3] = [3.7, 7.0, 22.0];

    pub fn try_from_power(power: Kilowatts) -> Result<Self, Error> {
        if power.is_positive() {
            Ok(Self { label: power.to_string(), power })
        } else {
            Err(Error::InvalidInput(format!("charger power must be positive, got {power}")))
        }
    }

    /// Reinforced socket, single-phase and three-phase wallboxes.
    #[must_use]
    pub fn canonical() -> Vec<Self> {
        Self::CANONICAL_POWERS
            .into_iter()
            .map(|power| Self { label: Kilowatts::from(power).to_string(), power: power.into() })
            .collect()
    }

    /// Installation kind, by the usual French residential grid connection.
    pub fn kind(&self) -> &'static str {
        if self.power.0 <= 3.7 {
            "Reinforced socket"
        } else if self.power.0 <= 7.4 {
            "Single-phase wallbox"
        } else {
            "Three-phase wallbox"
        }
    }
}

impl Display for ChargerTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.kind())
    }
}

impl FromStr for ChargerTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let power = s
            .strip_suffix("kW")
            .unwrap_or(s)
            .trim()
            .parse::<Kilowatts>()
            .map_err(|error| Error::InvalidInput(format!("`{s}` is not a power: {error}")))?;
        Self::try_from_power(power)
    }
}
