use std::fmt::{Display, Formatter};

use chrono::TimeDelta;

use crate::{
    catalog::VehicleVersion,
    core::{battery_range::BatteryRange, tier::ChargerTier},
    error::Error,
    quantity::{energy::KilowattHours, power::Kilowatts, time::Hours},
};

/// Share of the charger power that ends up in the battery.
pub const CHARGING_EFFICIENCY: f64 = 0.9;

/// Charging duration rounded to whole minutes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct ChargingEstimate {
    pub hours: u32,

    /// Always within `0..60`.
    pub minutes: u32,
}

impl ChargingEstimate {
    /// Split the fractional hours into whole hours and rounded minutes.
    ///
    /// Minutes rounding up to 60 carry over into the hours.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_hours(total: Hours) -> Self {
        let total = total.0.max(0.0);
        let mut hours = total.floor() as u32;
        let mut minutes = ((total - total.floor()) * 60.0).round() as u32;
        if minutes >= 60 {
            hours += 1;
            minutes = 0;
        }
        Self { hours, minutes }
    }

    #[must_use]
    pub fn as_time_delta(self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.hours)) + TimeDelta::minutes(i64::from(self.minutes))
    }
}

impl Display for ChargingEstimate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {}min", self.hours, self.minutes)
    }
}

/// Energy to put into the battery for the range.
#[must_use]
pub fn needed_energy(version: &VehicleVersion, range: BatteryRange) -> KilowattHours {
    version.battery_capacity * range.span()
}

/// Charger power net of the charging losses.
#[must_use]
pub fn effective_power(tier: &ChargerTier) -> Kilowatts {
    tier.power * CHARGING_EFFICIENCY
}

/// Estimate the charging time on the charger tier.
///
/// The vehicle's own AC intake limit is deliberately not applied: the estimate
/// always uses the rated power of the charger.
pub fn estimate(
    version: &VehicleVersion,
    range: BatteryRange,
    tier: &ChargerTier,
) -> Result<ChargingEstimate, Error> {
    if !tier.power.is_positive() {
        return Err(Error::InvalidInput(format!(
            "charger `{}` must have positive power, got {}",
            tier.label, tier.power,
        )));
    }
    Ok(ChargingEstimate::from_hours(needed_energy(version, range) / effective_power(tier)))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{prelude::Result, quantity::percent::Percent};

    fn version(capacity: f64) -> VehicleVersion {
        VehicleVersion {
            label: "Test".to_owned(),
            battery_capacity: KilowattHours::from(capacity),
            max_ac_charge: Kilowatts::from(7.4),
        }
    }

    fn tier(power: f64) -> ChargerTier {
        ChargerTier { label: format!("{power} kW"), power: Kilowatts::from(power) }
    }

    fn range(start: u8, end: u8) -> BatteryRange {
        BatteryRange::try_new(Percent::from_u8_clamped(start), Percent::from_u8_clamped(end))
            .unwrap()
    }

    #[test]
    fn test_estimate_50_kwh_on_7_kw() -> Result {
        let version = version(50.0);
        let range = range(20, 80);
        let tier = tier(7.0);
        assert_abs_diff_eq!(needed_energy(&version, range).0, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(effective_power(&tier).0, 6.3, epsilon = 1e-9);
        assert_eq!(estimate(&version, range, &tier)?, ChargingEstimate { hours: 4, minutes: 46 });
        Ok(())
    }

    #[test]
    fn test_estimate_full_charge_on_22_kw() -> Result {
        let estimate = estimate(&version(22.0), range(0, 100), &tier(22.0))?;
        assert_eq!(estimate, ChargingEstimate { hours: 1, minutes: 7 });
        Ok(())
    }

    #[test]
    fn test_estimate_ignores_vehicle_ac_limit() -> Result {
        // The version is limited to 7.4 kW, yet the 22 kW tier is three times faster than 7.4 kW:
        let version = version(60.0);
        let slow = estimate(&version, range(0, 100), &tier(7.4))?;
        let fast = estimate(&version, range(0, 100), &tier(22.0))?;
        assert!(fast < slow);
        assert_eq!(fast, ChargingEstimate { hours: 3, minutes: 2 });
        Ok(())
    }

    #[test]
    fn test_estimate_non_positive_power() {
        for power in [0.0, -3.7, f64::NAN] {
            assert!(matches!(
                estimate(&version(50.0), range(20, 80), &tier(power)),
                Err(Error::InvalidInput(_)),
            ));
        }
    }

    #[test]
    fn test_minutes_carry_over() {
        assert_eq!(
            ChargingEstimate::from_hours(Hours::from(2.999_9)),
            ChargingEstimate { hours: 3, minutes: 0 },
        );
        assert_eq!(
            ChargingEstimate::from_hours(Hours::from(2.5)),
            ChargingEstimate { hours: 2, minutes: 30 },
        );
    }

    #[test]
    fn test_display() {
        let estimate = ChargingEstimate { hours: 4, minutes: 46 };
        assert_eq!(estimate.to_string(), "4h 46min");
        assert_eq!(estimate.as_time_delta(), TimeDelta::minutes(286));
    }
}
