use crate::{
    core::{
        estimate::{ChargingEstimate, effective_power, estimate, needed_energy},
        tier::ChargerTier,
        wizard::Selection,
    },
    error::Error,
    quantity::{energy::KilowattHours, power::Kilowatts},
};

/// One column of the side-by-side comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct TierEstimate {
    pub tier: ChargerTier,
    pub needed_energy: KilowattHours,
    pub effective_power: Kilowatts,
    pub estimate: ChargingEstimate,
}

/// Estimate the selected version on every tier, in the tier order.
pub fn compare_tiers(
    selection: &Selection,
    tiers: &[ChargerTier],
) -> Result<Vec<TierEstimate>, Error> {
    let version = selection.version.as_ref().ok_or(Error::Precondition("version"))?;
    let range = selection.battery_range;
    tiers
        .iter()
        .map(|tier| {
            estimate(version, range, tier).map(|estimate| TierEstimate {
                tier: tier.clone(),
                needed_energy: needed_energy(version, range),
                effective_power: effective_power(tier),
                estimate,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::VehicleVersion, prelude::Result};

    #[test]
    fn test_compare_canonical_tiers() -> Result {
        let selection = Selection {
            version: Some(
                VehicleVersion {
                    label: "50 kWh - R135".to_owned(),
                    battery_capacity: KilowattHours::from(50.0),
                    max_ac_charge: Kilowatts::from(22.0),
                },
            ),
            ..Selection::default()
        };
        let estimates = compare_tiers(&selection, &ChargerTier::canonical())?;
        let estimates: Vec<_> = estimates.iter().map(|tier| tier.estimate.to_string()).collect();
        assert_eq!(estimates, ["9h 1min", "4h 46min", "1h 31min"]);
        Ok(())
    }

    #[test]
    fn test_compare_without_version() {
        assert_eq!(
            compare_tiers(&Selection::default(), &ChargerTier::canonical()),
            Err(Error::Precondition("version")),
        );
    }
}
