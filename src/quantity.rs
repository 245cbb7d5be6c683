pub mod energy;
pub mod percent;
pub mod power;
pub mod time;

use std::ops::Mul;

use serde::{Deserialize, Serialize};

/// Dimensioned `f64`.
///
/// The const parameters are the exponents of power (kW) and time (h), so that
/// `Quantity<1, 1>` is energy in kWh and `Quantity<0, 1>` is a duration in hours.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<const POWER: isize, const TIME: isize>(pub f64);

impl<const POWER: isize, const TIME: isize> Quantity<POWER, TIME> {
    /// Strictly positive and finite.
    pub const fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl<const POWER: isize, const TIME: isize> Mul<f64> for Quantity<POWER, TIME> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
