use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Div, Mul},
};

use crate::quantity::{Quantity, percent::Percent, power::Kilowatts, time::Hours};

pub type KilowattHours = Quantity<1, 1>;

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}Wh", self.0 * 1000.0)
    }
}

impl Mul<Percent> for KilowattHours {
    type Output = Self;

    /// Share of the energy, multiplied before dividing by 100.
    fn mul(self, rhs: Percent) -> Self::Output {
        Quantity(self.0 * f64::from(rhs.get()) / 100.0)
    }
}

impl Div<Kilowatts> for KilowattHours {
    type Output = Hours;

    fn div(self, rhs: Kilowatts) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_share() {
        let share = KilowattHours::from(50.0) * Percent::from_u8_clamped(60);
        assert_abs_diff_eq!(share.0, 30.0);
    }

    #[test]
    fn test_divide_by_power() {
        let hours = KilowattHours::from(22.0) / Kilowatts::from(19.8);
        assert_abs_diff_eq!(hours.0, 1.111_111, epsilon = 1e-6);
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHours::from(50.0).to_string(), "50 kWh");
        assert_eq!(KilowattHours::from(75.5).to_string(), "75.5 kWh");
    }
}
