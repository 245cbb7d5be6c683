use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

pub type Kilowatts = Quantity<1, 0>;

impl Display for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kW", self.0)
    }
}

impl Debug for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}W", self.0 * 1000.0)
    }
}
