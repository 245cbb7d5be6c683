use std::fmt::{Debug, Formatter};

use crate::quantity::Quantity;

pub type Hours = Quantity<0, 1>;

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}h", self.0)
    }
}
