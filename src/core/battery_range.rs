use crate::{error::Error, quantity::percent::Percent};

/// Start and end state of charge, `start < end` at all times.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BatteryRange {
    start: Percent,
    end: Percent,
}

impl Default for BatteryRange {
    fn default() -> Self {
        Self { start: Percent::from_u8_clamped(20), end: Percent::from_u8_clamped(80) }
    }
}

impl BatteryRange {
    pub fn try_new(start: Percent, end: Percent) -> Result<Self, Error> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(Error::InvalidInput(format!("start {start} must be below end {end}")))
        }
    }

    pub const fn start(self) -> Percent {
        self.start
    }

    pub const fn end(self) -> Percent {
        self.end
    }

    /// Percentage points to be charged.
    pub const fn span(self) -> Percent {
        Percent::from_u8_clamped(self.end.get() - self.start.get())
    }

    /// Accept the new start only if it stays below the end.
    ///
    /// # Returns
    ///
    /// Whether the edit has been accepted.
    pub fn set_start(&mut self, start: Percent) -> bool {
        let is_accepted = start < self.end;
        if is_accepted {
            self.start = start;
        }
        is_accepted
    }

    /// Accept the new end only if it stays above the start.
    pub fn set_end(&mut self, end: Percent) -> bool {
        let is_accepted = end > self.start;
        if is_accepted {
            self.end = end;
        }
        is_accepted
    }
}
