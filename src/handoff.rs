mod payload;
mod slot;
mod summary;

#[cfg(test)]
pub use self::slot::MemorySlot;
pub use self::{
    payload::{QuoteHandoffPayload, build_handoff},
    slot::{DirectorySlot, HandoffSlot},
    summary::{TierEstimate, compare_tiers},
};

/// Slot key the quote form reads the simulator data from.
pub const SLOT_KEY: &str = "simulator_data";
