pub mod battery_range;
pub mod estimate;
pub mod step;
pub mod tier;
pub mod user_type;
pub mod wizard;
