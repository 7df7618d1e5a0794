pub mod csv;
pub mod range;
pub mod summary;
pub mod usage;

pub use range::BlockedRange;
pub use summary::Summary;
pub use usage::{FilterResult, UsageRecord};
