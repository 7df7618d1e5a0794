use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors raised while parsing and processing SNDS reports
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SndsError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("address overflow: {0} has no successor")]
    Overflow(Ipv4Addr),

    #[error("invalid range: first address {first} is greater than last address {last}")]
    InvalidRange { first: Ipv4Addr, last: Ipv4Addr },

    #[error("malformed usage record: expected at least {expected} fields, found {found}")]
    MalformedRecord { expected: usize, found: usize },

    #[error("failed to fetch {report} report: {reason}")]
    Fetch { report: &'static str, reason: String },
}
