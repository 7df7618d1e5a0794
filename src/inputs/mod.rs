//! CLI argument types
pub mod cidr;
pub mod date;
pub mod key;

pub use cidr::CidrNetwork;
pub use date::ReportDate;
pub use key::AccessKey;

pub mod prelude {
    pub use super::{cidr::*, date::*, key::*};
}
