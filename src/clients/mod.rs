//! I/O collaborators: the SNDS report endpoints and reverse DNS
pub mod rdns;
pub mod snds;

pub mod prelude {
    pub use super::{rdns::*, snds::*};
}
