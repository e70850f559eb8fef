//! Core trait definitions.

mod clock;
mod feed;

pub use clock::{Clock, SystemClock};
pub use feed::QuoteFeed;
