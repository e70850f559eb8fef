//! Market data layer: upstream adapter, synthetic fallback, and cache.
//!
//! The layering mirrors the data flow: [`UpstreamApi`] talks HTTP,
//! [`SyntheticFeed`] fabricates plausible values when the upstream is
//! unavailable, [`FallbackFeed`] composes the two so a quote request
//! never fails outright, and [`QuoteCache`] bounds staleness on top.

mod cache;
mod feed;
mod synthetic;
mod upstream;

pub use cache::QuoteCache;
pub use feed::FallbackFeed;
pub use synthetic::{Movers, SyntheticFeed};
pub use upstream::UpstreamApi;
