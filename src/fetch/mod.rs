//! Remote resource fetching
//!
//! Envelope decoding, the three-state fetch lifecycle, a one-shot HTTP fetcher
//! and a slot that guards view state against stale completions.

pub mod envelope;
pub mod fetcher;
pub mod slot;
pub mod state;

pub use envelope::{Resource, parse_envelope};
pub use fetcher::ResourceFetcher;
pub use slot::{FetchSlot, FetchTicket};
pub use state::FetchState;
