//! Deterministic random variate source
//!
//! Every interarrival gap and service duration in a run is drawn from one
//! seeded xorshift64* stream. Nothing else in the crate may touch randomness.

mod xorshift;

pub use xorshift::RngManager;
