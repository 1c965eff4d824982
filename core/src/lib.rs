//! Shared types for talking to intervals.icu: resource schemas, the wire
//! date contracts, the null-stripping normalizer and the client error
//! taxonomy. No I/O lives here.

pub mod activity;
pub mod athlete;
pub mod dates;
pub mod error;
pub mod event;
pub mod normalize;
pub mod num;
pub mod wellness;
pub mod workout;
