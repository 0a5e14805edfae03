//! Domain layer: the clock and time zone adapter.
//!
//! A time record is nothing more than an absolute instant, so the domain
//! model is the clock that produces instants and the zone they are shown in.

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock, ZonedClock};
