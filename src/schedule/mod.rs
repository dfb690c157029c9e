//! Boundary scheduling and the live countdown.
//!
//! - `next_event`: pure derivation of the next boundary from today's timings
//!   and an explicit `now`
//! - `clock`: wall-clock sources (system and mock)
//! - `countdown`: the one-second countdown engine and its task handle

pub mod clock;
pub mod countdown;
pub mod next_event;

pub use clock::{Clock, MockClock, SystemClock};
pub use countdown::{
    CountdownEngine, CountdownEvent, CountdownHandle, CountdownState, Observation, TICK_INTERVAL,
};
pub use next_event::{
    at_today, format_time_remaining, next_event, parse_clock_time, time_remaining,
    ClockTimeError,
};
