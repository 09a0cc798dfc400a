//!
//! PWM driver for the Cadence Triple Timer Counter (TTC).
//!
//! [Zynq-7000 TRM (UG585), chapter 8.5](https://docs.amd.com/r/en-US/ug585-zynq-7000-SoC-TRM)
//!
//! Each of the three counters of a TTC block runs in interval mode and
//! drives one PWM output. A request in nanoseconds is turned into a
//! prescaler, an interval and a match value, and written through a
//! [`RegisterPort`] in an order that never lets a running counter see a
//! half-written configuration.
//!

#![no_std]

#[cfg(test)]
extern crate std;

pub mod channel;
pub mod chip;
pub mod clock;
pub mod error;
pub mod output;
pub mod port;
pub mod registers;
pub mod timing;

#[cfg(test)]
mod mock;

pub use channel::{Channel, Polarity};
pub use chip::{ChannelId, TtcPwm};
pub use clock::{resolve_clock, Clock, ClockProvider};
pub use error::{ClockError, PwmError};
pub use output::PwmOutput;
pub use port::{MmioPort, RegisterPort};

/// Counters per TTC block
pub const NUM_CHANNELS: usize = 3;
