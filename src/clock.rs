//!
//! Clock sources feeding the TTC.
//!
//! Clock trees are owned by the platform. The driver only needs to switch a
//! clock on and off, know its rate, and tell whether two handles refer to the
//! same source.
//!

use crate::error::ClockError;
use crate::NUM_CHANNELS;

/// Name of the chip-wide clock gating the whole block
pub const SYSTEM_CLOCK_NAME: &str = "system_clk";

/// Names of the dedicated per-channel clocks
pub const CHANNEL_CLOCK_NAMES: [&str; NUM_CHANNELS] = ["clock0", "clock1", "clock2"];

/// Input clock of the block or of one counter
pub trait Clock {
    /// Start the clock. Enabling a running clock is a no-op.
    fn enable(&mut self) -> Result<(), ClockError>;

    /// Stop the clock. Disabling a stopped clock is a no-op.
    fn disable(&mut self);

    /// Input frequency in Hz
    fn rate_hz(&self) -> u64;

    /// Whether both handles refer to the same physical clock
    fn is_same_source(&self, other: &Self) -> bool;
}

/// Hands out clock handles by name
pub trait ClockProvider {
    type Clock: Clock;

    /// Clock registered under `name`, if the platform has one
    fn named(&mut self, name: &str) -> Option<Self::Clock>;

    /// Default clock of the device
    fn default_clock(&mut self) -> Option<Self::Clock>;
}

/// Look `name` up, falling back to the device's default clock once.
pub fn resolve_clock<P: ClockProvider>(provider: &mut P, name: &str) -> Option<P::Clock> {
    match provider.named(name) {
        Some(clock) => Some(clock),
        None => {
            log::debug!("No clock named {}, using the default clock.", name);
            provider.default_clock()
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::{FakeClock, FakeProvider};

    #[test]
    fn test_named_clock_wins() {
        let mut provider = FakeProvider::new(FakeClock::new(1, 100))
            .with_named("clock1", FakeClock::new(2, 50));

        let clock = resolve_clock(&mut provider, "clock1").unwrap();
        assert_eq!(clock.rate_hz(), 50);
        assert_eq!(provider.default_requests(), 0);
    }

    #[test]
    fn test_falls_back_to_default() {
        let mut provider = FakeProvider::new(FakeClock::new(1, 100));

        let clock = resolve_clock(&mut provider, "clock1").unwrap();
        assert!(clock.is_same_source(&FakeClock::new(1, 100)));
        assert_eq!(provider.default_requests(), 1);
    }

    #[test]
    fn test_no_clock_at_all() {
        let mut provider = FakeProvider::empty();
        assert!(resolve_clock(&mut provider, SYSTEM_CLOCK_NAME).is_none());
    }
}
