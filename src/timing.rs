//!
//! Conversion of a period/duty request in nanoseconds into counter ticks.
//!

use crate::registers::{COUNTER_MAX, MAX_PRESCALER};
use crate::error::PwmError;

pub const NS_PER_SEC: u64 = 1_000_000_000;

/// `floor(ns * rate_hz / 1e9)`
#[inline]
pub fn ns_to_ticks(ns: u64, rate_hz: u64) -> u64 {
    // widened so long periods on fast clocks do not overflow
    let ticks = (ns as u128 * rate_hz as u128) / NS_PER_SEC as u128;
    ticks.min(u64::MAX as u128) as u64
}

/// Smallest shift `p` with `period_ticks >> p <= 0xFFFF`.
///
/// Zero ticks needs no prescaling.
#[inline]
pub fn prescaler_for(period_ticks: u64) -> u8 {
    if period_ticks == 0 {
        return 0;
    }
    // ilog2 + 1 is the bit length of period_ticks
    let bits = period_ticks.ilog2() + 1;
    bits.saturating_sub(16) as u8
}

/// Counter settings for one period/duty pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub period_ticks: u64,
    pub duty_ticks: u64,
    /// Power of two the input clock is divided by
    pub prescaler: u8,
}

impl Timing {
    pub fn new(duty_ns: i64, period_ns: i64, rate_hz: u64) -> Result<Self, PwmError> {
        if period_ns < 0 || duty_ns < 0 {
            return Err(PwmError::InvalidArgument);
        }

        let period_ticks = ns_to_ticks(period_ns as u64, rate_hz);
        let duty_ticks = ns_to_ticks(duty_ns as u64, rate_hz);

        let prescaler = prescaler_for(period_ticks);
        if prescaler > MAX_PRESCALER {
            log::error!(
                "{} ns at {} Hz needs a 2^{} prescaler, the counter supports 2^{}.",
                period_ns, rate_hz, prescaler, MAX_PRESCALER
            );
            return Err(PwmError::InvalidArgument);
        }

        Ok(Self {
            period_ticks,
            duty_ticks,
            prescaler,
        })
    }

    /// Value for INTERVAL_COUNTER
    #[inline]
    pub fn interval(&self) -> u32 {
        ((self.period_ticks >> self.prescaler) & COUNTER_MAX) as u32
    }

    /// Value for MATCH_1_COUNTER, scaled by the same prescaler as the period
    #[inline]
    pub fn match_value(&self) -> u32 {
        ((self.duty_ticks >> self.prescaler) & COUNTER_MAX) as u32
    }
}
