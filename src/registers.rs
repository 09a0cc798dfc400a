//!
//! Register map of one Cadence TTC block.
//!
//! Every register exists once per channel. Registers of the same kind are
//! laid out next to each other, so the byte offset of a register is
//! `4 * (3 * kind + channel)`.
//!

use bitflags::bitflags;

use crate::chip::ChannelId;
use crate::NUM_CHANNELS;

/// Largest value the interval and match registers hold
pub const COUNTER_MAX: u64 = 0xFFFF;

/// Largest shift the 4-bit prescaler field can encode (`p - 1 <= 15`)
pub const MAX_PRESCALER: u8 = 16;

/// Register kinds, numbered as in the TRM (section 8.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Register {
    ClockControl = 0,
    CounterControl = 1,
    CounterValue = 2,
    IntervalCounter = 3,
    Match1Counter = 4,
    Match2Counter = 5,
    Match3Counter = 6,
    InterruptRegister = 7,
    InterruptEnable = 8,
    EventControlTimer = 9,
    EventRegister = 10,
}

impl Register {
    #[cfg(test)]
    pub(crate) const ALL: [Register; 11] = [
        Register::ClockControl,
        Register::CounterControl,
        Register::CounterValue,
        Register::IntervalCounter,
        Register::Match1Counter,
        Register::Match2Counter,
        Register::Match3Counter,
        Register::InterruptRegister,
        Register::InterruptEnable,
        Register::EventControlTimer,
        Register::EventRegister,
    ];

    /// Datasheet name, used when tracing register traffic
    pub const fn name(self) -> &'static str {
        match self {
            Register::ClockControl => "CLK_CTRL",
            Register::CounterControl => "COUNTER_CTRL",
            Register::CounterValue => "COUNTER_VALUE",
            Register::IntervalCounter => "INTERVAL_COUNTER",
            Register::Match1Counter => "MATCH_1_COUNTER",
            Register::Match2Counter => "MATCH_2_COUNTER",
            Register::Match3Counter => "MATCH_3_COUNTER",
            Register::InterruptRegister => "INTERRUPT_REGISTER",
            Register::InterruptEnable => "INTERRUPT_ENABLE",
            Register::EventControlTimer => "EVENT_CONTROL_TIMER",
            Register::EventRegister => "EVENT_REGISTER",
        }
    }

    /// Byte offset of this register for `channel` from the block base
    #[inline]
    pub const fn offset(self, channel: ChannelId) -> usize {
        4 * (NUM_CHANNELS * self as usize + channel.index())
    }
}

bitflags! {
    /// CLK_CTRL
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ClockControl: u32 {
        const FALLING_EDGE = 0x40;
        const SRC_EXTERNAL = 0x20;
        const PRESCALE_MASK = 0b1111 << 1;
        const PRESCALE_ENABLE = 0b1;

        // keep reserved bits intact through read-modify-write
        const _ = !0;
    }

    /// COUNTER_CTRL
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CounterControl: u32 {
        const WAVE_POL = 0x40;
        const WAVE_DISABLE = 0x20;
        const RESET = 0x10;
        const MATCH_ENABLE = 0x08;
        const DECREMENT_ENABLE = 0x04;
        const INTERVAL_ENABLE = 0x02;
        const COUNTING_DISABLE = 0x01;

        const _ = !0;
    }
}

impl CounterControl {
    /// Value after reset: stopped, output off
    pub const RESET_STATE: Self = Self::COUNTING_DISABLE.union(Self::WAVE_DISABLE);
}

impl ClockControl {
    pub const PRESCALE_SHIFT: u32 = 1;

    /// Program the prescaler for a divide-by-`2^shift` input clock.
    ///
    /// A shift of zero turns the prescaler off; otherwise the hardware field
    /// holds `shift - 1`.
    pub fn with_prescaler(self, shift: u8) -> Self {
        let cleared = self.difference(Self::PRESCALE_ENABLE | Self::PRESCALE_MASK);
        if shift == 0 {
            return cleared;
        }

        let field = ((shift as u32 - 1) << Self::PRESCALE_SHIFT) & Self::PRESCALE_MASK.bits();
        cleared | Self::PRESCALE_ENABLE | Self::from_bits_retain(field)
    }

    /// Shift currently programmed, 0 when the prescaler is off
    #[cfg(test)]
    pub(crate) fn prescaler(self) -> u8 {
        if !self.contains(Self::PRESCALE_ENABLE) {
            return 0;
        }
        (((self.bits() & Self::PRESCALE_MASK.bits()) >> Self::PRESCALE_SHIFT) + 1) as u8
    }
}
