//!
//! Fakes for exercising the driver off-target.
//!

extern crate std;

use std::cell::Cell;
use std::rc::Rc;
use std::vec::Vec;

use crate::clock::{Clock, ClockProvider};
use crate::error::ClockError;
use crate::port::RegisterPort;
use crate::registers::{CounterControl, Register};
use crate::chip::ChannelId;
use crate::NUM_CHANNELS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(usize, Register, u32),
    Write(usize, Register, u32),
}

/// Register file that records every access in order
pub struct FakePort {
    registers: [[u32; 11]; NUM_CHANNELS],
    pub trace: Vec<Access>,
}

impl FakePort {
    /// Registers at their reset values
    pub fn new() -> Self {
        let mut registers = [[0; 11]; NUM_CHANNELS];
        for channel in registers.iter_mut() {
            channel[Register::CounterControl as usize] = CounterControl::RESET_STATE.bits();
        }
        Self {
            registers,
            trace: Vec::new(),
        }
    }

    pub fn get(&self, channel: usize, register: Register) -> u32 {
        self.registers[channel][register as usize]
    }

    pub fn set(&mut self, channel: usize, register: Register, value: u32) {
        self.registers[channel][register as usize] = value;
    }

    pub fn writes(&self) -> Vec<(usize, Register, u32)> {
        self.trace
            .iter()
            .filter_map(|access| match *access {
                Access::Write(channel, register, value) => Some((channel, register, value)),
                Access::Read(..) => None,
            })
            .collect()
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }
}

impl RegisterPort for FakePort {
    fn read(&mut self, channel: ChannelId, register: Register) -> u32 {
        let value = self.get(channel.index(), register);
        self.trace.push(Access::Read(channel.index(), register, value));
        value
    }

    fn write(&mut self, channel: ChannelId, register: Register, value: u32) {
        self.set(channel.index(), register, value);
        self.trace.push(Access::Write(channel.index(), register, value));
    }
}

#[derive(Default)]
struct ClockState {
    enabled: Cell<bool>,
    fail_enable: Cell<bool>,
    enables: Cell<usize>,
    disables: Cell<usize>,
}

/// Clock handle whose state is shared by all of its clones
#[derive(Clone)]
pub struct FakeClock {
    id: u32,
    rate_hz: u64,
    state: Rc<ClockState>,
}

impl FakeClock {
    pub fn new(id: u32, rate_hz: u64) -> Self {
        Self {
            id,
            rate_hz,
            state: Rc::new(ClockState::default()),
        }
    }

    pub fn failing(id: u32, rate_hz: u64) -> Self {
        let clock = Self::new(id, rate_hz);
        clock.state.fail_enable.set(true);
        clock
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.get()
    }

    pub fn enables(&self) -> usize {
        self.state.enables.get()
    }

    pub fn disables(&self) -> usize {
        self.state.disables.get()
    }

    pub fn set_failing(&self, fail: bool) {
        self.state.fail_enable.set(fail);
    }
}

impl Clock for FakeClock {
    fn enable(&mut self) -> Result<(), ClockError> {
        if self.state.fail_enable.get() {
            return Err(ClockError::EnableFailed);
        }
        self.state.enabled.set(true);
        self.state.enables.set(self.state.enables.get() + 1);
        Ok(())
    }

    fn disable(&mut self) {
        self.state.enabled.set(false);
        self.state.disables.set(self.state.disables.get() + 1);
    }

    fn rate_hz(&self) -> u64 {
        self.rate_hz
    }

    fn is_same_source(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Provider with a default clock and any number of named clocks
pub struct FakeProvider {
    default: Option<FakeClock>,
    named: Vec<(&'static str, FakeClock)>,
    default_requests: usize,
}

impl FakeProvider {
    pub fn new(default: FakeClock) -> Self {
        Self {
            default: Some(default),
            named: Vec::new(),
            default_requests: 0,
        }
    }

    pub fn empty() -> Self {
        Self {
            default: None,
            named: Vec::new(),
            default_requests: 0,
        }
    }

    pub fn with_named(mut self, name: &'static str, clock: FakeClock) -> Self {
        self.named.push((name, clock));
        self
    }

    pub fn default_requests(&self) -> usize {
        self.default_requests
    }
}

impl ClockProvider for FakeProvider {
    type Clock = FakeClock;

    fn named(&mut self, name: &str) -> Option<FakeClock> {
        self.named
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, clock)| clock.clone())
    }

    fn default_clock(&mut self) -> Option<FakeClock> {
        self.default_requests += 1;
        self.default.clone()
    }
}
