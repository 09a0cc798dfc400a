//!
//! One TTC counter driven as a PWM output.
//!
//! The counter runs in interval mode, counting up from 0 to INTERVAL_COUNTER
//! and toggling the wave output when it matches MATCH_1_COUNTER. The
//! prescaler, interval and match registers may only change while counting is
//! disabled, so every reconfiguration stops the counter first and restarts it
//! with a single final COUNTER_CTRL write.
//!

use crate::chip::ChannelId;
use crate::clock::Clock;
use crate::error::PwmError;
use crate::port::RegisterPort;
use crate::registers::{ClockControl, CounterControl, Register};
use crate::timing::Timing;

/// Output polarity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

pub struct Channel<C> {
    id: ChannelId,
    clock: C,
    uses_external_clock: bool,
    polarity: Polarity,
}

impl<C: Clock> Channel<C> {
    pub(crate) fn new(id: ChannelId, clock: C, uses_external_clock: bool) -> Self {
        Self {
            id,
            clock,
            uses_external_clock,
            polarity: Polarity::Normal,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.id.index()
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Whether the channel counts from a clock other than the chip clock
    pub fn uses_external_clock(&self) -> bool {
        self.uses_external_clock
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Reprogram the channel for `period_ns` with `duty_ns` active time.
    ///
    /// The channel may be running. On success it is left stopped and armed;
    /// call [`Channel::enable`] to start the output.
    pub fn configure(
        &mut self,
        port: &mut impl RegisterPort,
        duty_ns: i64,
        period_ns: i64,
    ) -> Result<(), PwmError> {
        log::debug!("Configuring channel {}: {}/{} ns.", self.index(), duty_ns, period_ns);

        self.start_clock()?;

        let timing = Timing::new(duty_ns, period_ns, self.clock.rate_hz())?;
        if timing.duty_ticks > timing.period_ticks {
            log::warn!("Duty of channel {} exceeds its period, output will not toggle.", self.index());
        }

        // Stop the counter before touching clock, interval or match
        let mut counter_ctrl = self.read_counter_ctrl(port);
        self.write(port, Register::CounterControl, (counter_ctrl | CounterControl::COUNTING_DISABLE).bits());

        let mut clock_ctrl = ClockControl::from_bits_retain(self.read(port, Register::ClockControl))
            .with_prescaler(timing.prescaler);
        clock_ctrl.set(ClockControl::SRC_EXTERNAL, self.uses_external_clock);
        self.write(port, Register::ClockControl, clock_ctrl.bits());

        self.write(port, Register::IntervalCounter, timing.interval());
        self.write(port, Register::Match1Counter, timing.match_value());

        // Count up in interval mode, reset so the new values load at once.
        // The hardware drives the inverted level when WAVE_POL is clear.
        counter_ctrl.remove(CounterControl::DECREMENT_ENABLE);
        counter_ctrl.insert(
            CounterControl::INTERVAL_ENABLE | CounterControl::RESET | CounterControl::MATCH_ENABLE,
        );
        counter_ctrl.set(CounterControl::WAVE_POL, self.polarity == Polarity::Normal);
        self.write(port, Register::CounterControl, counter_ctrl.bits());

        log::debug!(
            "{}/{} clocks, prescaler 2^{}",
            timing.duty_ticks,
            timing.period_ticks,
            timing.prescaler
        );

        Ok(())
    }

    /// Start counting from zero with the wave output on
    pub fn enable(&mut self, port: &mut impl RegisterPort) -> Result<(), PwmError> {
        log::debug!("Enabling channel {}.", self.index());

        self.start_clock()?;

        let mut counter_ctrl = self.read_counter_ctrl(port);
        counter_ctrl.remove(CounterControl::COUNTING_DISABLE | CounterControl::WAVE_DISABLE);
        counter_ctrl.insert(CounterControl::RESET);
        self.write(port, Register::CounterControl, counter_ctrl.bits());

        Ok(())
    }

    /// Stop the counter, park the output at its inactive level and gate the clock
    pub fn disable(&mut self, port: &mut impl RegisterPort) {
        log::debug!("Disabling channel {}.", self.index());

        let counter_ctrl = self.read_counter_ctrl(port)
            | CounterControl::COUNTING_DISABLE
            | CounterControl::WAVE_DISABLE;
        self.write(port, Register::CounterControl, counter_ctrl.bits());

        self.clock.disable();
    }

    /// Takes effect on the next [`Channel::configure`]
    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
    }

    /// Whether the counter is counting with the wave output enabled
    pub fn is_running(&self, port: &mut impl RegisterPort) -> bool {
        !self
            .read_counter_ctrl(port)
            .intersects(CounterControl::COUNTING_DISABLE | CounterControl::WAVE_DISABLE)
    }

    fn start_clock(&mut self) -> Result<(), PwmError> {
        self.clock.enable().map_err(|e| {
            log::error!("Can't enable clock of channel {}: {}", self.index(), e);
            PwmError::ClockUnavailable(e)
        })
    }

    fn read_counter_ctrl(&self, port: &mut impl RegisterPort) -> CounterControl {
        CounterControl::from_bits_retain(self.read(port, Register::CounterControl))
    }

    fn read(&self, port: &mut impl RegisterPort, register: Register) -> u32 {
        let value = port.read(self.id, register);
        log::trace!("read  {:08x} from {}:{}", value, self.index(), register.name());
        value
    }

    fn write(&self, port: &mut impl RegisterPort, register: Register, value: u32) {
        log::trace!("write {:08x}  to  {}:{}", value, self.index(), register.name());
        port.write(self.id, register, value);
    }
}
