//!
//! The three channels of one TTC block behind a single register port.
//!

use crate::channel::{Channel, Polarity};
use crate::clock::{resolve_clock, Clock, ClockProvider, CHANNEL_CLOCK_NAMES, SYSTEM_CLOCK_NAME};
use crate::error::{ClockError, PwmError};
use crate::port::RegisterPort;
use crate::NUM_CHANNELS;

/// Channel of a TTC block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelId {
    Ch0 = 0,
    Ch1 = 1,
    Ch2 = 2,
}

impl ChannelId {
    pub const ALL: [ChannelId; NUM_CHANNELS] = [ChannelId::Ch0, ChannelId::Ch1, ChannelId::Ch2];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for ChannelId {
    type Error = PwmError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(index).copied().ok_or(PwmError::InvalidArgument)
    }
}

/**
 * A TTC block driven as three PWM outputs.
 *
 * Owns the register port, the chip-wide clock and one [`Channel`] per
 * counter. The chip clock stays enabled for the lifetime of the value;
 * dropping it disables every channel and then the chip clock.
 *
 * Calls for one channel must not overlap. Different channels touch disjoint
 * registers and clocks.
 */
pub struct TtcPwm<P: RegisterPort, C: Clock> {
    port: P,
    system_clock: C,
    channels: [Channel<C>; NUM_CHANNELS],
}

impl<P: RegisterPort, C: Clock> TtcPwm<P, C> {
    /// Resolve and enable the chip clock, then resolve one clock per channel.
    ///
    /// Each clock is looked up by name first and falls back to the provider's
    /// default clock. A channel counts from an external source when its clock
    /// differs from the chip clock. On failure nothing is left enabled.
    pub fn new<CP>(port: P, clocks: &mut CP) -> Result<Self, PwmError>
    where
        CP: ClockProvider<Clock = C>,
    {
        let mut system_clock = resolve_clock(clocks, SYSTEM_CLOCK_NAME).ok_or_else(|| {
            log::error!("Missing device clock.");
            PwmError::ClockUnavailable(ClockError::Missing)
        })?;

        system_clock.enable().map_err(|e| {
            log::error!("Can't enable device clock: {}", e);
            PwmError::ClockUnavailable(e)
        })?;

        let mut channel = |id: ChannelId| -> Result<Channel<C>, PwmError> {
            let Some(clock) = resolve_clock(clocks, CHANNEL_CLOCK_NAMES[id.index()]) else {
                log::error!("Missing clock source for counter {}.", id.index());
                system_clock.disable();
                return Err(PwmError::ClockUnavailable(ClockError::Missing));
            };

            let external = !clock.is_same_source(&system_clock);
            Ok(Channel::new(id, clock, external))
        };
        let channels = [
            channel(ChannelId::Ch0)?,
            channel(ChannelId::Ch1)?,
            channel(ChannelId::Ch2)?,
        ];

        log::info!("TTC PWM ready, {} channels.", NUM_CHANNELS);

        Ok(Self {
            port,
            system_clock,
            channels,
        })
    }

    pub fn channel(&self, id: ChannelId) -> &Channel<C> {
        &self.channels[id.index()]
    }

    pub fn system_clock(&self) -> &C {
        &self.system_clock
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn configure(&mut self, id: ChannelId, duty_ns: i64, period_ns: i64) -> Result<(), PwmError> {
        self.channels[id.index()].configure(&mut self.port, duty_ns, period_ns)
    }

    pub fn enable(&mut self, id: ChannelId) -> Result<(), PwmError> {
        self.channels[id.index()].enable(&mut self.port)
    }

    pub fn disable(&mut self, id: ChannelId) {
        self.channels[id.index()].disable(&mut self.port)
    }

    pub fn set_polarity(&mut self, id: ChannelId, polarity: Polarity) {
        self.channels[id.index()].set_polarity(polarity)
    }

    pub fn is_running(&mut self, id: ChannelId) -> bool {
        self.channels[id.index()].is_running(&mut self.port)
    }
}

impl<P: RegisterPort, C: Clock> Drop for TtcPwm<P, C> {
    fn drop(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.disable(&mut self.port);
        }
        self.system_clock.disable();
    }
}
