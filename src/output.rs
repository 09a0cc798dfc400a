//!
//! embedded-hal view of a single channel.
//!

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::chip::{ChannelId, TtcPwm};
use crate::clock::Clock;
use crate::error::PwmError;
use crate::port::RegisterPort;

/// One channel at a fixed period, driven through [`SetDutyCycle`].
///
/// Every duty update reprograms the channel and starts it.
pub struct PwmOutput<'a, P: RegisterPort, C: Clock> {
    chip: &'a mut TtcPwm<P, C>,
    id: ChannelId,
    period_ns: i64,
}

impl<'a, P: RegisterPort, C: Clock> PwmOutput<'a, P, C> {
    pub fn new(chip: &'a mut TtcPwm<P, C>, id: ChannelId, period_ns: i64) -> Result<Self, PwmError> {
        if period_ns < 0 {
            return Err(PwmError::InvalidArgument);
        }
        Ok(Self { chip, id, period_ns })
    }

    pub fn period_ns(&self) -> i64 {
        self.period_ns
    }

    /// Stop the output
    pub fn disable(&mut self) {
        self.chip.disable(self.id);
    }
}

impl<P: RegisterPort, C: Clock> ErrorType for PwmOutput<'_, P, C> {
    type Error = PwmError;
}

impl<P: RegisterPort, C: Clock> SetDutyCycle for PwmOutput<'_, P, C> {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let duty_ns = (self.period_ns as i128 * duty as i128 / u16::MAX as i128) as i64;

        self.chip.configure(self.id, duty_ns, self.period_ns)?;
        self.chip.enable(self.id)
    }
}
