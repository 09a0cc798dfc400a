//!
//! Errors that can occur while driving the TTC
//!

use core::fmt;

/// Failure reported by a clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    // Neither the named clock nor the default clock exists
    Missing,
    // The clock exists but refused to start
    EnableFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    // Negative period or duty, an out of range channel index, or a period
    // too long for the prescaler to fit into 16 bits
    InvalidArgument,
    // A clock could not be resolved or enabled
    ClockUnavailable(ClockError),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "clock not found"),
            Self::EnableFailed => write!(f, "clock failed to enable"),
        }
    }
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::ClockUnavailable(e) => write!(f, "clock unavailable: {}", e),
        }
    }
}

impl From<ClockError> for PwmError {
    fn from(e: ClockError) -> Self {
        PwmError::ClockUnavailable(e)
    }
}

impl embedded_hal::pwm::Error for PwmError {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}
