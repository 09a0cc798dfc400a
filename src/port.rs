//!
//! Register access for a TTC block.
//!
//! The channel logic only ever talks to the hardware through [`RegisterPort`],
//! so a register sequence can be checked against a recording fake as easily
//! as it runs against the real block through [`MmioPort`].
//!

use core::ptr::NonNull;

use crate::chip::ChannelId;
use crate::registers::Register;

/// Read/write surface of the TTC registers.
///
/// Implementations must issue every access immediately and in program order,
/// without caching, merging or reordering. Channels are addressed by
/// [`ChannelId`] so an access can never fall outside the block.
pub trait RegisterPort {
    fn read(&mut self, channel: ChannelId, register: Register) -> u32;

    fn write(&mut self, channel: ChannelId, register: Register, value: u32);
}

impl<P: RegisterPort + ?Sized> RegisterPort for &mut P {
    #[inline]
    fn read(&mut self, channel: ChannelId, register: Register) -> u32 {
        (**self).read(channel, register)
    }

    #[inline]
    fn write(&mut self, channel: ChannelId, register: Register, value: u32) {
        (**self).write(channel, register, value)
    }
}

/// Memory-mapped TTC block
pub struct MmioPort {
    base: NonNull<u8>,
}

impl MmioPort {
    /// Wrap the mapped register block starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to the mapped TTC register block, valid for volatile
    /// 32-bit reads and writes over its whole extent for as long as the port
    /// lives, and nothing else may access the block concurrently.
    pub unsafe fn new(base: NonNull<u8>) -> Self {
        Self { base }
    }

    fn address(&self, channel: ChannelId, register: Register) -> *mut u32 {
        // offsets are multiples of 4 from an aligned base
        unsafe { self.base.as_ptr().add(register.offset(channel)) as *mut u32 }
    }
}

impl RegisterPort for MmioPort {
    fn read(&mut self, channel: ChannelId, register: Register) -> u32 {
        unsafe { self.address(channel, register).read_volatile() }
    }

    fn write(&mut self, channel: ChannelId, register: Register, value: u32) {
        unsafe { self.address(channel, register).write_volatile(value) }
    }
}
