// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Volatile accesses to physical addresses.

use secmon::hil::mmio::RegisterPort;

/// Register port that dereferences the address it is given.
///
/// The secure monitor runs with the MMU off or identity mapped during early
/// boot, so a physical address is a valid pointer.
#[derive(Clone, Copy)]
pub struct MmioPort {
    _private: (),
}

impl MmioPort {
    /// # Safety
    ///
    /// Every address later passed to this port must be 4-byte aligned and
    /// valid for volatile 32-bit access (device memory or RAM), and nothing
    /// else may hold a Rust reference to that memory.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterPort for MmioPort {
    fn read32(&self, address: usize) -> u32 {
        // SAFETY: guaranteed by the contract of `MmioPort::new`.
        unsafe { core::ptr::read_volatile(address as *const u32) }
    }

    fn write32(&self, address: usize, value: u32) {
        // SAFETY: guaranteed by the contract of `MmioPort::new`.
        unsafe { core::ptr::write_volatile(address as *mut u32, value) }
    }
}
