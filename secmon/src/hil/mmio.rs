// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Absolute-address 32-bit memory access.

/// A narrow port onto the physical address space.
///
/// Used for device registers and for the handful of plain memory words the
/// boot path has to read or write on behalf of another agent (the companion
/// bootloader's status word, the GPU carveout markers). Every call must reach
/// memory: implementations may not cache or combine accesses.
pub trait RegisterPort {
    /// Reads the 32-bit word at `address`.
    fn read32(&self, address: usize) -> u32;

    /// Writes `value` to the 32-bit word at `address`.
    fn write32(&self, address: usize, value: u32);
}

impl<P: RegisterPort + ?Sized> RegisterPort for &P {
    fn read32(&self, address: usize) -> u32 {
        (**self).read32(address)
    }

    fn write32(&self, address: usize, value: u32) {
        (**self).write32(address, value)
    }
}
