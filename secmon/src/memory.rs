// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Named regions of the physical address space.

use crate::ErrorCode;

/// A contiguous range of physical addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryRegion {
    address: usize,
    size: usize,
}

impl MemoryRegion {
    /// Creates a region, failing at compile time when used in a `const` whose
    /// range would wrap around the address space.
    pub const fn new(address: usize, size: usize) -> Self {
        match Self::try_new(address, size) {
            Ok(region) => region,
            Err(_) => panic!("memory region wraps around the address space"),
        }
    }

    /// Creates a region, rejecting ranges that wrap around the address space.
    pub const fn try_new(address: usize, size: usize) -> Result<Self, ErrorCode> {
        match address.checked_add(size) {
            Some(_) => Ok(Self { address, size }),
            None => Err(ErrorCode::SIZE),
        }
    }

    pub const fn address(&self) -> usize {
        self.address
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// First address past the end of the region.
    pub const fn end(&self) -> usize {
        self.address + self.size
    }

    /// Address `offset` bytes before the end of the region.
    ///
    /// Returns `None` if that would fall before the start of the region.
    pub const fn from_end(&self, offset: usize) -> Option<usize> {
        if offset > self.size {
            None
        } else {
            Some(self.end() - offset)
        }
    }

    /// Whether `[address, address + size)` lies entirely inside the region.
    pub const fn contains(&self, address: usize, size: usize) -> bool {
        match address.checked_add(size) {
            Some(end) => address >= self.address && end <= self.end(),
            None => false,
        }
    }
}

/// The regions the early boot path touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryMap {
    /// IRAM range the boot code image was loaded into. Cleared before any
    /// other secure-world code can read what was left there.
    pub iram_boot_code_image: MemoryRegion,

    /// System counter (SYSCTR0) register block.
    pub sysctr0: MemoryRegion,

    /// DRAM carveout shared with the GPU and TSEC.
    pub gpu_carveout: MemoryRegion,

    /// Parameter block shared with the companion bootloader.
    pub secure_monitor_parameters: MemoryRegion,
}
