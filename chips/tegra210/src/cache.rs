// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! AArch64 data cache maintenance for the Cortex-A57 cluster.

use secmon::hil::cache::MemoryPrimitives;

/// Data cache line size of the Cortex-A57.
pub const CACHE_LINE_SIZE: usize = 64;

/// First cache line start at or below `address`, and the end of the line
/// range covering `[address, address + size)`.
const fn line_range(address: usize, size: usize) -> (usize, usize) {
    let start = address & !(CACHE_LINE_SIZE - 1);
    let end = (address + size + CACHE_LINE_SIZE - 1) & !(CACHE_LINE_SIZE - 1);
    (start, end)
}

/// `dc civac`: clean and invalidate one line by virtual address to the point
/// of coherency.
#[cfg(any(doc, all(target_arch = "aarch64", target_os = "none")))]
#[inline(always)]
fn dc_civac(address: usize) {
    use core::arch::asm;
    unsafe {
        asm!("dc civac, {}", in(reg) address, options(nostack, preserves_flags));
    }
}

/// `dsb ish`
#[cfg(any(doc, all(target_arch = "aarch64", target_os = "none")))]
#[inline(always)]
fn dsb_ish() {
    use core::arch::asm;
    unsafe {
        asm!("dsb ish", options(nostack, preserves_flags));
    }
}

// Mock implementations for host builds.
#[cfg(not(any(doc, all(target_arch = "aarch64", target_os = "none"))))]
fn dc_civac(_address: usize) {
    unimplemented!()
}

#[cfg(not(any(doc, all(target_arch = "aarch64", target_os = "none"))))]
fn dsb_ish() {
    unimplemented!()
}

pub struct Aarch64Cache {
    _private: (),
}

impl Aarch64Cache {
    /// # Safety
    ///
    /// Every range later passed to `clear_memory` must be RAM that is valid
    /// for writes and not referenced by any live Rust reference.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MemoryPrimitives for Aarch64Cache {
    fn clear_memory(&self, address: usize, size: usize) {
        // SAFETY: guaranteed by the contract of `Aarch64Cache::new`.
        unsafe { core::ptr::write_bytes(address as *mut u8, 0, size) }
    }

    fn flush_data_cache(&self, address: usize, size: usize) {
        let (start, end) = line_range(address, size);
        for line in (start..end).step_by(CACHE_LINE_SIZE) {
            dc_civac(line);
        }
    }

    fn data_synchronization_barrier_inner_shareable(&self) {
        dsb_ish();
    }
}
