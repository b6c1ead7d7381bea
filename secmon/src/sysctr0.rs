// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! System counter (SYSCTR0).
//!
//! The free-running counter behind the architectural timer. It is stopped
//! out of reset and has to be seeded and started by the secure monitor.

use log::trace;
use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::config::CONFIG;
use crate::hil::mmio::RegisterPort;
use crate::memory::MemoryRegion;
use crate::ErrorCode;

pub mod offset {
    /// Counter control
    pub const CNTCR: usize = 0x000;
    /// Counter value, bits 31:0
    pub const CNTCV0: usize = 0x008;
    /// Counter value, bits 63:32
    pub const CNTCV1: usize = 0x00c;
    /// Base frequency
    pub const CNTFID0: usize = 0x020;
}

/// Size of the register block this driver touches.
const SYSCTR0_SIZE: usize = offset::CNTFID0 + 4;

register_bitfields![u32,
    /// Counter control register
    pub CNTCR [
        /// Enable counting
        EN OFFSET(0) NUMBITS(1) [
            Disable = 0,
            Enable = 1
        ],
        /// Halt counting while a debugger has halted the core
        HDBG OFFSET(1) NUMBITS(1) [
            Disable = 0,
            Enable = 1
        ]
    ]
];

/// Type-safe representation of a counter control register value.
pub type CntcrVal = LocalRegisterCopy<u32, CNTCR::Register>;

pub struct SystemCounter<'a, P: RegisterPort> {
    port: &'a P,
    base: usize,
}

impl<'a, P: RegisterPort> SystemCounter<'a, P> {
    /// Fails with `SIZE` if `region` does not cover the counter registers.
    pub fn new(port: &'a P, region: MemoryRegion) -> Result<Self, ErrorCode> {
        if region.size() < SYSCTR0_SIZE {
            return Err(ErrorCode::SIZE);
        }
        Ok(Self {
            port,
            base: region.address(),
        })
    }

    fn write(&self, offset: usize, value: u32) {
        if CONFIG.trace_register_writes {
            trace!("sysctr0: [{:#05x}] <- {:#010x}", offset, value);
        }
        self.port.write32(self.base + offset, value);
    }

    /// Seeds the counter with `initial_value` and starts it.
    ///
    /// Both value words are written before the enable, low word first.
    /// Counting halts while the core is halted in debug.
    pub fn enable(&self, initial_value: u64) {
        let lo = initial_value as u32;
        let hi = (initial_value >> 32) as u32;

        self.write(offset::CNTCV0, lo);
        self.write(offset::CNTCV1, hi);

        self.write(
            offset::CNTCR,
            (CNTCR::HDBG::Enable + CNTCR::EN::Enable).value,
        );
    }

    pub fn control(&self) -> CntcrVal {
        LocalRegisterCopy::new(self.port.read32(self.base + offset::CNTCR))
    }

    pub fn is_enabled(&self) -> bool {
        self.control().is_set(CNTCR::EN)
    }

    /// Current counter value.
    pub fn value(&self) -> u64 {
        // Re-read the high word until it is stable across the low word read.
        loop {
            let hi = self.port.read32(self.base + offset::CNTCV1);
            let lo = self.port.read32(self.base + offset::CNTCV0);
            if self.port.read32(self.base + offset::CNTCV1) == hi {
                return (u64::from(hi) << 32) | u64::from(lo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedMemory;

    const BASE: usize = 0x700f_0000;

    #[test]
    fn enable_seeds_and_starts() {
        let memory = SimulatedMemory::<0x10>::new(BASE);
        let counter = SystemCounter::new(&memory, MemoryRegion::new(BASE, 0x40)).unwrap();
        assert!(!counter.is_enabled());

        counter.enable(0x0000_0001_0000_0002);

        assert_eq!(memory.word(BASE + offset::CNTCV0), 0x0000_0002);
        assert_eq!(memory.word(BASE + offset::CNTCV1), 0x0000_0001);
        assert_eq!(counter.value(), 0x0000_0001_0000_0002);

        let cntcr = counter.control();
        assert!(cntcr.is_set(CNTCR::EN));
        assert!(cntcr.is_set(CNTCR::HDBG));
        assert_eq!(cntcr.get(), 0b11);
    }

    #[test]
    fn region_must_cover_registers() {
        let memory = SimulatedMemory::<0x10>::new(BASE);
        assert_eq!(
            SystemCounter::new(&memory, MemoryRegion::new(BASE, 0x20)).err(),
            Some(ErrorCode::SIZE)
        );
    }
}
