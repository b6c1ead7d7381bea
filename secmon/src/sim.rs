// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Simulated hardware for running the boot path off-target.
//!
//! [`SimulatedMemory`] is a word-addressed backing store that stands in for
//! both device registers and DRAM. It is `Sync`, so another thread can play
//! the companion bootloader and update the parameter block while the boot
//! path is polling it.
//!
//! Host-side test support only. Nothing here is linked into a firmware image
//! unless a board names it, and no board should: [`SimulatedMemory`] panics
//! on unaligned or out-of-range accesses instead of faulting.

use core::cell::Cell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::hil::cache::MemoryPrimitives;
use crate::hil::device::{DeviceState, Ecid, SocType};
use crate::hil::mmio::RegisterPort;
use crate::hil::time::BusyWait;
use crate::hil::verify::BootConfigVerifier;
use crate::memory::MemoryMap;
use crate::platform::Platform;

/// `WORDS` 32-bit words of memory starting at `base`.
pub struct SimulatedMemory<const WORDS: usize> {
    base: usize,
    words: [AtomicU32; WORDS],
    flushes: AtomicUsize,
    barriers: AtomicUsize,
}

impl<const WORDS: usize> SimulatedMemory<WORDS> {
    pub const fn new(base: usize) -> Self {
        Self {
            base,
            words: [const { AtomicU32::new(0) }; WORDS],
            flushes: AtomicUsize::new(0),
            barriers: AtomicUsize::new(0),
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    fn index(&self, address: usize) -> usize {
        if address % 4 != 0 {
            panic!("unaligned simulated access at {:#x}", address);
        }
        match address.checked_sub(self.base).map(|offset| offset / 4) {
            Some(index) if index < WORDS => index,
            _ => panic!("access at {:#x} outside simulated memory", address),
        }
    }

    pub fn word(&self, address: usize) -> u32 {
        self.words[self.index(address)].load(Ordering::SeqCst)
    }

    pub fn set_word(&self, address: usize, value: u32) {
        self.words[self.index(address)].store(value, Ordering::SeqCst);
    }

    /// Fills `[address, address + size)` with `value` repeated.
    pub fn fill(&self, address: usize, size: usize, value: u32) {
        for offset in (0..size).step_by(4) {
            self.set_word(address + offset, value);
        }
    }

    /// Whether every word of `[address, address + size)` is zero.
    pub fn is_zero(&self, address: usize, size: usize) -> bool {
        (0..size).step_by(4).all(|offset| self.word(address + offset) == 0)
    }

    /// Number of `flush_data_cache` calls so far.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    /// Number of barriers so far.
    pub fn barrier_count(&self) -> usize {
        self.barriers.load(Ordering::SeqCst)
    }
}

impl<const WORDS: usize> RegisterPort for SimulatedMemory<WORDS> {
    fn read32(&self, address: usize) -> u32 {
        self.word(address)
    }

    fn write32(&self, address: usize, value: u32) {
        self.set_word(address, value);
    }
}

impl<const WORDS: usize> MemoryPrimitives for SimulatedMemory<WORDS> {
    fn clear_memory(&self, address: usize, size: usize) {
        self.fill(address, size, 0);
    }

    fn flush_data_cache(&self, _address: usize, _size: usize) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }

    fn data_synchronization_barrier_inner_shareable(&self) {
        self.barriers.fetch_add(1, Ordering::SeqCst);
    }
}

/// A device with a fixed identity.
pub struct SimulatedDevice {
    production: bool,
    ecid: Ecid,
    soc: SocType,
    production_queries: Cell<usize>,
}

impl SimulatedDevice {
    pub const fn new(production: bool, ecid: Ecid, soc: SocType) -> Self {
        Self {
            production,
            ecid,
            soc,
            production_queries: Cell::new(0),
        }
    }

    /// Number of times the production flag has been read.
    pub fn production_queries(&self) -> usize {
        self.production_queries.get()
    }
}

impl DeviceState for SimulatedDevice {
    fn is_production(&self) -> bool {
        self.production_queries.set(self.production_queries.get() + 1);
        self.production
    }

    fn ecid(&self) -> Ecid {
        self.ecid
    }

    fn soc_type(&self) -> SocType {
        self.soc
    }
}

/// Busy wait that returns immediately and counts the microseconds it was
/// asked to spend. An optional hook runs on every call with the running
/// total, which lets a test advance simulated state while the boot path
/// spins.
pub struct SimulatedWait<'a> {
    elapsed_us: Cell<u64>,
    hook: Option<&'a dyn Fn(u64)>,
}

impl<'a> SimulatedWait<'a> {
    pub const fn new() -> Self {
        Self {
            elapsed_us: Cell::new(0),
            hook: None,
        }
    }

    pub const fn with_hook(hook: &'a dyn Fn(u64)) -> Self {
        Self {
            elapsed_us: Cell::new(0),
            hook: Some(hook),
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us.get()
    }
}

impl BusyWait for SimulatedWait<'_> {
    fn wait_microseconds(&self, us: u32) {
        let elapsed = self.elapsed_us.get() + u64::from(us);
        self.elapsed_us.set(elapsed);
        if let Some(hook) = self.hook {
            hook(elapsed);
        }
    }
}

/// A [`Platform`] assembled from the simulated parts above and a caller
/// provided verifier.
pub struct SimulatedPlatform<'a, const WORDS: usize, V: BootConfigVerifier> {
    pub memory: &'a SimulatedMemory<WORDS>,
    pub device: SimulatedDevice,
    pub wait: SimulatedWait<'a>,
    pub verifier: V,
    pub map: MemoryMap,
}

impl<'a, const WORDS: usize, V: BootConfigVerifier> Platform for SimulatedPlatform<'a, WORDS, V> {
    type Port = SimulatedMemory<WORDS>;
    type Memory = SimulatedMemory<WORDS>;
    type Wait = SimulatedWait<'a>;
    type Device = SimulatedDevice;
    type Verifier = V;

    fn register_port(&self) -> &Self::Port {
        self.memory
    }

    fn memory(&self) -> &Self::Memory {
        self.memory
    }

    fn busy_wait(&self) -> &Self::Wait {
        &self.wait
    }

    fn device(&self) -> &Self::Device {
        &self.device
    }

    fn verifier(&self) -> &Self::Verifier {
        &self.verifier
    }

    fn memory_map(&self) -> &MemoryMap {
        &self.map
    }
}
