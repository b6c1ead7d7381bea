// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use secmon::boot_config::BootConfig;
use secmon::hil::cache::MemoryPrimitives;
use secmon::hil::device::{Ecid, SocType};
use secmon::hil::mmio::RegisterPort;
use secmon::hil::time::BusyWait;
use secmon::hil::verify::BootConfigVerifier;
use secmon::sim::{SimulatedDevice, SimulatedMemory};
use secmon::{MemoryMap, MemoryRegion, Platform};

pub const BASE: usize = 0x4000_0000;
pub const WORDS: usize = 0x1000;

pub const MAP: MemoryMap = MemoryMap {
    iram_boot_code_image: MemoryRegion::new(BASE, 0x800),
    sysctr0: MemoryRegion::new(BASE + 0x1000, 0x100),
    gpu_carveout: MemoryRegion::new(BASE + 0x2000, 0x1000),
    secure_monitor_parameters: MemoryRegion::new(BASE + 0x3f00, 0x100),
};

pub const BOOTLOADER_STATE: usize = BASE + 0x3f00 + 0xf8;
pub const SECMON_STATE: usize = BASE + 0x3f00 + 0xfc;

pub const DEVICE_ECID: Ecid = [
    0x1f, 0x00, 0x20, 0x0c, 0x35, 0x84, 0x18, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x42,
];

/// A verifier with fixed verdicts that records how it was consulted.
#[derive(Default)]
pub struct FixedOracle {
    pub signature: bool,
    pub binding: bool,
    pub signature_calls: Cell<usize>,
    pub binding_calls: Cell<usize>,
}

impl FixedOracle {
    pub fn new(signature: bool, binding: bool) -> Self {
        Self {
            signature,
            binding,
            ..Default::default()
        }
    }
}

impl BootConfigVerifier for FixedOracle {
    fn verify_signature(&self, _data: &[u8], _signature: &[u8], _public_modulus: &[u8]) -> bool {
        self.signature_calls.set(self.signature_calls.get() + 1);
        self.signature
    }

    fn verify_device_binding(&self, _config: &BootConfig) -> bool {
        self.binding_calls.set(self.binding_calls.get() + 1);
        self.binding
    }
}

/// One observable hardware operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Clear { address: usize, size: usize },
    Read { address: usize },
    Write { address: usize, value: u32 },
    Flush { address: usize, size: usize },
    Barrier,
    Wait { us: u32 },
}

/// Forwards to a [`SimulatedMemory`] and records every operation in order.
///
/// `advance_after` lets the test play the bootloader: after the given
/// number of waits the bootloader state word is set to the given value.
pub struct Recorder<'a> {
    pub memory: &'a SimulatedMemory<WORDS>,
    pub ops: RefCell<Vec<Op>>,
    pub advance_after: Option<(usize, u32)>,
    waits: Cell<usize>,
}

impl<'a> Recorder<'a> {
    pub fn new(memory: &'a SimulatedMemory<WORDS>) -> Self {
        Self {
            memory,
            ops: RefCell::new(Vec::new()),
            advance_after: None,
            waits: Cell::new(0),
        }
    }

    fn push(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }

    pub fn take(&self) -> Vec<Op> {
        self.ops.take()
    }
}

impl RegisterPort for Recorder<'_> {
    fn read32(&self, address: usize) -> u32 {
        self.push(Op::Read { address });
        self.memory.read32(address)
    }

    fn write32(&self, address: usize, value: u32) {
        self.push(Op::Write { address, value });
        self.memory.write32(address, value);
    }
}

impl MemoryPrimitives for Recorder<'_> {
    fn clear_memory(&self, address: usize, size: usize) {
        self.push(Op::Clear { address, size });
        self.memory.clear_memory(address, size);
    }

    fn flush_data_cache(&self, address: usize, size: usize) {
        self.push(Op::Flush { address, size });
        self.memory.flush_data_cache(address, size);
    }

    fn data_synchronization_barrier_inner_shareable(&self) {
        self.push(Op::Barrier);
        self.memory.data_synchronization_barrier_inner_shareable();
    }
}

impl BusyWait for Recorder<'_> {
    fn wait_microseconds(&self, us: u32) {
        self.push(Op::Wait { us });
        let waits = self.waits.get() + 1;
        self.waits.set(waits);
        if let Some((after, state)) = self.advance_after {
            if waits == after {
                self.memory.set_word(BOOTLOADER_STATE, state);
            }
        }
    }
}

/// Platform whose port, memory and delay all go through one [`Recorder`].
pub struct RecordingPlatform<'a, V: BootConfigVerifier> {
    pub recorder: Recorder<'a>,
    pub device: SimulatedDevice,
    pub verifier: V,
}

impl<'a, V: BootConfigVerifier> RecordingPlatform<'a, V> {
    pub fn new(memory: &'a SimulatedMemory<WORDS>, production: bool, verifier: V) -> Self {
        Self {
            recorder: Recorder::new(memory),
            device: SimulatedDevice::new(production, DEVICE_ECID, SocType::Erista),
            verifier,
        }
    }
}

impl<'a, V: BootConfigVerifier> Platform for RecordingPlatform<'a, V> {
    type Port = Recorder<'a>;
    type Memory = Recorder<'a>;
    type Wait = Recorder<'a>;
    type Device = SimulatedDevice;
    type Verifier = V;

    fn register_port(&self) -> &Self::Port {
        &self.recorder
    }

    fn memory(&self) -> &Self::Memory {
        &self.recorder
    }

    fn busy_wait(&self) -> &Self::Wait {
        &self.recorder
    }

    fn device(&self) -> &Self::Device {
        &self.device
    }

    fn verifier(&self) -> &Self::Verifier {
        &self.verifier
    }

    fn memory_map(&self) -> &MemoryMap {
        &MAP
    }
}

pub fn new_memory() -> Box<SimulatedMemory<WORDS>> {
    Box::new(SimulatedMemory::new(BASE))
}

/// A development boot configuration bound to [`DEVICE_ECID`].
pub fn sample_config(initial_tsc: Option<u64>) -> BootConfig {
    let mut config = BootConfig::zeroed();
    config.data_mut().set_version(1);
    config.data_mut().set_initial_tsc_value(initial_tsc);
    config.signature_mut().fill(0xa5);
    config.signed_data_mut().set_version(1);
    config.signed_data_mut().set_ecid(&DEVICE_ECID);
    config.signed_data_mut().set_package2_signature_verification_disabled(true);
    config.signed_data_mut().set_serror_debug_enabled(true);
    config
}
