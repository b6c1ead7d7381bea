// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interface a chip or board provides to the boot sequencer.

use crate::hil::cache::MemoryPrimitives;
use crate::hil::device::DeviceState;
use crate::hil::mmio::RegisterPort;
use crate::hil::time::BusyWait;
use crate::hil::verify::BootConfigVerifier;
use crate::memory::MemoryMap;

/// Bundles the hardware the early boot path needs.
///
/// Each associated type is one seam: a board picks the real chip drivers,
/// a test picks the simulated ones from [`crate::sim`].
pub trait Platform {
    /// 32-bit accesses to device registers and shared memory words.
    type Port: RegisterPort;

    /// Memory clearing and cache maintenance.
    type Memory: MemoryPrimitives;

    /// Microsecond delays.
    type Wait: BusyWait;

    /// Production state, ECID and SoC revision.
    type Device: DeviceState;

    /// Boot configuration signature and device binding checks.
    type Verifier: BootConfigVerifier;

    fn register_port(&self) -> &Self::Port;
    fn memory(&self) -> &Self::Memory;
    fn busy_wait(&self) -> &Self::Wait;
    fn device(&self) -> &Self::Device;
    fn verifier(&self) -> &Self::Verifier;

    /// Physical addresses of the regions touched during early boot.
    fn memory_map(&self) -> &MemoryMap;
}
