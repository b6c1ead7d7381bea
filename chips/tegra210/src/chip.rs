// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Chip-level [`Platform`] for the Tegra X1.

use log::debug;
use secmon::boot_config::BootConfig;
use secmon::hil::device::SocType;
use secmon::hil::verify::BootConfigVerifier;
use secmon::{MemoryMap, Platform};

use crate::cache::Aarch64Cache;
use crate::fuse::FuseDeviceState;
use crate::memory_map;
use crate::mmio::MmioPort;
use crate::timer::MicrosecondTimer;

/// Board-facing configuration of the chip.
pub struct Tegra210Config {
    pub soc: SocType,
    pub memory_map: MemoryMap,
}

/// T210.
pub const ERISTA: Tegra210Config = Tegra210Config {
    soc: SocType::Erista,
    memory_map: memory_map::MEMORY_MAP,
};

/// T210B01.
pub const MARIKO: Tegra210Config = Tegra210Config {
    soc: SocType::Mariko,
    memory_map: memory_map::MEMORY_MAP,
};

pub struct Tegra210<V: BootConfigVerifier> {
    port: MmioPort,
    cache: Aarch64Cache,
    timer: MicrosecondTimer<MmioPort>,
    fuses: FuseDeviceState<MmioPort>,
    verifier: V,
    memory_map: MemoryMap,
}

impl<V: BootConfigVerifier> Tegra210<V> {
    /// # Safety
    ///
    /// Must be called on a Tegra X1 in the secure world with physical
    /// addresses identity mapped, and at most once per boot.
    pub unsafe fn new(config: &Tegra210Config, verifier: V) -> Self {
        let port = MmioPort::new();
        debug!("tegra210: {:?}", config.soc);
        Self {
            port,
            cache: Aarch64Cache::new(),
            timer: MicrosecondTimer::new(port),
            fuses: FuseDeviceState::new(port, config.soc),
            verifier,
            memory_map: config.memory_map,
        }
    }

    /// The boot configuration the companion bootloader left in IRAM.
    ///
    /// # Safety
    ///
    /// Only valid once the bootloader has reached
    /// `BootloaderState::LoadedBootConfig`, and only while nothing writes to
    /// that IRAM range.
    pub unsafe fn boot_config_source(&self) -> &BootConfig {
        &*(memory_map::IRAM_BOOT_CONFIG.address() as *const BootConfig)
    }
}

impl<V: BootConfigVerifier> Platform for Tegra210<V> {
    type Port = MmioPort;
    type Memory = Aarch64Cache;
    type Wait = MicrosecondTimer<MmioPort>;
    type Device = FuseDeviceState<MmioPort>;
    type Verifier = V;

    fn register_port(&self) -> &Self::Port {
        &self.port
    }

    fn memory(&self) -> &Self::Memory {
        &self.cache
    }

    fn busy_wait(&self) -> &Self::Wait {
        &self.timer
    }

    fn device(&self) -> &Self::Device {
        &self.fuses
    }

    fn verifier(&self) -> &Self::Verifier {
        &self.verifier
    }

    fn memory_map(&self) -> &MemoryMap {
        &self.memory_map
    }
}
