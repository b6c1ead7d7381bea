// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Early boot sequencing.
//!
//! [`BootSequencer::run`] performs, in order:
//!
//! 1. clear the IRAM boot code image,
//! 2. wait for the companion bootloader to publish the boot configuration,
//! 3. load the boot configuration and verify it (or clear its signed data),
//! 4. seed and start the system counter,
//! 5. write the GPU carveout magic numbers,
//!
//! and finally reports `SecureMonitorState::Initialized` back to the
//! bootloader. The individual steps are public so a board can interleave
//! its own bring-up, but nothing on this path returns an error: a bad boot
//! configuration ends up zeroed, and a bootloader that never makes progress
//! hangs the boot.

use log::{debug, info};

use crate::boot_config::{BootConfig, BootConfigStorage, BOOT_CONFIG_RSA_PUBLIC_MODULUS};
use crate::carveout::GpuCarveout;
use crate::hil::cache::MemoryPrimitives;
use crate::hil::device::{DeviceState, SocType};
use crate::hil::time::BusyWait;
use crate::memory::MemoryRegion;
use crate::params::{BootloaderState, SecureMonitorParameters, SecureMonitorState};
use crate::platform::Platform;
use crate::sysctr0::SystemCounter;
use crate::ErrorCode;

/// Delay between two polls of the bootloader state.
const BOOTLOADER_POLL_INTERVAL_US: u32 = 1;

pub struct BootSequencer<'a, P: Platform> {
    platform: &'a P,
    storage: &'a mut BootConfigStorage,
    /// Snapshot of the production flag, taken once in `new`.
    production: bool,
    soc: SocType,
    iram: MemoryRegion,
    params: SecureMonitorParameters<'a, P::Port>,
    counter: SystemCounter<'a, P::Port>,
    carveout: GpuCarveout,
}

impl<'a, P: Platform> BootSequencer<'a, P> {
    /// Binds the sequencer to `platform` and the boot configuration slot.
    ///
    /// This is the only fallible step: it checks that the platform's memory
    /// map is large enough for every access the sequence makes. The
    /// production flag is read here, once.
    pub fn new(platform: &'a P, storage: &'a mut BootConfigStorage) -> Result<Self, ErrorCode> {
        let map = platform.memory_map();
        let port = platform.register_port();

        let params = SecureMonitorParameters::new(port, map.secure_monitor_parameters)?;
        let counter = SystemCounter::new(port, map.sysctr0)?;
        let carveout = GpuCarveout::new(map.gpu_carveout)?;

        let device = platform.device();
        let production = device.is_production();
        let soc = device.soc_type();
        debug!(
            "secmon: {:?} {} device",
            soc,
            if production { "production" } else { "development" }
        );

        Ok(Self {
            platform,
            storage,
            production,
            soc,
            iram: map.iram_boot_code_image,
            params,
            counter,
            carveout,
        })
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Zeroes the IRAM the boot code image was loaded into.
    pub fn clear_iram(&self) {
        self.platform
            .memory()
            .clear_memory(self.iram.address(), self.iram.size());
    }

    /// Spins until the bootloader has reached at least `state`.
    ///
    /// The shared word is re-read from memory on every poll. Values above
    /// the last known state also satisfy the wait.
    pub fn wait_for_nx_bootloader(&self, state: BootloaderState) {
        let target = u32::from(state);
        let delay = self.platform.busy_wait();
        while self.params.bootloader_state_raw() < target {
            delay.wait_microseconds(BOOTLOADER_POLL_INTERVAL_US);
        }
    }

    /// Copies `src` into the boot configuration slot, or zeroes the slot on
    /// a production device.
    pub fn load_boot_config(&mut self, src: &BootConfig) {
        self.storage
            .load(self.production, src, self.platform.memory());
    }

    /// Verifies the slot against the compiled-in root key and this device's
    /// identity, zeroing the signed data unless both checks pass.
    pub fn verify_or_clear_boot_config(&mut self) {
        self.storage.verify_or_clear(
            self.platform.verifier(),
            &BOOT_CONFIG_RSA_PUBLIC_MODULUS,
        );
    }

    /// Seeds the system counter with `initial_value` and starts it.
    pub fn enable_tsc(&self, initial_value: u64) {
        self.counter.enable(initial_value);
    }

    pub fn write_gpu_carveout_magic_numbers(&self) {
        self.carveout.write_magic_numbers(
            self.platform.register_port(),
            self.platform.memory(),
            self.soc,
        );
    }

    fn publish_secmon_state(&self, state: SecureMonitorState) {
        self.params.set_secmon_state(state);

        let memory = self.platform.memory();
        memory.flush_data_cache(self.params.secmon_state_address(), 4);
        memory.data_synchronization_barrier_inner_shareable();
    }

    /// Runs the whole early boot sequence with the boot configuration the
    /// bootloader placed at `src`.
    ///
    /// Returns the slot, which stays unchanged for the rest of this boot.
    pub fn run(mut self, src: &BootConfig) -> &'a BootConfigStorage {
        self.clear_iram();

        self.wait_for_nx_bootloader(BootloaderState::LoadedBootConfig);

        self.load_boot_config(src);
        self.verify_or_clear_boot_config();

        let initial_tsc = self.storage.get().data().initial_tsc_value().unwrap_or(0);
        self.enable_tsc(initial_tsc);

        self.write_gpu_carveout_magic_numbers();

        self.publish_secmon_state(SecureMonitorState::Initialized);
        info!(
            "secmon: early boot done, boot config {:?}",
            self.storage.state()
        );

        self.storage
    }
}
