// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Physical memory map seen by the secure monitor during early boot.

use secmon::boot_config::BOOT_CONFIG_SIZE;
use secmon::params::SECURE_MONITOR_PARAMETERS_SIZE;
use secmon::{MemoryMap, MemoryRegion};

/// Parameter block shared with the companion bootloader.
pub const IRAM_SECURE_MONITOR_PARAMETERS: MemoryRegion =
    MemoryRegion::new(0x4000_2e00, SECURE_MONITOR_PARAMETERS_SIZE);

/// Where the boot code image was loaded by the boot ROM.
pub const IRAM_BOOT_CODE_IMAGE: MemoryRegion = MemoryRegion::new(0x4003_2000, 0xc000);

/// Where the companion bootloader leaves the boot configuration.
pub const IRAM_BOOT_CONFIG: MemoryRegion = MemoryRegion::new(0x4003_f800, BOOT_CONFIG_SIZE);

pub const SYSCTR0: MemoryRegion = MemoryRegion::new(0x700f_0000, 0x1_0000);

pub const DRAM_GPU_CARVEOUT: MemoryRegion = MemoryRegion::new(0x8002_0000, 0x4_0000);

pub const MEMORY_MAP: MemoryMap = MemoryMap {
    iram_boot_code_image: IRAM_BOOT_CODE_IMAGE,
    sysctr0: SYSCTR0,
    gpu_carveout: DRAM_GPU_CARVEOUT,
    secure_monitor_parameters: IRAM_SECURE_MONITOR_PARAMETERS,
};

const _: () = assert!(IRAM_BOOT_CODE_IMAGE.end() <= IRAM_BOOT_CONFIG.address());
