// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Magic numbers the GPU and TSEC firmware look for at the top of the GPU
//! carveout.
//!
//! ```text
//!  carveout end - 0x100  +0x0  SKU info          0x83
//!                        +0x4  HDCP µcode ver.   0x2
//!                        +0x8  chip id           0x210 / 0x214
//!  carveout end - 0x4          GPU magic         0xC0EDBBCC
//! ```

use crate::hil::cache::MemoryPrimitives;
use crate::hil::device::SocType;
use crate::hil::mmio::RegisterPort;
use crate::memory::MemoryRegion;
use crate::ErrorCode;

pub const GPU_MAGIC_NUMBER: u32 = 0xc0ed_bbcc;
pub const TSEC_SKU_INFO: u32 = 0x83;
pub const TSEC_HDCP_MICROCODE_VERSION: u32 = 0x2;

const GPU_MAGIC_OFFSET_FROM_END: usize = 0x4;
const TSEC_OFFSET_FROM_END: usize = 0x100;
const TSEC_WORDS: usize = 3;

/// Locations of the magic words inside a GPU carveout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GpuCarveout {
    gpu_magic: usize,
    tsec: usize,
}

impl GpuCarveout {
    /// Fails with `SIZE` if `region` is too small to hold the TSEC block.
    pub fn new(region: MemoryRegion) -> Result<Self, ErrorCode> {
        match (
            region.from_end(GPU_MAGIC_OFFSET_FROM_END),
            region.from_end(TSEC_OFFSET_FROM_END),
        ) {
            (Some(gpu_magic), Some(tsec)) => Ok(Self { gpu_magic, tsec }),
            _ => Err(ErrorCode::SIZE),
        }
    }

    pub fn gpu_magic_address(&self) -> usize {
        self.gpu_magic
    }

    pub fn tsec_address(&self) -> usize {
        self.tsec
    }

    /// Writes the GPU magic and the three TSEC words, then makes all of them
    /// visible outside the CPU caches before returning.
    pub fn write_magic_numbers<P: RegisterPort, M: MemoryPrimitives>(
        &self,
        port: &P,
        memory: &M,
        soc: SocType,
    ) {
        port.write32(self.gpu_magic, GPU_MAGIC_NUMBER);

        port.write32(self.tsec, TSEC_SKU_INFO);
        port.write32(self.tsec + 0x4, TSEC_HDCP_MICROCODE_VERSION);
        port.write32(self.tsec + 0x8, soc.chip_id());

        memory.flush_data_cache(self.gpu_magic, 4);
        memory.flush_data_cache(self.tsec, TSEC_WORDS * 4);
        memory.data_synchronization_barrier_inner_shareable();
    }
}
