// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Per-device identity and manufacturing state.

/// Length in bytes of a device ECID.
pub const ECID_LEN: usize = 16;

/// Unique per-chip identifier, as embedded in a signed boot configuration.
pub type Ecid = [u8; ECID_LEN];

/// Silicon revision of the SoC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocType {
    /// T210, the first revision.
    Erista,
    /// T210B01.
    Mariko,
}

impl SocType {
    /// Chip id the GPU/TSEC microcode expects to find in the carveout.
    pub const fn chip_id(self) -> u32 {
        match self {
            SocType::Erista => 0x210,
            SocType::Mariko => 0x214,
        }
    }
}

/// Queries about the executing device.
pub trait DeviceState {
    /// Whether the device has been fused for production.
    ///
    /// Production devices never honor a boot configuration supplied at
    /// runtime.
    fn is_production(&self) -> bool;

    /// The executing device's ECID.
    fn ecid(&self) -> Ecid;

    /// The SoC revision of the executing device.
    fn soc_type(&self) -> SocType;
}
