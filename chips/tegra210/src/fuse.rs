// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Fuse-backed device identity.
//!
//! The chip option fuses are shadowed into registers at boot. Production
//! state comes from the security mode fuse, the ECID is packed from the
//! manufacturing lot, wafer and die coordinate fuses.

use secmon::hil::device::{DeviceState, Ecid, SocType};
use secmon::hil::mmio::RegisterPort;
use tock_registers::{register_bitfields, LocalRegisterCopy};

/// Start of the shadowed chip option fuses.
pub const FUSE_CHIP_BASE: usize = 0x7000_f900;

pub mod offset {
    pub const SECURITY_MODE: usize = 0x0a0;
    pub const OPT_VENDOR_CODE: usize = 0x100;
    pub const OPT_FAB_CODE: usize = 0x104;
    pub const OPT_LOT_CODE_0: usize = 0x108;
    pub const OPT_LOT_CODE_1: usize = 0x10c;
    pub const OPT_WAFER_ID: usize = 0x110;
    pub const OPT_X_COORDINATE: usize = 0x114;
    pub const OPT_Y_COORDINATE: usize = 0x118;
    pub const OPT_OPS_RESERVED: usize = 0x120;
}

register_bitfields![u32,
    SECURITY_MODE [
        /// ODM production mode
        ENABLED OFFSET(0) NUMBITS(1) []
    ],
    OPT_VENDOR_CODE [
        CODE OFFSET(0) NUMBITS(4) []
    ],
    OPT_FAB_CODE [
        CODE OFFSET(0) NUMBITS(6) []
    ],
    OPT_LOT_CODE_1 [
        CODE OFFSET(0) NUMBITS(28) []
    ],
    OPT_WAFER_ID [
        ID OFFSET(0) NUMBITS(6) []
    ],
    OPT_X_COORDINATE [
        X OFFSET(0) NUMBITS(9) []
    ],
    OPT_Y_COORDINATE [
        Y OFFSET(0) NUMBITS(9) []
    ],
    OPT_OPS_RESERVED [
        RESERVED OFFSET(0) NUMBITS(6) []
    ]
];

/// Raw identity fuses, masked to their defined widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcidFuses {
    pub vendor: u32,
    pub fab: u32,
    pub lot0: u32,
    pub lot1: u32,
    pub wafer: u32,
    pub x: u32,
    pub y: u32,
    pub reserved: u32,
}

impl EcidFuses {
    /// Packs the fuses into the four ECID words, least significant first.
    pub fn words(&self) -> [u32; 4] {
        [
            (self.lot1 << 30) | (self.wafer << 24) | (self.x << 15) | (self.y << 6) | self.reserved,
            (self.lot0 << 26) | (self.lot1 >> 2),
            (self.fab << 26) | (self.lot0 >> 6),
            self.vendor,
        ]
    }

    pub fn ecid(&self) -> Ecid {
        let mut ecid = [0u8; 16];
        for (bytes, word) in ecid.chunks_exact_mut(4).zip(self.words()) {
            bytes.copy_from_slice(&word.to_le_bytes());
        }
        ecid
    }
}

pub struct FuseDeviceState<P: RegisterPort> {
    port: P,
    base: usize,
    soc: SocType,
}

impl<P: RegisterPort> FuseDeviceState<P> {
    pub const fn new(port: P, soc: SocType) -> Self {
        Self::with_base(port, FUSE_CHIP_BASE, soc)
    }

    pub const fn with_base(port: P, base: usize, soc: SocType) -> Self {
        Self { port, base, soc }
    }

    fn read<R: tock_registers::RegisterLongName>(&self, offset: usize) -> LocalRegisterCopy<u32, R> {
        LocalRegisterCopy::new(self.port.read32(self.base + offset))
    }

    pub fn ecid_fuses(&self) -> EcidFuses {
        EcidFuses {
            vendor: self
                .read::<OPT_VENDOR_CODE::Register>(offset::OPT_VENDOR_CODE)
                .read(OPT_VENDOR_CODE::CODE),
            fab: self
                .read::<OPT_FAB_CODE::Register>(offset::OPT_FAB_CODE)
                .read(OPT_FAB_CODE::CODE),
            lot0: self.port.read32(self.base + offset::OPT_LOT_CODE_0),
            lot1: self
                .read::<OPT_LOT_CODE_1::Register>(offset::OPT_LOT_CODE_1)
                .read(OPT_LOT_CODE_1::CODE),
            wafer: self
                .read::<OPT_WAFER_ID::Register>(offset::OPT_WAFER_ID)
                .read(OPT_WAFER_ID::ID),
            x: self
                .read::<OPT_X_COORDINATE::Register>(offset::OPT_X_COORDINATE)
                .read(OPT_X_COORDINATE::X),
            y: self
                .read::<OPT_Y_COORDINATE::Register>(offset::OPT_Y_COORDINATE)
                .read(OPT_Y_COORDINATE::Y),
            reserved: self
                .read::<OPT_OPS_RESERVED::Register>(offset::OPT_OPS_RESERVED)
                .read(OPT_OPS_RESERVED::RESERVED),
        }
    }
}

impl<P: RegisterPort> DeviceState for FuseDeviceState<P> {
    fn is_production(&self) -> bool {
        self.read::<SECURITY_MODE::Register>(offset::SECURITY_MODE)
            .is_set(SECURITY_MODE::ENABLED)
    }

    fn ecid(&self) -> Ecid {
        self.ecid_fuses().ecid()
    }

    fn soc_type(&self) -> SocType {
        self.soc
    }
}
