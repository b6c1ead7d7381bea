// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! The boot configuration record and the slot that holds it.
//!
//! A boot configuration is a fixed 0x400-byte record produced off-device and
//! handed to the secure monitor by the companion bootloader. Its layout is a
//! wire contract with whatever signs it:
//!
//! ```text
//! 0x000  data         unsigned metadata          0x200 bytes
//! 0x200  signature    RSA-2048 over signed_data  0x100 bytes
//! 0x300  signed_data  ECID binding and flags     0x100 bytes
//! ```
//!
//! All multi-byte fields are little endian. Field order and sizes must not
//! change without bumping the record version.
//!
//! The signed portion grants debug privileges. It is only ever trusted after
//! both the signature and the ECID binding check out; otherwise it is zeroed,
//! and an all-zero `signed_data` grants nothing.

use log::{debug, info, warn};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

use crate::config::CONFIG;
use crate::hil::cache::MemoryPrimitives;
use crate::hil::device::{Ecid, ECID_LEN};
use crate::hil::verify::BootConfigVerifier;
use crate::ErrorCode;

/// Size in bytes of an RSA-2048 modulus or signature.
pub const RSA_SIZE: usize = 0x100;

/// Size in bytes of a complete boot configuration record.
pub const BOOT_CONFIG_SIZE: usize = 0x400;

/// Modulus of the RSA-2048 key boot configurations must be signed with.
pub const BOOT_CONFIG_RSA_PUBLIC_MODULUS: [u8; RSA_SIZE] = [
    0xB5, 0x96, 0x87, 0x31, 0x39, 0xAA, 0xBB, 0x3C, 0x28, 0xF3, 0xF0, 0x65, 0xF1, 0x50, 0x70, 0x64,
    0xE6, 0x6C, 0x97, 0x50, 0xCD, 0xA6, 0xEE, 0xEA, 0xC3, 0x8F, 0xE6, 0xB5, 0x81, 0x54, 0x65, 0x33,
    0x1B, 0x88, 0x4B, 0xCE, 0x9F, 0x53, 0xDF, 0xE4, 0xF6, 0xAD, 0xC3, 0x78, 0xD7, 0x3C, 0xD1, 0xDB,
    0x27, 0x21, 0xA0, 0x24, 0x30, 0x2D, 0x98, 0x41, 0xA8, 0xDF, 0x50, 0x7D, 0xAB, 0xCE, 0x00, 0xD9,
    0xCB, 0xAC, 0x8F, 0x37, 0xF5, 0x53, 0xE4, 0x97, 0x1F, 0x13, 0x3C, 0x19, 0xFF, 0x05, 0xA7, 0x3B,
    0xF6, 0xF4, 0x01, 0xDE, 0xF0, 0xC3, 0x77, 0x7B, 0x83, 0xBA, 0xAF, 0x99, 0x30, 0x94, 0x87, 0x25,
    0x4E, 0x54, 0x42, 0x3F, 0xAC, 0x27, 0xF9, 0xCC, 0x87, 0xDD, 0xAE, 0xF2, 0x54, 0xF3, 0x97, 0x49,
    0xF4, 0xB0, 0xF8, 0x6D, 0xDA, 0x60, 0xE0, 0xFD, 0x57, 0xAE, 0x55, 0xA9, 0x76, 0xEA, 0x80, 0x24,
    0xA0, 0x04, 0x7D, 0xBE, 0xD1, 0x81, 0xD3, 0x0C, 0x95, 0xCF, 0xB7, 0xE0, 0x2D, 0x21, 0x21, 0xFF,
    0x97, 0x1E, 0xB3, 0xD7, 0x9F, 0xBB, 0x33, 0x0C, 0x23, 0xC5, 0x88, 0x4A, 0x33, 0xB9, 0xC9, 0x4E,
    0x1E, 0x65, 0x51, 0x45, 0xDE, 0xF9, 0x64, 0x7C, 0xF0, 0xBF, 0x11, 0xB4, 0x93, 0x8D, 0x5D, 0xC6,
    0xAB, 0x37, 0x9E, 0xE9, 0x39, 0xC1, 0xC8, 0xDB, 0xB9, 0xFE, 0x45, 0xCE, 0x7B, 0xDD, 0x72, 0xD9,
    0x6F, 0x68, 0x13, 0xC0, 0x4B, 0xBA, 0x00, 0xF4, 0x1E, 0x89, 0x71, 0x91, 0x26, 0xA6, 0x46, 0x12,
    0xDF, 0x29, 0x6B, 0xC2, 0x5A, 0x53, 0xAF, 0xB9, 0x5B, 0xFD, 0x13, 0x9F, 0xD1, 0x8A, 0x7C, 0xB5,
    0x04, 0xFD, 0x69, 0xEA, 0x23, 0xB4, 0x6D, 0x16, 0x21, 0x98, 0x54, 0xB4, 0xDF, 0xE6, 0xAB, 0x93,
    0x36, 0xB6, 0xD2, 0x43, 0xCF, 0x2B, 0x98, 0x1D, 0x45, 0xC9, 0xBB, 0x20, 0x42, 0xB1, 0x9D, 0x1D,
];

/// Unsigned portion of a boot configuration.
///
/// Nothing here grants privileges; it survives sanitization untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeroes, FromBytes, AsBytes)]
#[repr(C)]
pub struct BootConfigData {
    version: [u8; 4],
    reserved_04: [u8; 4],
    reserved_08: [u8; 4],
    reserved_0c: [u8; 4],
    flags1: [u8; 0x10],
    flags0: [u8; 0x10],
    initial_tsc_value: [u8; 8],
    padding_38: [u8; 0x1c8],
}

impl BootConfigData {
    pub const fn zeroed() -> Self {
        Self {
            version: [0; 4],
            reserved_04: [0; 4],
            reserved_08: [0; 4],
            reserved_0c: [0; 4],
            flags1: [0; 0x10],
            flags0: [0; 0x10],
            initial_tsc_value: [0; 8],
            padding_38: [0; 0x1c8],
        }
    }

    pub fn version(&self) -> u32 {
        u32::from_le_bytes(self.version)
    }

    pub fn is_initial_tsc_value_valid(&self) -> bool {
        self.flags0[0] & (1 << 0) != 0
    }

    /// Value the system counter should start from, if the record sets one.
    pub fn initial_tsc_value(&self) -> Option<u64> {
        if self.is_initial_tsc_value_valid() {
            Some(u64::from_le_bytes(self.initial_tsc_value))
        } else {
            None
        }
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version.to_le_bytes();
    }

    /// Sets (or with `None`, clears) the initial system counter value.
    pub fn set_initial_tsc_value(&mut self, value: Option<u64>) {
        match value {
            Some(tsc) => {
                self.initial_tsc_value = tsc.to_le_bytes();
                self.flags0[0] |= 1 << 0;
            }
            None => {
                self.initial_tsc_value = [0; 8];
                self.flags0[0] &= !(1 << 0);
            }
        }
    }
}

/// Signed portion of a boot configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeroes, FromBytes, AsBytes)]
#[repr(C)]
pub struct BootConfigSignedData {
    version: [u8; 4],
    reserved_04: [u8; 4],
    flags: u8,
    reserved_09: [u8; 7],
    ecid: [u8; ECID_LEN],
    flags1: [u8; 0x10],
    flags0: [u8; 0x10],
    padding_40: [u8; 0xc0],
}

impl BootConfigSignedData {
    pub const fn zeroed() -> Self {
        Self {
            version: [0; 4],
            reserved_04: [0; 4],
            flags: 0,
            reserved_09: [0; 7],
            ecid: [0; ECID_LEN],
            flags1: [0; 0x10],
            flags0: [0; 0x10],
            padding_40: [0; 0xc0],
        }
    }

    pub fn version(&self) -> u32 {
        u32::from_le_bytes(self.version)
    }

    /// ECID of the one device this record was signed for.
    pub fn ecid(&self) -> &Ecid {
        &self.ecid
    }

    pub fn is_package2_encryption_disabled(&self) -> bool {
        self.flags & (1 << 0) != 0
    }

    pub fn is_package2_signature_verification_disabled(&self) -> bool {
        self.flags & (1 << 1) != 0
    }

    pub fn is_program_verification_disabled(&self) -> bool {
        self.flags1[0] & (1 << 0) != 0
    }

    pub fn is_development_function_enabled(&self) -> bool {
        self.flags0[0] & (1 << 0) != 0
    }

    pub fn is_serror_debug_enabled(&self) -> bool {
        self.flags0[0] & (1 << 1) != 0
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version.to_le_bytes();
    }

    pub fn set_ecid(&mut self, ecid: &Ecid) {
        self.ecid = *ecid;
    }

    pub fn set_package2_encryption_disabled(&mut self, disabled: bool) {
        set_bit(&mut self.flags, 0, disabled);
    }

    pub fn set_package2_signature_verification_disabled(&mut self, disabled: bool) {
        set_bit(&mut self.flags, 1, disabled);
    }

    pub fn set_program_verification_disabled(&mut self, disabled: bool) {
        set_bit(&mut self.flags1[0], 0, disabled);
    }

    pub fn set_development_function_enabled(&mut self, enabled: bool) {
        set_bit(&mut self.flags0[0], 0, enabled);
    }

    pub fn set_serror_debug_enabled(&mut self, enabled: bool) {
        set_bit(&mut self.flags0[0], 1, enabled);
    }

    /// Whether every byte of the signed portion is zero.
    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|&b| b == 0)
    }
}

fn set_bit(byte: &mut u8, bit: u8, value: bool) {
    if value {
        *byte |= 1 << bit;
    } else {
        *byte &= !(1 << bit);
    }
}

/// A complete boot configuration record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeroes, FromBytes, AsBytes)]
#[repr(C)]
pub struct BootConfig {
    data: BootConfigData,
    signature: [u8; RSA_SIZE],
    signed_data: BootConfigSignedData,
}

const _: () = assert!(core::mem::size_of::<BootConfigData>() == 0x200);
const _: () = assert!(core::mem::size_of::<BootConfigSignedData>() == 0x100);
const _: () = assert!(core::mem::size_of::<BootConfig>() == BOOT_CONFIG_SIZE);

impl BootConfig {
    /// An all-zero record.
    pub const fn zeroed() -> Self {
        Self {
            data: BootConfigData::zeroed(),
            signature: [0; RSA_SIZE],
            signed_data: BootConfigSignedData::zeroed(),
        }
    }

    /// Decodes a record from exactly [`BOOT_CONFIG_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ErrorCode> {
        Self::read_from(bytes).ok_or(ErrorCode::SIZE)
    }

    pub fn data(&self) -> &BootConfigData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut BootConfigData {
        &mut self.data
    }

    pub fn signature(&self) -> &[u8; RSA_SIZE] {
        &self.signature
    }

    pub fn signature_mut(&mut self) -> &mut [u8; RSA_SIZE] {
        &mut self.signature
    }

    pub fn signed_data(&self) -> &BootConfigSignedData {
        &self.signed_data
    }

    pub fn signed_data_mut(&mut self) -> &mut BootConfigSignedData {
        &mut self.signed_data
    }
}

/// Where the slot is in its once-per-boot lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigState {
    /// Zero-initialized, nothing loaded yet.
    Reset,
    /// Copied in from the companion bootloader, not yet checked.
    Loaded,
    /// Signature and device binding both verified.
    Trusted,
    /// Signed data is all zero: either a check failed or the device is in
    /// production and never loaded anything.
    Sanitized,
}

/// The single slot holding the active boot configuration.
///
/// `const`-constructible so a board can place it in a `static`. After
/// [`verify_or_clear`](Self::verify_or_clear) the contents only change again
/// on the next boot.
pub struct BootConfigStorage {
    config: BootConfig,
    state: ConfigState,
}

impl BootConfigStorage {
    pub const fn new() -> Self {
        Self {
            config: BootConfig::zeroed(),
            state: ConfigState::Reset,
        }
    }

    /// The active boot configuration.
    pub fn get(&self) -> &BootConfig {
        &self.config
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    /// Whether the signed data passed both checks and may be acted upon.
    pub fn is_trusted(&self) -> bool {
        self.state == ConfigState::Trusted
    }

    /// Fills the slot from `src`.
    ///
    /// On a production device the slot is zeroed, marked `Sanitized` and
    /// `src` is never read. Otherwise `src` is flushed out of the data cache
    /// and the flush is fenced before the record is copied, so that a stale
    /// cache line cannot shadow what the companion bootloader wrote to DRAM.
    ///
    /// Once the slot has been verified (or sanitized) it is final for this
    /// boot, and further loads are ignored.
    pub fn load<M: MemoryPrimitives>(&mut self, production: bool, src: &BootConfig, memory: &M) {
        if self.is_final() {
            warn!("boot config: already {:?}, load ignored", self.state);
            return;
        }

        if production {
            self.config.zero();
            self.state = ConfigState::Sanitized;
            info!("boot config: production device, runtime configuration ignored");
            return;
        }

        let src_address = core::ptr::from_ref(src) as usize;
        memory.flush_data_cache(src_address, BOOT_CONFIG_SIZE);
        memory.data_synchronization_barrier_inner_shareable();

        self.config.as_bytes_mut().copy_from_slice(src.as_bytes());
        self.state = ConfigState::Loaded;
        info!("boot config: loaded from {:#x}", src_address);
    }

    fn is_final(&self) -> bool {
        matches!(self.state, ConfigState::Trusted | ConfigState::Sanitized)
    }

    fn sanitize(&mut self) {
        self.config.signed_data.zero();
        self.state = ConfigState::Sanitized;
    }

    /// Verifies the slot, zeroing the signed data unless it is both validly
    /// signed and bound to this device.
    ///
    /// The device binding is only consulted once the signature has been
    /// accepted: an unsigned record must not get as far as having its ECID
    /// compared. A production device was already sanitized by `load`, and a
    /// slot that was never loaded is sanitized without consulting
    /// `verifier`. Once the slot is `Trusted` or `Sanitized` further calls do
    /// nothing.
    pub fn verify_or_clear<V: BootConfigVerifier>(
        &mut self,
        verifier: &V,
        public_modulus: &[u8; RSA_SIZE],
    ) {
        match self.state {
            ConfigState::Trusted | ConfigState::Sanitized => return,
            ConfigState::Reset => {
                self.sanitize();
                warn!("boot config: nothing loaded, signed data cleared");
                return;
            }
            ConfigState::Loaded => {}
        }

        let mut valid_for_device = false;
        let valid_signature = verifier.verify_signature(
            self.config.signed_data.as_bytes(),
            &self.config.signature,
            public_modulus,
        );
        if valid_signature {
            valid_for_device = verifier.verify_device_binding(&self.config);
        }

        if CONFIG.debug_boot_config {
            debug!(
                "boot config: data v{} signed v{}, signature {}, device binding {}",
                self.config.data.version(),
                self.config.signed_data.version(),
                if valid_signature { "ok" } else { "bad" },
                if !valid_signature {
                    "skipped"
                } else if valid_for_device {
                    "ok"
                } else {
                    "bad"
                },
            );
        }

        if valid_for_device {
            self.state = ConfigState::Trusted;
            info!("boot config: verified");
        } else {
            self.sanitize();
            warn!("boot config: verification failed, signed data cleared");
        }
    }
}
