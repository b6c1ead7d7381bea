// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Parameter block shared with the companion bootloader.
//!
//! The bootloader runs at a lower privilege level on another core and reports
//! its progress through `bootloader_state`. The secure monitor reports its
//! own progress back through `secmon_state`. Both are plain words in memory;
//! every access re-reads or re-writes memory through the register port.

use core::convert::TryFrom;

use crate::hil::mmio::RegisterPort;
use crate::memory::MemoryRegion;
use crate::ErrorCode;

/// Size in bytes of the parameter block.
pub const SECURE_MONITOR_PARAMETERS_SIZE: usize = 0x100;

pub mod offset {
    pub const BOOTLOADER_STATE: usize = 0xf8;
    pub const SECMON_STATE: usize = 0xfc;
}

/// Progress of the companion bootloader. Only ever increases during a boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BootloaderState {
    Start = 0,
    LoadedBootConfig = 1,
    InitializedDram = 2,
    LoadedPackage2 = 3,
    Done = 4,
}

impl TryFrom<u32> for BootloaderState {
    type Error = ErrorCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BootloaderState::Start),
            1 => Ok(BootloaderState::LoadedBootConfig),
            2 => Ok(BootloaderState::InitializedDram),
            3 => Ok(BootloaderState::LoadedPackage2),
            4 => Ok(BootloaderState::Done),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

impl From<BootloaderState> for u32 {
    fn from(state: BootloaderState) -> u32 {
        state as u32
    }
}

/// Progress of the secure monitor, as reported to the bootloader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SecureMonitorState {
    Start = 0,
    Initialized = 1,
}

impl TryFrom<u32> for SecureMonitorState {
    type Error = ErrorCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SecureMonitorState::Start),
            1 => Ok(SecureMonitorState::Initialized),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

impl From<SecureMonitorState> for u32 {
    fn from(state: SecureMonitorState) -> u32 {
        state as u32
    }
}

/// Accessor for the parameter block at a fixed physical location.
pub struct SecureMonitorParameters<'a, P: RegisterPort> {
    port: &'a P,
    region: MemoryRegion,
}

impl<'a, P: RegisterPort> SecureMonitorParameters<'a, P> {
    /// Fails with `SIZE` if `region` cannot hold the parameter block.
    pub fn new(port: &'a P, region: MemoryRegion) -> Result<Self, ErrorCode> {
        if region.size() < SECURE_MONITOR_PARAMETERS_SIZE {
            return Err(ErrorCode::SIZE);
        }
        Ok(Self { port, region })
    }

    /// Address of the `bootloader_state` word.
    pub fn bootloader_state_address(&self) -> usize {
        self.region.address() + offset::BOOTLOADER_STATE
    }

    /// Address of the `secmon_state` word.
    pub fn secmon_state_address(&self) -> usize {
        self.region.address() + offset::SECMON_STATE
    }

    /// Reads the raw `bootloader_state` word from memory.
    pub fn bootloader_state_raw(&self) -> u32 {
        self.port.read32(self.bootloader_state_address())
    }

    pub fn bootloader_state(&self) -> Result<BootloaderState, ErrorCode> {
        BootloaderState::try_from(self.bootloader_state_raw())
    }

    pub fn secmon_state(&self) -> Result<SecureMonitorState, ErrorCode> {
        SecureMonitorState::try_from(self.port.read32(self.secmon_state_address()))
    }

    /// Writes `secmon_state`. The caller is responsible for making the write
    /// visible to the bootloader (flush and barrier).
    pub fn set_secmon_state(&self, state: SecureMonitorState) {
        self.port.write32(self.secmon_state_address(), state.into());
    }
}
