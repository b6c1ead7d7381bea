// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Secure monitor early boot.
//!
//! This crate holds the first code that runs in the secure world after the
//! boot ROM hands off: it loads the boot configuration supplied by the
//! companion bootloader, verifies it against the compiled-in root key and the
//! executing device's identity, and performs the minimal hardware bring-up
//! that has to be ordered around that verification.
//!
//! Everything that touches hardware goes through the traits in [`hil`], so the
//! same sequencing code runs on the real chip (see the `tegra210` crate) and
//! against the simulated backing store in [`sim`].
//!
//! There is no heap and no error propagation on the boot path. A boot
//! configuration is either trusted or its signed portion reads as zero.

#![cfg_attr(not(test), no_std)]

pub mod boot_config;
pub mod carveout;
pub mod errorcode;
pub mod hil;
pub mod memory;
pub mod params;
pub mod platform;
pub mod sequencer;
/// Host-side fakes for tests. Not for firmware images.
pub mod sim;
pub mod sysctr0;
pub mod verifier;

mod config;

pub use crate::boot_config::{BootConfig, BootConfigStorage, ConfigState};
pub use crate::errorcode::ErrorCode;
pub use crate::memory::{MemoryMap, MemoryRegion};
pub use crate::params::{BootloaderState, SecureMonitorState};
pub use crate::platform::Platform;
pub use crate::sequencer::BootSequencer;
