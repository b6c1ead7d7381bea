// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Drivers for the NVIDIA Tegra X1 used by the secure monitor early boot
//! path.
//!
//! Both silicon revisions share this crate; the differences the boot path
//! cares about are captured by [`chip::Tegra210Config`].

#![cfg_attr(not(test), no_std)]

pub mod cache;
pub mod chip;
pub mod fuse;
pub mod memory_map;
pub mod mmio;
pub mod timer;
