// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Hardware Interface Layer (HIL).
//!
//! The traits here are the seams between the boot sequencing logic and
//! whatever sits underneath it: real MMIO and cache maintenance on the chip,
//! or the simulated backing store in tests.

pub mod cache;
pub mod device;
pub mod mmio;
pub mod time;
pub mod verify;
