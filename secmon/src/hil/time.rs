// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Busy waiting.

/// Blocking delay on a free-running real-time counter.
///
/// There are no interrupts this early in boot, so the only way to wait is to
/// spin.
pub trait BusyWait {
    /// Spins for at least `us` microseconds.
    fn wait_microseconds(&self, us: u32);
}
