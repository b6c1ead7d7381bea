// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Microsecond busy-wait on the TIMERUS free-running counter.

use secmon::hil::mmio::RegisterPort;
use secmon::hil::time::BusyWait;

/// `TIMERUS_CNTR_1US`: increments once per microsecond from reset.
pub const TIMERUS_CNTR_1US: usize = 0x6000_5010;

pub struct MicrosecondTimer<P: RegisterPort> {
    port: P,
    counter: usize,
}

impl<P: RegisterPort> MicrosecondTimer<P> {
    pub const fn new(port: P) -> Self {
        Self::with_counter(port, TIMERUS_CNTR_1US)
    }

    pub const fn with_counter(port: P, counter: usize) -> Self {
        Self { port, counter }
    }

    pub fn now(&self) -> u32 {
        self.port.read32(self.counter)
    }
}

impl<P: RegisterPort> BusyWait for MicrosecondTimer<P> {
    fn wait_microseconds(&self, us: u32) {
        let start = self.now();
        // The first tick may be partial, so wait for one more than asked.
        while self.now().wrapping_sub(start) <= us {}
    }
}
