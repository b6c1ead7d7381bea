// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Memory clearing and data cache maintenance.

/// Primitives for handing memory to or from an agent that may not share our
/// data cache.
///
/// A flush only guarantees coherency once it is followed by
/// [`data_synchronization_barrier_inner_shareable`]; callers must always
/// issue the barrier after the last flush and before the dependent access.
///
/// [`data_synchronization_barrier_inner_shareable`]:
/// MemoryPrimitives::data_synchronization_barrier_inner_shareable
pub trait MemoryPrimitives {
    /// Zeroes `size` bytes starting at `address`.
    fn clear_memory(&self, address: usize, size: usize);

    /// Cleans and invalidates every data cache line overlapping
    /// `[address, address + size)`.
    fn flush_data_cache(&self, address: usize, size: usize);

    /// `dsb ish`: wait for all prior memory accesses and cache maintenance
    /// to complete in the inner shareable domain.
    fn data_synchronization_barrier_inner_shareable(&self);
}
