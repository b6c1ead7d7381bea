// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Data structure for storing compile-time configuration options.
//!
//! Configuration lives in a typed `const` rather than behind `#[cfg]` so that
//! every code path is type-checked even when disabled; the compiler folds the
//! constant away afterwards.

/// Data structure holding compile-time configuration options.
pub(crate) struct Config {
    /// Whether the individual verdicts of the boot configuration checks
    /// should be logged.
    ///
    /// The final outcome (trusted or sanitized) is always logged. With this
    /// enabled, the signature verdict and the device binding verdict are
    /// logged separately, along with the versions carried by the record.
    pub(crate) debug_boot_config: bool,

    /// Whether every write to the system counter registers should be traced.
    pub(crate) trace_register_writes: bool,
}

/// The only instance of `Config`. This is the only place in the crate where
/// Cargo features are allowed to influence code.
pub(crate) const CONFIG: Config = Config {
    debug_boot_config: cfg!(feature = "debug_boot_config"),
    trace_register_writes: cfg!(feature = "trace_register_writes"),
};
