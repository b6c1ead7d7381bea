// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interfaces for verifying a boot configuration.

use crate::boot_config::BootConfig;
use crate::ErrorCode;

/// Verification oracle for boot configurations.
///
/// Both checks are pure predicates. The caller decides what to do with the
/// verdicts, including whether the second check is consulted at all.
pub trait BootConfigVerifier {
    /// Returns `true` if `signature` is a valid signature over `data` under the
    /// RSA public key with modulus `public_modulus`.
    fn verify_signature(&self, data: &[u8], signature: &[u8], public_modulus: &[u8]) -> bool;

    /// Returns `true` if the device identity embedded in `config` is the
    /// identity of the executing device.
    fn verify_device_binding(&self, config: &BootConfig) -> bool;
}

/// Verify a signature over a precomputed hash.
///
/// - `HL`: The length in bytes of the hash.
/// - `SL`: The length in bytes of the signature (and of the modulus).
///
/// If the verification operation did not encounter any errors the result is
/// `Ok(true)` for a matching signature and `Ok(false)` otherwise. An `Err`
/// means the primitive could not reach a verdict.
pub trait SignatureVerify<const HL: usize, const SL: usize> {
    fn verify(
        &self,
        hash: &[u8; HL],
        signature: &[u8; SL],
        public_modulus: &[u8; SL],
    ) -> Result<bool, ErrorCode>;
}
