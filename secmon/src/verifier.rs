// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Boot configuration verifier built from a SHA-256 hash and a signature
//! primitive over that hash.
//!
//! The signature primitive is usually backed by the security engine, which
//! this crate does not drive. The device binding is checked against the
//! fused ECID in constant time.

use log::warn;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::boot_config::{BootConfig, RSA_SIZE};
use crate::hil::device::DeviceState;
use crate::hil::verify::{BootConfigVerifier, SignatureVerify};

/// Length in bytes of a SHA-256 digest.
pub const SHA256_HASH_LEN: usize = 32;

pub struct Sha256BootConfigVerifier<'a, S: SignatureVerify<SHA256_HASH_LEN, RSA_SIZE>, D: DeviceState>
{
    signer: &'a S,
    device: &'a D,
}

impl<'a, S: SignatureVerify<SHA256_HASH_LEN, RSA_SIZE>, D: DeviceState>
    Sha256BootConfigVerifier<'a, S, D>
{
    pub fn new(signer: &'a S, device: &'a D) -> Self {
        Self { signer, device }
    }
}

impl<S: SignatureVerify<SHA256_HASH_LEN, RSA_SIZE>, D: DeviceState> BootConfigVerifier
    for Sha256BootConfigVerifier<'_, S, D>
{
    fn verify_signature(&self, data: &[u8], signature: &[u8], public_modulus: &[u8]) -> bool {
        let (Ok(signature), Ok(public_modulus)) = (
            <&[u8; RSA_SIZE]>::try_from(signature),
            <&[u8; RSA_SIZE]>::try_from(public_modulus),
        ) else {
            warn!("boot config: signature or modulus has the wrong length");
            return false;
        };

        let mut hash = [0u8; SHA256_HASH_LEN];
        hash.copy_from_slice(&Sha256::digest(data));

        match self.signer.verify(&hash, signature, public_modulus) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("boot config: signature check failed: {:?}", e);
                false
            }
        }
    }

    fn verify_device_binding(&self, config: &BootConfig) -> bool {
        let ecid = self.device.ecid();
        config.signed_data().ecid()[..].ct_eq(&ecid[..]).into()
    }
}
