// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Standard error enum for fallible helpers.
//!
//! Nothing on the boot path returns one of these: a failed verification turns
//! into sanitization, not into an error. They are used by the helpers around
//! it (decoding shared state, building memory regions, the signature
//! primitive) where the caller can do something sensible with a failure.

/// Standard errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// An invalid parameter was passed
    INVAL = 5,
    /// Parameter passed was too large, or a buffer had the wrong length
    SIZE = 6,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}
