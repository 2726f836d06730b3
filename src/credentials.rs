// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generated admin/config password

use crate::constants::PASSWORD_LENGTH;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, CryptoRng, Rng};
use std::fmt;

/// A password that is generated once and then carried forward unchanged.
/// The value never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Generate a fresh alphanumeric password
    pub fn generate() -> Self {
        Self::generate_with_len(PASSWORD_LENGTH)
    }

    pub fn generate_with_len(len: usize) -> Self {
        let mut rng = thread_rng();
        // Assert that `rng` is crypto-safe
        let _: &dyn CryptoRng = &rng;
        let value: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        Self(value)
    }

    /// Reuse a password that was generated by an earlier run
    pub fn from_existing(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
