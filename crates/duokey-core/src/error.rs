// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Duokey authenticator.

use thiserror::Error;

/// The primary error type used across all Duokey crates.
#[derive(Debug, Error)]
pub enum DuokeyError {
    /// The vault file does not start with the expected format marker.
    #[error("unsupported vault file version")]
    UnsupportedVersion,

    /// Decryption or plaintext parsing failed: wrong password or corrupted
    /// vault bytes. Recoverable by retrying with another password.
    #[error("incorrect password or corrupted vault data")]
    Decryption,

    /// The password retry budget is exhausted.
    #[error("maximum password attempts reached ({attempts})")]
    MaxAttemptsExceeded { attempts: u32 },

    /// The named credential entry does not exist in the vault.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Device activation was rejected or returned an unexpected shape.
    /// Carries the raw server payload for diagnostics.
    #[error("activation failed: {message}")]
    Activation {
        message: String,
        payload: Option<serde_json::Value>,
    },

    /// Transport-level failure or an unusable server response. Counted as a
    /// failed attempt by the push poll loop.
    #[error("network error: {0}")]
    Network(String),

    /// The push poll loop exhausted its attempt budget without seeing a
    /// pending transaction.
    #[error("no push transaction received after {attempts} attempts")]
    PushTimeout { attempts: u32 },

    /// View-mode HOTP request on an entry whose counter is still 0.
    #[error("no HOTP code has been generated yet")]
    NoCodeGenerated,

    /// Vault persistence or serialization failure.
    #[error("vault error: {0}")]
    Vault(String),

    /// Filesystem errors while reading or writing the vault file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors (key generation, signing).
    #[error("internal error: {0}")]
    Internal(String),
}
