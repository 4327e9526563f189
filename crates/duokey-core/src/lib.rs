// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Duokey authenticator.
//!
//! This crate provides the error taxonomy and the persisted data model
//! shared by the vault, HOTP, and protocol crates.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DuokeyError;
pub use types::{ActivationResponse, CredentialEntry, VaultData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_variant_constructs() {
        let _version = DuokeyError::UnsupportedVersion;
        let _decrypt = DuokeyError::Decryption;
        let _max = DuokeyError::MaxAttemptsExceeded { attempts: 3 };
        let _missing = DuokeyError::KeyNotFound("work".into());
        let _activation = DuokeyError::Activation {
            message: "no response field".into(),
            payload: None,
        };
        let _network = DuokeyError::Network("connection refused".into());
        let _timeout = DuokeyError::PushTimeout { attempts: 10 };
        let _no_code = DuokeyError::NoCodeGenerated;
        let _vault = DuokeyError::Vault("disk full".into());
        let _io = DuokeyError::Io(std::io::Error::other("test"));
        let _internal = DuokeyError::Internal("test".into());
    }

    #[test]
    fn error_messages_name_the_failure() {
        let err = DuokeyError::MaxAttemptsExceeded { attempts: 3 };
        assert!(err.to_string().contains("3"));

        let err = DuokeyError::KeyNotFound("work".into());
        assert!(err.to_string().contains("work"));
    }
}
