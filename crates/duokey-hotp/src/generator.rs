// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault-backed HOTP view/generate operations.
//!
//! The Duo activation response carries the HOTP seed as a raw ASCII
//! string; it is base32-encoded for the code computation, so the bytes of
//! the original string end up as the HMAC key.

use chrono::Utc;
use duokey_core::DuokeyError;
use duokey_vault::Vault;
use tracing::debug;

use crate::code::{encode_base32_seed, hotp, DEFAULT_DIGITS};

/// A computed code together with the counter it was computed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotpCode {
    pub code: String,
    pub counter: u64,
}

/// Recompute the code at the current persisted counter, without mutation.
///
/// Fails with [`DuokeyError::NoCodeGenerated`] while the counter is still
/// 0 (no code has ever been produced for this entry).
pub fn view_code(vault: &Vault, name: &str) -> Result<HotpCode, DuokeyError> {
    let counter = vault.hotp_counter(name)?;
    if counter == 0 {
        return Err(DuokeyError::NoCodeGenerated);
    }
    let entry = vault.get_key(name)?;
    let seed = encode_base32_seed(entry.response.hotp_secret.as_bytes());
    let code = hotp(&seed, counter, DEFAULT_DIGITS)?;
    Ok(HotpCode { code, counter })
}

/// Increment the persisted counter, compute the code at the new value, and
/// append a timestamped line to the entry's code log.
pub fn generate_code(vault: &mut Vault, name: &str) -> Result<HotpCode, DuokeyError> {
    let seed = encode_base32_seed(vault.get_key(name)?.response.hotp_secret.as_bytes());
    let counter = vault.increment_hotp_counter(name)?;
    let code = hotp(&seed, counter, DEFAULT_DIGITS)?;

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    vault.log_hotp_code(name, &code, &timestamp)?;

    debug!(name = %name, counter, "HOTP code generated");
    Ok(HotpCode { code, counter })
}
