// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counter-based one-time-password generation for the Duokey authenticator.
//!
//! `code` implements the RFC 4226 HMAC-SHA1 truncation; `generator` ties it
//! to the vault's persisted counter and code log.

pub mod code;
pub mod generator;

pub use code::{decode_base32_seed, encode_base32_seed, hotp, DEFAULT_DIGITS};
pub use generator::{generate_code, view_code, HotpCode};
