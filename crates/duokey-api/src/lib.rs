// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duo push protocol client.
//!
//! Emulates a registered mobile authenticator device: one-time activation,
//! RSA-SHA512 request signing, and polling/approving pending push
//! transactions.

pub mod activation;
pub mod client;
pub mod push;
pub mod sign;
pub mod types;

pub use activation::{activate, ActivatedDevice};
pub use client::ApiClient;
pub use push::{fetch_transactions, reply_transaction, PushPoller};
pub use sign::{authorization_header, canonical_request, generate_keypair, sign};
pub use types::Transaction;
