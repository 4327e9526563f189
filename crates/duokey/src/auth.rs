// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication commands: push approval, HOTP codes, code history.

use std::time::Duration;

use duokey_api::{ApiClient, PushPoller};
use duokey_core::DuokeyError;
use duokey_hotp::{generate_code, view_code};
use duokey_vault::Vault;

use crate::output::Output;

pub async fn push(
    vault: &Vault,
    out: &Output,
    name: &str,
    max_attempts: u32,
    poll_interval: u64,
) -> Result<(), DuokeyError> {
    let entry = vault.get_key(name)?.clone();
    let client = ApiClient::new()?;
    let poller = PushPoller::new(max_attempts, Duration::from_secs(poll_interval));

    eprintln!("Polling for push notifications for '{name}'...");
    let transaction = poller.poll(&client, &entry).await?;

    out.emit(
        "Push notification approved successfully",
        serde_json::json!({"status": "success", "transaction": transaction}),
    );
    Ok(())
}

pub fn hotp(vault: &mut Vault, out: &Output, name: &str, view: bool) -> Result<(), DuokeyError> {
    let (generated, action) = if view {
        (view_code(vault, name)?, "Current")
    } else {
        (generate_code(vault, name)?, "Generated")
    };

    out.emit(
        &format!(
            "{action} HOTP code: {} (counter: {})",
            generated.code, generated.counter
        ),
        serde_json::json!({
            "status": "success",
            "code": generated.code,
            "counter": generated.counter,
            "action": action.to_lowercase(),
        }),
    );
    Ok(())
}

pub fn history(vault: &Vault, out: &Output, name: &str, count: usize) -> Result<(), DuokeyError> {
    let codes = vault.recent_hotp_codes(name, count)?;

    let text = if codes.is_empty() {
        format!("No HOTP history for '{name}'")
    } else {
        let mut text = format!("Recent HOTP codes for '{name}':");
        for line in &codes {
            text.push_str("\n  ");
            text.push_str(line);
        }
        text
    };

    out.emit(&text, serde_json::json!({"status": "success", "codes": codes}));
    Ok(())
}
