// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key management commands: add, delete, list, passwd.

use std::fmt::Write;
use std::path::Path;

use duokey_api::{activate, ApiClient};
use duokey_core::{CredentialEntry, DuokeyError};
use duokey_vault::Vault;

use crate::output::Output;
use crate::password;

pub async fn add(
    vault: &mut Vault,
    out: &Output,
    name: &str,
    code: &str,
    host: &str,
) -> Result<(), DuokeyError> {
    let client = ApiClient::new()?;
    let device = activate(&client, code, host).await?;

    vault.add_key(
        name,
        CredentialEntry {
            code: code.to_string(),
            host: host.to_string(),
            response: device.response,
            pubkey: device.pubkey_pem,
            privkey: device.privkey_pem,
            hotp_counter: 0,
            hotp_log: Vec::new(),
        },
    )?;

    out.emit(
        &format!("Key '{name}' added successfully"),
        serde_json::json!({"status": "success", "key_name": name}),
    );
    Ok(())
}

pub fn delete(vault: &mut Vault, out: &Output, name: &str) -> Result<(), DuokeyError> {
    vault.delete_key(name)?;
    out.emit(
        &format!("Key '{name}' deleted successfully"),
        serde_json::json!({"status": "success", "key_name": name}),
    );
    Ok(())
}

pub fn list(vault: &Vault, out: &Output) -> Result<(), DuokeyError> {
    let names = vault.list_keys();

    let mut keys = Vec::new();
    for name in &names {
        let entry = vault.get_key(name)?;
        keys.push(serde_json::json!({
            "name": name,
            "customer_name": entry.response.customer_name.clone().unwrap_or_default(),
            "host": entry.host,
        }));
    }

    let text = if names.is_empty() {
        "No keys configured".to_string()
    } else {
        let mut text = "Configured keys:".to_string();
        for name in &names {
            let entry = vault.get_key(name)?;
            let customer = entry.response.customer_name.as_deref().unwrap_or("Unknown");
            write!(text, "\n  - {name} ({customer})").expect("writing to a String cannot fail");
        }
        text
    };

    out.emit(&text, serde_json::json!({"keys": keys}));
    Ok(())
}

pub fn passwd(
    vault: &mut Vault,
    out: &Output,
    password_file: Option<&Path>,
) -> Result<(), DuokeyError> {
    let new_password = password::resolve(password_file, None, true)?;
    vault.change_password(&new_password)?;
    out.emit(
        "Password changed successfully",
        serde_json::json!({"status": "success"}),
    );
    Ok(())
}
