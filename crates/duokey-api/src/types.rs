// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the push transaction endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A pending push transaction as reported by the server.
///
/// Ephemeral: consumed and answered within one poll cycle, never
/// persisted. Only the id is interpreted; everything else (summary text,
/// geolocation, timestamps) rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id, echoed back in the reply URL and `txId` header.
    pub urgid: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_keeps_unknown_fields() {
        let tx: Transaction = serde_json::from_str(
            r#"{"urgid": "tx-1", "summary": "Login request", "type": "Login"}"#,
        )
        .unwrap();
        assert_eq!(tx.urgid, "tx-1");
        assert_eq!(tx.extra.get("summary"), Some(&serde_json::json!("Login request")));
    }

    #[test]
    fn transaction_without_id_fails_to_parse() {
        assert!(serde_json::from_str::<Transaction>(r#"{"summary": "x"}"#).is_err());
    }
}
