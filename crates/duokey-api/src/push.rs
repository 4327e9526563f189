// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push transaction fetch, reply, and the auto-approve poll loop.

use std::time::Duration;

use chrono::Utc;
use duokey_core::{CredentialEntry, DuokeyError};
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::sign::{authorization_header, canonical_request, sign, PKPUSH};
use crate::types::Transaction;

const TRANSACTIONS_PATH: &str = "/push/v2/device/transactions";

/// Fetch the list of pending push transactions for a device.
///
/// The request is signed over the canonical string with the entry's
/// private key; `x-duo-date` carries the same RFC 2822 timestamp that was
/// signed. An unusable response shape is reported as a network error so
/// the poll loop counts it as a failed attempt.
pub async fn fetch_transactions(
    client: &ApiClient,
    entry: &CredentialEntry,
) -> Result<Vec<Transaction>, DuokeyError> {
    let timestamp = Utc::now().to_rfc2822();
    let params = [
        ("akey", entry.response.akey.as_str()),
        ("fips_status", "1"),
        ("hsm_status", "true"),
        ("pkpush", PKPUSH),
    ];

    let canonical = canonical_request("GET", TRANSACTIONS_PATH, &timestamp, &entry.host, &params);
    let signature = sign(&canonical, &entry.privkey)?;
    let authorization = authorization_header(&entry.response.pkey, &signature);

    let response = client
        .http()
        .get(client.url(&entry.host, TRANSACTIONS_PATH))
        .query(&params)
        .header("Authorization", authorization)
        .header("x-duo-date", &timestamp)
        .header("host", &entry.host)
        .send()
        .await
        .map_err(|e| DuokeyError::Network(format!("transaction fetch failed: {e}")))?;
    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| DuokeyError::Network(format!("transaction response was not JSON: {e}")))?;

    let Some(transactions) = payload.pointer("/response/transactions") else {
        return Err(DuokeyError::Network(format!(
            "unexpected transactions response: {payload}"
        )));
    };
    serde_json::from_value(transactions.clone())
        .map_err(|e| DuokeyError::Network(format!("malformed transactions list: {e}")))
}

/// Answer one push transaction (`answer` is `"approve"` or `"deny"`).
pub async fn reply_transaction(
    client: &ApiClient,
    entry: &CredentialEntry,
    transaction_id: &str,
    answer: &str,
) -> Result<serde_json::Value, DuokeyError> {
    let timestamp = Utc::now().to_rfc2822();
    let path = format!("{TRANSACTIONS_PATH}/{transaction_id}");
    let params = [
        ("akey", entry.response.akey.as_str()),
        ("answer", answer),
        ("fips_status", "1"),
        ("hsm_status", "true"),
        ("pkpush", PKPUSH),
    ];

    let canonical = canonical_request("POST", &path, &timestamp, &entry.host, &params);
    let signature = sign(&canonical, &entry.privkey)?;
    let authorization = authorization_header(&entry.response.pkey, &signature);

    let response = client
        .http()
        .post(client.url(&entry.host, &path))
        .form(&params)
        .header("Authorization", authorization)
        .header("x-duo-date", &timestamp)
        .header("host", &entry.host)
        .header("txId", transaction_id)
        .send()
        .await
        .map_err(|e| DuokeyError::Network(format!("transaction reply failed: {e}")))?;
    response
        .json()
        .await
        .map_err(|e| DuokeyError::Network(format!("reply response was not JSON: {e}")))
}

/// Bounded fixed-interval poll loop that approves the first pending
/// transaction it sees.
#[derive(Debug, Clone)]
pub struct PushPoller {
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for PushPoller {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            poll_interval: Duration::from_secs(10),
        }
    }
}

enum PollState {
    Polling,
    Approved(Transaction),
    Exhausted,
}

impl PushPoller {
    pub fn new(max_attempts: u32, poll_interval: Duration) -> Self {
        Self {
            max_attempts,
            poll_interval,
        }
    }

    /// Poll until a transaction is approved or the attempt budget runs out.
    ///
    /// A network failure, an empty transaction list, and an unusable
    /// response shape all count as one failed attempt. Exactly
    /// `max_attempts` failed attempts end the loop with
    /// [`DuokeyError::PushTimeout`]; the interval sleep only happens while
    /// budget remains.
    pub async fn poll(
        &self,
        client: &ApiClient,
        entry: &CredentialEntry,
    ) -> Result<Transaction, DuokeyError> {
        let mut failed_attempts = 0u32;
        let mut state = PollState::Polling;

        while let PollState::Polling = state {
            match fetch_transactions(client, entry).await {
                Ok(mut transactions) if !transactions.is_empty() => {
                    let transaction = transactions.remove(0);
                    reply_transaction(client, entry, &transaction.urgid, "approve").await?;
                    info!(urgid = %transaction.urgid, "push transaction approved");
                    state = PollState::Approved(transaction);
                }
                Ok(_) => {
                    failed_attempts += 1;
                    debug!(failed_attempts, "no pending transactions");
                }
                Err(e) => {
                    failed_attempts += 1;
                    warn!(failed_attempts, error = %e, "transaction fetch attempt failed");
                }
            }

            if let PollState::Polling = state {
                if failed_attempts >= self.max_attempts {
                    state = PollState::Exhausted;
                } else {
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }

        match state {
            PollState::Approved(transaction) => Ok(transaction),
            _ => Err(DuokeyError::PushTimeout {
                attempts: failed_attempts,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::generate_keypair;
    use duokey_core::ActivationResponse;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_entry() -> CredentialEntry {
        let (pubkey, privkey) = generate_keypair().unwrap();
        CredentialEntry {
            code: "ACTIVATIONCODE".to_string(),
            host: "api-test.duosecurity.com".to_string(),
            response: ActivationResponse {
                akey: "AKEYXXXXXXXXXXXXXXXX".to_string(),
                hotp_secret: "12345678901234567890".to_string(),
                pkey: "PKEYXXXXXXXXXXXXXXXX".to_string(),
                customer_name: None,
                extra: Default::default(),
            },
            pubkey,
            privkey,
            hotp_counter: 0,
            hotp_log: Vec::new(),
        }
    }

    fn empty_transactions() -> serde_json::Value {
        serde_json::json!({"stat": "OK", "response": {"transactions": []}})
    }

    #[tokio::test]
    async fn fetch_sends_signed_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TRANSACTIONS_PATH))
            .and(query_param("akey", "AKEYXXXXXXXXXXXXXXXX"))
            .and(query_param("fips_status", "1"))
            .and(query_param("hsm_status", "true"))
            .and(query_param("pkpush", "rsa-sha512"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_transactions()))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new().unwrap().with_base_url(server.uri());
        let transactions = fetch_transactions(&client, &test_entry()).await.unwrap();
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn poll_exhausts_after_exactly_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TRANSACTIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_transactions()))
            .expect(3)
            .mount(&server)
            .await;

        let client = ApiClient::new().unwrap().with_base_url(server.uri());
        let poller = PushPoller::new(3, Duration::ZERO);
        let result = poller.poll(&client, &test_entry()).await;

        assert!(matches!(
            result,
            Err(DuokeyError::PushTimeout { attempts: 3 })
        ));
        // MockServer verifies the fetch count (exactly 3) on drop.
    }

    #[tokio::test]
    async fn poll_approves_the_first_pending_transaction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TRANSACTIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stat": "OK",
                "response": {"transactions": [
                    {"urgid": "tx-1", "summary": "Login request"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{TRANSACTIONS_PATH}/tx-1")))
            .and(header("txId", "tx-1"))
            .and(body_string_contains("answer=approve"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"stat": "OK", "response": "OK"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new().unwrap().with_base_url(server.uri());
        let poller = PushPoller::new(3, Duration::ZERO);
        let transaction = poller.poll(&client, &test_entry()).await.unwrap();

        assert_eq!(transaction.urgid, "tx-1");
    }

    #[tokio::test]
    async fn malformed_response_counts_as_a_failed_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TRANSACTIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"stat": "FAIL", "code": 40101})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = ApiClient::new().unwrap().with_base_url(server.uri());
        let poller = PushPoller::new(2, Duration::ZERO);
        let result = poller.poll(&client, &test_entry()).await;
        assert!(matches!(
            result,
            Err(DuokeyError::PushTimeout { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn network_failure_counts_as_a_failed_attempt() {
        // Point at a server that is already shut down.
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = ApiClient::new().unwrap().with_base_url(uri);
        let poller = PushPoller::new(2, Duration::ZERO);
        let result = poller.poll(&client, &test_entry()).await;
        assert!(matches!(
            result,
            Err(DuokeyError::PushTimeout { attempts: 2 })
        ));
    }
}
