// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the WhatsApp Cloud API.
//!
//! Provides [`WhatsAppClient`] which handles request construction and
//! authentication. One HTTP call per send -- no retry, no backoff, no
//! timeout beyond the transport default.

use fixdesk_config::model::WhatsAppConfig;
use fixdesk_core::FixdeskError;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of a single send attempt.
///
/// Sends never raise to the caller; the outcome value carries what happened.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// The provider accepted the message. `message_id` is the provider's
    /// correlation id, extracted from `messages[0].id` when present.
    Sent {
        message_id: Option<String>,
        data: Value,
    },
    /// Credentials are not configured; no network call was attempted.
    Skipped,
    /// The transport failed or the provider rejected the message.
    Failed {
        error: String,
        details: Option<Value>,
    },
}

impl SendOutcome {
    /// True when the provider accepted the message.
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }
}

struct SendContext {
    http: reqwest::Client,
    phone_number_id: String,
}

/// HTTP client for Cloud API message sends.
///
/// Whether messaging is enabled is fixed at construction: missing
/// credentials put the client in disabled state with a single startup
/// warning, and every send short-circuits to [`SendOutcome::Skipped`].
pub struct WhatsAppClient {
    inner: Option<SendContext>,
    base_url: String,
}

impl WhatsAppClient {
    /// Creates a new Cloud API client from configuration.
    ///
    /// Missing credentials are not an error -- the client is built disabled
    /// so the rest of the system keeps working without notifications.
    pub fn new(config: &WhatsAppConfig) -> Result<Self, FixdeskError> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();

        if !config.has_credentials() {
            warn!("WhatsApp credentials not configured; outbound messages will be skipped");
            return Ok(Self {
                inner: None,
                base_url,
            });
        }

        // has_credentials() guarantees both values are present and non-empty.
        let token = config.access_token.clone().unwrap_or_default();
        let phone_number_id = config.phone_number_id.clone().unwrap_or_default();

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            FixdeskError::Config(format!("invalid whatsapp.access_token header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FixdeskError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            inner: Some(SendContext {
                http,
                phone_number_id,
            }),
            base_url,
        })
    }

    /// True when credentials are configured and sends will hit the network.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Send a plain text message to `to` (a phone number in international
    /// format, no plus sign).
    pub async fn send_text(&self, to: &str, body: &str) -> SendOutcome {
        let payload = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": { "body": body },
        });
        self.post_message(to, payload).await
    }

    /// Send a pre-approved template message.
    pub async fn send_template(
        &self,
        to: &str,
        template_name: &str,
        language_code: &str,
        components: Vec<Value>,
    ) -> SendOutcome {
        let payload = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "template",
            "template": {
                "name": template_name,
                "language": { "code": language_code },
                "components": components,
            },
        });
        self.post_message(to, payload).await
    }

    async fn post_message(&self, to: &str, payload: Value) -> SendOutcome {
        let Some(ctx) = &self.inner else {
            debug!(to, "skipping message (credentials not configured)");
            return SendOutcome::Skipped;
        };

        let url = format!("{}/{}/messages", self.base_url, ctx.phone_number_id);
        let response = match ctx.http.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(to, error = %e, "message send failed");
                return SendOutcome::Failed {
                    error: e.to_string(),
                    details: None,
                };
            }
        };

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            let message_id = body
                .pointer("/messages/0/id")
                .and_then(Value::as_str)
                .map(str::to_string);
            debug!(to, message_id = message_id.as_deref(), "message sent");
            SendOutcome::Sent {
                message_id,
                data: body,
            }
        } else {
            warn!(to, status = %status, "provider rejected message");
            SendOutcome::Failed {
                error: format!("provider returned {status}"),
                details: Some(body),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn enabled_config(base_url: &str) -> WhatsAppConfig {
        WhatsAppConfig {
            verify_token: Some("verify-secret".into()),
            phone_number_id: Some("109876543210".into()),
            access_token: Some("EAAG-test-token".into()),
            api_base_url: base_url.to_string(),
        }
    }

    #[tokio::test]
    async fn send_text_extracts_provider_message_id() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "messaging_product": "whatsapp",
            "contacts": [{"input": "201234567890", "wa_id": "201234567890"}],
            "messages": [{"id": "wamid.HBgMMjAxMjM0NTY3ODkw"}]
        });

        Mock::given(method("POST"))
            .and(path("/109876543210/messages"))
            .and(header("authorization", "Bearer EAAG-test-token"))
            .and(body_partial_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "201234567890",
                "type": "text",
                "text": { "body": "hello" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = WhatsAppClient::new(&enabled_config(&server.uri())).unwrap();
        assert!(client.is_enabled());

        match client.send_text("201234567890", "hello").await {
            SendOutcome::Sent { message_id, data } => {
                assert_eq!(message_id.as_deref(), Some("wamid.HBgMMjAxMjM0NTY3ODkw"));
                assert_eq!(data["contacts"][0]["wa_id"], "201234567890");
            }
            other => panic!("expected Sent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_text_without_credentials_skips_without_network() {
        // No mock server at all -- a network attempt would fail loudly.
        let config = WhatsAppConfig::default();
        let client = WhatsAppClient::new(&config).unwrap();
        assert!(!client.is_enabled());

        match client.send_text("201234567890", "hello").await {
            SendOutcome::Skipped => {}
            other => panic!("expected Skipped, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_rejection_becomes_failed_with_details() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"message": "Invalid parameter", "type": "OAuthException", "code": 100}
        });

        Mock::given(method("POST"))
            .and(path("/109876543210/messages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = WhatsAppClient::new(&enabled_config(&server.uri())).unwrap();
        match client.send_text("201234567890", "hello").await {
            SendOutcome::Failed { error, details } => {
                assert!(error.contains("400"), "got: {error}");
                let details = details.expect("provider body captured");
                assert_eq!(details["error"]["code"], 100);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_without_message_id_is_sent_without_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/109876543210/messages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"messaging_product": "whatsapp"})),
            )
            .mount(&server)
            .await;

        let client = WhatsAppClient::new(&enabled_config(&server.uri())).unwrap();
        match client.send_text("201234567890", "hello").await {
            SendOutcome::Sent { message_id, .. } => assert!(message_id.is_none()),
            other => panic!("expected Sent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_template_posts_template_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/109876543210/messages"))
            .and(body_partial_json(serde_json::json!({
                "type": "template",
                "template": {
                    "name": "status_update",
                    "language": { "code": "en" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"messages": [{"id": "wamid.template"}]}),
            ))
            .mount(&server)
            .await;

        let client = WhatsAppClient::new(&enabled_config(&server.uri())).unwrap();
        let outcome = client
            .send_template("201234567890", "status_update", "en", vec![])
            .await;
        assert!(outcome.is_sent());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = enabled_config("https://graph.facebook.com/v21.0/");
        let client = WhatsAppClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://graph.facebook.com/v21.0");
    }
}
