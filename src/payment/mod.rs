//! Payment gateway client
//!
//! Talks to the external payment provider over HTTP. Checkout requests are
//! signed with HMAC-SHA256 over `merchant_id|order_no|amount`; notify
//! callbacks carry a signature over `merchant_id|order_no|amount|status` that
//! is verified constant-time before any order state changes.

use crate::config::PaymentConfig;
use crate::error::{AppError, Result};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checkout session returned by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct Checkout {
    pub checkout_url: String,
    pub provider_ref: String,
}

/// Payment notification posted back by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyPayload {
    pub order_no: String,
    pub amount: i64,
    /// `paid` or `failed`
    pub status: String,
    pub provider_ref: String,
    pub signature: String,
}

#[derive(Serialize)]
struct CheckoutRequest<'a> {
    merchant_id: &'a str,
    order_no: &'a str,
    amount: i64,
    description: &'a str,
    notify_url: &'a str,
    signature: String,
}

/// HTTP client for the payment provider
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    config: PaymentConfig,
}

impl Gateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn mac(&self, parts: &[&str]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.config.secret_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(parts.join("|").as_bytes());
        mac
    }

    fn sign(&self, parts: &[&str]) -> String {
        hex::encode(self.mac(parts).finalize().into_bytes())
    }

    /// Signature a well-formed notify callback must carry; exposed so tests
    /// and local tooling can forge provider callbacks
    pub fn notify_signature(&self, order_no: &str, amount: i64, status: &str) -> String {
        self.sign(&[
            &self.config.merchant_id,
            order_no,
            &amount.to_string(),
            status,
        ])
    }

    /// Create a checkout session for a pending order
    pub async fn create_checkout(
        &self,
        order_no: &str,
        amount: i64,
        description: &str,
    ) -> Result<Checkout> {
        let url = format!("{}/v1/checkouts", self.config.base_url.trim_end_matches('/'));
        let signature = self.sign(&[&self.config.merchant_id, order_no, &amount.to_string()]);

        let request = CheckoutRequest {
            merchant_id: &self.config.merchant_id,
            order_no,
            amount,
            description,
            notify_url: &self.config.notify_url,
            signature,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Payment(format!("checkout request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Payment(format!(
                "checkout for {order_no} returned {status}"
            )));
        }

        response
            .json::<Checkout>()
            .await
            .map_err(|e| AppError::Payment(format!("invalid checkout response: {e}")))
    }

    /// Verify a notify callback signature
    pub fn verify_notify(&self, payload: &NotifyPayload) -> Result<()> {
        let mac = self.mac(&[
            &self.config.merchant_id,
            &payload.order_no,
            &payload.amount.to_string(),
            &payload.status,
        ]);

        let signature = hex::decode(&payload.signature)
            .map_err(|_| AppError::Unauthorized("付款通知驗證失敗".to_string()))?;

        mac.verify_slice(&signature)
            .map_err(|_| AppError::Unauthorized("付款通知驗證失敗".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> PaymentConfig {
        PaymentConfig {
            base_url: base_url.to_string(),
            merchant_id: "MS0001".to_string(),
            secret_key: "gateway-secret".to_string(),
            notify_url: "http://localhost:8080/api/v1/payments/notify".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_checkout_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkouts"))
            .and(body_partial_json(serde_json::json!({
                "merchant_id": "MS0001",
                "order_no": "RO202501010000001234",
                "amount": 1200,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "checkout_url": "https://pay.example.com/c/abc123",
                "provider_ref": "TX-9000"
            })))
            .mount(&server)
            .await;

        let gateway = Gateway::new(config(&server.uri()));
        let checkout = gateway
            .create_checkout("RO202501010000001234", 1200, "標準方案")
            .await
            .unwrap();

        assert_eq!(checkout.checkout_url, "https://pay.example.com/c/abc123");
        assert_eq!(checkout.provider_ref, "TX-9000");
    }

    #[tokio::test]
    async fn test_create_checkout_maps_gateway_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkouts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gateway = Gateway::new(config(&server.uri()));
        let result = gateway.create_checkout("RO1", 100, "x").await;

        assert!(matches!(result, Err(AppError::Payment(_))));
    }

    #[tokio::test]
    async fn test_verify_notify_roundtrip() {
        let gateway = Gateway::new(config("http://localhost:9000"));
        let payload = NotifyPayload {
            order_no: "RO202501010000001234".to_string(),
            amount: 1200,
            status: "paid".to_string(),
            provider_ref: "TX-9000".to_string(),
            signature: gateway.notify_signature("RO202501010000001234", 1200, "paid"),
        };

        assert!(gateway.verify_notify(&payload).is_ok());
    }

    #[tokio::test]
    async fn test_verify_notify_rejects_tampered_amount() {
        let gateway = Gateway::new(config("http://localhost:9000"));
        let mut payload = NotifyPayload {
            order_no: "RO202501010000001234".to_string(),
            amount: 1200,
            status: "paid".to_string(),
            provider_ref: "TX-9000".to_string(),
            signature: gateway.notify_signature("RO202501010000001234", 1200, "paid"),
        };
        payload.amount = 1;

        assert!(matches!(
            gateway.verify_notify(&payload),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_notify_rejects_garbage_signature() {
        let gateway = Gateway::new(config("http://localhost:9000"));
        let payload = NotifyPayload {
            order_no: "RO1".to_string(),
            amount: 100,
            status: "paid".to_string(),
            provider_ref: "TX-1".to_string(),
            signature: "zz-not-hex".to_string(),
        };

        assert!(matches!(
            gateway.verify_notify(&payload),
            Err(AppError::Unauthorized(_))
        ));
    }
}
