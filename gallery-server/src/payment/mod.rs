//! Mobile-money payment initiation via REST API (no SDK dependency)
//!
//! The server only initiates an STK push and relays the provider's response;
//! confirmation callbacks and settlement are the provider's concern.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Payment initiation failure
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payment request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("payment provider rejected request: {0}")]
    Provider(String),
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        tracing::error!(error = %e, "payment initiation failed");
        AppError::new(ErrorCode::PaymentFailed)
    }
}

/// Client for the mobile-money STK-push API
#[derive(Debug, Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    shortcode: String,
    passkey: String,
}

impl PaymentClient {
    pub fn new(base_url: &str, api_key: &str, shortcode: &str, passkey: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            shortcode: shortcode.to_string(),
            passkey: passkey.to_string(),
        }
    }

    /// Initiate an STK push to the customer's phone.
    ///
    /// Relays the provider's JSON response verbatim; the caller stores the
    /// checkout request id client-side to poll for confirmation.
    pub async fn stk_push(
        &self,
        phone_number: &str,
        amount: u64,
        account_reference: &str,
        description: &str,
    ) -> Result<serde_json::Value, PaymentError> {
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S").to_string();
        // Provider convention: password = base64(shortcode + passkey + timestamp)
        let password =
            STANDARD.encode(format!("{}{}{}", self.shortcode, self.passkey, timestamp));

        let body = serde_json::json!({
            "BusinessShortCode": self.shortcode,
            "Password": password,
            "Timestamp": timestamp,
            "TransactionType": "CustomerPayBillOnline",
            "Amount": amount,
            "PartyA": phone_number,
            "PartyB": self.shortcode,
            "PhoneNumber": phone_number,
            "AccountReference": account_reference,
            "TransactionDesc": description,
        });

        let resp: serde_json::Value = self
            .http
            .post(format!(
                "{}/mpesa/stkpush/v1/processrequest",
                self.base_url
            ))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        // Provider signals acceptance with ResponseCode "0"
        match resp["ResponseCode"].as_str() {
            Some("0") => Ok(resp),
            _ => Err(PaymentError::Provider(resp.to_string())),
        }
    }
}
