use crate::error::{ApiError, ApiResult};
use serde::Deserialize;

/// Outbound collaborator for checkout. One operation: create a payment
/// intent and hand the client secret back to the browser-side flow.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntentRequest {
    /// Minor units (cents).
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ProcessorErrorBody {
    error: ProcessorErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProcessorErrorDetail {
    message: Option<String>,
}

/// Form parameters for the create-intent call, Stripe's bracketed
/// key convention included.
pub fn intent_form(req: &IntentRequest) -> Vec<(&'static str, String)> {
    vec![
        ("amount", req.amount.to_string()),
        ("currency", req.currency.clone()),
        ("payment_method_types[0]", "card".to_string()),
        ("payment_method_types[1]", "paypal".to_string()),
        ("payment_method_types[2]", "bacs_debit".to_string()),
        ("receipt_email", req.email.clone()),
        ("shipping[name]", req.name.clone()),
        ("shipping[address][line1]", req.address.clone()),
        ("shipping[address][city]", req.city.clone()),
        ("shipping[address][state]", req.state.clone()),
        ("shipping[address][postal_code]", req.zip.clone()),
        ("shipping[address][country]", req.country.clone()),
        ("metadata[customer_name]", req.name.clone()),
        ("metadata[customer_email]", req.email.clone()),
    ]
}

impl PaymentClient {
    pub fn new(secret_key: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            api_base,
        }
    }

    pub async fn create_payment_intent(&self, req: &IntentRequest) -> ApiResult<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&intent_form(req))
            .send()
            .await
            .map_err(|e| ApiError::Payment(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<PaymentIntent>()
                .await
                .map_err(|e| ApiError::Payment(e.to_string()))
        } else {
            let status = response.status();
            let message = response
                .json::<ProcessorErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("payment intent request failed with status {}", status));
            Err(ApiError::Payment(message))
        }
    }
}
