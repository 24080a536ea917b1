use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use super::domain::Job;

/// Webhook dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook transport unavailable: {0}")]
    Transport(String),
    #[error("failed to encode webhook payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid webhook signing key")]
    Signature,
}

/// Job lifecycle events mirrored to the careers site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobEvent {
    #[serde(rename = "job.created")]
    Created,
    #[serde(rename = "job.updated")]
    Updated,
}

#[derive(Debug, Clone, Serialize)]
struct JobPostingPayload<'a> {
    event: JobEvent,
    job: &'a Job,
    sent_at: DateTime<Utc>,
}

/// A payload ready for delivery: serialized body plus its signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDelivery {
    pub endpoint: String,
    pub body: String,
    /// `X-Careers-Signature` header value, `sha256=<hex>`.
    pub signature: String,
}

/// Trait describing the HTTP hop to the careers site; the transport lives
/// outside this crate.
pub trait CareersTransport: Send + Sync {
    fn deliver(&self, delivery: SignedDelivery) -> Result<(), WebhookError>;
}

/// Builds and signs job posting mirror events. With no endpoint configured
/// the publisher is a no-op.
pub struct CareersPublisher {
    endpoint: Option<String>,
    secret: String,
}

impl CareersPublisher {
    pub fn new(endpoint: Option<String>, secret: String) -> Self {
        Self { endpoint, secret }
    }

    pub fn disabled() -> Self {
        Self {
            endpoint: None,
            secret: String::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Serialize, sign, and hand the event to the transport. Returns whether
    /// a delivery was attempted.
    pub fn publish<T: CareersTransport>(
        &self,
        transport: &T,
        job: &Job,
        event: JobEvent,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, WebhookError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(false);
        };

        let body = serde_json::to_string(&JobPostingPayload {
            event,
            job,
            sent_at,
        })?;
        let signature = sign(&self.secret, body.as_bytes())?;

        transport.deliver(SignedDelivery {
            endpoint: endpoint.clone(),
            body,
            signature,
        })?;
        Ok(true)
    }
}

fn sign(secret: &str, body: &[u8]) -> Result<String, WebhookError> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| WebhookError::Signature)?;
    mac.update(body);
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}

/// Verify a delivery signature the way the careers site does. Constant-time
/// comparison.
pub fn verify_signature(secret: &str, body: &[u8], signature_header: &str) -> bool {
    let Some(hex_sig) = signature_header.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_sig) else {
        return false;
    };
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
