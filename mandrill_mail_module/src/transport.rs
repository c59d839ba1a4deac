//! Delivery of a built payload to the Mandrill send endpoint.

use crate::error::MailError;
use crate::payload::ApiRequest;

/// Raw outcome of one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

pub trait Transport {
    /// Posts `request` to `url` once; no retries.
    fn post(&self, url: &str, request: &ApiRequest<'_>) -> Result<TransportResponse, MailError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn post(&self, url: &str, request: &ApiRequest<'_>) -> Result<TransportResponse, MailError> {
        let response = self.client.post(url).json(request).send()?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}

/// Only an exact 200 counts as delivered.
pub fn evaluate(response: TransportResponse) -> Result<(), MailError> {
    if response.status == 200 {
        Ok(())
    } else {
        Err(MailError::UnexpectedStatus {
            status: response.status,
            body: response.body,
        })
    }
}
