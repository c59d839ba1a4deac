//! Sends application mail through the Mandrill transactional API.
//!
//! A [`RawMessageRequest`] (recipients, subject, body, free-form header text)
//! is normalized into a Mandrill [`MessagePayload`] and posted once to
//! `messages/send.json`. The caller only learns whether the API answered 200.

use std::path::PathBuf;

use tracing::{info, warn};

pub mod body;
pub mod builder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod headers;
pub mod hooks;
pub mod payload;
pub mod recipients;
pub mod transport;

pub use builder::PayloadBuilder;
pub use config::MailerConfig;
pub use error::MailError;
pub use headers::{HeaderDirective, RawHeaders};
pub use hooks::MailHooks;
pub use payload::{ApiRequest, CustomHeaders, MessagePayload, Recipient, RecipientType};
pub use recipients::{RecipientEntry, Recipients};
pub use transport::{ReqwestTransport, Transport, TransportResponse};

/// A generic "send an email" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessageRequest {
    pub to: Recipients,
    pub subject: String,
    pub message: String,
    pub headers: Option<RawHeaders>,
    /// Accepted for signature compatibility; never sent.
    pub attachments: Vec<PathBuf>,
}

impl RawMessageRequest {
    pub fn new(
        to: impl Into<Recipients>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            message: message.into(),
            headers: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: impl Into<RawHeaders>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<PathBuf>) -> Self {
        self.attachments = attachments;
        self
    }
}

#[derive(Debug)]
pub struct Mailer<T = ReqwestTransport> {
    config: MailerConfig,
    hooks: MailHooks,
    transport: T,
}

impl Mailer<ReqwestTransport> {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            config,
            hooks: MailHooks::default(),
            transport: ReqwestTransport::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(MailerConfig::from_env())
    }
}

impl<T: Transport> Mailer<T> {
    pub fn with_hooks(mut self, hooks: MailHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_transport<U: Transport>(self, transport: U) -> Mailer<U> {
        Mailer {
            config: self.config,
            hooks: self.hooks,
            transport,
        }
    }

    pub fn config(&self) -> &MailerConfig {
        &self.config
    }

    /// Builds the payload that [`Mailer::send`] would post, without sending.
    pub fn build_payload(&self, request: RawMessageRequest) -> MessagePayload {
        let request = self.hooks.request(request);
        PayloadBuilder::new(&self.config, &self.hooks).build(&request)
    }

    /// Sends `request`; true iff the API answered with HTTP 200.
    pub fn send(&self, request: RawMessageRequest) -> bool {
        match self.try_send(request) {
            Ok(()) => true,
            Err(err) => {
                warn!("mandrill send failed: {}", err);
                false
            }
        }
    }

    pub fn try_send(&self, request: RawMessageRequest) -> Result<(), MailError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MailError::MissingApiKey)?;

        let payload = self.build_payload(request);
        let api_request = ApiRequest {
            key: api_key,
            message: &payload,
        };
        let response = self.transport.post(&self.config.send_url(), &api_request)?;
        transport::evaluate(response)?;

        info!(
            "sent mandrill message to {} recipient(s), subject={:?}",
            payload.to.len(),
            payload.subject
        );
        Ok(())
    }
}

/// Sends one message with configuration taken from the environment.
pub fn send_mail(
    to: impl Into<Recipients>,
    subject: &str,
    message: &str,
    headers: Option<RawHeaders>,
    attachments: &[PathBuf],
) -> bool {
    let mut request = RawMessageRequest::new(to, subject, message)
        .with_attachments(attachments.to_vec());
    request.headers = headers;
    Mailer::from_env().send(request)
}
