//! Caller-supplied overrides applied at fixed points while a payload is built.
//!
//! Every hook takes the current value and returns the value to continue with.
//! Unset hooks pass the value through unchanged.

use std::fmt;

use crate::payload::{CustomHeaders, MessagePayload};
use crate::RawMessageRequest;

pub type Hook<T> = Box<dyn Fn(T) -> T + Send + Sync>;

#[derive(Default)]
pub struct MailHooks {
    request: Option<Hook<RawMessageRequest>>,
    pre_build: Option<Hook<MessagePayload>>,
    headers: Option<Hook<CustomHeaders>>,
    content_type: Option<Hook<String>>,
    from_email: Option<Hook<String>>,
    from_name: Option<Hook<String>>,
    message: Option<Hook<MessagePayload>>,
}

impl MailHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites the incoming request before anything else runs.
    pub fn on_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(RawMessageRequest) -> RawMessageRequest + Send + Sync + 'static,
    {
        self.request = Some(Box::new(hook));
        self
    }

    /// Adjusts the default payload before headers are applied.
    pub fn on_pre_build<F>(mut self, hook: F) -> Self
    where
        F: Fn(MessagePayload) -> MessagePayload + Send + Sync + 'static,
    {
        self.pre_build = Some(Box::new(hook));
        self
    }

    /// Adjusts the custom header map once all header lines are applied.
    pub fn on_headers<F>(mut self, hook: F) -> Self
    where
        F: Fn(CustomHeaders) -> CustomHeaders + Send + Sync + 'static,
    {
        self.headers = Some(Box::new(hook));
        self
    }

    /// Overrides the configured default content type.
    pub fn on_content_type<F>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.content_type = Some(Box::new(hook));
        self
    }

    pub fn on_from_email<F>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.from_email = Some(Box::new(hook));
        self
    }

    pub fn on_from_name<F>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.from_name = Some(Box::new(hook));
        self
    }

    /// Last word on the finished payload before it is sent.
    pub fn on_message<F>(mut self, hook: F) -> Self
    where
        F: Fn(MessagePayload) -> MessagePayload + Send + Sync + 'static,
    {
        self.message = Some(Box::new(hook));
        self
    }

    pub(crate) fn request(&self, value: RawMessageRequest) -> RawMessageRequest {
        apply(&self.request, value)
    }

    pub(crate) fn pre_build(&self, value: MessagePayload) -> MessagePayload {
        apply(&self.pre_build, value)
    }

    pub(crate) fn headers(&self, value: CustomHeaders) -> CustomHeaders {
        apply(&self.headers, value)
    }

    pub(crate) fn content_type(&self, value: String) -> String {
        apply(&self.content_type, value)
    }

    pub(crate) fn from_email(&self, value: String) -> String {
        apply(&self.from_email, value)
    }

    pub(crate) fn from_name(&self, value: String) -> String {
        apply(&self.from_name, value)
    }

    pub(crate) fn message(&self, value: MessagePayload) -> MessagePayload {
        apply(&self.message, value)
    }
}

fn apply<T>(hook: &Option<Hook<T>>, value: T) -> T {
    match hook {
        Some(hook) => hook(value),
        None => value,
    }
}

impl fmt::Debug for MailHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailHooks")
            .field("request", &self.request.is_some())
            .field("pre_build", &self.pre_build.is_some())
            .field("headers", &self.headers.is_some())
            .field("content_type", &self.content_type.is_some())
            .field("from_email", &self.from_email.is_some())
            .field("from_name", &self.from_name.is_some())
            .field("message", &self.message.is_some())
            .finish()
    }
}
