use tracing::debug;

use crate::body::{resolve_content_type, select_body};
use crate::config::MailerConfig;
use crate::dispatch::apply_directives;
use crate::headers::parse_headers;
use crate::hooks::MailHooks;
use crate::payload::MessagePayload;
use crate::recipients::{merge_recipients, normalize_primary};
use crate::RawMessageRequest;

/// Assembles the outgoing payload for one request.
///
/// Stages run as defaults, headers, recipients, body, sender overrides, then
/// the full-message hook; a later stage overrides an earlier one.
#[derive(Debug, Clone, Copy)]
pub struct PayloadBuilder<'a> {
    config: &'a MailerConfig,
    hooks: &'a MailHooks,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(config: &'a MailerConfig, hooks: &'a MailHooks) -> Self {
        Self { config, hooks }
    }

    /// Payload before any request data is applied.
    pub fn defaults(&self, request: &RawMessageRequest) -> MessagePayload {
        let mut payload =
            MessagePayload::with_sender(&self.config.from_name, &self.config.from_email);
        payload.subject = request.subject.clone();
        self.hooks.pre_build(payload)
    }

    pub fn build(&self, request: &RawMessageRequest) -> MessagePayload {
        if !request.attachments.is_empty() {
            debug!(
                "ignoring {} attachment(s); attachments are not supported",
                request.attachments.len()
            );
        }

        let mut payload = self.defaults(request);

        let directives = parse_headers(request.headers.as_ref());
        apply_directives(&mut payload, &directives);
        payload.headers = self.hooks.headers(payload.headers);

        let accumulated = std::mem::take(&mut payload.to);
        payload.to = merge_recipients(normalize_primary(&request.to), accumulated);

        let default_content_type = self
            .hooks
            .content_type(self.config.default_content_type.clone());
        let content_type = resolve_content_type(&payload, Some(default_content_type.as_str()));
        select_body(&mut payload, &content_type, &request.message);

        payload.from_email = self.hooks.from_email(payload.from_email);
        payload.from_name = self.hooks.from_name(payload.from_name);

        self.hooks.message(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{Recipient, RecipientType};
    use crate::recipients::RecipientEntry;

    fn config() -> MailerConfig {
        MailerConfig::new("key")
            .with_from_email("site@example.com")
            .with_from_name("Site")
    }

    fn kinds(payload: &MessagePayload) -> Vec<(&str, RecipientType)> {
        payload
            .to
            .iter()
            .map(|r| (r.email.as_str(), r.kind))
            .collect()
    }

    #[test]
    fn plain_request_uses_configured_defaults() {
        let hooks = MailHooks::new();
        let config = config();
        let request = RawMessageRequest::new("a@x.com", "Hello", "Body text");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(payload.subject, "Hello");
        assert_eq!(payload.from_name, "Site");
        assert_eq!(payload.from_email, "site@example.com");
        assert_eq!(payload.text.as_deref(), Some("Body text"));
        assert_eq!(payload.html, None);
        assert_eq!(kinds(&payload), vec![("a@x.com", RecipientType::To)]);
        assert!(!payload.important);
    }

    #[test]
    fn cc_and_bcc_follow_primary_recipients() {
        let hooks = MailHooks::new();
        let config = config();
        let request = RawMessageRequest::new("a@x.com,b@x.com", "s", "m")
            .with_headers("Bcc: z@x.com\nCc: c@x.com, d@x.com");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(
            kinds(&payload),
            vec![
                ("a@x.com", RecipientType::To),
                ("b@x.com", RecipientType::To),
                ("c@x.com", RecipientType::Cc),
                ("d@x.com", RecipientType::Cc),
                ("z@x.com", RecipientType::Bcc),
            ]
        );
    }

    #[test]
    fn typed_list_entries_are_grouped_by_type() {
        let hooks = MailHooks::new();
        let config = config();
        let list = vec![
            RecipientEntry {
                email: "boss@x.com".to_string(),
                kind: Some(RecipientType::Cc),
                name: Some("Boss".to_string()),
            },
            RecipientEntry::new("a@x.com"),
        ];
        let request = RawMessageRequest::new(list, "s", "m").with_headers("Bcc: z@x.com");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(
            kinds(&payload),
            vec![
                ("a@x.com", RecipientType::To),
                ("boss@x.com", RecipientType::Cc),
                ("z@x.com", RecipientType::Bcc),
            ]
        );
    }

    #[test]
    fn html_content_type_header_selects_html_body() {
        let hooks = MailHooks::new();
        let config = config();
        let request = RawMessageRequest::new("a@x.com", "s", "<p>hi</p>")
            .with_headers(vec!["Content-Type: text/html; charset=UTF-8"]);

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(payload.html.as_deref(), Some("<p>hi</p>"));
        assert_eq!(payload.text, None);
        assert_eq!(payload.auto_text, Some(true));
    }

    #[test]
    fn content_type_hook_changes_default_but_not_header() {
        let hooks = MailHooks::new().on_content_type(|_| "text/html".to_string());
        let config = config();

        let request = RawMessageRequest::new("a@x.com", "s", "<p>hi</p>");
        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert!(payload.html.is_some());

        let request = request.with_headers("Content-Type: text/plain");
        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert!(payload.text.is_some());
        assert!(payload.html.is_none());
    }

    #[test]
    fn headers_hook_runs_before_body_selection() {
        let hooks = MailHooks::new().on_headers(|mut headers| {
            headers.insert("Content-Type", "text/html");
            headers.remove("X-Internal");
            headers
        });
        let config = config();
        let request = RawMessageRequest::new("a@x.com", "s", "<p>hi</p>")
            .with_headers("X-Internal: secret\nX-Keep: yes");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert!(payload.html.is_some());
        assert!(!payload.headers.contains("X-Internal"));
        assert_eq!(payload.headers.get("x-keep"), Some("yes"));
    }

    #[test]
    fn sender_hooks_override_from_header() {
        let hooks = MailHooks::new()
            .on_from_email(|_| "forced@example.com".to_string())
            .on_from_name(|name| format!("{} (via Site)", name));
        let config = config();
        let request =
            RawMessageRequest::new("a@x.com", "s", "m").with_headers("From: Alice <alice@x.com>");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(payload.from_email, "forced@example.com");
        assert_eq!(payload.from_name, "Alice (via Site)");
    }

    #[test]
    fn from_header_beats_pre_build_hook() {
        let hooks = MailHooks::new().on_pre_build(|mut payload| {
            payload.from_email = "prebuild@example.com".to_string();
            payload.tags.general.push("transactional".to_string());
            payload.track_opens = Some(true);
            payload
        });
        let config = config();
        let request =
            RawMessageRequest::new("a@x.com", "s", "m").with_headers("From: alice@x.com");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(payload.from_email, "alice@x.com");
        assert_eq!(payload.from_name, "");
        assert_eq!(payload.tags.general, vec!["transactional"]);
        assert_eq!(payload.track_opens, Some(true));
    }

    #[test]
    fn message_hook_has_final_say() {
        let hooks = MailHooks::new()
            .on_from_name(|_| "Hooked".to_string())
            .on_message(|mut payload| {
                payload.from_name = "Final".to_string();
                payload
                    .to
                    .push(Recipient::new("audit@example.com", RecipientType::Bcc));
                payload
            });
        let config = config();
        let request = RawMessageRequest::new("a@x.com", "s", "m");

        let payload = PayloadBuilder::new(&config, &hooks).build(&request);
        assert_eq!(payload.from_name, "Final");
        assert_eq!(
            kinds(&payload),
            vec![
                ("a@x.com", RecipientType::To),
                ("audit@example.com", RecipientType::Bcc)
            ]
        );
    }

    #[test]
    fn attachments_are_ignored() {
        let hooks = MailHooks::new();
        let config = config();
        let request = RawMessageRequest::new("a@x.com", "s", "m")
            .with_attachments(vec!["/tmp/report.pdf".into()]);

        let with = PayloadBuilder::new(&config, &hooks).build(&request);
        let without =
            PayloadBuilder::new(&config, &hooks).build(&RawMessageRequest::new("a@x.com", "s", "m"));
        assert_eq!(with, without);
    }
}
