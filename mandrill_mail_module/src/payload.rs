//! Message payload in the shape expected by the Mandrill `messages/send` API.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Delivery role of a recipient. Variant order is the order recipients are sent in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    #[default]
    To,
    Cc,
    Bcc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(rename = "type")]
    pub kind: RecipientType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Recipient {
    pub fn new(email: impl Into<String>, kind: RecipientType) -> Self {
        Self {
            email: email.into(),
            kind,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Custom headers sent with the message.
///
/// Lookups ignore ASCII case; names keep the casing of their first insertion
/// and serialize in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomHeaders {
    entries: Vec<(String, String)>,
}

impl CustomHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Sets `name` to `value`, replacing the value of any existing entry with
    /// the same case-insensitive name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self
            .entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Serialize for CustomHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Tag buckets attached to every message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagBuckets {
    pub user: Vec<String>,
    pub general: Vec<String>,
    pub automatic: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeVar {
    pub name: String,
    pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientMergeVars {
    pub rcpt: String,
    pub vars: Vec<MergeVar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub to: Vec<Recipient>,
    pub headers: CustomHeaders,
    pub from_name: String,
    pub from_email: String,
    pub important: bool,
    pub auto_text: Option<bool>,

    // Delivery options.
    pub tags: TagBuckets,
    pub template_name: String,
    pub track_opens: Option<bool>,
    pub track_clicks: Option<bool>,
    pub url_strip_qs: bool,
    pub merge: bool,
    pub global_merge_vars: Vec<MergeVar>,
    pub merge_vars: Vec<RecipientMergeVars>,
    pub google_analytics_domains: Vec<String>,
    pub google_analytics_campaign: Vec<String>,
    pub metadata: BTreeMap<String, String>,
    pub inline_css: Option<bool>,
    pub preserve_recipients: Option<bool>,
    pub view_content_link: Option<bool>,
    pub tracking_domain: Option<String>,
    pub signing_domain: Option<String>,
    pub return_path_domain: Option<String>,
    pub subaccount: Option<String>,
    pub recipient_metadata: Option<Vec<Value>>,
}

impl MessagePayload {
    /// Default payload for a sender identity, before any request data is applied.
    pub fn with_sender(from_name: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self {
            subject: String::new(),
            text: None,
            html: None,
            to: Vec::new(),
            headers: CustomHeaders::new(),
            from_name: from_name.into(),
            from_email: from_email.into(),
            important: false,
            auto_text: None,
            tags: TagBuckets::default(),
            template_name: String::new(),
            track_opens: None,
            track_clicks: None,
            url_strip_qs: false,
            merge: true,
            global_merge_vars: Vec::new(),
            merge_vars: Vec::new(),
            google_analytics_domains: Vec::new(),
            google_analytics_campaign: Vec::new(),
            metadata: BTreeMap::new(),
            inline_css: None,
            preserve_recipients: None,
            view_content_link: None,
            tracking_domain: None,
            signing_domain: None,
            return_path_domain: None,
            subaccount: None,
            recipient_metadata: None,
        }
    }
}

/// Body posted to the send endpoint.
#[derive(Debug, Serialize)]
pub struct ApiRequest<'a> {
    pub key: &'a str,
    pub message: &'a MessagePayload,
}
