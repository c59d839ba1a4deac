use tracing::debug;

use crate::payload::{Recipient, RecipientType};

/// Primary recipient input of a send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// One address or a comma-separated list of addresses.
    Addresses(String),
    /// Structured entries, optionally already typed and named.
    List(Vec<RecipientEntry>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientEntry {
    pub email: String,
    pub kind: Option<RecipientType>,
    pub name: Option<String>,
}

impl RecipientEntry {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

impl From<&str> for Recipients {
    fn from(value: &str) -> Self {
        Recipients::Addresses(value.to_string())
    }
}

impl From<String> for Recipients {
    fn from(value: String) -> Self {
        Recipients::Addresses(value)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(value: Vec<String>) -> Self {
        Recipients::List(value.into_iter().map(RecipientEntry::new).collect())
    }
}

impl From<Vec<RecipientEntry>> for Recipients {
    fn from(value: Vec<RecipientEntry>) -> Self {
        Recipients::List(value)
    }
}

/// Splits a comma-separated address list, dropping empty segments.
pub(crate) fn split_addresses(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
}

/// Turns a comma-separated header value into typed recipients.
pub(crate) fn typed_recipients(value: &str, kind: RecipientType) -> Vec<Recipient> {
    split_addresses(value)
        .map(|address| Recipient::new(address, kind))
        .collect()
}

/// Normalizes the primary recipients into typed entries, in input order.
///
/// Untyped entries default to `to`; entries with a blank email are dropped,
/// every other entry passes through as given.
pub fn normalize_primary(recipients: &Recipients) -> Vec<Recipient> {
    match recipients {
        Recipients::Addresses(value) => typed_recipients(value, RecipientType::To),
        Recipients::List(entries) => entries
            .iter()
            .filter_map(|entry| {
                if entry.email.trim().is_empty() {
                    debug!("dropping recipient entry without email");
                    return None;
                }
                Some(Recipient {
                    email: entry.email.clone(),
                    kind: entry.kind.unwrap_or_default(),
                    name: entry.name.clone(),
                })
            })
            .collect(),
    }
}

/// Joins the primary recipients with those gathered from headers and orders
/// the result `to`, then `cc`, then `bcc`.
///
/// The sort is stable, so each type keeps its encounter order.
pub fn merge_recipients(primary: Vec<Recipient>, accumulated: Vec<Recipient>) -> Vec<Recipient> {
    let mut out = primary;
    out.extend(accumulated);
    out.sort_by_key(|recipient| recipient.kind);
    out
}
