//! Folds parsed header directives into the payload being built.

use tracing::debug;

use crate::body::CONTENT_TYPE_HEADER;
use crate::headers::HeaderDirective;
use crate::payload::{MessagePayload, RecipientType};
use crate::recipients::typed_recipients;

const PRIORITY_HEADERS: [&str; 3] = ["importance", "x-priority", "x-msmail-priority"];

/// Applies every directive to `payload`, in order.
pub fn apply_directives(payload: &mut MessagePayload, directives: &[HeaderDirective]) {
    for directive in directives {
        apply_directive(payload, directive);
    }
}

pub fn apply_directive(payload: &mut MessagePayload, directive: &HeaderDirective) {
    let key = directive.key();
    let value = directive.value.as_str();
    match key.as_str() {
        "from" => {
            let (name, email) = parse_sender(value);
            payload.from_name = name;
            payload.from_email = email;
        }
        "cc" => payload.to.extend(typed_recipients(value, RecipientType::Cc)),
        "bcc" => payload.to.extend(typed_recipients(value, RecipientType::Bcc)),
        "reply-to" => payload.headers.insert(directive.name.as_str(), value),
        key if PRIORITY_HEADERS.contains(&key) => {
            // Once important, always important.
            if !payload.important {
                payload.important = value.to_ascii_lowercase().contains("high");
            }
        }
        "content-type" => payload.headers.insert(CONTENT_TYPE_HEADER, value),
        key if key.starts_with("x-") => payload.headers.insert(directive.name.as_str(), value),
        _ => debug!("ignoring header: {}", directive.name),
    }
}

/// Splits a `From` value into display name and address.
///
/// `"Alice" <alice@example.com>` yields `("Alice", "alice@example.com")`; a
/// value without `<` is taken whole as the address with an empty name.
pub fn parse_sender(value: &str) -> (String, String) {
    match value.split_once('<') {
        Some((name, rest)) => {
            let name = name.replace('"', "").trim().to_string();
            let email = rest.split('>').next().unwrap_or("").trim().to_string();
            (name, email)
        }
        None => (String::new(), value.trim().to_string()),
    }
}
