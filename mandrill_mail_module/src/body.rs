use crate::payload::MessagePayload;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const TEXT_PLAIN: &str = "text/plain";

/// Content type in effect: the header value when set, else `default`, else
/// `text/plain`.
pub fn resolve_content_type(payload: &MessagePayload, default: Option<&str>) -> String {
    non_empty(payload.headers.get(CONTENT_TYPE_HEADER))
        .or_else(|| non_empty(default))
        .unwrap_or(TEXT_PLAIN)
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn is_plain_text(content_type: &str) -> bool {
    content_type.trim().eq_ignore_ascii_case(TEXT_PLAIN)
}

/// Puts `body` into exactly one of the text or html fields and records the
/// content type on the payload headers.
pub fn select_body(payload: &mut MessagePayload, content_type: &str, body: &str) {
    if is_plain_text(content_type) {
        payload.text = Some(body.to_string());
        payload.html = None;
    } else {
        payload.html = Some(body.to_string());
        payload.text = None;
        payload.auto_text = Some(true);
    }
    if !payload.headers.contains(CONTENT_TYPE_HEADER) {
        payload.headers.insert(CONTENT_TYPE_HEADER, content_type);
    }
}
