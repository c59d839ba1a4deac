use tracing::debug;

/// Header input as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawHeaders {
    /// One text blob, lines separated by `\n` or `\r\n`.
    Blob(String),
    /// Header lines already split by the caller.
    Lines(Vec<String>),
}

impl From<&str> for RawHeaders {
    fn from(value: &str) -> Self {
        RawHeaders::Blob(value.to_string())
    }
}

impl From<String> for RawHeaders {
    fn from(value: String) -> Self {
        RawHeaders::Blob(value)
    }
}

impl From<Vec<String>> for RawHeaders {
    fn from(value: Vec<String>) -> Self {
        RawHeaders::Lines(value)
    }
}

impl From<Vec<&str>> for RawHeaders {
    fn from(value: Vec<&str>) -> Self {
        RawHeaders::Lines(value.into_iter().map(str::to_string).collect())
    }
}

/// A single `Name: value` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDirective {
    pub name: String,
    pub value: String,
}

impl HeaderDirective {
    /// Lowercased name used for dispatch.
    pub fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

/// Splits raw header input into directives, in line order.
///
/// Lines without a colon are dropped.
pub fn parse_headers(raw: Option<&RawHeaders>) -> Vec<HeaderDirective> {
    let lines: Vec<&str> = match raw {
        None => return Vec::new(),
        Some(RawHeaders::Blob(blob)) => {
            if blob.trim().is_empty() {
                return Vec::new();
            }
            blob.split('\n').collect()
        }
        Some(RawHeaders::Lines(lines)) => lines.iter().map(String::as_str).collect(),
    };

    lines.into_iter().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<HeaderDirective> {
    // `\r` left over from CRLF input is stripped by the trims below.
    let Some((name, value)) = line.trim().split_once(':') else {
        if !line.trim().is_empty() {
            debug!("discarding header line without separator: {}", line.trim());
        }
        return None;
    };
    Some(HeaderDirective {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}
