use std::env;

use tracing::warn;

use crate::body::TEXT_PLAIN;

pub const DEFAULT_API_BASE_URL: &str = "https://mandrillapp.com/api/1.0";
pub const SEND_PATH: &str = "/messages/send.json";
pub const DEFAULT_FROM_NAME: &str = "WordPress";
pub const DEFAULT_FROM_LOCAL_PART: &str = "wordpress";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    /// Mandrill API key; sends fail without one.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub from_email: String,
    pub from_name: String,
    pub default_content_type: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            from_email: String::new(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            default_content_type: TEXT_PLAIN.to_string(),
        }
    }
}

impl MailerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: non_empty(api_key.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = env_var_non_empty("MANDRILL_API_KEY");
        let api_base_url = env_var_non_empty("MANDRILL_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let from_email = env_var_non_empty("MANDRILL_FROM_EMAIL")
            .or_else(|| {
                env_var_non_empty("MAIL_SENDER_DOMAIN").map(|domain| default_from_email(&domain))
            })
            .unwrap_or_else(|| {
                warn!(
                    "neither MANDRILL_FROM_EMAIL nor MAIL_SENDER_DOMAIN is set; sender address is empty"
                );
                String::new()
            });
        let from_name = env_var_non_empty("MANDRILL_FROM_NAME")
            .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());
        let default_content_type = env_var_non_empty("MANDRILL_CONTENT_TYPE")
            .unwrap_or_else(|| TEXT_PLAIN.to_string());

        Self {
            api_key,
            api_base_url,
            from_email,
            from_name,
            default_content_type,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_from_email(mut self, email: impl Into<String>) -> Self {
        self.from_email = email.into();
        self
    }

    /// Derives the default sender address from the site's sending domain.
    pub fn with_sender_domain(mut self, domain: &str) -> Self {
        self.from_email = default_from_email(domain);
        self
    }

    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = name.into();
        self
    }

    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    pub fn send_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), SEND_PATH)
    }
}

/// `wordpress@<domain>`, with the domain lowercased and any `www.` dropped.
pub fn default_from_email(domain: &str) -> String {
    let domain = domain.trim().to_ascii_lowercase();
    let domain = domain.strip_prefix("www.").unwrap_or(&domain);
    format!("{}@{}", DEFAULT_FROM_LOCAL_PART, domain)
}

fn env_var_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().and_then(non_empty)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
