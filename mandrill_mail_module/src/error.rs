#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("missing MANDRILL_API_KEY")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("mandrill api error {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
