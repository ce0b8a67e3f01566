use std::fmt;

use thiserror::Error;

use vrd_core::PublishError;

/// One `<Error Number="...">message</Error>` entry from an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMessage {
    pub number: String,
    pub message: String,
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "[{}] {}", self.number, self.message)
        }
    }
}

#[derive(Debug, Error)]
pub enum NamecheapError {
    #[error("missing namecheap {field}")]
    MissingCredential { field: &'static str },

    #[error("invalid namecheap endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("setHosts not success: HTTP {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("unmarshal setHosts: {message} (body: {body})")]
    Xml { message: String, body: String },

    #[error("api error: {}", join(.errors))]
    Api { errors: Vec<ApiMessage> },

    #[error("hosts for {domain} were not applied")]
    NotApplied { domain: String },
}

fn join(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "status ERROR without details".into();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<NamecheapError> for PublishError {
    fn from(err: NamecheapError) -> Self {
        PublishError::Provider {
            provider: crate::PROVIDER_NAME,
            source: Box::new(err),
        }
    }
}
