// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PortalError>;

/// Everything that can stop a run. Variants follow the order in which a
/// run can hit them: credentials, login, scraping, validation, submission.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("username or password not set")]
    CredentialsMissing,

    #[error("login rejected: {0}")]
    LoginRejected(String),

    #[error("page element not found: {0}")]
    MissingElement(String),

    #[error("invalid selector `{0}`")]
    BadSelector(String),

    #[error("no (down/up) speed pair in plan name `{0}`")]
    SpeedPair(String),

    #[error("requested psid `{0}` is not valid")]
    InvalidPsid(String),

    #[error("{direction} shaper value {value} outside [{min}, {max}]")]
    ShaperBounds {
        direction: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("unexpected status after {action}: `{status}`")]
    StatusMismatch { action: &'static str, status: String },

    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PortalError {
    pub fn missing(what: impl Into<String>) -> Self {
        PortalError::MissingElement(what.into())
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PortalError::LoginRejected(_) => 2,
            PortalError::InvalidPsid(_) | PortalError::ShaperBounds { .. } => 3,
            PortalError::StatusMismatch { .. } => 4,
            PortalError::Interrupted => 130,
            _ => 1,
        }
    }
}
