pub mod identity;

use std::{error::Error as StdError, fmt};

use async_trait::async_trait;
use derive_more::{Display, From};
use time::OffsetDateTime;

use crate::validation::{non_blank, ValidationError};

pub use self::identity::Client;

/// Signs users in against the remote identity service.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Both fields are validated locally first, so empty input never reaches
    /// the remote service.
    async fn sign_in(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Session, Error>;
}

/// Validated credential pair.
#[derive(Clone)]
pub struct Credentials<'a> {
    pub identifier: &'a str,
    pub secret: &'a str,
}

impl<'a> Credentials<'a> {
    pub fn new(
        identifier: &'a str,
        secret: &'a str,
    ) -> Result<Self, ValidationError> {
        let identifier =
            non_blank(identifier, ValidationError::EmptyIdentifier)?.trim();
        if secret.is_empty() {
            return Err(ValidationError::EmptySecret);
        }
        Ok(Self { identifier, secret })
    }
}

/// Proof of an authenticated identity.
///
/// Passed explicitly to every store call.
#[derive(Clone)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub expires_at: OffsetDateTime,
    id_token: String,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        id_token: impl Into<String>,
        expires_at: OffsetDateTime,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            expires_at,
            id_token: id_token.into(),
        }
    }

    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .field("id_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("{_0}")]
    #[from]
    Validation(ValidationError),

    #[display("invalid email or password")]
    InvalidCredentials,

    #[display("user not found")]
    UserNotFound,

    #[display("identity service unreachable: {_0}")]
    #[from]
    Http(reqwest::Error),

    #[display("identity service refused sign-in: {_0}")]
    Service(String),
}

impl Error {
    /// Classifies an error code reported by the identity service.
    ///
    /// Accepts both REST codes (`EMAIL_NOT_FOUND`) and SDK-style codes
    /// (`auth/user-not-found`).
    pub fn from_code(code: &str) -> Self {
        let code = code.split(" : ").next().unwrap_or(code).trim();
        match code {
            "EMAIL_NOT_FOUND" | "auth/user-not-found" => Self::UserNotFound,
            "INVALID_PASSWORD"
            | "INVALID_EMAIL"
            | "INVALID_LOGIN_CREDENTIALS"
            | "auth/wrong-password"
            | "auth/invalid-email"
            | "auth/invalid-credential" => Self::InvalidCredentials,
            code => Self::Service(code.to_owned()),
        }
    }

    /// Network or service failure with no finer classification.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Service(_))
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::InvalidCredentials | Self::UserNotFound | Self::Service(_) => {
                None
            }
        }
    }
}
