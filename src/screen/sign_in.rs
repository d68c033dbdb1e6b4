use super::Notice;
use crate::auth::{Authenticator, Error, Session};

const TITLE: &str = "Login:";

pub const MISSING_FIELDS: Notice = Notice::new(TITLE, "Informe e-mail e senha.");
pub const INVALID_CREDENTIALS: Notice =
    Notice::new(TITLE, "E-mail ou senha inválido :(");
pub const USER_NOT_FOUND: Notice =
    Notice::new(TITLE, "Usuário não encontrado :(");
pub const FAILED: Notice =
    Notice::new(TITLE, "Não foi possível fazer login no sistema :(");

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(_) => MISSING_FIELDS,
            Error::InvalidCredentials => INVALID_CREDENTIALS,
            Error::UserNotFound => USER_NOT_FOUND,
            Error::Http(_) | Error::Service(_) => FAILED,
        }
    }
}

/// Sign-in form.
#[derive(Debug)]
pub struct SignIn<'a, A> {
    auth: &'a A,
}

impl<'a, A: Authenticator> SignIn<'a, A> {
    pub fn new(auth: &'a A) -> Self {
        Self { auth }
    }

    pub async fn submit(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, Notice> {
        self.auth.sign_in(email, password).await.map_err(|e| {
            tracing::warn!(error = %e, "sign-in failed");
            Notice::from(&e)
        })
    }
}
