//! HTTP client for the identity service's password sign-in endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::{Authenticator, Credentials, Error, Session};
use crate::config;

const SIGN_IN_PATH: &str = "/v1/accounts:signInWithPassword";

#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl Client {
    pub fn new(http: reqwest::Client, config: config::Identity) -> Self {
        Self {
            http,
            url: config.url.trim_end_matches('/').to_owned(),
            api_key: config.api_key,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    id_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
impl Authenticator for Client {
    #[tracing::instrument(skip(self, secret))]
    async fn sign_in(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Session, Error> {
        let Credentials { identifier, secret } =
            Credentials::new(identifier, secret)?;

        tracing::debug!("requesting session");
        let resp = self
            .http
            .post(format!("{}{SIGN_IN_PATH}", self.url))
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInRequest {
                email: identifier,
                password: secret,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = match resp.json::<ErrorResponse>().await {
                Ok(ErrorResponse { error }) => Error::from_code(&error.message),
                Err(_) => Error::Service(status.to_string()),
            };
            tracing::debug!(%status, error = %err, "sign-in refused");
            return Err(err);
        }

        let SignInResponse {
            local_id,
            email,
            id_token,
            expires_in,
        } = resp.json().await?;
        let lifetime = expires_in
            .parse::<i64>()
            .map_err(|_| Error::Service(format!("bad expiresIn: {expires_in}")))?;

        Ok(Session::new(
            local_id,
            email,
            id_token,
            OffsetDateTime::now_utc() + Duration::seconds(lifetime),
        ))
    }
}
