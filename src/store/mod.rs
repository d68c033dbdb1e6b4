pub mod document;
pub mod ticket;

use std::error::Error as StdError;

use async_trait::async_trait;
use derive_more::{Display, From};
use serde::Deserialize;

use crate::{
    auth::Session,
    config,
    ticket::{Ack, Id, NewTicket, Status, Ticket},
    validation::ValidationError,
};

/// Remote collection of tickets.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Current snapshot of a single ticket.
    async fn get_ticket(&self, session: &Session, id: &Id)
        -> Result<Ticket, Error>;

    /// Closes the ticket with the given solution.
    ///
    /// A blank `solution` is rejected before any remote call. The closing
    /// time is assigned by the store and returned in the [`Ack`].
    async fn close_ticket(
        &self,
        session: &Session,
        id: &Id,
        solution: &str,
    ) -> Result<Ack, Error>;

    /// Tickets in the given status, newest first.
    async fn list_tickets(
        &self,
        session: &Session,
        status: Status,
    ) -> Result<Vec<Ticket>, Error>;

    /// Registers a new open ticket.
    async fn add_ticket(
        &self,
        session: &Session,
        ticket: NewTicket,
    ) -> Result<Ticket, Error>;
}

/// Client of the remote document store.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    url: String,
    database: String,
    collection: String,
}

impl Client {
    pub fn new(http: reqwest::Client, config: config::Store) -> Self {
        Self {
            http,
            url: config.url.trim_end_matches('/').to_owned(),
            database: format!(
                "projects/{}/databases/(default)/documents",
                config.project_id,
            ),
            collection: config.collection,
        }
    }

    /// Full resource name of a ticket document.
    fn document_name(&self, id: &Id) -> String {
        format!("{}/{}/{id}", self.database, self.collection)
    }

    fn document_url(&self, id: &Id) -> String {
        format!("{}/v1/{}", self.url, self.document_name(id))
    }

    fn rpc_url(&self, method: &str) -> String {
        format!("{}/v1/{}:{method}", self.url, self.database)
    }

    fn authorize(session: &Session) -> Result<&str, Error> {
        if session.is_expired() {
            return Err(Error::SessionExpired);
        }
        Ok(session.id_token())
    }
}

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("{_0}")]
    #[from]
    Validation(ValidationError),

    #[display("session expired")]
    SessionExpired,

    #[display("ticket {_0} not found")]
    NotFound(Id),

    #[display("store rejected request ({status}): {message}")]
    Rejected { status: String, message: String },

    #[display("store unreachable: {_0}")]
    #[from]
    Http(reqwest::Error),

    #[display("malformed ticket record: {_0}")]
    #[from]
    Malformed(document::DecodeError),
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Malformed(e) => Some(e),
            Self::SessionExpired | Self::NotFound(_) | Self::Rejected { .. } => {
                None
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl Error {
    /// Converts a non-success response into a store error.
    async fn from_response(resp: reqwest::Response, id: Option<&Id>) -> Self {
        let code = resp.status();
        let ErrorBody { message, status } =
            match resp.json::<ErrorResponse>().await {
                Ok(ErrorResponse { error }) => error,
                Err(_) => ErrorBody {
                    message: String::new(),
                    status: code.to_string(),
                },
            };
        match id {
            Some(id) if status == "NOT_FOUND" => Self::NotFound(id.clone()),
            _ => Self::Rejected { status, message },
        }
    }
}
