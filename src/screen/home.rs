use super::{format_date, Notice};
use crate::{
    auth::Session,
    store::TicketStore,
    ticket::{Status, Ticket},
};

pub const LOAD_FAILED: Notice =
    Notice::new("Solicitações", "Não foi possível carregar as solicitações.");

/// Ticket list filtered by status.
#[derive(Debug)]
pub struct Home<'a, S> {
    store: &'a S,
    session: &'a Session,
    filter: Status,
    tickets: Vec<Ticket>,
}

impl<'a, S: TicketStore> Home<'a, S> {
    /// Starts on the open tickets, without fetching anything yet.
    pub fn new(store: &'a S, session: &'a Session) -> Self {
        Self {
            store,
            session,
            filter: Status::Open,
            tickets: Vec::new(),
        }
    }

    pub fn filter(&self) -> Status {
        self.filter
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Switches the filter and reloads the list.
    ///
    /// On failure the list is left empty.
    pub async fn select(&mut self, filter: Status) -> Result<(), Notice> {
        self.filter = filter;
        self.tickets.clear();
        self.tickets = self
            .store
            .list_tickets(self.session, filter)
            .await
            .map_err(|e| {
                tracing::warn!(%filter, error = %e, "failed to list tickets");
                LOAD_FAILED
            })?;
        Ok(())
    }

    /// One line per ticket: patrimony and registration time.
    pub fn rows(&self) -> Vec<String> {
        self.tickets
            .iter()
            .map(|t| {
                format!(
                    "{}  Patrimônio {}  {}",
                    t.id(),
                    t.patrimony(),
                    format_date(t.created_at()),
                )
            })
            .collect()
    }
}
