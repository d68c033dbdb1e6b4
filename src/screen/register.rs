use super::Notice;
use crate::{
    auth::Session,
    store::TicketStore,
    ticket::{NewTicket, Ticket},
};

pub const MISSING_FIELDS: Notice =
    Notice::new("Registrar", "Preencha todos os campos.");
pub const REGISTERED: Notice =
    Notice::new("Solicitação", "Solicitação registrada com sucesso.");
pub const FAILED: Notice =
    Notice::new("Solicitação", "Não foi possível registrar o pedido.");

/// New ticket form.
#[derive(Debug)]
pub struct Register<'a, S> {
    store: &'a S,
    session: &'a Session,
}

impl<'a, S: TicketStore> Register<'a, S> {
    pub fn new(store: &'a S, session: &'a Session) -> Self {
        Self { store, session }
    }

    pub async fn submit(
        &self,
        patrimony: &str,
        description: &str,
    ) -> Result<(Ticket, Notice), Notice> {
        let ticket = NewTicket::new(patrimony, description)
            .map_err(|_| MISSING_FIELDS)?;

        let ticket = self
            .store
            .add_ticket(self.session, ticket)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to register ticket");
                FAILED
            })?;
        Ok((ticket, REGISTERED))
    }
}
