use super::{format_date, Notice};
use crate::{
    auth::Session,
    store::TicketStore,
    ticket::{Id, Solution, Ticket},
};

const TITLE: &str = "Solicitação";

pub const MISSING_SOLUTION: Notice =
    Notice::new(TITLE, "Informe a solução para encerrar a solicitação.");
pub const CLOSED: Notice = Notice::new(TITLE, "Solicitação encerrada.");
pub const CLOSE_FAILED: Notice =
    Notice::new(TITLE, "Não foi possível encerrar a solicitação.");
pub const LOAD_FAILED: Notice =
    Notice::new(TITLE, "Não foi possível carregar a solicitação.");
pub const ALREADY_CLOSED: Notice =
    Notice::new(TITLE, "Solicitação já encerrada.");

/// One block of the details screen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Card {
    pub title: &'static str,
    pub body: String,
    pub footer: Option<String>,
}

/// Ticket details screen.
///
/// Holds the snapshot fetched on load; it is not refreshed unless the
/// screen itself closes the ticket.
#[derive(Debug)]
pub struct Details<'a, S> {
    store: &'a S,
    session: &'a Session,
    ticket: Ticket,
}

impl<'a, S: TicketStore> Details<'a, S> {
    pub async fn load(
        store: &'a S,
        session: &'a Session,
        id: &Id,
    ) -> Result<Self, Notice> {
        let ticket = store.get_ticket(session, id).await.map_err(|e| {
            tracing::warn!(%id, error = %e, "failed to load ticket");
            LOAD_FAILED
        })?;
        Ok(Self {
            store,
            session,
            ticket,
        })
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// Whether the solution input and close action are offered.
    pub fn can_close(&self) -> bool {
        matches!(self.ticket, Ticket::Open(_))
    }

    /// Closes the ticket with the typed solution.
    ///
    /// On success the held snapshot becomes closed, stamped with the closing
    /// time acknowledged by the store.
    pub async fn close(&mut self, solution: &str) -> Result<Notice, Notice> {
        let Ticket::Open(open) = &self.ticket else {
            return Err(ALREADY_CLOSED);
        };

        let solution =
            Solution::new(solution).map_err(|_| MISSING_SOLUTION)?;

        let ack = self
            .store
            .close_ticket(self.session, &open.id, solution.as_str())
            .await
            .map_err(|e| {
                tracing::warn!(id = %open.id, error = %e, "failed to close ticket");
                CLOSE_FAILED
            })?;

        self.ticket = open.clone().close(solution, ack.closed_at).into();
        Ok(CLOSED)
    }

    /// "em andamento" while open, "finalizado" once closed.
    pub fn status_label(&self) -> &'static str {
        match self.ticket {
            Ticket::Open(_) => "em andamento",
            Ticket::Closed(_) => "finalizado",
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        let ticket = &self.ticket;
        vec![
            Card {
                title: "equipamento",
                body: format!("Patrimônio {}", ticket.patrimony()),
                footer: None,
            },
            Card {
                title: "descrição do problema",
                body: ticket.description().to_owned(),
                footer: Some(format!(
                    "Registrado em {}",
                    format_date(ticket.created_at()),
                )),
            },
            Card {
                title: "solução",
                body: ticket
                    .solution()
                    .map(|s| s.as_str().to_owned())
                    .unwrap_or_default(),
                footer: ticket
                    .closed_at()
                    .map(|at| format!("Encerrado em {}", format_date(at))),
            },
        ]
    }
}
