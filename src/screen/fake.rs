//! In-memory store for exercising screens without a backend.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use time::{macros::datetime, Duration, OffsetDateTime};

use crate::{
    auth::Session,
    store::{Error, TicketStore},
    ticket::{Ack, Id, NewTicket, Open, Solution, Status, Ticket},
};

#[derive(Debug, Default)]
pub struct Store {
    tickets: Mutex<HashMap<Id, Ticket>>,
    pub calls: AtomicUsize,
    pub reject_writes: AtomicBool,
}

impl Store {
    pub fn with(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        let store = Self::default();
        store.tickets.lock().unwrap().extend(
            tickets.into_iter().map(|t| (t.id().clone(), t)),
        );
        store
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ticket(&self, id: &str) -> Option<Ticket> {
        self.tickets.lock().unwrap().get(&Id::from(id)).cloned()
    }

    fn rejected() -> Error {
        Error::Rejected {
            status: "PERMISSION_DENIED".into(),
            message: "write refused".into(),
        }
    }
}

pub fn session() -> Session {
    Session::new(
        "u1",
        "alice@example.com",
        "token",
        OffsetDateTime::now_utc() + Duration::hours(1),
    )
}

pub fn open(id: &str, patrimony: &str, description: &str) -> Ticket {
    Ticket::Open(Open {
        id: Id::from(id),
        patrimony: patrimony.into(),
        description: description.into(),
        created_at: datetime!(2024-03-01 09:30 UTC),
    })
}

#[async_trait]
impl TicketStore for Store {
    async fn get_ticket(
        &self,
        _: &Session,
        id: &Id,
    ) -> Result<Ticket, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tickets
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    async fn close_ticket(
        &self,
        _: &Session,
        id: &Id,
        solution: &str,
    ) -> Result<Ack, Error> {
        let solution = Solution::new(solution)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }

        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let open = match ticket {
            Ticket::Open(open) => open,
            Ticket::Closed(closed) => Open {
                id: closed.id,
                patrimony: closed.patrimony,
                description: closed.description,
                created_at: closed.created_at,
            },
        };
        let closed_at = datetime!(2024-03-02 14:00 UTC);
        tickets.insert(id.clone(), open.close(solution, closed_at).into());
        Ok(Ack { closed_at })
    }

    async fn list_tickets(
        &self,
        _: &Session,
        status: Status,
    ) -> Result<Vec<Ticket>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tickets = self
            .tickets
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.status() == status)
            .cloned()
            .collect::<Vec<_>>();
        tickets.sort_by_key(|t| std::cmp::Reverse(t.created_at()));
        Ok(tickets)
    }

    async fn add_ticket(
        &self,
        _: &Session,
        ticket: NewTicket,
    ) -> Result<Ticket, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }

        let ticket = Ticket::Open(
            ticket.into_open(Id::generate(), OffsetDateTime::now_utc()),
        );
        self.tickets
            .lock()
            .unwrap()
            .insert(ticket.id().clone(), ticket.clone());
        Ok(ticket)
    }
}
