pub mod auth;
pub mod config;
pub mod screen;
pub mod store;
pub mod ticket;
pub mod validation;

pub use self::{
    auth::{Authenticator, Session},
    config::Config,
    store::TicketStore,
    ticket::Ticket,
    validation::ValidationError,
};
