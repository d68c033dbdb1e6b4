//! Screen controllers.
//!
//! Each controller drives the remote clients for one screen and turns every
//! failure into a single [`Notice`] for the user. Nothing is retried; the user
//! stays on the screen and may try again.

pub mod details;
#[cfg(test)]
mod fake;
pub mod home;
pub mod register;
pub mod sign_in;

use derive_more::Display;
use time::{macros::format_description, OffsetDateTime};

pub use self::{
    details::Details, home::Home, register::Register, sign_in::SignIn,
};

/// One-shot user-facing notification.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{title} {message}")]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const fn new(title: &'static str, message: &'static str) -> Self {
        Self { title, message }
    }
}

/// Renders a timestamp as `dd/mm/yyyy às HH:MM:SS`.
pub fn format_date(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[day]/[month]/[year] às [hour]:[minute]:[second]"
    );
    at.format(&format).unwrap_or_else(|_| at.to_string())
}
