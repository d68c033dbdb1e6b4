use std::error::Error as StdError;

use derive_more::Display;

/// Required input left empty.
///
/// Always raised locally, before anything is sent to a remote service.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ValidationError {
    #[display("identifier is empty")]
    EmptyIdentifier,

    #[display("secret is empty")]
    EmptySecret,

    #[display("solution is empty")]
    EmptySolution,

    #[display("patrimony is empty")]
    EmptyPatrimony,

    #[display("description is empty")]
    EmptyDescription,
}

impl StdError for ValidationError {}

/// Rejects text that is empty or whitespace only.
pub fn non_blank(
    value: &str,
    err: ValidationError,
) -> Result<&str, ValidationError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(value)
    }
}
