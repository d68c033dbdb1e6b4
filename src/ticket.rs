use std::fmt;

use derive_more::{Display, From};
use time::OffsetDateTime;

use crate::validation::{non_blank, ValidationError};

/// Opaque ticket identifier assigned by the store.
#[derive(Clone, Debug, Display, Eq, From, Hash, PartialEq)]
pub struct Id(String);

impl Id {
    /// Generates a fresh identifier for a ticket about to be created.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    /// Waiting for a solution.
    Open,

    /// Solved. Terminal.
    Closed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution note. Never blank.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Solution(String);

impl Solution {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        non_blank(&text, ValidationError::EmptySolution)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ticket waiting for a solution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Open {
    pub id: Id,
    pub patrimony: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

impl Open {
    /// Moves the ticket into its terminal state.
    pub fn close(self, solution: Solution, closed_at: OffsetDateTime) -> Closed {
        Closed {
            id: self.id,
            patrimony: self.patrimony,
            description: self.description,
            created_at: self.created_at,
            solution,
            closed_at,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Closed {
    pub id: Id,
    pub patrimony: String,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub solution: Solution,
    pub closed_at: OffsetDateTime,
}

/// Support request.
///
/// A closed ticket always carries its solution and closing time, an open one
/// never does.
#[derive(Clone, Debug, Eq, From, PartialEq)]
pub enum Ticket {
    Open(Open),
    Closed(Closed),
}

impl Ticket {
    pub fn id(&self) -> &Id {
        match self {
            Self::Open(t) => &t.id,
            Self::Closed(t) => &t.id,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Open(_) => Status::Open,
            Self::Closed(_) => Status::Closed,
        }
    }

    pub fn patrimony(&self) -> &str {
        match self {
            Self::Open(t) => &t.patrimony,
            Self::Closed(t) => &t.patrimony,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Open(t) => &t.description,
            Self::Closed(t) => &t.description,
        }
    }

    pub fn created_at(&self) -> OffsetDateTime {
        match self {
            Self::Open(t) => t.created_at,
            Self::Closed(t) => t.created_at,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Open(_) => None,
            Self::Closed(t) => Some(&t.solution),
        }
    }

    pub fn closed_at(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Open(_) => None,
            Self::Closed(t) => Some(t.closed_at),
        }
    }
}

/// Validated input for registering a ticket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewTicket {
    patrimony: String,
    description: String,
}

impl NewTicket {
    pub fn new(
        patrimony: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let patrimony = patrimony.into();
        let description = description.into();
        non_blank(&patrimony, ValidationError::EmptyPatrimony)?;
        non_blank(&description, ValidationError::EmptyDescription)?;
        Ok(Self {
            patrimony,
            description,
        })
    }

    pub fn patrimony(&self) -> &str {
        &self.patrimony
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Builds the stored ticket once the store assigned its creation time.
    pub fn into_open(self, id: Id, created_at: OffsetDateTime) -> Open {
        Open {
            id,
            patrimony: self.patrimony,
            description: self.description,
            created_at,
        }
    }
}

/// Acknowledgement of a close mutation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ack {
    /// Server-assigned closing time.
    pub closed_at: OffsetDateTime,
}
