//! Wire format of the document store.
//!
//! Documents carry typed values (`{"stringValue": "open"}`), mutations go
//! through `commit` with server-side transforms, and listings through
//! `runQuery`.

use std::error::Error as StdError;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ticket::{Id, Open, Solution, Status, Ticket};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    StringValue(String),
    TimestampValue(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),

    /// Any value type a ticket never holds (`integerValue`, `mapValue`, ...).
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringValue(value.into())
    }
}

/// Ticket fields as stored. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Fields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrimony: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Value>,
    #[serde(
        rename = "create_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Value>,
    /// Read only when `create_at` is absent.
    #[serde(rename = "created_at", default, skip_serializing)]
    pub created_at_alt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Value>,
}

pub mod field {
    pub const STATUS: &str = "status";
    pub const SOLUTION: &str = "solution";
    pub const PATRIMONY: &str = "patrimony";
    pub const DESCRIPTION: &str = "description";
    pub const CREATED_AT: &str = "create_at";
    pub const CLOSED_AT: &str = "closed_at";
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    /// Last segment of the resource name.
    pub fn id(&self) -> Id {
        Id::from(self.name.rsplit('/').next().unwrap_or(&self.name))
    }
}

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum DecodeError {
    #[display("field `{_0}` is missing")]
    MissingField(&'static str),

    #[display("field `{_0}` has an unexpected type")]
    WrongType(&'static str),

    #[display("unknown status `{_0}`")]
    UnknownStatus(String),

    #[display("{_0} ticket must not carry `{_1}`")]
    Unexpected(Status, &'static str),
}

impl StdError for DecodeError {}

fn string(
    name: &'static str,
    value: Option<Value>,
) -> Result<Option<String>, DecodeError> {
    match value {
        None | Some(Value::NullValue(())) => Ok(None),
        Some(Value::StringValue(s)) => Ok(Some(s)),
        Some(Value::TimestampValue(_) | Value::Other(_)) => {
            Err(DecodeError::WrongType(name))
        }
    }
}

fn timestamp(
    name: &'static str,
    value: Option<Value>,
) -> Result<Option<OffsetDateTime>, DecodeError> {
    match value {
        None | Some(Value::NullValue(())) => Ok(None),
        Some(Value::TimestampValue(t)) => Ok(Some(t)),
        Some(Value::StringValue(_) | Value::Other(_)) => {
            Err(DecodeError::WrongType(name))
        }
    }
}

fn required<T>(name: &'static str, value: Option<T>) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingField(name))
}

impl TryFrom<Document> for Ticket {
    type Error = DecodeError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        use field as F;

        let id = doc.id();
        let Fields {
            patrimony,
            description,
            status,
            solution,
            created_at,
            created_at_alt,
            closed_at,
        } = doc.fields;

        let status = required(F::STATUS, string(F::STATUS, status)?)?;
        let status = Status::parse(&status)
            .ok_or(DecodeError::UnknownStatus(status))?;
        let patrimony =
            required(F::PATRIMONY, string(F::PATRIMONY, patrimony)?)?;
        let description =
            required(F::DESCRIPTION, string(F::DESCRIPTION, description)?)?;
        let created_at = required(
            F::CREATED_AT,
            timestamp(F::CREATED_AT, created_at.or(created_at_alt))?,
        )?;
        let solution = string(F::SOLUTION, solution)?;
        let closed_at = timestamp(F::CLOSED_AT, closed_at)?;

        let open = Open {
            id,
            patrimony,
            description,
            created_at,
        };
        match status {
            Status::Open => {
                if solution.is_some() {
                    return Err(DecodeError::Unexpected(status, F::SOLUTION));
                }
                if closed_at.is_some() {
                    return Err(DecodeError::Unexpected(status, F::CLOSED_AT));
                }
                Ok(Self::Open(open))
            }
            Status::Closed => {
                let solution = required(F::SOLUTION, solution)?;
                let solution = Solution::new(solution)
                    .map_err(|_| DecodeError::MissingField(F::SOLUTION))?;
                let closed_at = required(F::CLOSED_AT, closed_at)?;
                Ok(Self::Closed(open.close(solution, closed_at)))
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommitRequest {
    pub writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Write {
    pub update: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<DocumentMask>,
    pub update_transforms: Vec<FieldTransform>,
    pub current_document: Precondition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DocumentMask {
    pub field_paths: Vec<&'static str>,
}

/// Sets a field to the store's request time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FieldTransform {
    pub field_path: &'static str,
    pub set_to_server_value: &'static str,
}

impl FieldTransform {
    pub fn request_time(field_path: &'static str) -> Self {
        Self {
            field_path,
            set_to_server_value: "REQUEST_TIME",
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct Precondition {
    pub exists: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommitResponse {
    #[serde(default)]
    pub write_results: Vec<WriteResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WriteResult {
    #[serde(default)]
    pub transform_results: Vec<Value>,
}

impl CommitResponse {
    /// Server time produced by the single transform of the single write.
    pub fn request_time(
        self,
        field: &'static str,
    ) -> Result<OffsetDateTime, DecodeError> {
        let value = self
            .write_results
            .into_iter()
            .next()
            .and_then(|r| r.transform_results.into_iter().next());
        required(field, timestamp(field, value)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    pub r#where: Filter,
    pub order_by: Vec<Order>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Filter {
    pub field_filter: FieldFilter,
}

#[derive(Debug, Serialize)]
pub(super) struct FieldFilter {
    pub field: FieldReference,
    pub op: &'static str,
    pub value: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FieldReference {
    pub field_path: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct Order {
    pub field: FieldReference,
    pub direction: &'static str,
}

/// One element of the `runQuery` response stream.
#[derive(Debug, Deserialize)]
pub(super) struct QueryResult {
    #[serde(default)]
    pub document: Option<Document>,
}
