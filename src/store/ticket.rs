use async_trait::async_trait;

use super::{
    document::{
        field, CollectionSelector, CommitRequest, CommitResponse, Document,
        DocumentMask, FieldFilter, FieldReference, FieldTransform, Fields,
        Filter, Order, Precondition, QueryResult, RunQueryRequest,
        StructuredQuery, Value, Write,
    },
    Client, Error, TicketStore,
};
use crate::{
    auth::Session,
    ticket::{Ack, Id, NewTicket, Solution, Status, Ticket},
};

impl Client {
    async fn commit(
        &self,
        token: &str,
        id: &Id,
        write: Write,
    ) -> Result<CommitResponse, Error> {
        let resp = self
            .http
            .post(self.rpc_url("commit"))
            .bearer_auth(token)
            .json(&CommitRequest {
                writes: vec![write],
            })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Error::from_response(resp, Some(id)).await);
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl TicketStore for Client {
    #[tracing::instrument(skip(self, session))]
    async fn get_ticket(
        &self,
        session: &Session,
        id: &Id,
    ) -> Result<Ticket, Error> {
        let token = Self::authorize(session)?;

        tracing::debug!("fetching ticket");
        let resp = self
            .http
            .get(self.document_url(id))
            .bearer_auth(token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Error::from_response(resp, Some(id)).await);
        }

        Ok(Ticket::try_from(resp.json::<Document>().await?)?)
    }

    #[tracing::instrument(skip(self, session, solution))]
    async fn close_ticket(
        &self,
        session: &Session,
        id: &Id,
        solution: &str,
    ) -> Result<Ack, Error> {
        let solution = Solution::new(solution)?;
        let token = Self::authorize(session)?;

        tracing::debug!("closing ticket");
        let write = Write {
            update: Document {
                name: self.document_name(id),
                fields: Fields {
                    status: Some(Value::string(Status::Closed.as_str())),
                    solution: Some(Value::string(solution.as_str())),
                    ..Fields::default()
                },
            },
            update_mask: Some(DocumentMask {
                field_paths: vec![field::STATUS, field::SOLUTION],
            }),
            update_transforms: vec![FieldTransform::request_time(
                field::CLOSED_AT,
            )],
            current_document: Precondition { exists: true },
        };

        let closed_at = self
            .commit(token, id, write)
            .await?
            .request_time(field::CLOSED_AT)?;
        Ok(Ack { closed_at })
    }

    #[tracing::instrument(skip(self, session))]
    async fn list_tickets(
        &self,
        session: &Session,
        status: Status,
    ) -> Result<Vec<Ticket>, Error> {
        let token = Self::authorize(session)?;

        tracing::debug!("querying tickets");
        let query = RunQueryRequest {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: self.collection.clone(),
                }],
                r#where: Filter {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: field::STATUS,
                        },
                        op: "EQUAL",
                        value: Value::string(status.as_str()),
                    },
                },
                order_by: vec![Order {
                    field: FieldReference {
                        field_path: field::CREATED_AT,
                    },
                    direction: "DESCENDING",
                }],
            },
        };
        let resp = self
            .http
            .post(self.rpc_url("runQuery"))
            .bearer_auth(token)
            .json(&query)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Error::from_response(resp, None).await);
        }

        let tickets = resp
            .json::<Vec<QueryResult>>()
            .await?
            .into_iter()
            .filter_map(|r| r.document)
            .map(Ticket::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = tickets.len(), "tickets received");
        Ok(tickets)
    }

    #[tracing::instrument(skip_all)]
    async fn add_ticket(
        &self,
        session: &Session,
        ticket: NewTicket,
    ) -> Result<Ticket, Error> {
        let token = Self::authorize(session)?;
        let id = Id::generate();

        tracing::debug!(%id, "registering ticket");
        let write = Write {
            update: Document {
                name: self.document_name(&id),
                fields: Fields {
                    patrimony: Some(Value::string(ticket.patrimony())),
                    description: Some(Value::string(ticket.description())),
                    status: Some(Value::string(Status::Open.as_str())),
                    ..Fields::default()
                },
            },
            update_mask: None,
            update_transforms: vec![FieldTransform::request_time(
                field::CREATED_AT,
            )],
            current_document: Precondition { exists: false },
        };

        let created_at = self
            .commit(token, &id, write)
            .await?
            .request_time(field::CREATED_AT)?;
        Ok(Ticket::Open(ticket.into_open(id, created_at)))
    }
}
