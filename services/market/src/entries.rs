//! Produce entry operations for the market

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use bytes::Bytes;
use produce::{Code, InvalidField, Name, PriceInput, Produce, Registry};
use serde::Deserialize;

use crate::error::MarketResult;

/// Router for produce entry operations
pub fn router() -> Router<Registry> {
    Router::new()
        .route("/add", post(add_produce))
        .route("/delete", delete(delete_produce))
        .route("/fetch", get(fetch_produce))
        .route(
            "/produce",
            get(fetch_produce)
                .post(add_produce)
                .delete(delete_produce),
        )
}

/// Body of an add request. Fields are validated one at a time, after
/// decoding, so each rejection names the offending field.
#[derive(Debug, Deserialize)]
struct AddRequest {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Code")]
    code: String,
    #[serde(alias = "Price")]
    price: PriceInput,
}

impl AddRequest {
    fn into_produce(self) -> Result<Produce, InvalidField> {
        let name = Name::parse(&self.name)?;
        let code = Code::parse(&self.code)?;
        let price = self.price.parse()?;
        Ok(Produce::new(code, name, price))
    }
}

/// Query parameters as decoded pairs. Repeated keys are kept, and the
/// first `code` wins.
type QueryPairs = Vec<(String, String)>;

/// Add a produce entry
#[tracing::instrument(skip_all)]
async fn add_produce(State(registry): State<Registry>, body: Bytes) -> MarketResult<StatusCode> {
    let request: AddRequest = serde_json::from_slice(&body)?;
    let produce = request.into_produce()?;

    registry.add(produce)?;
    Ok(StatusCode::CREATED)
}

/// Delete a produce entry by code
#[tracing::instrument(skip_all)]
async fn delete_produce(
    State(registry): State<Registry>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> MarketResult<StatusCode> {
    let Query(pairs) = query?;
    let code = pairs
        .iter()
        .find_map(|(key, value)| (key == "code").then_some(value.as_str()))
        .unwrap_or_default();

    let code = Code::parse(code)?;

    registry.delete(&code)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all produce entries
#[tracing::instrument(skip_all)]
async fn fetch_produce(State(registry): State<Registry>) -> Json<Vec<Produce>> {
    let entries = registry.list();
    tracing::trace!(count = entries.len(), "Listing produce");
    Json(entries)
}
