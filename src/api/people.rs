//! # People Service
//!
//! Request/response mapping for the remote `/people` collection. Each
//! operation performs exactly one call and returns an explicit `Result`; all
//! failures have been through [`intercept`] by the time they reach callers.

use super::error::ApiError;
use super::interceptor::intercept;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::model::{PeoplePage, Person, PersonCreate, PersonId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument};

const PEOPLE_PATH: &str = "/people";

/// Rows per page when listing.
pub const ROW_LIMIT: u32 = 5;

/// Operations screens need from the people backend.
///
/// Screens hold an `Arc<dyn PeopleApi>` so the backend can be swapped in tests.
#[async_trait]
pub trait PeopleApi: Send + Sync {
    /// Creates a record and returns the id assigned by the server.
    async fn create(&self, data: PersonCreate) -> Result<PersonId, ApiError>;

    async fn get_by_id(&self, id: PersonId) -> Result<Person, ApiError>;

    /// Full replace of the record stored under `id`.
    async fn update_by_id(&self, id: PersonId, data: Person) -> Result<(), ApiError>;

    async fn delete_by_id(&self, id: PersonId) -> Result<(), ApiError>;

    /// One page of records whose name contains `filter`. Pages start at 1.
    async fn get_all(&self, page: u32, filter: &str) -> Result<PeoplePage, ApiError>;
}

#[derive(Deserialize)]
struct Created {
    id: PersonId,
}

/// [`PeopleApi`] over any [`Transport`].
#[derive(Debug, Clone)]
pub struct PeopleService<T> {
    transport: T,
    page_size: u32,
}

impl<T: Transport> PeopleService<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            page_size: ROW_LIMIT,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.send(request).await.map_err(intercept)
    }
}

fn decode<D: DeserializeOwned>(response: ApiResponse) -> Result<D, ApiError> {
    serde_json::from_value(response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_body<S: serde::Serialize>(value: &S) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl<T: Transport> PeopleApi for PeopleService<T> {
    #[instrument(skip(self, data))]
    async fn create(&self, data: PersonCreate) -> Result<PersonId, ApiError> {
        debug!(?data, "create called");
        let request = ApiRequest::new(Method::Post, PEOPLE_PATH).json(to_body(&data)?);
        let created: Created = decode(self.call(request).await?)?;
        info!(id = %created.id, "Person created");
        Ok(created.id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: PersonId) -> Result<Person, ApiError> {
        let request = ApiRequest::new(Method::Get, format!("{PEOPLE_PATH}/{id}"));
        decode(self.call(request).await?)
    }

    #[instrument(skip(self, data))]
    async fn update_by_id(&self, id: PersonId, data: Person) -> Result<(), ApiError> {
        debug!(?data, "update_by_id called");
        let request =
            ApiRequest::new(Method::Put, format!("{PEOPLE_PATH}/{id}")).json(to_body(&data)?);
        self.call(request).await?;
        info!(%id, "Person updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: PersonId) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, format!("{PEOPLE_PATH}/{id}"));
        self.call(request).await?;
        info!(%id, "Person deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all(&self, page: u32, filter: &str) -> Result<PeoplePage, ApiError> {
        let request = ApiRequest::new(Method::Get, PEOPLE_PATH)
            .query("_page", page.max(1))
            .query("_limit", self.page_size)
            .query("completeName_like", filter);
        let response = self.call(request).await?;
        let total = response
            .header("x-total-count")
            .and_then(|v| v.trim().parse::<u64>().ok());
        let items: Vec<Person> = decode(response)?;
        let total_count = total.unwrap_or(items.len() as u64);
        debug!(rows = items.len(), total_count, "Page received");
        Ok(PeoplePage { items, total_count })
    }
}
