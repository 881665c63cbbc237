//! Resource CRUD handlers: list, create, lookup guard, read, update, delete.

use crate::config::{Resource, ID_COLUMN};
use crate::error::AppError;
use crate::response::{serialize_row, serialize_rows};
use crate::service::{RequestValidator, ResourceStore, Row};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// A row resolved by the lookup guard, handed to the id-scoped step that follows.
#[derive(Clone, Debug)]
pub struct Found {
    pub id: i64,
    pub row: Row,
}

/// One resource's endpoints, one method per verb.
#[derive(Clone, Copy, Debug)]
pub struct ResourceRouter {
    resource: &'static Resource,
}

impl ResourceRouter {
    pub fn new(resource: &'static Resource) -> Self {
        ResourceRouter { resource }
    }

    pub fn resource(&self) -> &'static Resource {
        self.resource
    }

    /// `GET <path>`
    pub async fn list(&self, store: &dyn ResourceStore) -> Result<Response, AppError> {
        let rows = store.list_all(self.resource).await?;
        Ok((StatusCode::OK, Json(serialize_rows(self.resource, &rows))).into_response())
    }

    /// `POST <path>`
    pub async fn create(&self, store: &dyn ResourceStore, body: Row) -> Result<Response, AppError> {
        let fields = RequestValidator::for_create(self.resource, &body)?;
        let row = store.insert(self.resource, &fields).await?;
        let id = row.get(ID_COLUMN).map(|v| v.to_string()).unwrap_or_default();
        let location = self.resource.item_path(id);
        tracing::debug!(entity = self.resource.entity, %location, "created");
        Ok((
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(serialize_row(self.resource, &row)),
        )
            .into_response())
    }

    /// Runs before every id-scoped route. Ids are `INTEGER` columns, so anything
    /// that is not a positive `i32` cannot name a row and is answered as unknown.
    pub async fn lookup(&self, store: &dyn ResourceStore, id: &str) -> Result<Found, AppError> {
        let not_found = || AppError::NotFound(self.resource.not_found_message());
        let id = match id.parse::<i32>() {
            Ok(n) if n > 0 => i64::from(n),
            _ => return Err(not_found()),
        };
        let row = store.get_by_id(self.resource, id).await?.ok_or_else(not_found)?;
        Ok(Found { id, row })
    }

    /// `GET <path>/:id`
    pub fn read(&self, found: &Found) -> Response {
        (StatusCode::OK, Json(serialize_row(self.resource, &found.row))).into_response()
    }

    /// `PATCH <path>/:id`. The row may have vanished since the guard ran; zero rows
    /// changed is still a success.
    pub async fn update(&self, store: &dyn ResourceStore, found: &Found, body: Row) -> Result<Response, AppError> {
        let fields = RequestValidator::for_update(self.resource, &body)?;
        let changed = store.update(self.resource, found.id, &fields).await?;
        tracing::debug!(entity = self.resource.entity, id = found.id, changed, "updated");
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// `DELETE <path>/:id`
    pub async fn delete(&self, store: &dyn ResourceStore, found: &Found) -> Result<Response, AppError> {
        let removed = store.delete(self.resource, found.id).await?;
        tracing::debug!(entity = self.resource.entity, id = found.id, removed, "deleted");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
