use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Caller;
use crate::database::Store;
use crate::resources::{CreateInput, DataAccess, ListOptions, Repository, Resource, ResourceError, Validate};
use crate::types::Operation;

/// Business entry point for one resource.
///
/// Validates input up front so bad requests never reach the store, then
/// forwards to the data-access layer and returns its result unchanged.
pub struct ResourceService<R: Resource> {
    data: Arc<dyn DataAccess<R>>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(data: Arc<dyn DataAccess<R>>) -> Self {
        Self { data }
    }

    /// Service over the standard [`Repository`] for `store`.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self::new(Arc::new(Repository::<R>::new(store)))
    }

    pub async fn create(&self, caller: Caller, options: Option<R::Create>) -> Result<R, ResourceError> {
        tracing::debug!(resource = R::NAME, operation = %Operation::Create, ?caller);
        let mut options = options.ok_or(ResourceError::InvalidOptions)?;
        if let Some(owner) = caller.principal() {
            options.assign_owner(owner);
        }
        options.validate()?;
        self.data.create(caller, Some(options)).await
    }

    pub async fn list(
        &self,
        caller: Caller,
        options: Option<ListOptions<R::Filters>>,
    ) -> Result<Vec<R>, ResourceError> {
        tracing::debug!(resource = R::NAME, operation = %Operation::List, ?caller);
        if let Some(options) = &options {
            options.validate()?;
        }
        self.data.list(caller, options).await
    }

    pub async fn get(&self, caller: Caller, id: Uuid) -> Result<R, ResourceError> {
        tracing::debug!(resource = R::NAME, operation = %Operation::Get, ?caller, %id);
        if id.is_nil() {
            return Err(ResourceError::InvalidId);
        }
        self.data.get(caller, id).await
    }

    pub async fn update(&self, caller: Caller, id: Uuid, options: Option<R::Update>) -> Result<R, ResourceError> {
        tracing::debug!(resource = R::NAME, operation = %Operation::Update, ?caller, %id);
        if id.is_nil() {
            return Err(ResourceError::InvalidId);
        }
        let options = options.ok_or(ResourceError::InvalidOptions)?;
        options.validate()?;
        self.data.update(caller, id, Some(options)).await
    }

    pub async fn delete(&self, caller: Caller, id: Uuid) -> Result<(), ResourceError> {
        tracing::debug!(resource = R::NAME, operation = %Operation::Delete, ?caller, %id);
        if id.is_nil() {
            return Err(ResourceError::InvalidId);
        }
        self.data.delete(caller, id).await
    }
}
