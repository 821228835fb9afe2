use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::{CreateInput, ListFilters, ListOptions, Resource, ResourceError, Validate};
use crate::auth::Caller;
use crate::database::schema::ID;
use crate::database::{Store, StoreRecord};
use crate::filter::filter_order::FilterOrder;
use crate::filter::FilterData;

/// CRUD over one resource table, scoped by the caller.
#[async_trait]
pub trait DataAccess<R: Resource>: Send + Sync {
    async fn create(&self, caller: Caller, options: Option<R::Create>) -> Result<R, ResourceError>;

    async fn list(
        &self,
        caller: Caller,
        options: Option<ListOptions<R::Filters>>,
    ) -> Result<Vec<R>, ResourceError>;

    async fn get(&self, caller: Caller, id: Uuid) -> Result<R, ResourceError>;

    async fn update(&self, caller: Caller, id: Uuid, options: Option<R::Update>) -> Result<R, ResourceError>;

    async fn delete(&self, caller: Caller, id: Uuid) -> Result<(), ResourceError>;
}

/// [`DataAccess`] backed by a [`Store`].
///
/// For resources with an owner column, every read and write issued on behalf
/// of a `Caller::Principal` carries an extra `owner = principal` condition, so
/// rows belonging to other users behave exactly like missing rows.
pub struct Repository<R> {
    store: Arc<dyn Store>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Repository<R> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    fn scoped(caller: Caller) -> FilterData {
        let mut filter = FilterData::new();
        if let (Some(column), Some(owner)) = (R::OWNER_COLUMN, caller.principal()) {
            filter.push_eq(column, owner.to_string());
        }
        filter
    }

    fn by_id(caller: Caller, id: Uuid) -> Result<FilterData, ResourceError> {
        if id.is_nil() {
            return Err(ResourceError::InvalidId);
        }
        Ok(Self::scoped(caller).eq(ID, id.to_string()))
    }

    fn encode<T: Serialize>(value: &T) -> Result<StoreRecord, ResourceError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ResourceError::InvalidOptions),
            Err(source) => Err(ResourceError::Decode { resource: R::NAME, source }),
        }
    }

    fn decode(row: StoreRecord) -> Result<R, ResourceError> {
        serde_json::from_value(Value::Object(row)).map_err(|source| ResourceError::Decode {
            resource: R::NAME,
            source,
        })
    }

    fn list_filter(caller: Caller, options: &ListOptions<R::Filters>) -> Result<FilterData, ResourceError> {
        let mut filter = Self::scoped(caller);
        filter.where_clause.extend(options.filters.conditions());

        // Direction only matters alongside a column to order by.
        let order = if options.order_by.trim().is_empty() {
            Vec::new()
        } else {
            FilterOrder::parse(&options.order_by, &options.order_direction)
                .map_err(|e| ResourceError::InvalidFilters(e.to_string()))?
        };
        if let Some(unknown) = order.iter().find(|o| R::schema().column(&o.column).is_none()) {
            return Err(ResourceError::InvalidFilters(format!("unknown order_by column '{}'", unknown.column)));
        }
        filter.order = order;
        filter.limit = Some(options.limit).filter(|l| *l > 0);
        filter.offset = Some(options.skip).filter(|s| *s > 0);
        Ok(filter)
    }
}

#[async_trait]
impl<R: Resource> DataAccess<R> for Repository<R> {
    async fn create(&self, caller: Caller, options: Option<R::Create>) -> Result<R, ResourceError> {
        let mut options = options.ok_or(ResourceError::InvalidOptions)?;
        if let Some(owner) = caller.principal() {
            options.assign_owner(owner);
        }
        options.validate()?;

        let mut values = Self::encode(&options)?;
        values.insert(ID.to_string(), Value::String(Uuid::new_v4().to_string()));
        let row = self.store.insert(R::schema(), values).await?;
        Self::decode(row)
    }

    async fn list(
        &self,
        caller: Caller,
        options: Option<ListOptions<R::Filters>>,
    ) -> Result<Vec<R>, ResourceError> {
        let options = options.unwrap_or_default();
        options.validate()?;
        let filter = Self::list_filter(caller, &options)?;

        self.store
            .select(R::schema(), &filter)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    async fn get(&self, caller: Caller, id: Uuid) -> Result<R, ResourceError> {
        let filter = Self::by_id(caller, id)?;
        let row = self
            .store
            .select(R::schema(), &filter)
            .await?
            .into_iter()
            .next()
            .ok_or(ResourceError::NotFound(R::NAME))?;
        Self::decode(row)
    }

    async fn update(&self, caller: Caller, id: Uuid, options: Option<R::Update>) -> Result<R, ResourceError> {
        let filter = Self::by_id(caller, id)?;
        let options = options.ok_or(ResourceError::InvalidOptions)?;
        options.validate()?;

        let affected = self.store.update(R::schema(), &filter, Self::encode(&options)?).await?;
        if affected == 0 {
            return Err(ResourceError::NotFound(R::NAME));
        }
        self.get(caller, id).await
    }

    async fn delete(&self, caller: Caller, id: Uuid) -> Result<(), ResourceError> {
        let filter = Self::by_id(caller, id)?;
        match self.store.soft_delete(R::schema(), &filter).await? {
            0 => Err(ResourceError::NoRowsAffected),
            _ => Ok(()),
        }
    }
}
