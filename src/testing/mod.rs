use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Caller;
use crate::database::MemoryStore;
use crate::resources::{organisation, record, Membership, Organisation, Record, Todo};
use crate::services::ResourceService;

/// Services for every resource over one fresh in-memory store.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub todos: ResourceService<Todo>,
    pub organisations: ResourceService<Organisation>,
    pub memberships: ResourceService<Membership>,
    pub records: ResourceService<Record>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            todos: ResourceService::with_store(store.clone()),
            organisations: ResourceService::with_store(store.clone()),
            memberships: ResourceService::with_store(store.clone()),
            records: ResourceService::with_store(store.clone()),
            store,
        }
    }

    /// A fresh authenticated caller.
    pub fn user(&self) -> Caller {
        Caller::Principal(Uuid::new_v4())
    }

    /// Create records titled "Record 0".."Record {count-1}" owned by `caller`.
    pub async fn seed_records(&self, caller: Caller, count: usize) -> anyhow::Result<Vec<Record>> {
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let options = record::CreateOptions {
                title: format!("Record {}", i),
                ..Default::default()
            };
            out.push(self.records.create(caller, Some(options)).await?);
        }
        Ok(out)
    }

    pub async fn seed_organisation(&self, caller: Caller, title: &str) -> anyhow::Result<Organisation> {
        let options = organisation::CreateOptions {
            title: title.to_string(),
            ..Default::default()
        };
        Ok(self.organisations.create(caller, Some(options)).await?)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{membership, ListOptions, Relation, ResourceError};

    #[tokio::test]
    async fn seeded_records_belong_to_their_owner() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let (alice, bob) = (ctx.user(), ctx.user());
        ctx.seed_records(alice, 5).await?;
        ctx.seed_records(bob, 2).await?;

        assert_eq!(ctx.records.list(alice, None).await?.len(), 5);
        assert_eq!(ctx.records.list(bob, None).await?.len(), 2);
        assert_eq!(ctx.records.list(Caller::Internal, None).await?.len(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn memberships_link_users_to_organisations() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let owner = ctx.user();
        let org = ctx.seed_organisation(owner, "acme").await?;
        let member_id = Uuid::new_v4();

        let created = ctx
            .memberships
            .create(
                owner,
                Some(membership::CreateOptions {
                    user_id: member_id,
                    org_id: org.base.id,
                    relation: Relation::Editor,
                }),
            )
            .await?;
        assert_eq!(created.relation, Relation::Editor);

        let by_org = ctx
            .memberships
            .list(
                ctx.user(),
                Some(ListOptions {
                    filters: membership::Filters { org_id: Some(org.base.id), user_id: None },
                    ..Default::default()
                }),
            )
            .await?;
        assert_eq!(by_org.len(), 1);
        assert_eq!(by_org[0].user_id, member_id);
        Ok(())
    }

    #[tokio::test]
    async fn organisation_lookups_are_owner_scoped() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let (owner, stranger) = (ctx.user(), ctx.user());
        let org = ctx.seed_organisation(owner, "acme").await?;

        let err = ctx.organisations.get(stranger, org.base.id).await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound("organisation")));
        assert_eq!(ctx.organisations.get(owner, org.base.id).await?.owner_id, org.owner_id);
        assert_eq!(ctx.store.raw_rows(<Organisation as crate::resources::Resource>::schema()).await.len(), 1);
        Ok(())
    }
}
