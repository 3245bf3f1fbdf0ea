//! Generic repository trait for persisted entities.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic persistence trait.
///
/// Entity-specific query methods are defined on extension traits in the
/// database crate. There is no `delete`: records are never physically
/// removed.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its identifier.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Insert a new entity and return the stored version.
    async fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Replace an existing entity and return the stored version.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Count stored entities.
    async fn count(&self) -> AppResult<u64>;
}
