use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // persist a new entity; the store assigns the id and returns the stored record
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // persist mutated fields of an existing entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // look up an entity by id
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // remove an entity by id
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // the full collection in the store's natural order, ascending by id
    async fn list_all(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}
