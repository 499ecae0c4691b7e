use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// In-memory record store: a locked ordered map plus an atomic id sequence.
// Natural order is ascending book_id, same as the DynamoDB backend.
#[derive(Debug)]
pub struct MemoryBookRepository {
    records: Arc<RwLock<BTreeMap<i64, BookEntity>>>,
    next_id: AtomicI64,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut stored = entity.clone();
        stored.book_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        stored.version = 0;
        let mut records = self.records.write()
            .map_err(|_| LibraryError::runtime("book store lock poisoned", None))?;
        if records.contains_key(&stored.book_id) {
            return Err(LibraryError::duplicate_key(
                format!("book already shelved for {}", stored.book_id).as_str()));
        }
        records.insert(stored.book_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut records = self.records.write()
            .map_err(|_| LibraryError::runtime("book store lock poisoned", None))?;
        match records.get_mut(&entity.book_id) {
            Some(existing) => {
                let mut updated = entity.clone();
                updated.version = existing.version + 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => {
                Err(LibraryError::not_found(format!("book not found for {}", entity.book_id).as_str()))
            }
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let records = self.records.read()
            .map_err(|_| LibraryError::runtime("book store lock poisoned", None))?;
        records.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let mut records = self.records.write()
            .map_err(|_| LibraryError::runtime("book store lock poisoned", None))?;
        match records.remove(&id) {
            Some(_) => Ok(1),
            None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let records = self.records.read()
            .map_err(|_| LibraryError::runtime("book store lock poisoned", None))?;
        Ok(records.values().cloned().collect())
    }
}

impl BookRepository for MemoryBookRepository {}
