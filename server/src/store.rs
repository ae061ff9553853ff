//! Storage backend for the entity collections.
//!
//! Handlers only see `EntityStore<E>` trait objects, so tests can build a
//! fresh store per app instead of sharing process-wide state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Entity;

#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// All records, ordered by id.
    async fn list(&self) -> Vec<E>;

    async fn get(&self, id: i64) -> Option<E>;

    /// First record whose lookup key equals `key` exactly.
    async fn find_by_key(&self, key: &str) -> Option<E>;

    /// Assigns the next id to `entity` and stores it.
    async fn create(&self, entity: E) -> E;

    /// Replaces the record with the same id. Returns false if it is absent.
    async fn replace(&self, entity: E) -> bool;

    async fn delete(&self, id: i64) -> bool;

    /// Drops every record and restarts ids at 1.
    async fn reset(&self);
}

struct Table<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E> Table<E> {
    fn empty() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

pub struct MemoryStore<E> {
    table: RwLock<Table<E>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::empty()),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn list(&self) -> Vec<E> {
        self.table.read().await.rows.values().cloned().collect()
    }

    async fn get(&self, id: i64) -> Option<E> {
        self.table.read().await.rows.get(&id).cloned()
    }

    async fn find_by_key(&self, key: &str) -> Option<E> {
        let table = self.table.read().await;
        table.rows.values().find(|e| e.lookup_key() == key).cloned()
    }

    async fn create(&self, mut entity: E) -> E {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        entity
    }

    async fn replace(&self, entity: E) -> bool {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    async fn delete(&self, id: i64) -> bool {
        self.table.write().await.rows.remove(&id).is_some()
    }

    async fn reset(&self) {
        *self.table.write().await = Table::empty();
    }
}
