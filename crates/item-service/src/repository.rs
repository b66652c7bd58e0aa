// File: src/repository.rs
// Purpose: Item storage contract and the in-memory backend

use crate::domain::Item;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("item {0} not found")]
    NotFound(i64),
}

/// Trait for item storage backends
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items in insertion order
    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Item, RepositoryError>;

    /// Store a new item and return it with its assigned id
    async fn save(&self, item: Item) -> Result<Item, RepositoryError>;

    /// Overwrite name, price and quantity of an existing item
    async fn update(&self, id: i64, item: Item) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i64, Item>,
    sequence: i64,
}

/// In-memory storage backend
///
/// Ids come from a counter starting at 1, so id order is insertion order.
/// Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl MemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.items.is_empty()
    }
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Item, RepositoryError> {
        let store = self.store.read().await;
        store.items.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
    }

    async fn save(&self, mut item: Item) -> Result<Item, RepositoryError> {
        let mut store = self.store.write().await;
        store.sequence += 1;
        let id = store.sequence;
        item.id = Some(id);
        store.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, item: Item) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        let stored = store.items.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
        stored.item_name = item.item_name;
        stored.price = item.price;
        stored.quantity = item.quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_then_find() {
        let repo = MemoryItemRepository::new();
        let saved = repo.save(Item::new("pen", 1000, 20)).await.unwrap();

        assert_eq!(saved.id, Some(1));
        let found = repo.find_by_id(1).await.unwrap();
        assert_eq!(found, saved);
        assert_eq!(Item { id: None, ..found }, Item::new("pen", 1000, 20));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = MemoryItemRepository::new();
        for name in ["itemA", "itemB", "itemC"] {
            repo.save(Item::new(name, 1000, 10)).await.unwrap();
        }
        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.item_name)
            .collect();
        assert_eq!(names, vec!["itemA", "itemB", "itemC"]);
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let repo = MemoryItemRepository::new();
        let saved = repo.save(Item::new("pen", 1000, 20)).await.unwrap();

        let mut change = Item::new("pencil", 2000, 30);
        change.id = Some(99);
        repo.update(1, change).await.unwrap();

        let found = repo.find_by_id(1).await.unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.item_name, "pencil");
        assert_eq!(found.price, 2000);
        assert_eq!(found.quantity, 30);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let repo = MemoryItemRepository::new();
        assert!(repo.is_empty().await);
        assert_eq!(repo.find_by_id(4).await, Err(RepositoryError::NotFound(4)));
        assert_eq!(
            repo.update(4, Item::new("x", 1, 1)).await,
            Err(RepositoryError::NotFound(4))
        );
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_distinct_ids() {
        let repo = MemoryItemRepository::new();
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.save(Item::new(format!("item{n}"), 1000, 10)).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<i64>>());
    }
}
