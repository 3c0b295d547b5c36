use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::coordinator::errors::StoreResult;
use crate::coordinator::store::RoomStore;

/// In-process room store for single-instance deployments and tests
///
/// A plain map behind an async `RwLock`; each trait operation takes the
/// lock once and releases it before returning, so nothing is held across a
/// suspension point. State dies with the process; durable, multi-instance
/// deployments use the Postgres backend instead.
#[derive(Default)]
pub struct InMemoryRoomStore {
    rooms: RwLock<HashMap<String, bool>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn get(&self, room: &str) -> StoreResult<Option<bool>> {
        Ok(self.rooms.read().await.get(room).copied())
    }

    async fn set(&self, room: &str, active: bool) -> StoreResult<()> {
        self.rooms.write().await.insert(room.to_string(), active);
        Ok(())
    }

    async fn delete(&self, room: &str) -> StoreResult<()> {
        self.rooms.write().await.remove(room);
        Ok(())
    }

    async fn contains(&self, room: &str) -> StoreResult<bool> {
        Ok(self.rooms.read().await.contains_key(room))
    }

    async fn compare_and_swap(
        &self,
        room: &str,
        expected: Option<bool>,
        new: bool,
    ) -> StoreResult<bool> {
        let mut rooms = self.rooms.write().await;
        if rooms.get(room).copied() == expected {
            rooms.insert(room.to_string(), new);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete_roundtrip() {
        let store = InMemoryRoomStore::new();

        assert_eq!(store.get("room-a").await.unwrap(), None);
        assert!(!store.contains("room-a").await.unwrap());

        store.set("room-a", true).await.unwrap();
        assert_eq!(store.get("room-a").await.unwrap(), Some(true));
        assert!(store.contains("room-a").await.unwrap());

        store.set("room-a", false).await.unwrap();
        assert_eq!(store.get("room-a").await.unwrap(), Some(false));

        store.delete("room-a").await.unwrap();
        assert_eq!(store.get("room-a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryRoomStore::new();

        store.delete("room-a").await.unwrap();
        store.set("room-a", true).await.unwrap();
        store.delete("room-a").await.unwrap();
        store.delete("room-a").await.unwrap();

        assert!(!store.contains("room-a").await.unwrap());
    }

    #[tokio::test]
    async fn cas_inserts_only_when_absent() {
        let store = InMemoryRoomStore::new();

        assert!(store.compare_and_swap("room-a", None, true).await.unwrap());
        assert_eq!(store.get("room-a").await.unwrap(), Some(true));

        // Entry now exists, so the same expectation loses.
        assert!(!store.compare_and_swap("room-a", None, true).await.unwrap());
    }

    #[tokio::test]
    async fn cas_swaps_only_on_matching_value() {
        let store = InMemoryRoomStore::new();
        store.set("room-a", true).await.unwrap();

        assert!(!store
            .compare_and_swap("room-a", Some(false), true)
            .await
            .unwrap());
        assert_eq!(store.get("room-a").await.unwrap(), Some(true));

        assert!(store
            .compare_and_swap("room-a", Some(true), false)
            .await
            .unwrap());
        assert_eq!(store.get("room-a").await.unwrap(), Some(false));
    }
}
