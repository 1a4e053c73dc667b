use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::announcements::AnnouncementStore;
use crate::models::announcement::{
    Announcement, AnnouncementId, AnnouncementUpdate, NewAnnouncement,
};

/// Process-local store, used by tests and `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryAnnouncementStore {
    records: RwLock<HashMap<AnnouncementId, Announcement>>,
}

impl MemoryAnnouncementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnnouncementStore for MemoryAnnouncementStore {
    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement> {
        let announcement = new.into_announcement(AnnouncementId::new());
        self.records
            .write()
            .await
            .insert(announcement.id, announcement.clone());
        Ok(announcement)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Announcement>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|a| a.is_active_at(now))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: AnnouncementId) -> anyhow::Result<Option<Announcement>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(
        &self,
        id: AnnouncementId,
        patch: &AnnouncementUpdate,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Announcement>> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(message) = &patch.message {
            record.message = message.clone();
        }
        if let Some(start) = patch.start_date {
            record.start_date = Some(start);
        }
        if let Some(expiration) = patch.expiration_date {
            record.expiration_date = expiration;
        }
        record.updated_at = updated_at;
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: AnnouncementId) -> anyhow::Result<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
