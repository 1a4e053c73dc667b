use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::announcement::{
    Announcement, AnnouncementId, AnnouncementUpdate, NewAnnouncement,
};

/// A single logical collection of announcement documents.
///
/// Each call is atomic for the one document it touches; nothing spans records.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Persist a new record and return it with its generated id.
    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement>;

    async fn find_all(&self) -> anyhow::Result<Vec<Announcement>>;

    /// Records started at or before `now` (or without start) and expiring after `now`.
    async fn find_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>>;

    async fn find_by_id(&self, id: AnnouncementId) -> anyhow::Result<Option<Announcement>>;

    /// Set the fields present in `patch` plus `updated_at`. `None` when no record matches.
    async fn update(
        &self,
        id: AnnouncementId,
        patch: &AnnouncementUpdate,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Announcement>>;

    /// `false` when no record matched.
    async fn delete(&self, id: AnnouncementId) -> anyhow::Result<bool>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Postgres-backed store over the `announcements` table.
#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (message, start_date, expiration_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, message, start_date, expiration_date, created_at, updated_at",
        )
        .bind(&new.message)
        .bind(new.start_date)
        .bind(new.expiration_date)
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(announcement)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(
            "SELECT id, message, start_date, expiration_date, created_at, updated_at
             FROM announcements",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(
            "SELECT id, message, start_date, expiration_date, created_at, updated_at
             FROM announcements
             WHERE expiration_date > $1
               AND (start_date IS NULL OR start_date <= $1)",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: AnnouncementId) -> anyhow::Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, Announcement>(
            "SELECT id, message, start_date, expiration_date, created_at, updated_at
             FROM announcements WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: AnnouncementId,
        patch: &AnnouncementUpdate,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, Announcement>(
            "UPDATE announcements
             SET message = COALESCE($1, message),
                 start_date = COALESCE($2, start_date),
                 expiration_date = COALESCE($3, expiration_date),
                 updated_at = $4
             WHERE id = $5
             RETURNING id, message, start_date, expiration_date, created_at, updated_at",
        )
        .bind(&patch.message)
        .bind(patch.start_date)
        .bind(patch.expiration_date)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: AnnouncementId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
