use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    db::AnnouncementStore,
    error::{AppError, AppResult},
    models::{
        announcement::{
            Announcement, AnnouncementCreate, AnnouncementId,
            AnnouncementUpdate, NewAnnouncement,
        },
        auth::AuthenticatedUser,
    },
};

/// Privileged operations, each gated on a staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffAction {
    ViewAll,
    Create,
    Update,
    Delete,
}

impl StaffAction {
    fn verb(self) -> &'static str {
        match self {
            StaffAction::ViewAll => "view all",
            StaffAction::Create => "create",
            StaffAction::Update => "update",
            StaffAction::Delete => "delete",
        }
    }
}

/// Refuses callers outside the staff roles before anything touches the store.
pub fn require_staff(user: &AuthenticatedUser, action: StaffAction) -> AppResult<()> {
    if user.role.is_staff() {
        return Ok(());
    }
    warn!(
        "Announcements: {} (role {}) refused {:?}",
        user.subject, user.role, action
    );
    Err(AppError::Forbidden(format!(
        "Only teachers and admins can {} announcements",
        action.verb()
    )))
}

fn parse_id(raw: &str) -> AppResult<AnnouncementId> {
    AnnouncementId::parse(raw).ok_or(AppError::InvalidIdentifier)
}

pub struct AnnouncementService;

impl AnnouncementService {
    /// Public listing of what is currently on display. Order is whatever the store yields.
    pub async fn list_active(
        store: &dyn AnnouncementStore,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Announcement>> {
        Ok(store.find_active(now).await?)
    }

    /// Every record, including pending and expired ones.
    pub async fn list_all(
        store: &dyn AnnouncementStore,
        user: &AuthenticatedUser,
    ) -> AppResult<Vec<Announcement>> {
        require_staff(user, StaffAction::ViewAll)?;
        Ok(store.find_all().await?)
    }

    pub async fn create(
        store: &dyn AnnouncementStore,
        user: &AuthenticatedUser,
        req: AnnouncementCreate,
        now: DateTime<Utc>,
    ) -> AppResult<Announcement> {
        req.validate().map_err(AppError::Validation)?;
        require_staff(user, StaffAction::Create)?;

        let announcement = store
            .insert(NewAnnouncement::from_request(req, now))
            .await?;
        info!(
            "Announcement {} created by {}",
            announcement.id, user.subject
        );
        Ok(announcement)
    }

    /// Applies the fields present in `patch`; `updated_at` is refreshed even for an empty patch.
    pub async fn update(
        store: &dyn AnnouncementStore,
        user: &AuthenticatedUser,
        raw_id: &str,
        patch: AnnouncementUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<Announcement> {
        patch.validate().map_err(AppError::Validation)?;
        require_staff(user, StaffAction::Update)?;
        let id = parse_id(raw_id)?;

        let announcement = store
            .update(id, &patch, now)
            .await?
            .ok_or(AppError::NotFound)?;
        info!("Announcement {} updated by {}", id, user.subject);
        Ok(announcement)
    }

    pub async fn delete(
        store: &dyn AnnouncementStore,
        user: &AuthenticatedUser,
        raw_id: &str,
    ) -> AppResult<()> {
        require_staff(user, StaffAction::Delete)?;
        let id = parse_id(raw_id)?;

        if !store.delete(id).await? {
            return Err(AppError::NotFound);
        }
        info!("Announcement {} deleted by {}", id, user.subject);
        Ok(())
    }
}
