use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{
        announcement::{Announcement, AnnouncementCreate, AnnouncementUpdate},
        auth::AuthenticatedUser,
    },
    services::{announcements::AnnouncementService, metrics},
    AppState,
};

/// GET /api/announcements: public, announcements currently on display.
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Announcement>>> {
    AnnouncementService::list_active(state.store.as_ref(), Utc::now())
        .await
        .map(Json)
}

/// GET /api/announcements/all: teachers and admins.
pub async fn list_all(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Announcement>>> {
    let result = AnnouncementService::list_all(state.store.as_ref(), &user).await;
    metrics::record("list_all", &result);
    result.map(Json)
}

/// POST /api/announcements: teachers and admins.
pub async fn create_announcement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    body: Result<Json<AnnouncementCreate>, JsonRejection>,
) -> AppResult<Json<Announcement>> {
    let Json(body) = body?;
    let result =
        AnnouncementService::create(state.store.as_ref(), &user, body, Utc::now()).await;
    metrics::record("create", &result);
    result.map(Json)
}

/// PUT /api/announcements/{id}: teachers and admins, partial update.
pub async fn update_announcement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    body: Result<Json<AnnouncementUpdate>, JsonRejection>,
) -> AppResult<Json<Announcement>> {
    let Json(body) = body?;
    let result =
        AnnouncementService::update(state.store.as_ref(), &user, &id, body, Utc::now()).await;
    metrics::record("update", &result);
    result.map(Json)
}

/// DELETE /api/announcements/{id}: teachers and admins.
pub async fn delete_announcement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let result = AnnouncementService::delete(state.store.as_ref(), &user, &id).await;
    metrics::record("delete", &result);
    result.map(|_| Json(json!({ "message": "Announcement deleted successfully" })))
}
