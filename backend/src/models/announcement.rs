use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const MESSAGE_MIN_CHARS: usize = 1;
pub const MESSAGE_MAX_CHARS: usize = 500;

/// Store-native identifier of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct AnnouncementId(pub Uuid);

impl AnnouncementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns `None` when `raw` is not a well-formed identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for AnnouncementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where an announcement sits relative to a given instant. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementStatus {
    Pending,
    Active,
    Expired,
}

impl Announcement {
    pub fn status_at(&self, now: DateTime<Utc>) -> AnnouncementStatus {
        if self.expiration_date <= now {
            AnnouncementStatus::Expired
        } else if self.start_date.is_some_and(|start| start > now) {
            AnnouncementStatus::Pending
        } else {
            AnnouncementStatus::Active
        }
    }

    /// Active means started (or no start date) and not yet expired.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == AnnouncementStatus::Active
    }
}

/// Body for POST /api/announcements.
///
/// Field constraints are checked while deserializing, so a bad body is refused
/// before any role or identifier check runs.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementCreate {
    #[serde(deserialize_with = "de::message")]
    pub message: String,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::timestamp")]
    pub expiration_date: DateTime<Utc>,
}

impl AnnouncementCreate {
    pub fn validate(&self) -> Result<(), String> {
        validate_message(&self.message)
    }
}

/// Body for PUT /api/announcements/{id}.
///
/// A field that is missing and a field sent as `null` both leave the stored
/// value untouched, so `start_date` cannot be cleared once set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementUpdate {
    #[serde(default, deserialize_with = "de::optional_message")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl AnnouncementUpdate {
    pub fn validate(&self) -> Result<(), String> {
        match &self.message {
            Some(message) => validate_message(message),
            None => Ok(()),
        }
    }
}

/// Parses a request timestamp. RFC 3339 with an offset is taken as-is; a
/// timestamp without an offset is read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp: {raw}"))
}

mod de {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn message<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let raw = String::deserialize(d)?;
        super::validate_message(&raw).map_err(D::Error::custom)?;
        Ok(raw)
    }

    pub fn optional_message<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        if let Some(m) = &raw {
            super::validate_message(m).map_err(D::Error::custom)?;
        }
        Ok(raw)
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }

    pub fn optional_timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| super::parse_timestamp(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

/// Fully-formed record handed to the store on insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewAnnouncement {
    pub fn from_request(req: AnnouncementCreate, now: DateTime<Utc>) -> Self {
        Self {
            message: req.message,
            start_date: req.start_date,
            expiration_date: req.expiration_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_announcement(self, id: AnnouncementId) -> Announcement {
        Announcement {
            id,
            message: self.message,
            start_date: self.start_date,
            expiration_date: self.expiration_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Checks the message length bounds, counted in characters.
pub fn validate_message(message: &str) -> Result<(), String> {
    let len = message.chars().count();
    if !(MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&len) {
        return Err(format!(
            "message must be between {MESSAGE_MIN_CHARS} and {MESSAGE_MAX_CHARS} characters"
        ));
    }
    Ok(())
}
