use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};
use tracing::{info, warn};

use crate::{db::AnnouncementStore, error::AppError};

lazy_static! {
    pub static ref MUTATIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_announcement_requests_total",
        "Privileged announcement requests by operation and outcome",
        &["op", "status"]
    ).unwrap();

    pub static ref ANNOUNCEMENTS_GAUGE: Gauge = register_gauge!(
        "announcements_total",
        "Stored announcements, any state"
    ).unwrap();

    pub static ref ACTIVE_ANNOUNCEMENTS_GAUGE: Gauge = register_gauge!(
        "announcements_active_total",
        "Announcements currently on display"
    ).unwrap();
}

/// Count one privileged request under `op`, labelled by its outcome.
pub fn record<T>(op: &str, result: &Result<T, AppError>) {
    let status = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    MUTATIONS_COUNTER.with_label_values(&[op, status]).inc();
}

/// Spawn the background gauge collector.
pub fn start(store: Arc<dyn AnnouncementStore>, refresh_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(refresh_secs));
        loop {
            interval.tick().await;
            if let Err(e) = collect(store.as_ref()).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(store: &dyn AnnouncementStore) -> anyhow::Result<()> {
    let all = store.find_all().await?;
    let now = Utc::now();
    let active = all.iter().filter(|a| a.is_active_at(now)).count();

    ANNOUNCEMENTS_GAUGE.set(all.len() as f64);
    ACTIVE_ANNOUNCEMENTS_GAUGE.set(active as f64);

    info!("Metrics: {} announcement(s), {} active", all.len(), active);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryAnnouncementStore;
    use crate::models::announcement::NewAnnouncement;
    use chrono::Duration;

    #[tokio::test]
    async fn collect_sets_gauges() {
        let store = MemoryAnnouncementStore::new();
        let now = Utc::now();
        for expires in [Duration::days(1), Duration::days(-1)] {
            store
                .insert(NewAnnouncement {
                    message: "m".into(),
                    start_date: None,
                    expiration_date: now + expires,
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }

        collect(&store).await.unwrap();
        assert_eq!(ANNOUNCEMENTS_GAUGE.get(), 2.0);
        assert_eq!(ACTIVE_ANNOUNCEMENTS_GAUGE.get(), 1.0);
    }

    #[test]
    fn record_labels_outcome() {
        let ok: Result<(), AppError> = Ok(());
        let not_found: Result<(), AppError> = Err(AppError::NotFound);
        let before = MUTATIONS_COUNTER.with_label_values(&["test_op", "not_found"]).get();

        record("test_op", &ok);
        record("test_op", &not_found);

        assert_eq!(
            MUTATIONS_COUNTER.with_label_values(&["test_op", "not_found"]).get(),
            before + 1.0
        );
        assert!(MUTATIONS_COUNTER.with_label_values(&["test_op", "ok"]).get() >= 1.0);
    }
}
