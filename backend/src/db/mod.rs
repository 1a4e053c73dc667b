pub mod announcements;
pub mod memory;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use announcements::{AnnouncementStore, PgAnnouncementStore};
pub use memory::MemoryAnnouncementStore;

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
