#![cfg(test)]
use migration::MigratorTrait;
use models::db::{config_from_env, connect_with_config};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            let cfg = configs::load_default()
                .map(|c| c.database)
                .unwrap_or_else(|_| config_from_env());
            let db = connect_with_config(&cfg).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let mut cfg = configs::load_default()
        .map(|c| c.database)
        .unwrap_or_else(|_| config_from_env());
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.acquire_timeout_secs = cfg.acquire_timeout_secs.max(10);
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}

// ids derived from the clock plus a counter so parallel tests touch disjoint rows
pub fn fresh_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};
    static NEXT: AtomicI64 = AtomicI64::new(0);
    chrono::Utc::now().timestamp_micros() + NEXT.fetch_add(1, Ordering::Relaxed)
}
