use std::time::Duration;

use db_infra::config::db::{
    build_connection_settings, build_session_statements, make_conn_spec, DbOwner, DbSettings,
    PoolPurpose, RuntimeEnv,
};
use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::AppError;

async fn apply_session_settings(
    conn: &mut sqlx::PgConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Open the runtime pool with the application role. Does not migrate.
pub async fn connect_db(env: RuntimeEnv) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, DbOwner::App).map_err(|e| AppError::config(e.message()))?;
    let settings = build_connection_settings(env, PoolPurpose::Runtime);

    info!(
        "pool=connecting min={} max={} acquire_timeout_ms={}",
        settings.min_connections,
        settings.max_connections,
        settings.acquire_timeout.as_millis()
    );

    let db_settings = settings.db_settings.clone();
    let pool = PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(Duration::from_secs(30))
        .after_connect(move |conn, _meta| {
            let settings = db_settings.clone();
            Box::pin(async move {
                apply_session_settings(conn, &settings).await?;
                Ok::<_, sqlx::Error>(())
            })
        })
        .connect(&url)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect to Postgres: {e}")))?;

    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}

/// Migrate to the latest schema, then connect.
pub async fn bootstrap_db(env: RuntimeEnv) -> Result<DatabaseConnection, AppError> {
    db_infra::orchestrate_migration(env, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {}", e.message())))?;
    info!(env = ?env, "schema up to date");
    connect_db(env).await
}
