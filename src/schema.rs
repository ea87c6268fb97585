//! Database schema bootstrap for the Postgres data source.
//!
//! The service only reads `climate_readings`; writers live elsewhere. The
//! table and its index are created if missing so that queries against a
//! fresh database return an empty window instead of failing. Applied once
//! on startup from `main.rs`.

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create the readings table and index if they do not exist (idempotent).
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Readings served to the scoring pipeline
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS climate_readings (
            id             UUID             PRIMARY KEY DEFAULT gen_random_uuid(),
            station_id     UUID,
            temperature    DOUBLE PRECISION,
            humidity       DOUBLE PRECISION,
            pressure       DOUBLE PRECISION,
            wind_speed     DOUBLE PRECISION,
            wind_direction DOUBLE PRECISION,
            recorded_at    TIMESTAMPTZ      NOT NULL,
            created_at     TIMESTAMPTZ      NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Lookback window queries filter and sort on recorded_at
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_climate_readings_recorded_at
            ON climate_readings (recorded_at);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
