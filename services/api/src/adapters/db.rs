//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `LedgerService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use footprint_core::domain::{ActivityInput, FootprintRecord, NewFootprint};
use footprint_core::ports::{LedgerService, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `LedgerService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct FootprintRow {
    id: Uuid,
    electricity_bill: f64,
    lpg_cylinders: i64,
    car_distance: f64,
    domestic_flights: i64,
    international_flights: i64,
    total_footprint: f64,
    created_at: DateTime<Utc>,
}

impl FootprintRow {
    fn to_domain(self) -> PortResult<FootprintRecord> {
        Ok(FootprintRecord {
            id: self.id,
            input: ActivityInput {
                electricity_bill: self.electricity_bill,
                lpg_cylinders: count_from_column("lpg_cylinders", self.lpg_cylinders)?,
                car_distance: self.car_distance,
                domestic_flights: count_from_column("domestic_flights", self.domestic_flights)?,
                international_flights: count_from_column(
                    "international_flights",
                    self.international_flights,
                )?,
            },
            total_footprint: self.total_footprint,
            created_at: self.created_at,
        })
    }
}

fn count_from_column(column: &str, value: i64) -> PortResult<u32> {
    u32::try_from(value)
        .map_err(|_| PortError::Unexpected(format!("Column {} holds out-of-range {}", column, value)))
}

/// Sorts a `sqlx` failure into the port's storage error family.
fn map_db_error(e: sqlx::Error) -> PortError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => PortError::Unavailable(e.to_string()),
        sqlx::Error::Database(ref db) if db.is_check_violation() => {
            PortError::Invalid(e.to_string())
        }
        _ => PortError::Unexpected(e.to_string()),
    }
}

const RECORD_COLUMNS: &str = "id, electricity_bill, lpg_cylinders, car_distance, \
     domestic_flights, international_flights, total_footprint, created_at";

//=========================================================================================
// `LedgerService` Trait Implementation
//=========================================================================================

#[async_trait]
impl LedgerService for DbAdapter {
    async fn save(&self, footprint: NewFootprint) -> PortResult<FootprintRecord> {
        footprint.validate()?;

        let sql = format!(
            "INSERT INTO footprints (id, electricity_bill, lpg_cylinders, car_distance, \
             domestic_flights, international_flights, total_footprint) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            RECORD_COLUMNS
        );
        let row = sqlx::query_as::<_, FootprintRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(footprint.input.electricity_bill)
            .bind(i64::from(footprint.input.lpg_cylinders))
            .bind(footprint.input.car_distance)
            .bind(i64::from(footprint.input.domestic_flights))
            .bind(i64::from(footprint.input.international_flights))
            .bind(footprint.total_footprint)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!("Inserted footprint {}", row.id);
        row.to_domain()
    }

    async fn list_recent(&self, limit: usize) -> PortResult<Vec<FootprintRecord>> {
        let sql = format!(
            "SELECT {} FROM footprints ORDER BY created_at DESC, seq DESC LIMIT $1",
            RECORD_COLUMNS
        );
        let rows = sqlx::query_as::<_, FootprintRow>(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(FootprintRow::to_domain).collect()
    }
}
