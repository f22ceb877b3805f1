//! services/api/src/adapters/memory.rs
//!
//! A process-local implementation of the `LedgerService` port, used for local runs
//! without PostgreSQL and as the ledger behind the HTTP tests.

use async_trait::async_trait;
use chrono::Utc;
use footprint_core::domain::{FootprintRecord, NewFootprint};
use footprint_core::ports::{LedgerService, PortResult};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Records are kept in insertion order, which is also `created_at` order.
#[derive(Default)]
pub struct InMemoryLedger {
    records: RwLock<Vec<FootprintRecord>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerService for InMemoryLedger {
    async fn save(&self, footprint: NewFootprint) -> PortResult<FootprintRecord> {
        footprint.validate()?;

        let mut records = self.records.write().await;
        // A clock stepping backwards must not reorder the ledger.
        let now = Utc::now();
        let created_at = records
            .last()
            .map_or(now, |last| now.max(last.created_at));

        let record = FootprintRecord {
            id: Uuid::new_v4(),
            input: footprint.input,
            total_footprint: footprint.total_footprint,
            created_at,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_recent(&self, limit: usize) -> PortResult<Vec<FootprintRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::domain::ActivityInput;
    use footprint_core::ports::PortError;

    fn footprint(total: f64) -> NewFootprint {
        NewFootprint {
            input: ActivityInput {
                electricity_bill: 1500.0,
                lpg_cylinders: 2,
                ..ActivityInput::default()
            },
            total_footprint: total,
        }
    }

    #[tokio::test]
    async fn empty_ledger_lists_nothing() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.list_recent(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_list_one_returns_saved_record() {
        let ledger = InMemoryLedger::new();
        ledger.save(footprint(1.0)).await.unwrap();
        let saved = ledger.save(footprint(2.0)).await.unwrap();

        let recent = ledger.list_recent(1).await.unwrap();
        assert_eq!(recent, vec![saved]);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_bounded() {
        let ledger = InMemoryLedger::new();
        for i in 0..7 {
            ledger.save(footprint(f64::from(i))).await.unwrap();
        }

        let recent = ledger.list_recent(5).await.unwrap();
        let totals: Vec<f64> = recent.iter().map(|r| r.total_footprint).collect();
        assert_eq!(totals, vec![6.0, 5.0, 4.0, 3.0, 2.0]);
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        assert_eq!(ledger.list_recent(50).await.unwrap().len(), 7);
        assert!(ledger.list_recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_rejects_invalid_payload() {
        let ledger = InMemoryLedger::new();
        let err = ledger.save(footprint(-1.0)).await.unwrap_err();

        assert!(matches!(err, PortError::Invalid(_)));
        assert!(ledger.list_recent(5).await.unwrap().is_empty());
    }
}
