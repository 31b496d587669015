//! Local transaction bookkeeping.
//!
//! Tracks transaction lifecycles (begin, commit, rollback) without driving a
//! store-side protocol. Stores that need real demarcation plug in their own
//! `TransactionManager`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use graphwire_domain::TransactionId;

use crate::infrastructure::ports::{
    ClockPort, TransactionError, TransactionInfo, TransactionManager, TransactionStatus,
};

pub struct LocalTransactionManager {
    transactions: DashMap<TransactionId, TransactionInfo>,
    clock: Arc<dyn ClockPort>,
}

impl LocalTransactionManager {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            transactions: DashMap::new(),
            clock,
        }
    }

    /// Full record of a transaction, including timestamps.
    pub fn info(&self, id: TransactionId) -> Option<TransactionInfo> {
        self.transactions.get(&id).map(|entry| entry.value().clone())
    }

    pub fn active_count(&self) -> usize {
        self.transactions
            .iter()
            .filter(|entry| entry.status == TransactionStatus::Active)
            .count()
    }

    fn finish(&self, id: TransactionId, status: TransactionStatus) -> Result<(), TransactionError> {
        let mut entry = self
            .transactions
            .get_mut(&id)
            .ok_or(TransactionError::Unknown(id))?;
        if entry.status != TransactionStatus::Active {
            return Err(TransactionError::NotActive {
                id,
                status: entry.status,
            });
        }
        entry.status = status;
        entry.finished_at = Some(self.clock.now());
        tracing::debug!(transaction_id = %id, ?status, "Transaction finished");
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for LocalTransactionManager {
    async fn begin(&self) -> Result<TransactionId, TransactionError> {
        let id = TransactionId::new();
        self.transactions.insert(
            id,
            TransactionInfo {
                id,
                status: TransactionStatus::Active,
                started_at: self.clock.now(),
                finished_at: None,
            },
        );
        tracing::debug!(transaction_id = %id, "Transaction started");
        Ok(id)
    }

    async fn commit(&self, id: TransactionId) -> Result<(), TransactionError> {
        self.finish(id, TransactionStatus::Committed)
    }

    async fn rollback(&self, id: TransactionId) -> Result<(), TransactionError> {
        self.finish(id, TransactionStatus::RolledBack)
    }

    fn status(&self, id: TransactionId) -> Option<TransactionStatus> {
        self.transactions.get(&id).map(|entry| entry.status)
    }

    fn describe(&self) -> String {
        "LocalTransactionManager".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn manager() -> LocalTransactionManager {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().expect("valid date");
        LocalTransactionManager::new(Arc::new(FixedClock(now)))
    }

    #[tokio::test]
    async fn begin_then_commit() {
        let tx = manager();
        let id = tx.begin().await.expect("begin");
        assert_eq!(tx.status(id), Some(TransactionStatus::Active));
        assert_eq!(tx.active_count(), 1);

        tx.commit(id).await.expect("commit");
        assert_eq!(tx.status(id), Some(TransactionStatus::Committed));
        assert!(tx.info(id).and_then(|info| info.finished_at).is_some());
        assert_eq!(tx.active_count(), 0);
    }

    #[tokio::test]
    async fn finished_transactions_cannot_finish_again() {
        let tx = manager();
        let id = tx.begin().await.expect("begin");
        tx.rollback(id).await.expect("rollback");

        assert_eq!(
            tx.commit(id).await,
            Err(TransactionError::NotActive {
                id,
                status: TransactionStatus::RolledBack
            })
        );
    }

    #[tokio::test]
    async fn unknown_transaction_is_rejected() {
        let tx = manager();
        let id = TransactionId::new();
        assert_eq!(tx.rollback(id).await, Err(TransactionError::Unknown(id)));
        assert_eq!(tx.status(id), None);
    }
}
