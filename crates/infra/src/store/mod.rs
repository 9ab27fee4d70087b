//! In-memory ledger store.
//!
//! Reference implementation of the relational collaborator described at the
//! persistence boundary. Intended for tests/dev. Not optimized for
//! performance.

mod tables;

pub use tables::Tables;

use std::sync::RwLock;

use loadledger_core::{DomainError, DomainResult};

/// In-memory store with per-operation transactions.
///
/// Writers stage their changes on a copy of the table set and commit by swap,
/// so a failing operation rolls back in full. Readers and writers serialize
/// on one lock; racing writers to the same row observe each other's committed
/// state and the loser fails its own invariant checks.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    tables: RwLock<Tables>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only query against committed state.
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> DomainResult<R> {
        let tables = self
            .tables
            .read()
            .map_err(|_| DomainError::conflict("store lock poisoned"))?;
        Ok(f(&tables))
    }

    /// Run `f` as one atomic transaction.
    ///
    /// All mutations land on a staged copy; the copy replaces committed state
    /// only when `f` returns `Ok`. Any error leaves the store untouched.
    pub fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> DomainResult<R>,
    ) -> DomainResult<R> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| DomainError::conflict("store lock poisoned"))?;

        let mut staged = tables.clone();
        let result = f(&mut staged)?;
        *tables = staged;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use loadledger_core::{AccountId, Money, RecordId};
    use loadledger_freight::{Cargo, CargoId};

    fn test_cargo(description: &str) -> Cargo {
        Cargo::post(
            CargoId::new(RecordId::new()),
            description,
            Money::usd(Decimal::new(100_000, 2)),
            AccountId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn committed_writes_are_visible_to_readers() {
        let store = InMemoryLedger::new();
        let cargo = test_cargo("Dry van, 20 pallets");
        let id = *loadledger_core::Entity::id(&cargo);

        store.transaction(|t| t.insert_cargo(cargo.clone())).unwrap();

        let found = store.read(|t| t.cargo(id).cloned()).unwrap().unwrap();
        assert_eq!(found, cargo);
    }

    #[test]
    fn failed_transaction_rolls_back_every_mutation() {
        let store = InMemoryLedger::new();
        let cargo = test_cargo("Reefer, 38 pallets");

        let err = store
            .transaction(|t| {
                t.insert_cargo(cargo.clone())?;
                Err::<(), _>(DomainError::validation("late failure"))
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let count = store.read(|t| t.cargo_count()).unwrap();
        assert_eq!(count, 0);
    }
}
