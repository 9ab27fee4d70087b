//! Operation layer: explicit-caller business operations over the store.
//!
//! Every operation takes the acting account and the effective instant as
//! parameters — there is no ambient "current user" or hidden clock. Each
//! operation is one store transaction; failures roll back in full and are
//! never retried here.

mod directory;
mod freight;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use loadledger_auth::{CredentialNotifier, IdentityProvider};
use loadledger_core::DomainError;

use crate::store::InMemoryLedger;

/// Operation-layer error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller has no employee record to scope the operation by.
    #[error("caller has no employee record")]
    NotAnEmployee,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Home-page style summary counts. Purely derived, no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub cargo_count: usize,
    pub pickup_order_count: usize,
    pub available_cargo_count: usize,
    pub brokerage_count: usize,
    pub carrier_count: usize,
}

/// The ledger's operation surface.
///
/// Generic over the identity-provider and notifier collaborators so tests
/// can plug in the in-memory doubles and deployments a real directory.
#[derive(Debug)]
pub struct LedgerService<I, N> {
    store: Arc<InMemoryLedger>,
    identity: I,
    notifier: N,
}

impl<I, N> LedgerService<I, N>
where
    I: IdentityProvider,
    N: CredentialNotifier,
{
    pub fn new(store: Arc<InMemoryLedger>, identity: I, notifier: N) -> Self {
        Self {
            store,
            identity,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<InMemoryLedger> {
        &self.store
    }

    /// Counts for the landing page: totals plus the broker/carrier split.
    pub fn summary(&self) -> ServiceResult<LedgerSummary> {
        let summary = self.store.read(|t| LedgerSummary {
            cargo_count: t.cargo_count(),
            pickup_order_count: t.pickup_order_count(),
            available_cargo_count: t.posted_cargo_count(),
            brokerage_count: t.company_count_of_type("brokerage"),
            carrier_count: t.company_count_of_type("carrier"),
        })?;
        Ok(summary)
    }
}
