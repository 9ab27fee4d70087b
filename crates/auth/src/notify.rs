//! Out-of-band credential delivery.

use loadledger_core::DomainResult;

use crate::identity::TempCredential;

/// Notification channel that delivers a temporary credential to a new
/// employee's email address. The ledger only triggers delivery; transport,
/// templating and retries belong to the implementation.
pub trait CredentialNotifier {
    fn deliver(&self, email: &str, credential: &TempCredential) -> DomainResult<()>;
}
