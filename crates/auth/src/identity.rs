//! Account creation and permission checks, specified at the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loadledger_core::{AccountId, DomainError, DomainResult};

use crate::permissions::Permission;

/// Fields for a new account identity.
///
/// Note the absence of a password field: credentials are always
/// system-assigned at creation time, never caller-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
}

impl NewAccount {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Self> {
        let username = username.into();
        let email = email.into();

        if username.trim().len() < 4 {
            return Err(DomainError::validation(
                "username must be at least 4 characters",
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(format!(
                "'{email}' is not an email address"
            )));
        }

        Ok(Self {
            username,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// System-assigned temporary credential for a freshly created account.
///
/// Generated here, handed to the identity provider for storage and to the
/// notification channel for out-of-band delivery. Deliberately not `Debug`
/// derived so the secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct TempCredential(String);

impl TempCredential {
    /// Generate a fresh one-time credential.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Expose the secret for provider storage / notification delivery.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for TempCredential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("TempCredential(<redacted>)")
    }
}

/// External identity provider, specified at the boundary.
///
/// Implementations own account storage, credential hashing and the
/// permission model; the ledger only asks questions.
pub trait IdentityProvider {
    /// Create an account with a system-assigned credential.
    ///
    /// Fails with a validation error if the username is already taken.
    fn create_account(
        &self,
        account: &NewAccount,
        credential: &TempCredential,
    ) -> DomainResult<AccountId>;

    /// Whether the account holds the given permission.
    fn has_permission(&self, account: AccountId, permission: &Permission) -> bool;

    /// Whether the account exists at all.
    fn account_exists(&self, account: AccountId) -> bool;
}
