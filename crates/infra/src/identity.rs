//! In-memory identity provider and notifier.
//!
//! Test/dev doubles for the external collaborators: accounts and permission
//! grants in a `RwLock`ed map, deliveries recorded instead of sent. No
//! hashing — a real provider owns credential storage.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use loadledger_auth::{CredentialNotifier, IdentityProvider, NewAccount, Permission, TempCredential};
use loadledger_core::{AccountId, DomainError, DomainResult};

#[derive(Debug, Clone)]
struct AccountRecord {
    username: String,
    email: String,
    credential: String,
    permissions: HashSet<String>,
}

/// In-memory account directory with per-account permission grants.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Arc<RwLock<HashMap<AccountId, AccountRecord>>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly (bypasses credential assignment). Intended
    /// for arranging test fixtures.
    pub fn register(&self, username: impl Into<String>, email: impl Into<String>) -> AccountId {
        let id = AccountId::new();
        let record = AccountRecord {
            username: username.into(),
            email: email.into(),
            credential: String::new(),
            permissions: HashSet::new(),
        };
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(id, record);
        }
        id
    }

    /// Grant a permission to an existing account.
    pub fn grant(&self, account: AccountId, permission: &Permission) {
        if let Ok(mut accounts) = self.accounts.write() {
            if let Some(record) = accounts.get_mut(&account) {
                record.permissions.insert(permission.as_str().to_string());
            }
        }
    }

    pub fn username_of(&self, account: AccountId) -> Option<String> {
        self.accounts
            .read()
            .ok()
            .and_then(|accounts| accounts.get(&account).map(|r| r.username.clone()))
    }

    pub fn email_of(&self, account: AccountId) -> Option<String> {
        self.accounts
            .read()
            .ok()
            .and_then(|accounts| accounts.get(&account).map(|r| r.email.clone()))
    }

    /// The stored credential, for asserting against recorded deliveries.
    /// A real provider would never expose this.
    pub fn credential_of(&self, account: AccountId) -> Option<String> {
        self.accounts
            .read()
            .ok()
            .and_then(|accounts| accounts.get(&account).map(|r| r.credential.clone()))
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().map(|accounts| accounts.len()).unwrap_or(0)
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn create_account(
        &self,
        account: &NewAccount,
        credential: &TempCredential,
    ) -> DomainResult<AccountId> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| DomainError::conflict("identity lock poisoned"))?;

        if accounts
            .values()
            .any(|existing| existing.username == account.username())
        {
            return Err(DomainError::validation(format!(
                "username '{}' already exists",
                account.username()
            )));
        }

        let id = AccountId::new();
        accounts.insert(
            id,
            AccountRecord {
                username: account.username().to_string(),
                email: account.email().to_string(),
                credential: credential.expose().to_string(),
                permissions: HashSet::new(),
            },
        );
        Ok(id)
    }

    fn has_permission(&self, account: AccountId, permission: &Permission) -> bool {
        self.accounts
            .read()
            .ok()
            .and_then(|accounts| {
                accounts.get(&account).map(|record| {
                    record.permissions.contains("*")
                        || record.permissions.contains(permission.as_str())
                })
            })
            .unwrap_or(false)
    }

    fn account_exists(&self, account: AccountId) -> bool {
        self.accounts
            .read()
            .map(|accounts| accounts.contains_key(&account))
            .unwrap_or(false)
    }
}

/// Notifier that records deliveries instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(email, credential)` pairs in delivery order.
    pub fn deliveries(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl CredentialNotifier for RecordingNotifier {
    fn deliver(&self, email: &str, credential: &TempCredential) -> DomainResult<()> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| DomainError::conflict("notifier lock poisoned"))?;
        sent.push((email.to_string(), credential.expose().to_string()));
        Ok(())
    }
}
