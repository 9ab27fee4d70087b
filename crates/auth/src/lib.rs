//! `loadledger-auth` — identity/permission boundary.
//!
//! The ledger never stores credentials or checks passwords; account creation,
//! credential storage and permission evaluation are delegated to an external
//! identity provider reached through the traits in this crate. The crate is
//! intentionally decoupled from HTTP and storage.

pub mod identity;
pub mod notify;
pub mod permissions;

pub use identity::{IdentityProvider, NewAccount, TempCredential};
pub use notify::CredentialNotifier;
pub use permissions::{Permission, ADD_EMPLOYEE};
