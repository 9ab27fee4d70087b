use serde::{Deserialize, Serialize};

use loadledger_core::{AccountId, DomainError, DomainResult, Entity, PhoneNumber, RecordId};

/// Person identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub RecordId);

impl PersonId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PersonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A human identity, one-to-one with an external account.
///
/// Names and login live with the identity provider; the ledger keeps only the
/// account reference plus contact details it owns (cell phone and whether it
/// has been confirmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    account: AccountId,
    cell: Option<PhoneNumber>,
    cell_confirmed: bool,
}

impl Person {
    pub fn new(id: PersonId, account: AccountId, cell: Option<PhoneNumber>) -> Self {
        Self {
            id,
            account,
            cell,
            cell_confirmed: false,
        }
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn cell(&self) -> Option<&PhoneNumber> {
        self.cell.as_ref()
    }

    pub fn cell_confirmed(&self) -> bool {
        self.cell_confirmed
    }

    /// Record that the cell number was confirmed (e.g. via an SMS code flow
    /// run by the notification collaborator).
    pub fn confirm_cell(&mut self) -> DomainResult<()> {
        if self.cell.is_none() {
            return Err(DomainError::validation(
                "cannot confirm a person with no cell number",
            ));
        }
        self.cell_confirmed = true;
        Ok(())
    }

    /// Replace the cell number; confirmation does not carry over.
    pub fn set_cell(&mut self, cell: PhoneNumber) {
        self.cell = Some(cell);
        self.cell_confirmed = false;
    }
}

impl Entity for Person {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
