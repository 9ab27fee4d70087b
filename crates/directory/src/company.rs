use serde::{Deserialize, Serialize};

use loadledger_core::{DomainError, DomainResult, Entity, RecordId};

/// Company type identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyTypeId(pub RecordId);

impl CompanyTypeId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CompanyTypeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Category of a company (e.g. brokerage, carrier, sender/receiver).
///
/// `name` is globally unique; the store enforces the constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyType {
    id: CompanyTypeId,
    name: String,
}

impl CompanyType {
    pub fn new(id: CompanyTypeId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("company type name cannot be empty"));
        }
        Ok(Self { id, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive category match, used by the summary counts.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl Entity for CompanyType {
    type Id = CompanyTypeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Company identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub RecordId);

impl CompanyId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A business entity (e.g. Galiano Corp, Bravo Supermarket).
///
/// `name` is globally unique; `type_id` must resolve to an existing
/// `CompanyType`. Both constraints are enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    id: CompanyId,
    name: String,
    type_id: CompanyTypeId,
}

impl Company {
    pub fn new(id: CompanyId, name: impl Into<String>, type_id: CompanyTypeId) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("company name cannot be empty"));
        }
        Ok(Self { id, name, type_id })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> CompanyTypeId {
        self.type_id
    }
}

impl Entity for Company {
    type Id = CompanyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_type_id() -> CompanyTypeId {
        CompanyTypeId::new(RecordId::new())
    }

    #[test]
    fn company_type_rejects_empty_name() {
        let err = CompanyType::new(test_type_id(), "  ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn company_type_name_matches_case_insensitively() {
        let carrier = CompanyType::new(test_type_id(), "Carrier").unwrap();
        assert!(carrier.is_named("carrier"));
        assert!(carrier.is_named("CARRIER"));
        assert!(!carrier.is_named("brokerage"));
    }

    #[test]
    fn company_rejects_empty_name() {
        let err = Company::new(CompanyId::new(RecordId::new()), "", test_type_id()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
