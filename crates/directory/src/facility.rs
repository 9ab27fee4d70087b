use serde::{Deserialize, Serialize};

use loadledger_core::{DomainError, DomainResult, Entity, PhoneNumber, RecordId};

use crate::company::CompanyId;

/// Facility identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub RecordId);

impl FacilityId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A physical location belonging to a company (e.g. "Storage 23").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    id: FacilityId,
    name: String,
    company_id: CompanyId,
    address: String,
    phone: Option<PhoneNumber>,
}

impl Facility {
    pub fn new(
        id: FacilityId,
        name: impl Into<String>,
        company_id: CompanyId,
        address: impl Into<String>,
        phone: Option<PhoneNumber>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let address = address.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("facility name cannot be empty"));
        }
        if address.trim().is_empty() {
            return Err(DomainError::validation("facility address cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            company_id,
            address,
            phone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }
}

impl Entity for Facility {
    type Id = FacilityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
