use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use loadledger_core::{DomainError, DomainResult, Entity, RecordId};

use crate::company::CompanyId;
use crate::person::PersonId;

/// Employee role identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRoleId(pub RecordId);

impl EmployeeRoleId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for EmployeeRoleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A job function (broker, dispatcher, driver, manager, owner).
///
/// `name` is globally unique; the store enforces the constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRole {
    id: EmployeeRoleId,
    name: String,
}

impl EmployeeRole {
    pub fn new(id: EmployeeRoleId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("role name cannot be empty"));
        }
        Ok(Self { id, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for EmployeeRole {
    type Id = EmployeeRoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Employee identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub RecordId);

impl EmployeeId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A person acting for a company, with a non-empty set of roles.
///
/// Resolves exactly one person and one company; a person holds at most one
/// employee row (the store enforces uniqueness on `person_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    person_id: PersonId,
    company_id: CompanyId,
    roles: BTreeSet<EmployeeRoleId>,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        person_id: PersonId,
        company_id: CompanyId,
        roles: BTreeSet<EmployeeRoleId>,
    ) -> DomainResult<Self> {
        if roles.is_empty() {
            return Err(DomainError::validation(
                "an employee must hold at least one role",
            ));
        }
        Ok(Self {
            id,
            person_id,
            company_id,
            roles,
        })
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn roles(&self) -> &BTreeSet<EmployeeRoleId> {
        &self.roles
    }

    pub fn has_role(&self, role: EmployeeRoleId) -> bool {
        self.roles.contains(&role)
    }

    /// Replace the role set; an empty set is rejected.
    pub fn assign_roles(&mut self, roles: BTreeSet<EmployeeRoleId>) -> DomainResult<()> {
        if roles.is_empty() {
            return Err(DomainError::validation(
                "an employee must hold at least one role",
            ));
        }
        self.roles = roles;
        Ok(())
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_role_id() -> EmployeeRoleId {
        EmployeeRoleId::new(RecordId::new())
    }

    fn test_employee() -> Employee {
        Employee::new(
            EmployeeId::new(RecordId::new()),
            PersonId::new(RecordId::new()),
            CompanyId::new(RecordId::new()),
            BTreeSet::from([test_role_id()]),
        )
        .unwrap()
    }

    #[test]
    fn role_rejects_empty_name() {
        let err = EmployeeRole::new(test_role_id(), "").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn employee_requires_at_least_one_role() {
        let err = Employee::new(
            EmployeeId::new(RecordId::new()),
            PersonId::new(RecordId::new()),
            CompanyId::new(RecordId::new()),
            BTreeSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn assign_roles_rejects_empty_set_and_keeps_previous() {
        let mut employee = test_employee();
        let before = employee.roles().clone();

        let err = employee.assign_roles(BTreeSet::new()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(employee.roles(), &before);

        let dispatcher = test_role_id();
        let driver = test_role_id();
        employee
            .assign_roles(BTreeSet::from([dispatcher, driver]))
            .unwrap();
        assert!(employee.has_role(dispatcher));
        assert!(employee.has_role(driver));
    }
}
