//! Directory operations: companies, facilities, people, employees.

use std::collections::BTreeSet;

use tracing::info;

use loadledger_auth::{CredentialNotifier, IdentityProvider, NewAccount, TempCredential, ADD_EMPLOYEE};
use loadledger_core::{AccountId, DomainError, PhoneNumber, RecordId};
use loadledger_directory::{
    Company, CompanyId, CompanyType, CompanyTypeId, Employee, EmployeeId, EmployeeRole,
    EmployeeRoleId, Facility, FacilityId, Person, PersonId,
};

use super::{LedgerService, ServiceError, ServiceResult};

impl<I, N> LedgerService<I, N>
where
    I: IdentityProvider,
    N: CredentialNotifier,
{
    pub fn create_company_type(
        &self,
        caller: AccountId,
        name: &str,
    ) -> ServiceResult<CompanyTypeId> {
        let id = CompanyTypeId::new(RecordId::new());
        let row = CompanyType::new(id, name)?;
        self.store.transaction(|t| t.insert_company_type(row))?;
        info!(%caller, %id, name, "company type created");
        Ok(id)
    }

    pub fn create_company(
        &self,
        caller: AccountId,
        name: &str,
        type_id: CompanyTypeId,
    ) -> ServiceResult<CompanyId> {
        let id = CompanyId::new(RecordId::new());
        let row = Company::new(id, name, type_id)?;
        self.store.transaction(|t| t.insert_company(row))?;
        info!(%caller, %id, name, "company created");
        Ok(id)
    }

    pub fn create_facility(
        &self,
        caller: AccountId,
        name: &str,
        company_id: CompanyId,
        address: &str,
        phone: Option<&str>,
    ) -> ServiceResult<FacilityId> {
        let phone = phone.map(PhoneNumber::parse).transpose()?;
        let id = FacilityId::new(RecordId::new());
        let row = Facility::new(id, name, company_id, address, phone)?;
        self.store.transaction(|t| t.insert_facility(row))?;
        info!(%caller, %id, name, "facility created");
        Ok(id)
    }

    pub fn create_role(&self, caller: AccountId, name: &str) -> ServiceResult<EmployeeRoleId> {
        let id = EmployeeRoleId::new(RecordId::new());
        let row = EmployeeRole::new(id, name)?;
        self.store.transaction(|t| t.insert_role(row))?;
        info!(%caller, %id, name, "employee role created");
        Ok(id)
    }

    /// Onboard a new employee into the **manager's own company**.
    ///
    /// The company is resolved from the manager's employee record and never
    /// taken from input. The new account gets a system-assigned temporary
    /// credential, delivered out of band; the person+employee rows commit in
    /// one transaction.
    pub fn create_employee(
        &self,
        manager: AccountId,
        new_account: NewAccount,
        phone: &str,
        roles: BTreeSet<EmployeeRoleId>,
    ) -> ServiceResult<EmployeeId> {
        if !self.identity.has_permission(manager, &ADD_EMPLOYEE) {
            return Err(DomainError::permission_denied(ADD_EMPLOYEE.as_str()).into());
        }

        let company_id = self
            .store
            .read(|t| t.employee_for_account(manager).map(|e| e.company_id()))?
            .ok_or(ServiceError::NotAnEmployee)?;

        // Everything that can be validated happens before the account is
        // created with the identity provider.
        let phone = PhoneNumber::parse(phone)?;
        if roles.is_empty() {
            return Err(DomainError::validation("an employee must hold at least one role").into());
        }
        self.store.read(|t| {
            for role_id in &roles {
                if t.role(*role_id).is_none() {
                    return Err(DomainError::NotFound);
                }
            }
            Ok(())
        })??;

        let credential = TempCredential::generate();
        let account = self.identity.create_account(&new_account, &credential)?;

        let person_id = PersonId::new(RecordId::new());
        let employee_id = EmployeeId::new(RecordId::new());
        self.store.transaction(|t| {
            t.insert_person(Person::new(person_id, account, Some(phone)))?;
            t.insert_employee(Employee::new(employee_id, person_id, company_id, roles)?)?;
            Ok(())
        })?;

        self.notifier.deliver(new_account.email(), &credential)?;

        info!(%manager, employee = %employee_id, company = %company_id, "employee onboarded");
        Ok(employee_id)
    }

    /// The caller's company directory — and only the caller's.
    ///
    /// This is an authorization-scoping rule, not a generic query: the
    /// company is taken from the caller's own employee record, so no request
    /// parameter can widen the result to another company.
    pub fn list_employees_for_caller(&self, caller: AccountId) -> ServiceResult<Vec<Employee>> {
        let rows = self
            .store
            .read(|t| {
                t.employee_for_account(caller)
                    .map(|e| t.employees_of_company(e.company_id()))
            })?
            .ok_or(ServiceError::NotAnEmployee)?;
        Ok(rows)
    }

    /// Record that a person's cell number was confirmed.
    pub fn confirm_person_cell(&self, caller: AccountId, person_id: PersonId) -> ServiceResult<()> {
        self.store
            .transaction(|t| t.person_mut(person_id)?.confirm_cell())?;
        info!(%caller, person = %person_id, "cell number confirmed");
        Ok(())
    }

    /// Replace an employee's role set (non-empty, all roles must exist).
    pub fn assign_employee_roles(
        &self,
        caller: AccountId,
        employee_id: EmployeeId,
        roles: BTreeSet<EmployeeRoleId>,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            for role_id in &roles {
                if t.role(*role_id).is_none() {
                    return Err(DomainError::NotFound);
                }
            }
            t.employee_mut(employee_id)?.assign_roles(roles)
        })?;
        info!(%caller, employee = %employee_id, "employee roles reassigned");
        Ok(())
    }
}
