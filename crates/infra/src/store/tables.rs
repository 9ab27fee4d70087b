use std::cmp::Ordering;
use std::collections::HashMap;

use loadledger_core::{AccountId, DomainError, DomainResult, Entity};
use loadledger_directory::{
    Company, CompanyId, CompanyType, CompanyTypeId, Employee, EmployeeId, EmployeeRole,
    EmployeeRoleId, Facility, FacilityId, Person, PersonId,
};
use loadledger_freight::{Cargo, CargoId, CargoStatus, Lumper, LumperId, PickupOrder, PickupOrderId};

/// One transaction's view of every table.
///
/// Insert methods enforce unique constraints and foreign-key existence;
/// delete methods enforce protect-on-delete. Query methods return rows in the
/// ledger's canonical orderings. Constraint violations surface as typed
/// domain errors and nothing cascades.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    company_types: HashMap<CompanyTypeId, CompanyType>,
    companies: HashMap<CompanyId, Company>,
    facilities: HashMap<FacilityId, Facility>,
    persons: HashMap<PersonId, Person>,
    roles: HashMap<EmployeeRoleId, EmployeeRole>,
    employees: HashMap<EmployeeId, Employee>,
    cargos: HashMap<CargoId, Cargo>,
    pickup_orders: HashMap<PickupOrderId, PickupOrder>,
    lumpers: HashMap<LumperId, Lumper>,
}

/// Canonical cargo-board ordering: newest posting first, then description,
/// then the better-paying load.
fn cargo_board_order(a: &Cargo, b: &Cargo) -> Ordering {
    b.posted()
        .cmp(&a.posted())
        .then_with(|| a.description().cmp(b.description()))
        .then_with(|| b.price().amount().cmp(&a.price().amount()))
}

impl Tables {
    // ── company types ────────────────────────────────────────────────

    pub fn insert_company_type(&mut self, row: CompanyType) -> DomainResult<()> {
        if self.company_types.contains_key(row.id()) {
            return Err(DomainError::conflict("company type id already exists"));
        }
        if self
            .company_types
            .values()
            .any(|existing| existing.name().eq_ignore_ascii_case(row.name()))
        {
            return Err(DomainError::validation(format!(
                "company type '{}' already exists",
                row.name()
            )));
        }
        self.company_types.insert(*row.id(), row);
        Ok(())
    }

    pub fn company_type(&self, id: CompanyTypeId) -> Option<&CompanyType> {
        self.company_types.get(&id)
    }

    pub fn delete_company_type(&mut self, id: CompanyTypeId) -> DomainResult<()> {
        if !self.company_types.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        if self.companies.values().any(|c| c.type_id() == id) {
            return Err(DomainError::protected(
                "company type is referenced by a company",
            ));
        }
        self.company_types.remove(&id);
        Ok(())
    }

    // ── companies ────────────────────────────────────────────────────

    pub fn insert_company(&mut self, row: Company) -> DomainResult<()> {
        if self.companies.contains_key(row.id()) {
            return Err(DomainError::conflict("company id already exists"));
        }
        if !self.company_types.contains_key(&row.type_id()) {
            return Err(DomainError::NotFound);
        }
        if self
            .companies
            .values()
            .any(|existing| existing.name() == row.name())
        {
            return Err(DomainError::validation(format!(
                "company '{}' already exists",
                row.name()
            )));
        }
        self.companies.insert(*row.id(), row);
        Ok(())
    }

    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        self.companies.get(&id)
    }

    /// Companies ordered by (type, name).
    pub fn companies_ordered(&self) -> Vec<Company> {
        let mut rows: Vec<Company> = self.companies.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.type_id()
                .cmp(&b.type_id())
                .then_with(|| a.name().cmp(b.name()))
        });
        rows
    }

    /// How many companies belong to a type with the given name
    /// (case-insensitive).
    pub fn company_count_of_type(&self, type_name: &str) -> usize {
        self.companies
            .values()
            .filter(|c| {
                self.company_types
                    .get(&c.type_id())
                    .is_some_and(|t| t.is_named(type_name))
            })
            .count()
    }

    pub fn delete_company(&mut self, id: CompanyId) -> DomainResult<()> {
        if !self.companies.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        if self.facilities.values().any(|f| f.company_id() == id) {
            return Err(DomainError::protected("company is referenced by a facility"));
        }
        if self.employees.values().any(|e| e.company_id() == id) {
            return Err(DomainError::protected("company is referenced by an employee"));
        }
        self.companies.remove(&id);
        Ok(())
    }

    // ── facilities ───────────────────────────────────────────────────

    pub fn insert_facility(&mut self, row: Facility) -> DomainResult<()> {
        if self.facilities.contains_key(row.id()) {
            return Err(DomainError::conflict("facility id already exists"));
        }
        if !self.companies.contains_key(&row.company_id()) {
            return Err(DomainError::NotFound);
        }
        self.facilities.insert(*row.id(), row);
        Ok(())
    }

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.get(&id)
    }

    /// Facilities ordered by (company, name).
    pub fn facilities_ordered(&self) -> Vec<Facility> {
        let mut rows: Vec<Facility> = self.facilities.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.company_id()
                .cmp(&b.company_id())
                .then_with(|| a.name().cmp(b.name()))
        });
        rows
    }

    pub fn delete_facility(&mut self, id: FacilityId) -> DomainResult<()> {
        if !self.facilities.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        let referenced = self
            .pickup_orders
            .values()
            .any(|p| p.pickup_from() == id || p.deliver_to() == id);
        if referenced {
            return Err(DomainError::protected(
                "facility is referenced by a pickup order",
            ));
        }
        self.facilities.remove(&id);
        Ok(())
    }

    // ── persons ──────────────────────────────────────────────────────

    pub fn insert_person(&mut self, row: Person) -> DomainResult<()> {
        if self.persons.contains_key(row.id()) {
            return Err(DomainError::conflict("person id already exists"));
        }
        if self
            .persons
            .values()
            .any(|existing| existing.account() == row.account())
        {
            return Err(DomainError::validation(
                "account is already linked to a person",
            ));
        }
        self.persons.insert(*row.id(), row);
        Ok(())
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    pub(crate) fn person_mut(&mut self, id: PersonId) -> DomainResult<&mut Person> {
        self.persons.get_mut(&id).ok_or(DomainError::NotFound)
    }

    pub fn delete_person(&mut self, id: PersonId) -> DomainResult<()> {
        if !self.persons.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        if self.employees.values().any(|e| e.person_id() == id) {
            return Err(DomainError::protected("person is referenced by an employee"));
        }
        self.persons.remove(&id);
        Ok(())
    }

    // ── employee roles ───────────────────────────────────────────────

    pub fn insert_role(&mut self, row: EmployeeRole) -> DomainResult<()> {
        if self.roles.contains_key(row.id()) {
            return Err(DomainError::conflict("role id already exists"));
        }
        if self
            .roles
            .values()
            .any(|existing| existing.name().eq_ignore_ascii_case(row.name()))
        {
            return Err(DomainError::validation(format!(
                "role '{}' already exists",
                row.name()
            )));
        }
        self.roles.insert(*row.id(), row);
        Ok(())
    }

    pub fn role(&self, id: EmployeeRoleId) -> Option<&EmployeeRole> {
        self.roles.get(&id)
    }

    pub fn delete_role(&mut self, id: EmployeeRoleId) -> DomainResult<()> {
        if !self.roles.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        if self.employees.values().any(|e| e.has_role(id)) {
            return Err(DomainError::protected("role is referenced by an employee"));
        }
        self.roles.remove(&id);
        Ok(())
    }

    // ── employees ────────────────────────────────────────────────────

    pub fn insert_employee(&mut self, row: Employee) -> DomainResult<()> {
        if self.employees.contains_key(row.id()) {
            return Err(DomainError::conflict("employee id already exists"));
        }
        if !self.persons.contains_key(&row.person_id()) {
            return Err(DomainError::NotFound);
        }
        if !self.companies.contains_key(&row.company_id()) {
            return Err(DomainError::NotFound);
        }
        for role_id in row.roles() {
            if !self.roles.contains_key(role_id) {
                return Err(DomainError::NotFound);
            }
        }
        if self
            .employees
            .values()
            .any(|existing| existing.person_id() == row.person_id())
        {
            return Err(DomainError::validation(
                "person already has an employee record",
            ));
        }
        self.employees.insert(*row.id(), row);
        Ok(())
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub(crate) fn employee_mut(&mut self, id: EmployeeId) -> DomainResult<&mut Employee> {
        self.employees.get_mut(&id).ok_or(DomainError::NotFound)
    }

    /// Resolve the employee row behind an account, if any.
    pub fn employee_for_account(&self, account: AccountId) -> Option<&Employee> {
        let person_id = self
            .persons
            .values()
            .find(|p| p.account() == account)
            .map(|p| *p.id())?;
        self.employees.values().find(|e| e.person_id() == person_id)
    }

    /// A company's employees ordered by (company, person).
    pub fn employees_of_company(&self, company_id: CompanyId) -> Vec<Employee> {
        let mut rows: Vec<Employee> = self
            .employees
            .values()
            .filter(|e| e.company_id() == company_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.company_id()
                .cmp(&b.company_id())
                .then_with(|| a.person_id().cmp(&b.person_id()))
        });
        rows
    }

    pub fn delete_employee(&mut self, id: EmployeeId) -> DomainResult<()> {
        if self.employees.remove(&id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    // ── cargos ───────────────────────────────────────────────────────

    pub fn insert_cargo(&mut self, row: Cargo) -> DomainResult<()> {
        if self.cargos.contains_key(row.id()) {
            return Err(DomainError::conflict("cargo id already exists"));
        }
        self.cargos.insert(*row.id(), row);
        Ok(())
    }

    pub fn cargo(&self, id: CargoId) -> Option<&Cargo> {
        self.cargos.get(&id)
    }

    pub(crate) fn cargo_mut(&mut self, id: CargoId) -> DomainResult<&mut Cargo> {
        self.cargos.get_mut(&id).ok_or(DomainError::NotFound)
    }

    pub fn cargo_count(&self) -> usize {
        self.cargos.len()
    }

    pub fn posted_cargo_count(&self) -> usize {
        self.cargos
            .values()
            .filter(|c| c.status() == CargoStatus::Posted)
            .count()
    }

    /// Every cargo on the board, canonical order.
    pub fn cargos_ordered(&self) -> Vec<Cargo> {
        let mut rows: Vec<Cargo> = self.cargos.values().cloned().collect();
        rows.sort_by(cargo_board_order);
        rows
    }

    /// The available subset: loads still sitting in `Posted`.
    pub fn available_cargo(&self) -> Vec<Cargo> {
        let mut rows: Vec<Cargo> = self
            .cargos
            .values()
            .filter(|c| c.is_available())
            .cloned()
            .collect();
        rows.sort_by(cargo_board_order);
        rows
    }

    pub fn delete_cargo(&mut self, id: CargoId) -> DomainResult<()> {
        if !self.cargos.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        if self.pickup_orders.values().any(|p| p.cargo_id() == id) {
            return Err(DomainError::protected("cargo is referenced by a pickup order"));
        }
        self.cargos.remove(&id);
        Ok(())
    }

    // ── pickup orders ────────────────────────────────────────────────

    pub fn insert_pickup_order(&mut self, row: PickupOrder) -> DomainResult<()> {
        if self.pickup_orders.contains_key(row.id()) {
            return Err(DomainError::conflict("pickup order id already exists"));
        }
        if !self.cargos.contains_key(&row.cargo_id()) {
            return Err(DomainError::NotFound);
        }
        if !self.facilities.contains_key(&row.pickup_from())
            || !self.facilities.contains_key(&row.deliver_to())
        {
            return Err(DomainError::NotFound);
        }
        self.pickup_orders.insert(*row.id(), row);
        Ok(())
    }

    pub fn pickup_order(&self, id: PickupOrderId) -> Option<&PickupOrder> {
        self.pickup_orders.get(&id)
    }

    pub(crate) fn pickup_order_mut(&mut self, id: PickupOrderId) -> DomainResult<&mut PickupOrder> {
        self.pickup_orders.get_mut(&id).ok_or(DomainError::NotFound)
    }

    pub fn pickup_order_count(&self) -> usize {
        self.pickup_orders.len()
    }

    pub fn delete_pickup_order(&mut self, id: PickupOrderId) -> DomainResult<()> {
        if !self.pickup_orders.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        if self.lumpers.values().any(|l| l.pickup_order_id() == id) {
            return Err(DomainError::protected("pickup order is referenced by a lumper"));
        }
        self.pickup_orders.remove(&id);
        Ok(())
    }

    // ── lumpers ──────────────────────────────────────────────────────

    pub fn insert_lumper(&mut self, row: Lumper) -> DomainResult<()> {
        if self.lumpers.contains_key(row.id()) {
            return Err(DomainError::conflict("lumper id already exists"));
        }
        if !self.pickup_orders.contains_key(&row.pickup_order_id()) {
            return Err(DomainError::NotFound);
        }
        self.lumpers.insert(*row.id(), row);
        Ok(())
    }

    pub fn lumper(&self, id: LumperId) -> Option<&Lumper> {
        self.lumpers.get(&id)
    }

    pub(crate) fn lumper_mut(&mut self, id: LumperId) -> DomainResult<&mut Lumper> {
        self.lumpers.get_mut(&id).ok_or(DomainError::NotFound)
    }

    /// Lumpers ordered newest request first.
    pub fn lumpers_ordered(&self) -> Vec<Lumper> {
        let mut rows: Vec<Lumper> = self.lumpers.values().cloned().collect();
        rows.sort_by(|a, b| b.requested().cmp(&a.requested()));
        rows
    }

    pub fn delete_lumper(&mut self, id: LumperId) -> DomainResult<()> {
        if self.lumpers.remove(&id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(())
    }
}
