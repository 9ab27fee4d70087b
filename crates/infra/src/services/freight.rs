//! Freight operations: the cargo lifecycle and its paperwork.

use chrono::{DateTime, Utc};
use tracing::info;

use loadledger_auth::{CredentialNotifier, IdentityProvider};
use loadledger_core::{AccountId, BlobKey, DomainError, Money, RecordId};
use loadledger_directory::FacilityId;
use loadledger_freight::{Cargo, CargoId, Lumper, LumperId, PickupOrder, PickupOrderId};

use super::{LedgerService, ServiceResult};

impl<I, N> LedgerService<I, N>
where
    I: IdentityProvider,
    N: CredentialNotifier,
{
    /// A broker posts a load. The posting instant becomes `posted`.
    pub fn post_cargo(
        &self,
        broker: AccountId,
        description: &str,
        price: Money,
        at: DateTime<Utc>,
    ) -> ServiceResult<CargoId> {
        let id = CargoId::new(RecordId::new());
        let cargo = Cargo::post(id, description, price, broker, at)?;
        self.store.transaction(|t| t.insert_cargo(cargo))?;
        info!(%broker, cargo = %id, "cargo posted");
        Ok(id)
    }

    /// The board of available loads: `Posted` only, newest posting first.
    pub fn list_available_cargo(&self) -> ServiceResult<Vec<Cargo>> {
        Ok(self.store.read(|t| t.available_cargo())?)
    }

    /// Every load, canonical board order.
    pub fn list_cargo(&self) -> ServiceResult<Vec<Cargo>> {
        Ok(self.store.read(|t| t.cargos_ordered())?)
    }

    /// A carrier-side dispatcher accepts the broker's terms.
    pub fn negotiate_cargo(
        &self,
        caller: AccountId,
        cargo_id: CargoId,
        at: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.store
            .transaction(|t| t.cargo_mut(cargo_id)?.negotiate(caller, at))?;
        info!(dispatcher = %caller, cargo = %cargo_id, "cargo negotiated");
        Ok(())
    }

    /// The dispatcher who negotiated the load assigns a driver.
    pub fn assign_driver(
        &self,
        caller: AccountId,
        cargo_id: CargoId,
        driver: AccountId,
        at: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            let cargo = t.cargo_mut(cargo_id)?;
            if let Some(dispatcher) = cargo.dispatcher() {
                if dispatcher != caller {
                    return Err(DomainError::permission_denied("cargo dispatcher"));
                }
            }
            cargo.assign(driver, at)
        })?;
        info!(dispatcher = %caller, cargo = %cargo_id, %driver, "driver assigned");
        Ok(())
    }

    /// The driver confirms pickup: the pickup order is marked loaded and the
    /// cargo goes on route, atomically.
    pub fn confirm_pickup_loaded(
        &self,
        caller: AccountId,
        pickup_order_id: PickupOrderId,
        at: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            let cargo_id = t
                .pickup_order(pickup_order_id)
                .ok_or(DomainError::NotFound)?
                .cargo_id();

            if let Some(driver) = t.cargo(cargo_id).ok_or(DomainError::NotFound)?.driver() {
                if driver != caller {
                    return Err(DomainError::permission_denied("cargo driver"));
                }
            }

            t.pickup_order_mut(pickup_order_id)?.mark_loaded(at)?;
            t.cargo_mut(cargo_id)?.mark_on_route()
        })?;
        info!(driver = %caller, pickup = %pickup_order_id, "pickup loaded, cargo on route");
        Ok(())
    }

    /// The driver confirms delivery: pickup order and cargo both record the
    /// delivery instant, atomically.
    pub fn confirm_delivery(
        &self,
        caller: AccountId,
        pickup_order_id: PickupOrderId,
        at: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            let cargo_id = t
                .pickup_order(pickup_order_id)
                .ok_or(DomainError::NotFound)?
                .cargo_id();

            if let Some(driver) = t.cargo(cargo_id).ok_or(DomainError::NotFound)?.driver() {
                if driver != caller {
                    return Err(DomainError::permission_denied("cargo driver"));
                }
            }

            t.pickup_order_mut(pickup_order_id)?.mark_delivered(at)?;
            t.cargo_mut(cargo_id)?.mark_delivered(at)
        })?;
        info!(driver = %caller, pickup = %pickup_order_id, "cargo delivered");
        Ok(())
    }

    /// Create the collection/delivery instruction for a cargo.
    pub fn create_pickup_order(
        &self,
        caller: AccountId,
        cargo_id: CargoId,
        pickup_from: FacilityId,
        deliver_to: FacilityId,
    ) -> ServiceResult<PickupOrderId> {
        let id = PickupOrderId::new(RecordId::new());
        let row = PickupOrder::new(id, cargo_id, pickup_from, deliver_to);
        self.store.transaction(|t| t.insert_pickup_order(row))?;
        info!(%caller, pickup = %id, cargo = %cargo_id, "pickup order created");
        Ok(id)
    }

    pub fn attach_bill_of_lading(
        &self,
        caller: AccountId,
        pickup_order_id: PickupOrderId,
        key: BlobKey,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            t.pickup_order_mut(pickup_order_id)?.attach_bol(key);
            Ok(())
        })?;
        info!(%caller, pickup = %pickup_order_id, "bill of lading attached");
        Ok(())
    }

    pub fn attach_proof_of_delivery(
        &self,
        caller: AccountId,
        pickup_order_id: PickupOrderId,
        key: BlobKey,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            t.pickup_order_mut(pickup_order_id)?.attach_pod(key);
            Ok(())
        })?;
        info!(%caller, pickup = %pickup_order_id, "proof of delivery attached");
        Ok(())
    }

    /// Record a lumper charge against a pickup order.
    pub fn request_lumper(
        &self,
        caller: AccountId,
        pickup_order_id: PickupOrderId,
        price: Money,
        at: DateTime<Utc>,
    ) -> ServiceResult<LumperId> {
        let id = LumperId::new(RecordId::new());
        let row = Lumper::request(id, pickup_order_id, price, at)?;
        self.store.transaction(|t| t.insert_lumper(row))?;
        info!(%caller, lumper = %id, pickup = %pickup_order_id, "lumper requested");
        Ok(id)
    }

    /// Record that a lumper charge was paid (e.g. electronic check received).
    pub fn pay_lumper(
        &self,
        caller: AccountId,
        lumper_id: LumperId,
        at: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.store
            .transaction(|t| t.lumper_mut(lumper_id)?.mark_paid(at))?;
        info!(%caller, lumper = %lumper_id, "lumper paid");
        Ok(())
    }

    pub fn attach_lumper_receipt(
        &self,
        caller: AccountId,
        lumper_id: LumperId,
        key: BlobKey,
    ) -> ServiceResult<()> {
        self.store.transaction(|t| {
            t.lumper_mut(lumper_id)?.attach_receipt(key);
            Ok(())
        })?;
        info!(%caller, lumper = %lumper_id, "lumper receipt attached");
        Ok(())
    }
}
