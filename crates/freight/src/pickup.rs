use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loadledger_core::{BlobKey, DomainError, DomainResult, Entity, RecordId};
use loadledger_directory::FacilityId;

use crate::cargo::CargoId;

/// Pickup order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickupOrderId(pub RecordId);

impl PickupOrderId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PickupOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Collection/delivery instruction for a cargo.
///
/// References two facilities (where the load is collected and where it is
/// dropped) and carries the paperwork keys: bill of lading at loading, proof
/// of delivery at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupOrder {
    id: PickupOrderId,
    cargo_id: CargoId,
    pickup_from: FacilityId,
    deliver_to: FacilityId,
    bol_image: Option<BlobKey>,
    pod_image: Option<BlobKey>,
    loaded: Option<DateTime<Utc>>,
    delivered: Option<DateTime<Utc>>,
}

impl PickupOrder {
    pub fn new(
        id: PickupOrderId,
        cargo_id: CargoId,
        pickup_from: FacilityId,
        deliver_to: FacilityId,
    ) -> Self {
        Self {
            id,
            cargo_id,
            pickup_from,
            deliver_to,
            bol_image: None,
            pod_image: None,
            loaded: None,
            delivered: None,
        }
    }

    pub fn cargo_id(&self) -> CargoId {
        self.cargo_id
    }

    pub fn pickup_from(&self) -> FacilityId {
        self.pickup_from
    }

    pub fn deliver_to(&self) -> FacilityId {
        self.deliver_to
    }

    pub fn bol_image(&self) -> Option<&BlobKey> {
        self.bol_image.as_ref()
    }

    pub fn pod_image(&self) -> Option<&BlobKey> {
        self.pod_image.as_ref()
    }

    pub fn loaded(&self) -> Option<DateTime<Utc>> {
        self.loaded
    }

    pub fn delivered(&self) -> Option<DateTime<Utc>> {
        self.delivered
    }

    /// Record the loading instant. Loading happens once.
    pub fn mark_loaded(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.loaded.is_some() {
            return Err(DomainError::conflict("pickup order is already loaded"));
        }
        self.loaded = Some(at);
        Ok(())
    }

    /// Record the delivery instant; requires the load to have been loaded.
    pub fn mark_delivered(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.loaded.is_none() {
            return Err(DomainError::invalid_transition(
                "pickup order cannot be delivered before it is loaded",
            ));
        }
        if self.delivered.is_some() {
            return Err(DomainError::conflict("pickup order is already delivered"));
        }
        self.delivered = Some(at);
        Ok(())
    }

    /// Attach (or replace) the bill-of-lading image key.
    pub fn attach_bol(&mut self, key: BlobKey) {
        self.bol_image = Some(key);
    }

    /// Attach (or replace) the proof-of-delivery image key.
    pub fn attach_pod(&mut self, key: BlobKey) {
        self.pod_image = Some(key);
    }
}

impl Entity for PickupOrder {
    type Id = PickupOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pickup() -> PickupOrder {
        PickupOrder::new(
            PickupOrderId::new(RecordId::new()),
            CargoId::new(RecordId::new()),
            FacilityId::new(RecordId::new()),
            FacilityId::new(RecordId::new()),
        )
    }

    #[test]
    fn cannot_deliver_before_loading() {
        let mut pickup = test_pickup();
        let err = pickup.mark_delivered(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert!(pickup.delivered().is_none());
    }

    #[test]
    fn loading_happens_once() {
        let mut pickup = test_pickup();
        let first = Utc::now();
        pickup.mark_loaded(first).unwrap();

        let err = pickup.mark_loaded(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(pickup.loaded(), Some(first));
    }

    #[test]
    fn load_then_deliver_sets_both_timestamps() {
        let mut pickup = test_pickup();
        pickup.mark_loaded(Utc::now()).unwrap();
        pickup.mark_delivered(Utc::now()).unwrap();
        assert!(pickup.loaded().is_some());
        assert!(pickup.delivered().is_some());
    }

    #[test]
    fn paperwork_keys_attach_and_replace() {
        let mut pickup = test_pickup();
        assert!(pickup.bol_image().is_none());

        pickup.attach_bol(BlobKey::new("bol_images/a.jpg").unwrap());
        pickup.attach_bol(BlobKey::new("bol_images/b.jpg").unwrap());
        assert_eq!(pickup.bol_image().unwrap().as_str(), "bol_images/b.jpg");

        pickup.attach_pod(BlobKey::new("pod_images/a.jpg").unwrap());
        assert!(pickup.pod_image().is_some());
    }
}
