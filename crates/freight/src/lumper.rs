use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loadledger_core::{BlobKey, DomainError, DomainResult, Entity, Money, RecordId};

use crate::pickup::PickupOrderId;

/// Lumper identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LumperId(pub RecordId);

impl LumperId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LumperId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Loading-labor charge tied to a pickup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lumper {
    id: LumperId,
    pickup_order_id: PickupOrderId,
    price: Money,
    requested: DateTime<Utc>,
    paid: Option<DateTime<Utc>>,
    receipt_image: Option<BlobKey>,
}

impl Lumper {
    /// Request a lumper charge. The request instant is recorded.
    pub fn request(
        id: LumperId,
        pickup_order_id: PickupOrderId,
        price: Money,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !price.is_positive() {
            return Err(DomainError::validation("lumper price must be positive"));
        }
        Ok(Self {
            id,
            pickup_order_id,
            price,
            requested: at,
            paid: None,
            receipt_image: None,
        })
    }

    pub fn pickup_order_id(&self) -> PickupOrderId {
        self.pickup_order_id
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn requested(&self) -> DateTime<Utc> {
        self.requested
    }

    pub fn paid(&self) -> Option<DateTime<Utc>> {
        self.paid
    }

    pub fn receipt_image(&self) -> Option<&BlobKey> {
        self.receipt_image.as_ref()
    }

    /// Record payment (e.g. electronic check received). Paying twice is a
    /// conflict; the first timestamp stands.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.paid.is_some() {
            return Err(DomainError::conflict("lumper is already paid"));
        }
        self.paid = Some(at);
        Ok(())
    }

    /// Attach (or replace) the receipt image key.
    pub fn attach_receipt(&mut self, key: BlobKey) {
        self.receipt_image = Some(key);
    }
}

impl Entity for Lumper {
    type Id = LumperId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn test_lumper() -> Lumper {
        Lumper::request(
            LumperId::new(RecordId::new()),
            PickupOrderId::new(RecordId::new()),
            Money::usd(Decimal::new(25_000, 2)),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn request_rejects_non_positive_price() {
        let err = Lumper::request(
            LumperId::new(RecordId::new()),
            PickupOrderId::new(RecordId::new()),
            Money::usd(Decimal::ZERO),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn paying_twice_conflicts_and_keeps_first_timestamp() {
        let mut lumper = test_lumper();
        let first = Utc::now();
        lumper.mark_paid(first).unwrap();

        let err = lumper.mark_paid(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(lumper.paid(), Some(first));
    }

    #[test]
    fn receipt_attaches() {
        let mut lumper = test_lumper();
        lumper.attach_receipt(BlobKey::new("lumper_images/r1.jpg").unwrap());
        assert_eq!(
            lumper.receipt_image().unwrap().as_str(),
            "lumper_images/r1.jpg"
        );
    }
}
