use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loadledger_core::{AccountId, DomainError, DomainResult, Entity, Money, RecordId};

/// Cargo identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CargoId(pub RecordId);

impl CargoId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CargoId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Cargo status lifecycle.
///
/// Strictly linear: `Posted → Negotiated → Assigned → OnRoute → Delivered`.
/// No skipping, no cycling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoStatus {
    Posted,
    Negotiated,
    Assigned,
    OnRoute,
    Delivered,
}

/// A shipment/load posted by a broker and worked by a carrier.
///
/// The three actor fields are distinct account references with distinct
/// business meanings: the broker posts, a dispatcher negotiates, a driver
/// hauls. Each stage's actor and timestamp must be populated before the next
/// stage is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cargo {
    id: CargoId,
    description: String,
    price: Money,
    status: CargoStatus,
    broker: AccountId,
    posted: DateTime<Utc>,
    dispatcher: Option<AccountId>,
    negotiated: Option<DateTime<Utc>>,
    driver: Option<AccountId>,
    assigned: Option<DateTime<Utc>>,
    delivered: Option<DateTime<Utc>>,
}

impl Cargo {
    /// Post a new load. The posting instant becomes the `posted` timestamp.
    pub fn post(
        id: CargoId,
        description: impl Into<String>,
        price: Money,
        broker: AccountId,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::validation("cargo description cannot be empty"));
        }
        if !price.is_positive() {
            return Err(DomainError::validation("cargo price must be positive"));
        }

        Ok(Self {
            id,
            description,
            price,
            status: CargoStatus::Posted,
            broker,
            posted: at,
            dispatcher: None,
            negotiated: None,
            driver: None,
            assigned: None,
            delivered: None,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn status(&self) -> CargoStatus {
        self.status
    }

    pub fn broker(&self) -> AccountId {
        self.broker
    }

    pub fn posted(&self) -> DateTime<Utc> {
        self.posted
    }

    pub fn dispatcher(&self) -> Option<AccountId> {
        self.dispatcher
    }

    pub fn negotiated(&self) -> Option<DateTime<Utc>> {
        self.negotiated
    }

    pub fn driver(&self) -> Option<AccountId> {
        self.driver
    }

    pub fn assigned(&self) -> Option<DateTime<Utc>> {
        self.assigned
    }

    pub fn delivered(&self) -> Option<DateTime<Utc>> {
        self.delivered
    }

    /// A load is available while it sits on the board unclaimed.
    pub fn is_available(&self) -> bool {
        self.status == CargoStatus::Posted
    }

    /// A carrier-side dispatcher accepts the broker's terms.
    pub fn negotiate(&mut self, dispatcher: AccountId, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status != CargoStatus::Posted {
            return Err(DomainError::invalid_transition(
                "only posted cargo can be negotiated",
            ));
        }

        self.dispatcher = Some(dispatcher);
        self.negotiated = Some(at);
        self.status = CargoStatus::Negotiated;
        Ok(())
    }

    /// The dispatcher assigns a driver for the haul.
    pub fn assign(&mut self, driver: AccountId, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status != CargoStatus::Negotiated {
            return Err(DomainError::invalid_transition(
                "only negotiated cargo can be assigned a driver",
            ));
        }
        if self.dispatcher.is_none() || self.negotiated.is_none() {
            return Err(DomainError::invalid_transition(
                "cargo has no recorded dispatcher to assign from",
            ));
        }

        self.driver = Some(driver);
        self.assigned = Some(at);
        self.status = CargoStatus::Assigned;
        Ok(())
    }

    /// The driver confirms pickup; the load is now moving.
    ///
    /// The loaded timestamp itself lives on the pickup order; the service
    /// layer updates both in one transaction.
    pub fn mark_on_route(&mut self) -> DomainResult<()> {
        if self.status != CargoStatus::Assigned {
            return Err(DomainError::invalid_transition(
                "only assigned cargo can go on route",
            ));
        }
        if self.driver.is_none() || self.assigned.is_none() {
            return Err(DomainError::invalid_transition(
                "cargo has no recorded driver to go on route with",
            ));
        }

        self.status = CargoStatus::OnRoute;
        Ok(())
    }

    /// The driver confirms delivery.
    pub fn mark_delivered(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.status != CargoStatus::OnRoute {
            return Err(DomainError::invalid_transition(
                "only on-route cargo can be delivered",
            ));
        }

        self.delivered = Some(at);
        self.status = CargoStatus::Delivered;
        Ok(())
    }
}

impl Entity for Cargo {
    type Id = CargoId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn test_cargo_id() -> CargoId {
        CargoId::new(RecordId::new())
    }

    fn test_account() -> AccountId {
        AccountId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_price() -> Money {
        Money::usd(Decimal::new(145_000, 2))
    }

    fn posted_cargo() -> Cargo {
        Cargo::post(
            test_cargo_id(),
            "38 pallets frozen shrimp",
            test_price(),
            test_account(),
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn post_sets_posted_timestamp_and_status() {
        let at = test_time();
        let broker = test_account();
        let cargo = Cargo::post(test_cargo_id(), "Produce, reefer", test_price(), broker, at)
            .unwrap();

        assert_eq!(cargo.status(), CargoStatus::Posted);
        assert_eq!(cargo.posted(), at);
        assert_eq!(cargo.broker(), broker);
        assert!(cargo.is_available());
        assert!(cargo.dispatcher().is_none());
        assert!(cargo.driver().is_none());
    }

    #[test]
    fn post_rejects_empty_description() {
        let err = Cargo::post(test_cargo_id(), "  ", test_price(), test_account(), test_time())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn post_rejects_non_positive_price() {
        let err = Cargo::post(
            test_cargo_id(),
            "Free load",
            Money::usd(Decimal::ZERO),
            test_account(),
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn negotiate_sets_dispatcher_and_timestamp_only() {
        let mut cargo = posted_cargo();
        let dispatcher = test_account();
        let at = test_time();

        cargo.negotiate(dispatcher, at).unwrap();

        assert_eq!(cargo.status(), CargoStatus::Negotiated);
        assert_eq!(cargo.dispatcher(), Some(dispatcher));
        assert_eq!(cargo.negotiated(), Some(at));
        // Later-stage fields stay untouched.
        assert!(cargo.driver().is_none());
        assert!(cargo.assigned().is_none());
        assert!(cargo.delivered().is_none());
        assert!(!cargo.is_available());
    }

    #[test]
    fn full_lifecycle_posted_to_delivered() {
        let mut cargo = posted_cargo();
        let dispatcher = test_account();
        let driver = test_account();

        cargo.negotiate(dispatcher, test_time()).unwrap();
        cargo.assign(driver, test_time()).unwrap();
        cargo.mark_on_route().unwrap();

        let delivered_at = test_time();
        cargo.mark_delivered(delivered_at).unwrap();

        assert_eq!(cargo.status(), CargoStatus::Delivered);
        assert_eq!(cargo.dispatcher(), Some(dispatcher));
        assert_eq!(cargo.driver(), Some(driver));
        assert_eq!(cargo.delivered(), Some(delivered_at));
    }

    #[test]
    fn cannot_assign_before_negotiation() {
        let mut cargo = posted_cargo();
        let err = cargo.assign(test_account(), test_time()).unwrap_err();
        match err {
            DomainError::InvalidTransition(msg) => {
                assert!(msg.contains("only negotiated cargo"))
            }
            _ => panic!("Expected InvalidTransition for posted -> assigned"),
        }
        assert_eq!(cargo.status(), CargoStatus::Posted);
    }

    #[test]
    fn cannot_negotiate_twice() {
        let mut cargo = posted_cargo();
        cargo.negotiate(test_account(), test_time()).unwrap();

        let err = cargo.negotiate(test_account(), test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
    }

    #[test]
    fn cannot_deliver_before_on_route() {
        let mut cargo = posted_cargo();
        cargo.negotiate(test_account(), test_time()).unwrap();
        cargo.assign(test_account(), test_time()).unwrap();

        let err = cargo.mark_delivered(test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(cargo.status(), CargoStatus::Assigned);
        assert!(cargo.delivered().is_none());
    }

    #[test]
    fn failed_transition_leaves_cargo_unchanged() {
        let mut cargo = posted_cargo();
        cargo.negotiate(test_account(), test_time()).unwrap();

        let before = cargo.clone();
        let err = cargo.negotiate(test_account(), test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(cargo, before);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// The four post-posting transitions, in canonical order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Step {
            Negotiate,
            Assign,
            OnRoute,
            Deliver,
        }

        const CANONICAL: [Step; 4] = [Step::Negotiate, Step::Assign, Step::OnRoute, Step::Deliver];

        fn apply(cargo: &mut Cargo, step: Step) -> DomainResult<()> {
            match step {
                Step::Negotiate => cargo.negotiate(AccountId::new(), Utc::now()),
                Step::Assign => cargo.assign(AccountId::new(), Utc::now()),
                Step::OnRoute => cargo.mark_on_route(),
                Step::Deliver => cargo.mark_delivered(Utc::now()),
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a shuffled transition sequence reaches Delivered only
            /// when it is the canonical order, and every rejected transition
            /// leaves the cargo bit-identical.
            #[test]
            fn only_in_order_sequences_deliver(
                steps in Just(CANONICAL.to_vec()).prop_shuffle()
            ) {
                let mut cargo = posted_cargo();
                let mut all_applied = true;

                for step in &steps {
                    let before = cargo.clone();
                    match apply(&mut cargo, *step) {
                        Ok(()) => {}
                        Err(DomainError::InvalidTransition(_)) => {
                            all_applied = false;
                            prop_assert_eq!(&cargo, &before);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
                    }
                }

                if steps == CANONICAL.to_vec() {
                    prop_assert!(all_applied);
                    prop_assert_eq!(cargo.status(), CargoStatus::Delivered);
                } else {
                    prop_assert!(!all_applied);
                    prop_assert_ne!(cargo.status(), CargoStatus::Delivered);
                }
            }

            /// Property: the canonical prefix of length `n` lands on the
            /// matching status, with every earlier stage's actor populated.
            #[test]
            fn canonical_prefixes_land_on_expected_status(n in 0usize..=4) {
                let mut cargo = posted_cargo();
                for step in &CANONICAL[..n] {
                    apply(&mut cargo, *step).unwrap();
                }

                let expected = match n {
                    0 => CargoStatus::Posted,
                    1 => CargoStatus::Negotiated,
                    2 => CargoStatus::Assigned,
                    3 => CargoStatus::OnRoute,
                    _ => CargoStatus::Delivered,
                };
                prop_assert_eq!(cargo.status(), expected);

                if n >= 1 {
                    prop_assert!(cargo.dispatcher().is_some());
                    prop_assert!(cargo.negotiated().is_some());
                }
                if n >= 2 {
                    prop_assert!(cargo.driver().is_some());
                    prop_assert!(cargo.assigned().is_some());
                }
                if n >= 4 {
                    prop_assert!(cargo.delivered().is_some());
                }
            }
        }
    }
}
