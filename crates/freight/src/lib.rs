//! Freight domain module (cargo loads, pickup orders, lumper charges).
//!
//! This crate contains the shipment side of the ledger — most importantly the
//! cargo lifecycle state machine — implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod cargo;
pub mod lumper;
pub mod pickup;

pub use cargo::{Cargo, CargoId, CargoStatus};
pub use lumper::{Lumper, LumperId};
pub use pickup::{PickupOrder, PickupOrderId};
