//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — they carry no
/// identity of their own. `Money { 100, USD }` equals any other
/// `Money { 100, USD }`; a `Company` row equals only itself.
///
/// To "modify" a value object, build a new one. The trait bounds keep them
/// cheap to pass around and easy to assert on in tests.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
