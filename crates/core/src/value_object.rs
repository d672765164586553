//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: a forecast
/// period or an exogenous input is fully described by its fields, and two
/// instances with the same fields are interchangeable. To "change" one,
/// build a new one through its validating constructor.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
