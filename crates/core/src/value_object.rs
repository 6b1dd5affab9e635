//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Amount`s of
/// 100 cents are the same amount, two `AccountName("alice")` are the same name.
/// To "modify" one, build a new one.
///
/// Implemented by `Amount`, `AccountName` and `Credential`. `Account` is not a
/// value object: it is identified by its name while its balance changes.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
