//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (two value objects with same values are equal)
/// - **Entity**: has identity (two entities with the same id are the same entity,
///   even when their other state differs)
///
/// Example:
/// - a card's identity tuple `(name, rarity, variation)` is a value object
/// - a binder named `"Trade Stock"` is an entity whose contents change over time
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Fee {
///     percent: u32,
/// }
///
/// impl ValueObject for Fee {}
///
/// assert_eq!(Fee { percent: 10 }, Fee { percent: 10 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
