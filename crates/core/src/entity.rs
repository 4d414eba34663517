//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Binders, decks and collection ledger entries are all entities: their
/// contents change over time but they stay "the same thing" as long as their
/// identifier does.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    fn is_identified_by(&self, id: &Self::Id) -> bool {
        self.id() == id
    }

    /// Same identity, whatever the rest of the state says.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
