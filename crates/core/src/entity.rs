//! Records identified by id rather than by value.

/// A record with a stable identity.
///
/// Two snapshots of the same product fetched at different times are the same
/// entity even when their attributes differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether `other` is a snapshot of the same record.
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
