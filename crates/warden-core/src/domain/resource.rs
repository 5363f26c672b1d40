use std::fmt::{Debug, Display};
use std::str::FromStr;

/// An entity managed through the generic resource service.
///
/// `Draft` carries every mutable field and is used both for creation and for
/// full replacement. `Patch` carries optional fields and is merged on partial
/// updates. Identity is assigned by the persistence layer.
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    type Id: Copy + Debug + Display + FromStr + PartialEq + Ord + Send + Sync + 'static;
    type Draft: Send + Sync + 'static;
    type Patch: Send + Sync + 'static;
    type Filter: Default + Send + Sync + 'static;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Replace all mutable fields with the draft's values.
    fn replace(&mut self, draft: Self::Draft);

    /// Overwrite only the fields present in the patch.
    fn merge(&mut self, patch: Self::Patch);

    /// Whether two entities collide on a uniqueness key.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    /// Whether the entity passes a list filter.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }
}

/// Creates a fresh entity from a draft once storage has assigned an id.
pub trait FromDraft: Resource {
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;
}
