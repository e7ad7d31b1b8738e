//! Error types for the data layer.

/// Errors raised while building a [`CardPool`](crate::CardPool) or parsing
/// role type names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardPoolError {
    /// Two cards share a name. Card names are the enablement key, so they
    /// must be unique across every role type.
    #[error("duplicate card name '{0}' in card pool")]
    DuplicateCard(String),

    /// A role type name didn't match any known role.
    #[error("unknown role type '{0}'")]
    UnknownRoleType(String),
}
