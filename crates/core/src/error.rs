//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic, user-visible failure. None of them is
/// retried automatically; the caller decides whether to prompt again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced card, binder or deck name does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The name is valid but the quantity is zero (empty container, no copies left).
    #[error("empty: {0}")]
    EmptyState(String),

    /// A create was attempted with a name already in use.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A value or card violated a rule (acceptance policy, attribute conflict,
    /// price floor, malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A container was full; the card may fit somewhere else.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// A deck already holds a physical unit of this card.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// The container variant cannot be sold.
    #[error("not sellable: {0}")]
    NotSellable(String),

    /// The binder variant cannot be used for trades.
    #[error("not tradable: {0}")]
    NotTradable(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn empty_state(msg: impl Into<String>) -> Self {
        Self::EmptyState(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn capacity_exceeded(msg: impl Into<String>) -> Self {
        Self::CapacityExceeded(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn not_sellable(msg: impl Into<String>) -> Self {
        Self::NotSellable(msg.into())
    }

    pub fn not_tradable(msg: impl Into<String>) -> Self {
        Self::NotTradable(msg.into())
    }

    /// Stable machine-readable code for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::EmptyState(_) => "empty_state",
            DomainError::AlreadyExists(_) => "already_exists",
            DomainError::Validation(_) => "validation_error",
            DomainError::CapacityExceeded(_) => "capacity_exceeded",
            DomainError::Duplicate(_) => "duplicate",
            DomainError::NotSellable(_) => "not_sellable",
            DomainError::NotTradable(_) => "not_tradable",
        }
    }

    /// The human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::EmptyState(msg)
            | DomainError::AlreadyExists(msg)
            | DomainError::Validation(msg)
            | DomainError::CapacityExceeded(msg)
            | DomainError::Duplicate(msg)
            | DomainError::NotSellable(msg)
            | DomainError::NotTradable(msg) => msg,
        }
    }
}
