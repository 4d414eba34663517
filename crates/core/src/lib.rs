//! `cardvault-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no inventory rules, no IO).

pub mod entity;
pub mod error;
pub mod name;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use name::NameKey;
pub use value_object::ValueObject;
