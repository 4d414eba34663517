//! Card inventory domain (collection ledger, binders, decks, earnings).
//!
//! Pure domain logic only: no IO, no terminal handling, no persistence.
//! Every operation a front end needs goes through [`InventorySystem`].

pub mod binder;
pub mod card;
pub mod collection;
pub mod config;
pub mod container;
pub mod deck;
pub mod earnings;
pub mod manager;
pub mod registry;
pub mod system;

pub use binder::{Binder, BinderKind};
pub use card::{Card, Rarity, Variation, max_amount, real_value, round_money};
pub use collection::CardCollection;
pub use config::InventoryConfig;
pub use container::{Container, SaleTerms};
pub use deck::{Deck, DeckKind};
pub use earnings::Earnings;
pub use manager::{BinderManager, DeckManager};
pub use registry::Registry;
pub use system::InventorySystem;
