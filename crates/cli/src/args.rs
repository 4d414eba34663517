use clap::Parser;
use rust_decimal::Decimal;

use cardvault_inventory::InventoryConfig;

#[derive(Debug, Parser)]
#[command(name = "cardvault")]
#[command(about = "Track a trading card collection, its binders and decks.")]
pub struct CommandLine {
    /// Capacity of newly created binders (overrides CARDVAULT_BINDER_CAPACITY)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub binder_capacity: Option<u16>,

    /// Capacity of newly created decks (overrides CARDVAULT_DECK_CAPACITY)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub deck_capacity: Option<u16>,

    /// Value difference at which a trade needs --force (overrides CARDVAULT_TRADE_THRESHOLD)
    #[arg(long)]
    pub trade_threshold: Option<Decimal>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Flags win over whatever the environment configured.
    pub fn apply(&self, mut config: InventoryConfig) -> InventoryConfig {
        if let Some(capacity) = self.binder_capacity {
            config.binder_capacity = usize::from(capacity);
        }
        if let Some(capacity) = self.deck_capacity {
            config.deck_capacity = usize::from(capacity);
        }
        if let Some(threshold) = self.trade_threshold {
            config.trade_confirm_threshold = threshold;
        }
        config
    }
}
