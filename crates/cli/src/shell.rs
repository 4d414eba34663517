//! Command dispatch and text rendering over [`InventorySystem`].

use core::fmt::Write as _;

use rust_decimal::Decimal;

use cardvault_core::{DomainError, DomainResult};
use cardvault_inventory::{Card, Container, InventoryConfig, InventorySystem};

use crate::command::{CardSpec, Command, USAGE};

/// What the read loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print this (possibly empty) text and read the next line.
    Continue(String),
    Quit,
}

pub struct Shell {
    system: InventorySystem,
}

impl Shell {
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            system: InventorySystem::with_config(config),
        }
    }

    pub fn system(&self) -> &InventorySystem {
        &self.system
    }

    /// Run one input line. Failures are rendered, never propagated.
    pub fn handle_line(&mut self, line: &str) -> Step {
        if line.trim().is_empty() {
            return Step::Continue(String::new());
        }
        let result = line
            .parse::<Command>()
            .and_then(|command| self.execute(command));
        match result {
            Ok(Some(text)) => Step::Continue(text),
            Ok(None) => Step::Quit,
            Err(err) => Step::Continue(render_error(&err)),
        }
    }

    /// `Ok(None)` means quit.
    fn execute(&mut self, command: Command) -> DomainResult<Option<String>> {
        let sys = &mut self.system;
        let text = match command {
            Command::AddCard(spec) => {
                let name = spec.name.clone();
                sys.add_card(build_card(spec)?)?;
                show_card(sys, &name)?
            }
            Command::Increment(name) => {
                sys.increment_card(&name)?;
                show_card(sys, &name)?
            }
            Command::Decrement(name) => {
                sys.decrement_card(&name)?;
                show_card(sys, &name)?
            }
            Command::Show(name) => show_card(sys, &name)?,
            Command::Collection => render_cards(&sys.collection_view(), "collection is empty"),
            Command::SellCard(name) => {
                let proceeds = sys.sell_card(&name)?;
                format!("sold one '{}' for ${proceeds:.2}", name.trim())
            }
            Command::CreateBinder { name, kind } => {
                sys.create_binder(&name, kind)?;
                format!("created {kind} binder '{}'", name.trim())
            }
            Command::DeleteBinder(name) => {
                let returned = sys.delete_binder(&name)?;
                format!(
                    "deleted binder '{}'; {returned} card(s) back in the collection",
                    name.trim()
                )
            }
            Command::Binders => render_names(sys.binder_names(), "no binders"),
            Command::Binder(name) => render_binder(sys, &name)?,
            Command::BinderAdd { binder, card } => {
                sys.add_to_binder(&binder, &card)?;
                format!("moved '{}' into binder '{}'", card.trim(), binder.trim())
            }
            Command::BinderRemove { binder, card } => {
                sys.remove_from_binder(&binder, &card)?;
                format!("moved '{}' back from binder '{}'", card.trim(), binder.trim())
            }
            Command::Trade {
                binder,
                outgoing,
                incoming,
                force,
            } => {
                let incoming = build_card(incoming)?;
                let outgoing_value = sys
                    .binder(&binder)?
                    .find_by_name(&outgoing)
                    .map(Card::value);
                let incoming_name = incoming.name().to_string();
                let incoming_value = incoming.value();
                if sys.trade_card(&binder, &outgoing, incoming, force)? {
                    format!(
                        "traded '{}' for '{incoming_name}' in binder '{}'",
                        outgoing.trim(),
                        binder.trim()
                    )
                } else {
                    let diff = outgoing_value
                        .map(|v| (incoming_value - v).abs())
                        .unwrap_or(incoming_value);
                    format!(
                        "values differ by ${diff:.2}; repeat the command with --force to trade anyway"
                    )
                }
            }
            Command::SetPrice { binder, price } => {
                sys.set_binder_price(&binder, price)?;
                format!("binder '{}' now asks ${price:.2}", binder.trim())
            }
            Command::SellBinder(name) => {
                let proceeds = sys.sell_binder(&name)?;
                format!("sold binder '{}' for ${proceeds:.2}", name.trim())
            }
            Command::CreateDeck { name, sellable } => {
                sys.create_deck(&name, sellable)?;
                let label = if sellable { "sellable" } else { "standard" };
                format!("created {label} deck '{}'", name.trim())
            }
            Command::DeleteDeck(name) => {
                let returned = sys.delete_deck(&name)?;
                format!(
                    "deleted deck '{}'; {returned} card(s) back in the collection",
                    name.trim()
                )
            }
            Command::Decks => render_names(sys.deck_names(), "no decks"),
            Command::Deck(name) => render_deck(sys, &name)?,
            Command::DeckCard { deck, index } => sys.deck_card_at(&deck, index)?.to_string(),
            Command::DeckAdd { deck, card } => {
                sys.add_to_deck(&deck, &card)?;
                format!("moved '{}' into deck '{}'", card.trim(), deck.trim())
            }
            Command::DeckRemove { deck, card } => {
                sys.remove_from_deck(&deck, &card)?;
                format!("moved '{}' back from deck '{}'", card.trim(), deck.trim())
            }
            Command::SellDeck(name) => {
                let proceeds = sys.sell_deck(&name)?;
                format!("sold deck '{}' for ${proceeds:.2}", name.trim())
            }
            Command::Earnings => format!("total earnings: ${:.2}", sys.earnings()),
            Command::Help => USAGE.to_string(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(text))
    }
}

pub fn render_error(err: &DomainError) -> String {
    format!("error[{}]: {}", err.kind(), err.message())
}

fn build_card(spec: CardSpec) -> DomainResult<Card> {
    Card::new(&spec.name, spec.rarity, spec.variation, spec.base_value)
}

fn show_card(sys: &InventorySystem, name: &str) -> DomainResult<String> {
    sys.find_card(name)
        .map(Card::to_string)
        .ok_or_else(|| DomainError::not_found(format!("card '{}'", name.trim())))
}

fn render_cards(cards: &[Card], empty: &str) -> String {
    if cards.is_empty() {
        return empty.to_string();
    }
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_names(names: Vec<String>, empty: &str) -> String {
    if names.is_empty() {
        return empty.to_string();
    }
    names.join("\n")
}

fn render_binder(sys: &InventorySystem, name: &str) -> DomainResult<String> {
    let binder = sys.binder(name)?;
    let mut out = format!(
        "binder '{}' ({}, {}/{})",
        binder.name(),
        binder.kind(),
        binder.len(),
        binder.capacity()
    );
    let _ = write!(out, "\n{}", render_cards(&binder.sorted_view(), "(empty)"));
    if binder.is_sellable() {
        let _ = write!(
            out,
            "\nvalue: ${:.2} | sale price: ${:.2}",
            binder.current_value()?,
            binder.sale_price()?
        );
    }
    if let Some(price) = binder.custom_price() {
        let _ = write!(out, "\ncustom price: ${price:.2}");
    }
    Ok(out)
}

fn render_deck(sys: &InventorySystem, name: &str) -> DomainResult<String> {
    let deck = sys.deck(name)?;
    let mut out = format!("deck '{}' ({}/{})", deck.name(), deck.len(), deck.capacity());
    let _ = write!(out, "\n{}", render_cards(&deck.sorted_view(), "(empty)"));
    if deck.is_sellable() {
        let value: Decimal = deck.current_value()?;
        let _ = write!(out, "\nvalue: ${value:.2}");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, line: &str) -> String {
        match shell.handle_line(line) {
            Step::Continue(text) => text,
            Step::Quit => panic!("unexpected quit on {line:?}"),
        }
    }

    fn shell_with_stock() -> Shell {
        let mut shell = Shell::new(InventoryConfig::default());
        run(&mut shell, r#"add-card "Sol Ring" rare full-art 10"#);
        run(&mut shell, "add-card Shock common normal 0.50");
        run(&mut shell, r#"create-binder "Trade Stock" non-curated"#);
        shell
    }

    #[test]
    fn add_card_echoes_the_snapshot_line() {
        let mut shell = Shell::new(InventoryConfig::default());
        let out = run(&mut shell, r#"add-card "Sol Ring" rare full-art 10"#);
        assert_eq!(
            out,
            "Name: Sol Ring | Rarity: Rare | Variation: Full Art | Count: 1 | Value: $20.00"
        );
        let out = run(&mut shell, "increment \"sol ring\"");
        assert!(out.contains("Count: 2"));
    }

    #[test]
    fn errors_render_with_kind_and_keep_going() {
        let mut shell = Shell::new(InventoryConfig::default());
        assert_eq!(
            run(&mut shell, "show Nothing"),
            "error[not_found]: card 'Nothing'"
        );
        assert!(run(&mut shell, "dance").starts_with("error[validation_error]: unknown command"));
        assert_eq!(run(&mut shell, "   "), "");
        assert!(
            run(&mut shell, "add-card Huge rare alt-art 79228162514264337593543950335")
                .starts_with("error[validation_error]: base value of 'Huge' cannot exceed")
        );
    }

    #[test]
    fn trade_asks_for_force_then_completes() {
        let mut shell = shell_with_stock();
        run(&mut shell, r#"binder-add "Trade Stock" Shock"#);

        let out = run(&mut shell, r#"trade "Trade Stock" Shock Crypt rare normal 3"#);
        assert_eq!(
            out,
            "values differ by $2.50; repeat the command with --force to trade anyway"
        );

        let out = run(
            &mut shell,
            r#"trade "Trade Stock" Shock Crypt rare normal 3 --force"#,
        );
        assert_eq!(out, "traded 'Shock' for 'Crypt' in binder 'Trade Stock'");
        assert!(run(&mut shell, r#"binder "Trade Stock""#).contains("Name: Crypt"));
    }

    #[test]
    fn selling_a_binder_updates_earnings() {
        let mut shell = shell_with_stock();
        run(&mut shell, "create-binder Shiny luxury");
        run(&mut shell, r#"binder-add Shiny "Sol Ring""#);
        run(&mut shell, "set-price Shiny 30");

        let view = run(&mut shell, "binder shiny");
        assert!(view.starts_with("binder 'Shiny' (luxury, 1/20)"));
        assert!(view.contains("sale price: $33.00"));
        assert!(view.contains("custom price: $30.00"));

        assert_eq!(run(&mut shell, "sell-binder Shiny"), "sold binder 'Shiny' for $33.00");
        assert_eq!(run(&mut shell, "earnings"), "total earnings: $33.00");
        assert_eq!(run(&mut shell, "binders"), "Trade Stock");
    }

    #[test]
    fn deck_commands_round_trip() {
        let mut shell = shell_with_stock();
        run(&mut shell, "create-deck Burn sellable");
        run(&mut shell, "deck-add Burn Shock");
        assert_eq!(
            run(&mut shell, "deck-add Burn Shock"),
            "error[empty_state]: no copies left of card 'Shock'"
        );
        assert!(run(&mut shell, "deck-card Burn 0").starts_with("Name: Shock"));
        assert!(run(&mut shell, "deck Burn").ends_with("value: $0.50"));
        assert_eq!(
            run(&mut shell, "deck-remove Burn shock"),
            "moved 'shock' back from deck 'Burn'"
        );
        assert!(run(&mut shell, "show Shock").contains("Count: 1"));
        assert_eq!(
            run(&mut shell, "deck-remove Burn Shock"),
            "error[empty_state]: deck 'Burn' is empty"
        );
        run(&mut shell, "deck-add Burn Shock");
        assert_eq!(
            run(&mut shell, "delete-deck Burn"),
            "deleted deck 'Burn'; 1 card(s) back in the collection"
        );
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut shell = Shell::new(InventoryConfig::default());
        assert_eq!(shell.handle_line("quit"), Step::Quit);
    }
}
