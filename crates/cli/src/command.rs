//! Line parsing: quoted tokenizer plus a typed command.

use core::str::FromStr;

use rust_decimal::Decimal;

use cardvault_core::{DomainError, DomainResult};
use cardvault_inventory::{BinderKind, Rarity, Variation};

/// Attributes of a card named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSpec {
    pub name: String,
    pub rarity: Rarity,
    pub variation: Variation,
    pub base_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddCard(CardSpec),
    Increment(String),
    Decrement(String),
    Show(String),
    Collection,
    SellCard(String),
    CreateBinder { name: String, kind: BinderKind },
    DeleteBinder(String),
    Binders,
    Binder(String),
    BinderAdd { binder: String, card: String },
    BinderRemove { binder: String, card: String },
    Trade {
        binder: String,
        outgoing: String,
        incoming: CardSpec,
        force: bool,
    },
    SetPrice { binder: String, price: Decimal },
    SellBinder(String),
    CreateDeck { name: String, sellable: bool },
    DeleteDeck(String),
    Decks,
    Deck(String),
    DeckCard { deck: String, index: usize },
    DeckAdd { deck: String, card: String },
    DeckRemove { deck: String, card: String },
    SellDeck(String),
    Earnings,
    Help,
    Quit,
}

pub const USAGE: &str = "\
commands:
  add-card <name> <rarity> <variation> <base-value>
  increment <card> | decrement <card>
  show <card> | collection | sell-card <card>
  create-binder <name> <kind> | delete-binder <name> | binders
  binder <name>
  binder-add <binder> <card> | binder-remove <binder> <card>
  trade <binder> <outgoing> <name> <rarity> <variation> <base-value> [--force]
  set-price <binder> <price> | sell-binder <name>
  create-deck <name> [sellable] | delete-deck <name> | decks
  deck <name> | deck-card <deck> <index>
  deck-add <deck> <card> | deck-remove <deck> <card> | sell-deck <name>
  earnings | help | quit
rarities:   common, uncommon, rare, legendary
variations: normal, extended-art, full-art, alt-art
binders:    non-curated, pauper, rares, luxury, collector
names with spaces go in double quotes";

/// Split a line on whitespace; a double-quoted run is one token.
pub fn tokenize(line: &str) -> DomainResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err(DomainError::validation("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Read an amount such as `12.5` or `$12.50`.
pub fn parse_money(raw: &str) -> DomainResult<Decimal> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount = Decimal::from_str(digits)
        .map_err(|_| DomainError::validation(format!("'{trimmed}' is not an amount")))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::validation(format!(
            "amount {trimmed} cannot be negative"
        )));
    }
    Ok(amount)
}

struct Args {
    verb: String,
    rest: Vec<String>,
}

impl Args {
    fn require_len(&self, count: usize, usage: &str) -> DomainResult<()> {
        if self.rest.len() != count {
            let usage = format!("usage: {} {usage}", self.verb);
            return Err(DomainError::validation(usage.trim_end()));
        }
        Ok(())
    }

    fn one(self, usage: &str) -> DomainResult<String> {
        self.require_len(1, usage)?;
        Ok(self.rest.into_iter().next().unwrap_or_default())
    }

    fn two(self, usage: &str) -> DomainResult<(String, String)> {
        self.require_len(2, usage)?;
        let mut it = self.rest.into_iter();
        Ok((it.next().unwrap_or_default(), it.next().unwrap_or_default()))
    }

    fn none(&self) -> DomainResult<()> {
        self.require_len(0, "")
    }
}

fn card_spec(fields: &[String]) -> DomainResult<CardSpec> {
    let [name, rarity, variation, value] = fields else {
        return Err(DomainError::validation(
            "a card needs <name> <rarity> <variation> <base-value>",
        ));
    };
    Ok(CardSpec {
        name: name.clone(),
        rarity: rarity.parse()?,
        variation: variation.parse()?,
        base_value: parse_money(value)?,
    })
}

impl FromStr for Command {
    type Err = DomainError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = tokenize(line)?.into_iter();
        let Some(verb) = tokens.next() else {
            return Err(DomainError::validation("empty command"));
        };
        let verb = verb.to_ascii_lowercase();
        let args = Args {
            verb: verb.clone(),
            rest: tokens.collect(),
        };

        let command = match verb.as_str() {
            "add-card" => Command::AddCard(card_spec(&args.rest)?),
            "increment" => Command::Increment(args.one("<card>")?),
            "decrement" => Command::Decrement(args.one("<card>")?),
            "show" => Command::Show(args.one("<card>")?),
            "collection" => {
                args.none()?;
                Command::Collection
            }
            "sell-card" => Command::SellCard(args.one("<card>")?),
            "create-binder" => {
                let (name, kind) = args.two("<name> <kind>")?;
                Command::CreateBinder {
                    name,
                    kind: kind.parse()?,
                }
            }
            "delete-binder" => Command::DeleteBinder(args.one("<name>")?),
            "binders" => {
                args.none()?;
                Command::Binders
            }
            "binder" => Command::Binder(args.one("<name>")?),
            "binder-add" => {
                let (binder, card) = args.two("<binder> <card>")?;
                Command::BinderAdd { binder, card }
            }
            "binder-remove" => {
                let (binder, card) = args.two("<binder> <card>")?;
                Command::BinderRemove { binder, card }
            }
            "trade" => {
                let mut rest = args.rest;
                let force = rest.last().is_some_and(|t| t == "--force");
                if force {
                    rest.pop();
                }
                if rest.len() != 6 {
                    return Err(DomainError::validation(
                        "usage: trade <binder> <outgoing> <name> <rarity> <variation> <base-value> [--force]",
                    ));
                }
                let incoming = card_spec(&rest[2..])?;
                let mut it = rest.into_iter();
                Command::Trade {
                    binder: it.next().unwrap_or_default(),
                    outgoing: it.next().unwrap_or_default(),
                    incoming,
                    force,
                }
            }
            "set-price" => {
                let (binder, price) = args.two("<binder> <price>")?;
                Command::SetPrice {
                    binder,
                    price: parse_money(&price)?,
                }
            }
            "sell-binder" => Command::SellBinder(args.one("<name>")?),
            "create-deck" => match args.rest.as_slice() {
                [name] => Command::CreateDeck {
                    name: name.clone(),
                    sellable: false,
                },
                [name, flag] if flag.eq_ignore_ascii_case("sellable") => Command::CreateDeck {
                    name: name.clone(),
                    sellable: true,
                },
                _ => {
                    return Err(DomainError::validation(
                        "usage: create-deck <name> [sellable]",
                    ));
                }
            },
            "delete-deck" => Command::DeleteDeck(args.one("<name>")?),
            "decks" => {
                args.none()?;
                Command::Decks
            }
            "deck" => Command::Deck(args.one("<name>")?),
            "deck-card" => {
                let (deck, index) = args.two("<deck> <index>")?;
                let index = index.parse().map_err(|_| {
                    DomainError::validation(format!("'{index}' is not a card position"))
                })?;
                Command::DeckCard { deck, index }
            }
            "deck-add" => {
                let (deck, card) = args.two("<deck> <card>")?;
                Command::DeckAdd { deck, card }
            }
            "deck-remove" => {
                let (deck, card) = args.two("<deck> <card>")?;
                Command::DeckRemove { deck, card }
            }
            "sell-deck" => Command::SellDeck(args.one("<name>")?),
            "earnings" => {
                args.none()?;
                Command::Earnings
            }
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(DomainError::validation(format!(
                    "unknown command '{other}' (try 'help')"
                )));
            }
        };
        Ok(command)
    }
}
