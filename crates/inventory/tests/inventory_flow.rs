use cardvault_core::DomainError;
use cardvault_inventory::{BinderKind, Card, InventoryConfig, InventorySystem, Rarity, Variation};
use rust_decimal::Decimal;

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn card(name: &str, rarity: Rarity, variation: Variation, cents: i64) -> Card {
    Card::new(name, rarity, variation, money(cents)).expect("valid card")
}

fn loose(system: &InventorySystem, name: &str) -> u32 {
    system.find_card(name).map(Card::count).unwrap_or(0)
}

#[test]
fn a_collectors_week() {
    let mut system = InventorySystem::new();

    system
        .add_card(card("Lightning Bolt", Rarity::Common, Variation::Normal, 150))
        .unwrap();
    system
        .add_card(card("lightning bolt ", Rarity::Common, Variation::Normal, 150))
        .unwrap();
    system
        .add_card(card("Black Lotus", Rarity::Legendary, Variation::AltArt, 10_000))
        .unwrap();
    system
        .add_card(card("Sol Ring", Rarity::Rare, Variation::ExtendedArt, 1_000))
        .unwrap();
    assert_eq!(loose(&system, "LIGHTNING BOLT"), 2);
    assert_eq!(system.card_value("black lotus").unwrap(), money(30_000));

    system.create_binder("Commons", BinderKind::Pauper).unwrap();
    system.create_binder("Showcase", BinderKind::Luxury).unwrap();
    system.create_binder("Binder of Trades", BinderKind::NonCurated).unwrap();
    system.create_deck("Tournament", false).unwrap();

    system.add_to_binder("Commons", "Lightning Bolt").unwrap();
    system.add_to_deck("Tournament", "Lightning Bolt").unwrap();
    system.add_to_binder("Showcase", "Black Lotus").unwrap();
    system.add_to_binder("Binder of Trades", "Sol Ring").unwrap();
    assert_eq!(loose(&system, "Lightning Bolt"), 0);

    // Nothing left to move: the collection refuses and stays consistent.
    let err = system
        .add_to_binder("Commons", "Lightning Bolt")
        .unwrap_err();
    assert_eq!(err.kind(), "empty_state");

    // A big-value trade waits for confirmation, then goes through.
    let offer = card("Mana Crypt", Rarity::Rare, Variation::Normal, 5_000);
    assert!(!system
        .trade_card("Binder of Trades", "Sol Ring", offer.clone(), false)
        .unwrap());
    assert!(system
        .trade_card("Binder of Trades", "Sol Ring", offer, true)
        .unwrap());
    let names: Vec<String> = system
        .binder_view("Binder of Trades")
        .unwrap()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, ["Mana Crypt"]);

    system.set_binder_price("Showcase", money(35_000)).unwrap();
    assert_eq!(system.sell_binder("Showcase").unwrap(), money(38_500));
    assert_eq!(system.sell_binder("Commons").unwrap(), money(150));
    assert_eq!(system.earnings(), money(38_650));

    assert_eq!(system.delete_deck("Tournament").unwrap(), 1);
    assert_eq!(loose(&system, "Lightning Bolt"), 1);
    assert_eq!(system.binder_names(), ["Binder of Trades"]);
}

#[test]
fn errors_carry_stable_kinds() {
    let mut system = InventorySystem::new();
    system.create_binder("Vault", BinderKind::Collector).unwrap();

    let err = system.create_binder(" vault ", BinderKind::Pauper).unwrap_err();
    assert!(matches!(err, DomainError::AlreadyExists(_)));
    assert_eq!(err.kind(), "already_exists");

    let err = system.sell_binder("Vault").unwrap_err();
    assert_eq!(err.kind(), "not_sellable");

    let err = system.delete_deck("missing").unwrap_err();
    assert_eq!(err.kind(), "not_found");

    let err = system.create_deck("   ", true).unwrap_err();
    assert_eq!(err.kind(), "validation_error");
}

#[test]
fn configured_limits_apply_to_new_containers() {
    let config = InventoryConfig {
        binder_capacity: 2,
        deck_capacity: 1,
        trade_confirm_threshold: money(10_000),
    };
    let mut system = InventorySystem::with_config(config);
    for name in ["A", "B", "C", "D"] {
        system
            .add_card(card(name, Rarity::Uncommon, Variation::Normal, 100))
            .unwrap();
    }
    system.create_binder("Small", BinderKind::NonCurated).unwrap();
    system.create_deck("Tiny", true).unwrap();

    system.add_to_binder("Small", "A").unwrap();
    system.add_to_binder("Small", "B").unwrap();
    assert_eq!(
        system.add_to_binder("Small", "C").unwrap_err().kind(),
        "capacity_exceeded"
    );
    system.add_to_deck("Tiny", "C").unwrap();
    assert_eq!(
        system.add_to_deck("Tiny", "D").unwrap_err().kind(),
        "capacity_exceeded"
    );

    // A raised threshold lets a lopsided trade through unconfirmed.
    let offer = card("Z", Rarity::Rare, Variation::AltArt, 2_000);
    assert!(system.trade_card("Small", "A", offer, false).unwrap());
}

#[test]
fn collection_snapshot_serializes_for_front_ends() {
    let mut system = InventorySystem::new();
    system
        .add_card(card("Sol Ring", Rarity::Rare, Variation::FullArt, 1_000))
        .unwrap();

    let json = serde_json::to_value(system.collection_view()).unwrap();
    assert_eq!(json[0]["name"], "Sol Ring");
    assert_eq!(json[0]["rarity"], "rare");
    assert_eq!(json[0]["variation"], "full_art");
    assert_eq!(json[0]["count"], 1);
}
