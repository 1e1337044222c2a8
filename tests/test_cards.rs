use briscola_mc::cards::*;
use briscola_mc::error::BriscolaError;

fn c(id: u8) -> Card {
    Card::from_id(id).unwrap()
}

#[test]
fn test_card_round_trip() {
    for id in 0..DECK_SIZE {
        let card = c(id);
        assert_eq!(card.suit() as u8 * 10 + card.rank().index(), id);
        assert_eq!(Card::new(card.rank(), card.suit()), card);
    }
}

#[test]
fn test_card_creation() {
    let card = Card::new(Rank::Ace, Suit::Coins);
    assert_eq!(card.id(), 0);
    assert_eq!(card.value(), 11);
    assert_eq!(card.strength(), 9);

    let king = Card::new(Rank::King, Suit::Clubs);
    assert_eq!(king.id(), 39);
    assert_eq!(king.value(), 4);
}

#[test]
fn test_out_of_range_id() {
    assert!(matches!(
        Card::from_id(40),
        Err(BriscolaError::MalformedInput(_))
    ));
    assert!(Card::from_id(39).is_ok());
}

#[test]
fn test_deck_is_worth_120() {
    let total: u32 = all_cards().map(|c| c.value() as u32).sum();
    assert_eq!(total, 120);
    assert_eq!(all_cards().count(), 40);
}

#[test]
fn test_strength_order() {
    // Ace beats Three beats King ... beats Two.
    let ace = Card::new(Rank::Ace, Suit::Cups);
    let three = Card::new(Rank::Three, Suit::Cups);
    let king = Card::new(Rank::King, Suit::Cups);
    let two = Card::new(Rank::Two, Suit::Cups);
    assert!(ace.strength() > three.strength());
    assert!(three.strength() > king.strength());
    assert!(ALL_RANKS.iter().all(|r| r.strength() >= two.strength()));
}

#[test]
fn test_card_str() {
    assert_eq!(format!("{}", c(17)), "JC");
    assert_eq!(format!("{}", c(0)), "AD");
    assert_eq!(format!("{}", c(38)), "NB");
}

#[test]
fn test_parse_notation() {
    assert_eq!(parse_card("JC").unwrap(), c(17));
    assert_eq!(parse_card("jc").unwrap(), c(17));
    assert_eq!(parse_card(" KS ").unwrap(), c(29));
}

#[test]
fn test_parse_id() {
    assert_eq!(parse_card("17").unwrap(), c(17));
    assert_eq!(parse_card("0").unwrap(), c(0));
    assert!(parse_card("40").is_err());
}

#[test]
fn test_parse_invalid() {
    assert!(parse_card("XZ").is_err());
    assert!(parse_card("AX").is_err());
    assert!(parse_card("ABC").is_err());
    assert!(parse_card("").is_err());
}

#[test]
fn test_parse_cards_mixed() {
    let cards = parse_cards("0, 10 ,AS").unwrap();
    assert_eq!(cards, vec![c(0), c(10), c(20)]);
    assert!(parse_cards("").unwrap().is_empty());
}
