use std::fmt;

use crate::error::{BriscolaError, BriscolaResult};

pub const DECK_SIZE: u8 = 40;
pub const RANKS_PER_SUIT: u8 = 10;
pub const RANKS_STR: &str = "A234567JNK";
pub const SUITS_STR: &str = "DCSB";

// Indexed by rank: Ace, Two..Seven, Jack, Knight, King.
pub const STRENGTH: [u8; 10] = [9, 0, 8, 1, 2, 3, 4, 5, 6, 7];
pub const VALUE: [u8; 10] = [11, 0, 10, 0, 0, 0, 0, 2, 3, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ace = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Jack = 7,
    Knight = 8,
    King = 9,
}

impl Rank {
    pub fn from_char(c: char) -> BriscolaResult<Rank> {
        RANKS_STR
            .find(c.to_ascii_uppercase())
            .map(|i| ALL_RANKS[i])
            .ok_or_else(|| BriscolaError::InvalidCardNotation(c.to_string()))
    }

    pub fn to_char(self) -> char {
        RANKS_STR.as_bytes()[self.index() as usize] as char
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn strength(self) -> u8 {
        STRENGTH[self.index() as usize]
    }

    pub fn value(self) -> u8 {
        VALUE[self.index() as usize]
    }
}

pub const ALL_RANKS: [Rank; 10] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Jack,
    Rank::Knight,
    Rank::King,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Coins = 0,
    Cups = 1,
    Swords = 2,
    Clubs = 3,
}

impl Suit {
    pub fn from_char(c: char) -> BriscolaResult<Suit> {
        SUITS_STR
            .find(c.to_ascii_uppercase())
            .map(|i| ALL_SUITS[i])
            .ok_or_else(|| BriscolaError::InvalidCardNotation(c.to_string()))
    }

    pub fn to_char(self) -> char {
        SUITS_STR.as_bytes()[self as usize] as char
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Coins => "Coins",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Clubs => "Clubs",
        }
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Coins, Suit::Cups, Suit::Swords, Suit::Clubs];

/// A card identity in `0..40`: `suit * 10 + rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    pub fn from_id(id: u8) -> BriscolaResult<Card> {
        if id >= DECK_SIZE {
            return Err(BriscolaError::MalformedInput(format!(
                "card id {} out of range 0..{}",
                id, DECK_SIZE
            )));
        }
        Ok(Card(id))
    }

    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit as u8 * RANKS_PER_SUIT + rank.index())
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn suit(self) -> Suit {
        ALL_SUITS[(self.0 / RANKS_PER_SUIT) as usize]
    }

    pub fn rank(self) -> Rank {
        ALL_RANKS[(self.0 % RANKS_PER_SUIT) as usize]
    }

    pub fn strength(self) -> u8 {
        self.rank().strength()
    }

    pub fn value(self) -> u8 {
        self.rank().value()
    }

    pub fn same_suit(self, other: Card) -> bool {
        self.suit() == other.suit()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().to_char(), self.suit().to_char())
    }
}

pub fn all_cards() -> impl Iterator<Item = Card> {
    (0..DECK_SIZE).map(Card)
}

/// Accepts either a numeric id ("17") or rank+suit notation ("JB").
pub fn parse_card(notation: &str) -> BriscolaResult<Card> {
    let notation = notation.trim();
    if !notation.is_empty() && notation.chars().all(|c| c.is_ascii_digit()) {
        let id: u8 = notation
            .parse()
            .map_err(|_| BriscolaError::InvalidCardNotation(notation.to_string()))?;
        return Card::from_id(id);
    }
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(BriscolaError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

pub fn parse_cards(notation: &str) -> BriscolaResult<Vec<Card>> {
    notation
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_card)
        .collect()
}
