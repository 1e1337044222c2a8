use std::fmt;

use crate::cards::Card;
use crate::config::TOTAL_POINTS;
use crate::deck;
use crate::error::{BriscolaError, BriscolaResult};

pub const HAND_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player = 0,
    Opponent = 1,
}

impl Side {
    pub fn from_index(i: i64) -> BriscolaResult<Side> {
        match i {
            0 => Ok(Side::Player),
            1 => Ok(Side::Opponent),
            _ => Err(BriscolaError::MalformedInput(format!(
                "first player must be 0 or 1, got {}",
                i
            ))),
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Set of card ids backed by a 40-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardSet(u64);

impl CardSet {
    pub fn new() -> CardSet {
        CardSet(0)
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= 1u64 << card.id();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.id()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        crate::cards::all_cards().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

/// One decision point as seen by the acting player. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    points: (u32, u32),
    hand: [Card; HAND_SIZE],
    spent_cards: CardSet,
    first_player: Side,
    trump_card: Card,
}

impl GameState {
    pub fn new(
        points: (u32, u32),
        hand: &[Card],
        spent_cards: CardSet,
        first_player: Side,
        trump_card: Card,
    ) -> BriscolaResult<GameState> {
        let hand: [Card; HAND_SIZE] = hand.try_into().map_err(|_| {
            BriscolaError::MalformedInput(format!(
                "hand must contain exactly {} cards, got {}",
                HAND_SIZE,
                hand.len()
            ))
        })?;

        if points.0.saturating_add(points.1) > TOTAL_POINTS {
            return Err(BriscolaError::MalformedInput(format!(
                "scores {}-{} exceed the {} points in the deck",
                points.0, points.1, TOTAL_POINTS
            )));
        }

        for (i, &card) in hand.iter().enumerate() {
            if hand[..i].contains(&card) {
                return Err(BriscolaError::MalformedInput(format!(
                    "card {} appears twice in hand",
                    card.id()
                )));
            }
            if spent_cards.contains(card) {
                return Err(BriscolaError::MalformedInput(format!(
                    "card {} is both in hand and spent",
                    card.id()
                )));
            }
            if card == trump_card {
                return Err(BriscolaError::MalformedInput(format!(
                    "trump card {} cannot be in hand",
                    card.id()
                )));
            }
        }
        if spent_cards.contains(trump_card) {
            return Err(BriscolaError::MalformedInput(format!(
                "trump card {} cannot be spent",
                trump_card.id()
            )));
        }

        Ok(GameState {
            points,
            hand,
            spent_cards,
            first_player,
            trump_card,
        })
    }

    pub fn points(&self) -> (u32, u32) {
        self.points
    }

    pub fn player_points(&self) -> u32 {
        self.points.0
    }

    pub fn hand(&self) -> &[Card; HAND_SIZE] {
        &self.hand
    }

    pub fn spent_cards(&self) -> &CardSet {
        &self.spent_cards
    }

    pub fn first_player(&self) -> Side {
        self.first_player
    }

    pub fn trump_card(&self) -> Card {
        self.trump_card
    }

    pub fn is_known(&self, card: Card) -> bool {
        card == self.trump_card || self.hand.contains(&card) || self.spent_cards.contains(card)
    }

    pub fn n_hands_left(&self) -> usize {
        deck::n_hands_left(self.hand.len(), self.spent_cards.len())
    }

    pub fn deck_cards(&self) -> Vec<Card> {
        deck::deck_cards(self)
    }
}
