use crate::cards::Card;
use crate::error::{BriscolaError, BriscolaResult};
use crate::game_state::{GameState, Side, HAND_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickOutcome {
    pub leader_won: bool,
    pub points: u32,
}

impl TrickOutcome {
    pub fn winner(&self, leader: Side) -> Side {
        if self.leader_won {
            leader
        } else {
            leader.other()
        }
    }
}

pub fn resolve_trick(leader: Card, follower: Card, trump: Card) -> TrickOutcome {
    let points = leader.value() as u32 + follower.value() as u32;
    let leader_trump = leader.same_suit(trump);
    let follower_trump = follower.same_suit(trump);

    let leader_won = match (leader_trump, follower_trump) {
        (true, true) => leader.strength() > follower.strength(),
        (true, false) => true,
        (false, true) => false,
        (false, false) if leader.same_suit(follower) => leader.strength() > follower.strength(),
        // Follower could neither answer the suit nor trump.
        (false, false) => true,
    };

    TrickOutcome { leader_won, points }
}

/// Fixed three-slot hand. A played slot is refilled in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandSlots([Card; HAND_SIZE]);

impl HandSlots {
    pub fn new(cards: [Card; HAND_SIZE]) -> HandSlots {
        HandSlots(cards)
    }

    pub fn card(&self, slot: u8) -> Card {
        self.0[slot as usize]
    }

    pub fn replace(&mut self, slot: u8, card: Card) {
        self.0[slot as usize] = card;
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.0
    }
}

fn check_choices(name: &str, choices: &[u8]) -> BriscolaResult<()> {
    match choices.iter().position(|&c| c as usize >= HAND_SIZE) {
        Some(i) => Err(BriscolaError::InvalidPlayout(format!(
            "{} choice {} at trick {} is not a hand slot",
            name, choices[i], i
        ))),
        None => Ok(()),
    }
}

/// Plays out `self_choices.len()` tricks and returns the acting player's
/// final score, starting from the score already in `state`.
///
/// The opponent holds `deck[0..3]`; every trick then draws the next two
/// cards of `deck`, acting player first.
pub fn playout(
    state: &GameState,
    deck: &[Card],
    self_choices: &[u8],
    opponent_choices: &[u8],
) -> BriscolaResult<u32> {
    let n_tricks = self_choices.len();
    if opponent_choices.len() != n_tricks {
        return Err(BriscolaError::InvalidPlayout(format!(
            "choice sequences differ in length: {} vs {}",
            n_tricks,
            opponent_choices.len()
        )));
    }
    check_choices("player", self_choices)?;
    check_choices("opponent", opponent_choices)?;
    let needed = HAND_SIZE + 2 * n_tricks;
    if deck.len() < needed {
        return Err(BriscolaError::InvalidPlayout(format!(
            "deck holds {} cards, {} tricks need {}",
            deck.len(),
            n_tricks,
            needed
        )));
    }

    let trump = state.trump_card();
    let mut own = HandSlots::new(*state.hand());
    let mut opp = HandSlots::new([deck[0], deck[1], deck[2]]);
    let mut draws = deck[HAND_SIZE..].iter().copied();
    let mut leader = state.first_player();
    let mut total = state.player_points();

    for (&s0, &s1) in self_choices.iter().zip(opponent_choices) {
        let (c0, c1) = (own.card(s0), opp.card(s1));
        let outcome = match leader {
            Side::Player => resolve_trick(c0, c1, trump),
            Side::Opponent => resolve_trick(c1, c0, trump),
        };
        leader = outcome.winner(leader);
        if leader == Side::Player {
            total = total.saturating_add(outcome.points);
        }
        // Length was checked above, both draws are present.
        if let (Some(d0), Some(d1)) = (draws.next(), draws.next()) {
            own.replace(s0, d0);
            opp.replace(s1, d1);
        }
    }

    Ok(total)
}
