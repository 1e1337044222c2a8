use crate::cards::{all_cards, Card, DECK_SIZE};
use crate::game_state::GameState;

/// Cards not yet seen by the acting player, in id order, with the trump
/// card appended last since its draw position is known.
pub fn deck_cards(state: &GameState) -> Vec<Card> {
    let mut cards: Vec<Card> = Vec::with_capacity(DECK_SIZE as usize);
    cards.extend(all_cards().filter(|&c| !state.is_known(c)));
    cards.push(state.trump_card());
    cards
}

pub fn n_hands_left(hand_len: usize, spent_len: usize) -> usize {
    (DECK_SIZE as usize).saturating_sub(2 * hand_len + spent_len) / 2
}
