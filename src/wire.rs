use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::engine::Estimate;
use crate::error::{BriscolaError, BriscolaResult};
use crate::game_state::{CardSet, GameState, Side, HAND_SIZE};

/// Decision query as sent by the game client.
///
/// `hand` and `trump_card` are 0-based card ids, `spent_cards` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRequest {
    pub points: [i64; 2],
    pub hand: Vec<i64>,
    pub first_to_play: i64,
    pub trump_card: i64,
    pub spent_cards: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResponse {
    /// `null` marks a slot that was never sampled as the first play.
    pub ps: [Option<f64>; HAND_SIZE],
}

impl From<&Estimate> for ProbabilityResponse {
    fn from(estimate: &Estimate) -> Self {
        ProbabilityResponse {
            ps: estimate.probabilities(),
        }
    }
}

fn card_from_wire(field: &str, id: i64) -> BriscolaResult<Card> {
    u8::try_from(id)
        .map_err(|_| {
            BriscolaError::MalformedInput(format!("{}: card id {} out of range", field, id))
        })
        .and_then(Card::from_id)
}

fn points_from_wire(p: i64) -> BriscolaResult<u32> {
    u32::try_from(p)
        .map_err(|_| BriscolaError::MalformedInput(format!("points: {} is not a valid score", p)))
}

impl TryFrom<&GameRequest> for GameState {
    type Error = BriscolaError;

    fn try_from(req: &GameRequest) -> BriscolaResult<GameState> {
        let points = (points_from_wire(req.points[0])?, points_from_wire(req.points[1])?);
        let hand = req
            .hand
            .iter()
            .map(|&id| card_from_wire("hand", id))
            .collect::<BriscolaResult<Vec<Card>>>()?;
        let spent = req
            .spent_cards
            .iter()
            .map(|&id| card_from_wire("spent_cards", id.saturating_sub(1)))
            .collect::<BriscolaResult<CardSet>>()?;
        let first_player = Side::from_index(req.first_to_play)?;
        let trump = card_from_wire("trump_card", req.trump_card)?;
        GameState::new(points, &hand, spent, first_player, trump)
    }
}

pub fn parse_request(body: &str) -> BriscolaResult<GameRequest> {
    serde_json::from_str(body).map_err(|e| BriscolaError::MalformedInput(e.to_string()))
}

pub fn parse_state(body: &str) -> BriscolaResult<GameState> {
    GameState::try_from(&parse_request(body)?)
}

pub fn encode_response(estimate: &Estimate) -> BriscolaResult<String> {
    Ok(serde_json::to_string(&ProbabilityResponse::from(estimate))?)
}
