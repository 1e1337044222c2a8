use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;

use crate::cards::{Card, Suit};
use crate::engine::Estimate;
use crate::evaluator::TrickOutcome;
use crate::game_state::GameState;

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = ((equity.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn card_display(card: Card) -> String {
    let label = card.to_string();
    match card.suit() {
        Suit::Coins => label.yellow().to_string(),
        Suit::Cups => label.red().to_string(),
        Suit::Swords => label.blue().to_string(),
        Suit::Clubs => label.green().to_string(),
    }
}

pub fn cards_display(cards: &[Card]) -> String {
    cards.iter().map(|&c| card_display(c)).join(" ")
}

pub fn state_summary(state: &GameState) -> String {
    let (own, opp) = state.points();
    format!(
        "Hand {}  Trump {} ({})  Score {}-{}  Leads: {}  Tricks to simulate: {}",
        cards_display(state.hand()),
        card_display(state.trump_card()),
        state.trump_card().suit().name(),
        own,
        opp,
        state.first_player(),
        state.n_hands_left(),
    )
}

pub fn estimate_table(state: &GameState, estimate: &Estimate) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Slot").set_alignment(CellAlignment::Center),
        Cell::new("Card").set_alignment(CellAlignment::Center),
        Cell::new("Win probability").set_alignment(CellAlignment::Left),
        Cell::new("Trials").set_alignment(CellAlignment::Right),
    ]);

    let best = estimate.best_slot();
    for (slot, &card) in state.hand().iter().enumerate() {
        let bar = match estimate.probability(slot) {
            Some(p) => equity_bar(p, 20),
            None => "not sampled".dimmed().to_string(),
        };
        let slot_label = if best == Some(slot) && !estimate.terminal {
            format!("{} *", slot).bold().to_string()
        } else {
            slot.to_string()
        };
        table.add_row(vec![
            Cell::new(slot_label).set_alignment(CellAlignment::Center),
            Cell::new(card_display(card)).set_alignment(CellAlignment::Center),
            Cell::new(bar),
            Cell::new(estimate.trials[slot]).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn trick_display(leader: Card, follower: Card, outcome: &TrickOutcome) -> String {
    let winning_card = if outcome.leader_won { leader } else { follower };
    format!(
        "{} leads, {} follows: {} takes {} points",
        card_display(leader),
        card_display(follower),
        card_display(winning_card),
        outcome.points.to_string().bold(),
    )
}

pub fn section(title: &str, content: &str) -> String {
    format!("\n\n{}\n  {}", title.cyan().bold(), content)
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
