pub mod cards;
pub mod cli;
pub mod config;
pub mod deck;
pub mod display;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod sampler;
pub mod wire;
