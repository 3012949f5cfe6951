pub mod bot;
pub mod card;
pub mod config;
mod constants;
pub mod deck;
pub mod engine;
pub mod error;
pub mod player;
pub mod render;
pub mod rules;
pub mod timer;
pub mod turn;
