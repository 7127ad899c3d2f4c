//! UNO "No Mercy" rules engine with CPU drivers, plus the seeded cores of the Mafia and
//! Imposter party games.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod party;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, Direction, PendingEffect, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::registry::{
    create_bot_from_spec, is_human_spec, label_for_spec, seat_for_spec,
};
pub use crate::bots::{HeuristicBot, HumanBot, RandomBot};
pub use crate::card::{Card, CardKind, CardValue, Color, DeckVariant};
pub use crate::config::{GameConfig, StackRule};
pub use crate::deck::Deck;
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{DrawReport, Game, GameBuilder, PlayOutcome};
pub use crate::player::{Player, PlayerSeat};
pub use crate::score::{hand_points, winner_points};
pub use crate::snapshot::GameSnapshot;
pub use crate::state::{GameStatus, PlayerPublicState, PlayerView};
pub use crate::visualize::{describe_action, render_view};
