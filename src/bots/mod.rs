pub mod heuristic;
pub mod human;
pub mod random;
pub mod registry;

pub use heuristic::HeuristicBot;
pub use human::HumanBot;
pub use random::RandomBot;
