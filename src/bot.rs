use crate::action::Action;
use crate::state::PlayerView;

/// Drives one seat. The engine only asks while the game is running, so `legal_actions`
/// is never empty and the returned action must be one of them.
pub trait Bot {
    fn select_action(&mut self, view: &PlayerView, legal_actions: &[Action]) -> Action;
}
