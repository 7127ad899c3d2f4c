use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, CardKind, CardValue, Color};
use crate::state::PlayerView;

/// Hand size at which an opponent counts as close to going out.
const THREAT_HAND_SIZE: usize = 3;

/// Rule-based CPU player. No lookahead, just sensible priorities.
///
/// In plain English:
/// - Never swallow a draw stack when a stackable card is in hand; stack the cheapest one.
/// - Shed number cards first, then colored actions, and keep wilds for emergencies.
/// - Punish an opponent about to go out with draw cards and skips.
/// - When naming a color, pick the one held most.
/// - Swap hands with the smallest opposing hand and discard-all the color held most.
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    /// Color held most, ignoring `except` (the card about to leave the hand).
    fn best_color(view: &PlayerView, except: Option<Card>) -> Color {
        let mut skipped = false;
        let mut counts = [0usize; 4];
        for card in &view.hand {
            if !skipped && Some(*card) == except {
                skipped = true;
                continue;
            }
            if let Some(color) = card.color {
                if let Some(slot) = Color::ALL.iter().position(|c| *c == color) {
                    counts[slot] += 1;
                }
            }
        }
        let mut best = 0;
        for slot in 1..counts.len() {
            if counts[slot] > counts[best] {
                best = slot;
            }
        }
        Color::ALL[best]
    }

    fn next_player_threatens(view: &PlayerView) -> bool {
        view.next_active_seat()
            .and_then(|seat| view.players.get(seat))
            .is_some_and(|player| player.hand_size <= THREAT_HAND_SIZE)
    }

    fn score_play(view: &PlayerView, card: Card, color: Option<Color>) -> i32 {
        if view.is_stacking() {
            // Cheapest stackable card first so the big ones stay in reserve.
            return 1_000 - card.draw_value() as i32 * 10;
        }
        let threatened = Self::next_player_threatens(view);
        let base = match card.kind() {
            CardKind::Number => 300 + card.points() as i32,
            CardKind::Action => 200,
            CardKind::Wild => 100,
        };
        let aggression = if threatened {
            match card.value {
                CardValue::Skip | CardValue::Reverse | CardValue::SkipEveryone => 400,
                _ => card.draw_value() as i32 * 60,
            }
        } else {
            0
        };
        // Going out with a 7 or 0 still wins; otherwise prefer keeping them for later.
        let hand_effect = match card.value {
            CardValue::Number(0) | CardValue::Number(7) if view.hand.len() > 2 => -50,
            _ => 0,
        };
        let color_bonus = match color {
            Some(chosen) if chosen == Self::best_color(view, Some(card)) => 25,
            _ => 0,
        };
        base + aggression + hand_effect + color_bonus
    }

    fn score_action(view: &PlayerView, action: &Action) -> i32 {
        match action {
            Action::Play { card, color } => Self::score_play(view, *card, *color),
            Action::SwapHands { with } => view
                .players
                .get(*with)
                .map(|p| 1_000 - p.hand_size as i32)
                .unwrap_or(i32::MIN / 2),
            Action::DiscardAll { color } => view.count_color(*color) as i32,
            Action::SpinRoulette { color } => {
                if *color == Self::best_color(view, None) {
                    1
                } else {
                    0
                }
            }
            // Only offered when nothing else helps.
            Action::AcceptPenalty => -5_000,
            Action::DrawUntilPlayable => -5_000,
        }
    }
}

impl Default for HeuristicBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for HeuristicBot {
    fn select_action(&mut self, view: &PlayerView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "heuristic bot requires at least one legal action"
        );
        legal_actions
            .iter()
            .max_by_key(|action| Self::score_action(view, action))
            .cloned()
            .unwrap_or_else(|| legal_actions[0].clone())
    }
}
