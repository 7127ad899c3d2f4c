use std::fmt::Write;

use crate::action::{Action, PendingEffect};
use crate::card::Card;
use crate::state::{GameStatus, PlayerView};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_hand_sizes: bool,
    pub show_pile_counts: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_hand_sizes: true,
            show_pile_counts: true,
        }
    }
}

pub fn render_view(view: &PlayerView) -> String {
    render_view_with_options(view, VisualOptions::default())
}

pub fn render_view_with_options(view: &PlayerView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match view.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: {})", seat_name(view, winner)),
    };
    let _ = writeln!(out, "Game status: {status}");
    let top = view
        .top_card
        .map(format_card)
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Top card: {top}  |  Color: {}  |  Direction: {:?}",
        view.current_color, view.direction
    );
    if view.is_stacking() {
        let _ = writeln!(out, "Draw stack pending: +{}", view.stacked_draw_count);
    }
    if let Some(pending) = view.pending {
        let _ = writeln!(out, "Pending: {}", describe_pending(view, pending));
    }
    if options.show_pile_counts {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            view.draw_pile_count, view.discard_pile_count
        );
    }
    let _ = writeln!(out, "Players:");
    for player in &view.players {
        let you = if player.id == view.self_player { " (You)" } else { "" };
        let current = if player.is_current { " <- current" } else { "" };
        if player.is_eliminated {
            let _ = writeln!(out, "  [{}] {}{you} - eliminated", player.id, player.name);
            continue;
        }
        if options.show_hand_sizes {
            let _ = writeln!(
                out,
                "  [{}] {}{you} - {} card(s){current}",
                player.id, player.name, player.hand_size
            );
        } else {
            let _ = writeln!(out, "  [{}] {}{you}{current}", player.id, player.name);
        }
    }
    if view.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let hand = view
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| format!("{idx}:{}", format_card(*card)))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "Hand: {hand}");
    }
    out
}

pub fn describe_action(view: &PlayerView, action: &Action) -> String {
    match action {
        Action::Play { card, color } => match color {
            Some(color) => format!("Play {} as {color}", format_card(*card)),
            None => format!("Play {}", format_card(*card)),
        },
        Action::SwapHands { with } => format!("Swap hands with {}", seat_name(view, *with)),
        Action::DiscardAll { color } => format!("Discard every {color} card"),
        Action::AcceptPenalty => format!("Draw {} stacked card(s)", view.stacked_draw_count),
        Action::DrawUntilPlayable => String::from("Draw until playable"),
        Action::SpinRoulette { color } => format!("Draw until a {color} card appears"),
    }
}

fn describe_pending(view: &PlayerView, pending: PendingEffect) -> String {
    match pending {
        PendingEffect::SwapHands { player } => {
            format!("{} picks a hand to swap with", seat_name(view, player))
        }
        PendingEffect::DiscardAll { player } => {
            format!("{} picks a color to discard", seat_name(view, player))
        }
        PendingEffect::ColorRoulette { target } => {
            format!("{} spins the color roulette", seat_name(view, target))
        }
    }
}

fn seat_name(view: &PlayerView, seat: usize) -> String {
    view.players
        .get(seat)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Player {seat}"))
}

pub fn format_card(card: Card) -> String {
    card.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::game::GameBuilder;
    use crate::player::PlayerSeat;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let seats = vec![PlayerSeat::human("Ana"), PlayerSeat::cpu("Bot")];
        let game = GameBuilder::new(seats).expect("builder").build().expect("game");
        let view = game.view(0).expect("view");
        let text = render_view(&view);
        assert!(text.contains("Ana (You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Top card:"));
        let actions = game.legal_actions(0).expect("actions available");
        assert!(!actions.is_empty());
        let swap = describe_action(&view, &Action::SwapHands { with: 1 });
        assert_eq!(swap, "Swap hands with Bot");
        let play = describe_action(
            &view,
            &Action::Play {
                card: Card::number(Color::Red, 5),
                color: None,
            },
        );
        assert_eq!(play, "Play red 5");
    }
}
