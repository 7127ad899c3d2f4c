use std::io::{self, BufRead, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::state::PlayerView;
use crate::visualize::{describe_action, render_view};

/// What a line typed at the prompt asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Selection {
    Pick(Action),
    Help,
    Quit,
    Invalid(String),
}

/// Accepts a listed index, or `d`/`draw` for whichever draw is on offer.
fn parse_selection(input: &str, legal_actions: &[Action]) -> Selection {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "q" | "quit" => return Selection::Quit,
        "?" | "h" | "help" => return Selection::Help,
        "d" | "draw" => {
            return legal_actions
                .iter()
                .find(|a| matches!(a, Action::DrawUntilPlayable | Action::AcceptPenalty))
                .cloned()
                .map(Selection::Pick)
                .unwrap_or_else(|| Selection::Invalid("no draw is available right now".into()));
        }
        _ => {}
    }
    match input.parse::<usize>() {
        Ok(index) => legal_actions
            .get(index)
            .cloned()
            .map(Selection::Pick)
            .unwrap_or_else(|| Selection::Invalid(format!("{index} is not a listed option"))),
        Err(_) => Selection::Invalid(format!("'{input}' is not a number")),
    }
}

/// Seat driven from a terminal.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn prompt(&self, view: &PlayerView, legal_actions: &[Action]) {
        println!("\n--- {} to act (seat {}) ---", self.name, view.self_player);
        println!("{}", render_view(view));
        for (index, action) in legal_actions.iter().enumerate() {
            println!("  {index:>2}) {}", describe_action(view, action));
        }
        print!("Choice [index, d=draw, ?=help, q=quit]: ");
        let _ = io::stdout().flush();
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn select_action(&mut self, view: &PlayerView, legal_actions: &[Action]) -> Action {
        assert!(!legal_actions.is_empty(), "no action to choose from");
        let stdin = io::stdin();
        loop {
            self.prompt(view, legal_actions);
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => {
                    println!("\nInput closed; leaving the table.");
                    std::process::exit(0);
                }
                Ok(_) => {}
                Err(err) => {
                    eprintln!("could not read input: {err}");
                    continue;
                }
            }
            match parse_selection(&line, legal_actions) {
                Selection::Pick(action) => return action,
                Selection::Quit => {
                    println!("Leaving the table.");
                    std::process::exit(0);
                }
                Selection::Help => {
                    println!("Wild cards are listed once for each color you can name.");
                    println!("A 7 or discard-all asks for its follow-up on the next prompt.");
                }
                Selection::Invalid(reason) => println!("{reason}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Color};

    fn legal() -> Vec<Action> {
        vec![
            Action::Play {
                card: Card::number(Color::Red, 4),
                color: None,
            },
            Action::DrawUntilPlayable,
        ]
    }

    #[test]
    fn index_picks_listed_action() {
        assert_eq!(parse_selection(" 1\n", &legal()), Selection::Pick(Action::DrawUntilPlayable));
        assert!(matches!(parse_selection("5", &legal()), Selection::Invalid(_)));
    }

    #[test]
    fn draw_shortcut_finds_the_draw() {
        assert_eq!(parse_selection("D", &legal()), Selection::Pick(Action::DrawUntilPlayable));
        let only_play = &legal()[..1];
        assert!(matches!(parse_selection("draw", only_play), Selection::Invalid(_)));
    }

    #[test]
    fn words_are_recognised() {
        assert_eq!(parse_selection("quit", &legal()), Selection::Quit);
        assert_eq!(parse_selection("?", &legal()), Selection::Help);
        assert!(matches!(parse_selection("red", &legal()), Selection::Invalid(_)));
    }
}
