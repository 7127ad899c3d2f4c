use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{HeuristicBot, HumanBot, RandomBot};
use crate::player::PlayerSeat;

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Whether a spec drives a seat from standard input.
pub fn is_human_spec(spec: &str) -> bool {
    label_for_spec(spec) == "human"
}

/// Seat record for a spec: humans use their given name, CPUs get a numbered label.
pub fn seat_for_spec(spec: &str, index: usize) -> PlayerSeat {
    if is_human_spec(spec) {
        let name = spec
            .split_once(':')
            .map(|(_, name)| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Human {index}"));
        PlayerSeat::human(name)
    } else {
        PlayerSeat::cpu(format!("{} {index}", label_for_spec(spec)))
    }
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - heuristic
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    match label_for_spec(spec).as_str() {
        "human" => Ok(Box::new(HumanBot::new(seat_for_spec(spec, index).name))),
        "random" => {
            let custom_seed = spec
                .split_once(':')
                .and_then(|(_, value)| value.parse::<u64>().ok())
                .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
        }
        "heuristic" => Ok(Box::new(HeuristicBot::default())),
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_normalized() {
        assert_eq!(label_for_spec(" Random:42"), "random");
        assert_eq!(label_for_spec("HEURISTIC"), "heuristic");
    }

    #[test]
    fn human_seats_keep_their_name() {
        let seat = seat_for_spec("human:Robin", 0);
        assert!(seat.is_human);
        assert_eq!(seat.name, "Robin");
        let cpu = seat_for_spec("heuristic", 2);
        assert!(!cpu.is_human);
        assert_eq!(cpu.name, "heuristic 2");
    }

    #[test]
    fn unknown_spec_is_rejected() {
        assert!(create_bot_from_spec("minimax", 0, 1).is_err());
        assert!(create_bot_from_spec("random:7", 0, 1).is_ok());
    }
}
