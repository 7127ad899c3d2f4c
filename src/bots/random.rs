use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::PlayerView;

/// Uniform pick over the legal actions. Serves as the floor that `winrate` measures the
/// heuristic against, and as the driver for seeded whole-game property tests.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _view: &PlayerView, legal_actions: &[Action]) -> Action {
        legal_actions
            .choose(&mut self.rng)
            .cloned()
            .expect("engine always offers a move while the game is running")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::GameBuilder;
    use crate::player::PlayerSeat;

    #[test]
    fn picks_stay_legal_and_repeat_per_seed() {
        let seats = vec![PlayerSeat::cpu("a"), PlayerSeat::cpu("b")];
        let game = GameBuilder::new(seats).unwrap().with_seed(3).build().unwrap();
        let view = game.view(0).unwrap();
        let legal = game.legal_actions(0).unwrap();
        let picks = |seed| {
            let mut bot = RandomBot::new(StdRng::seed_from_u64(seed));
            (0..8)
                .map(|_| bot.select_action(&view, &legal))
                .collect::<Vec<_>>()
        };
        let first = picks(5);
        assert!(first.iter().all(|action| legal.contains(action)));
        assert_eq!(first, picks(5));
    }
}
