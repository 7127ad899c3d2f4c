use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::party::{PartyError, validate_names};

pub const DEFAULT_WORDS: &[&str] = &[
    "lighthouse",
    "volcano",
    "submarine",
    "pancake",
    "library",
    "carnival",
    "glacier",
    "orchestra",
    "cactus",
    "airport",
];

/// One round of the imposter word game: everyone but the imposter sees the word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImposterRound {
    players: Vec<String>,
    word: String,
    imposter: usize,
    first_speaker: usize,
}

impl ImposterRound {
    pub fn deal<R: Rng + ?Sized>(
        players: Vec<String>,
        words: &[&str],
        rng: &mut R,
    ) -> Result<Self, PartyError> {
        validate_names(&players, 3)?;
        let word = words
            .choose(rng)
            .ok_or(PartyError::InvalidSetup("word list is empty"))?
            .to_string();
        let imposter = rng.gen_range(0..players.len());
        let first_speaker = rng.gen_range(0..players.len());
        Ok(Self {
            players,
            word,
            imposter,
            first_speaker,
        })
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn imposter(&self) -> usize {
        self.imposter
    }

    pub fn first_speaker(&self) -> usize {
        self.first_speaker
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// What `player` is shown when the device is passed to them. `None` for the imposter.
    pub fn word_for(&self, player: usize) -> Result<Option<&str>, PartyError> {
        if player >= self.players.len() {
            return Err(PartyError::InvalidPlayer(player));
        }
        if player == self.imposter {
            Ok(None)
        } else {
            Ok(Some(&self.word))
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn players() -> Vec<String> {
        vec!["Ana".into(), "Ben".into(), "Cy".into(), "Dee".into()]
    }

    #[test]
    fn only_imposter_is_blind() {
        let round = ImposterRound::deal(players(), DEFAULT_WORDS, &mut StdRng::seed_from_u64(4))
            .expect("deal");
        let blind: Vec<usize> = (0..4)
            .filter(|&p| round.word_for(p).expect("seat").is_none())
            .collect();
        assert_eq!(blind, vec![round.imposter()]);
        assert!(DEFAULT_WORDS.contains(&round.word()));
        assert_eq!(round.word_for(9), Err(PartyError::InvalidPlayer(9)));
    }

    #[test]
    fn seeded_deals_repeat() {
        let a = ImposterRound::deal(players(), DEFAULT_WORDS, &mut StdRng::seed_from_u64(11));
        let b = ImposterRound::deal(players(), DEFAULT_WORDS, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let result = ImposterRound::deal(players(), &[], &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(PartyError::InvalidSetup(_))));
    }
}
