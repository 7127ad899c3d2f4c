use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::party::{PartyError, validate_names};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Role {
    Mafia,
    Doctor,
    Detective,
    Villager,
}

impl Role {
    pub fn team(&self) -> Team {
        match self {
            Role::Mafia => Team::Mafia,
            _ => Team::Town,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Team {
    Town,
    Mafia,
}

/// Round counter; every round starts at night.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Night(u32),
    Day(u32),
}

impl Phase {
    pub fn next(&self) -> Self {
        match *self {
            Phase::Night(round) => Phase::Day(round),
            Phase::Day(round) => Phase::Night(round + 1),
        }
    }
}

/// Which special roles are dealt.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MafiaSetup {
    pub mafia: usize,
    pub doctor: bool,
    pub detective: bool,
}

impl Default for MafiaSetup {
    fn default() -> Self {
        Self {
            mafia: 1,
            doctor: true,
            detective: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MafiaPlayer {
    pub name: String,
    pub role: Role,
    pub alive: bool,
}

/// Inverse information for the narrator's last action. Only one step is kept.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UndoRecord {
    Eliminated { player: usize },
    Revived { player: usize },
    PhaseAdvanced { previous: Phase },
}

/// Narrator's ledger for a game of Mafia.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Narrator {
    players: Vec<MafiaPlayer>,
    phase: Phase,
    last_action: Option<UndoRecord>,
}

impl Narrator {
    /// Deals roles at random. Everyone not given a special role is a villager.
    pub fn new<R: Rng + ?Sized>(
        names: Vec<String>,
        setup: MafiaSetup,
        rng: &mut R,
    ) -> Result<Self, PartyError> {
        validate_names(&names, 3)?;
        if setup.mafia == 0 {
            return Err(PartyError::InvalidSetup("at least one mafia member is required"));
        }
        let mut roles = vec![Role::Mafia; setup.mafia];
        if setup.doctor {
            roles.push(Role::Doctor);
        }
        if setup.detective {
            roles.push(Role::Detective);
        }
        if roles.len() > names.len() {
            return Err(PartyError::InvalidSetup("more roles than players"));
        }
        if setup.mafia * 2 >= names.len() {
            return Err(PartyError::InvalidSetup("mafia must start outnumbered"));
        }
        roles.resize(names.len(), Role::Villager);
        roles.shuffle(rng);
        let players = names
            .into_iter()
            .zip(roles)
            .map(|(name, role)| MafiaPlayer {
                name,
                role,
                alive: true,
            })
            .collect();
        Ok(Self {
            players,
            phase: Phase::Night(1),
            last_action: None,
        })
    }

    pub fn players(&self) -> &[MafiaPlayer] {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_action(&self) -> Option<UndoRecord> {
        self.last_action
    }

    pub fn eliminate(&mut self, player: usize) -> Result<(), PartyError> {
        let seat = self
            .players
            .get_mut(player)
            .ok_or(PartyError::InvalidPlayer(player))?;
        if !seat.alive {
            return Err(PartyError::AlreadyEliminated(player));
        }
        seat.alive = false;
        debug!("{} is out ({:?})", seat.name, seat.role);
        self.last_action = Some(UndoRecord::Eliminated { player });
        Ok(())
    }

    pub fn revive(&mut self, player: usize) -> Result<(), PartyError> {
        let seat = self
            .players
            .get_mut(player)
            .ok_or(PartyError::InvalidPlayer(player))?;
        if seat.alive {
            return Err(PartyError::NotEliminated(player));
        }
        seat.alive = true;
        debug!("{} is back in", seat.name);
        self.last_action = Some(UndoRecord::Revived { player });
        Ok(())
    }

    pub fn advance_phase(&mut self) -> Phase {
        let previous = self.phase;
        self.phase = previous.next();
        self.last_action = Some(UndoRecord::PhaseAdvanced { previous });
        self.phase
    }

    /// Reverts the last action and returns what was undone.
    pub fn undo(&mut self) -> Result<UndoRecord, PartyError> {
        let record = self.last_action.take().ok_or(PartyError::NothingToUndo)?;
        match record {
            UndoRecord::Eliminated { player } => self.players[player].alive = true,
            UndoRecord::Revived { player } => self.players[player].alive = false,
            UndoRecord::PhaseAdvanced { previous } => self.phase = previous,
        }
        debug!("undid {record:?}");
        Ok(record)
    }

    pub fn alive_count(&self, team: Team) -> usize {
        self.players
            .iter()
            .filter(|p| p.alive && p.role.team() == team)
            .count()
    }

    /// Town wins once no mafia is alive; mafia wins once it matches the town.
    pub fn winner(&self) -> Option<Team> {
        let mafia = self.alive_count(Team::Mafia);
        let town = self.alive_count(Team::Town);
        if mafia == 0 {
            Some(Team::Town)
        } else if mafia >= town {
            Some(Team::Mafia)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("p{i}")).collect()
    }

    fn narrator(seed: u64) -> Narrator {
        Narrator::new(names(6), MafiaSetup::default(), &mut StdRng::seed_from_u64(seed))
            .expect("valid setup")
    }

    #[test]
    fn deals_requested_roles() {
        let game = narrator(1);
        let count = |role| game.players().iter().filter(|p| p.role == role).count();
        assert_eq!(count(Role::Mafia), 1);
        assert_eq!(count(Role::Doctor), 1);
        assert_eq!(count(Role::Detective), 1);
        assert_eq!(count(Role::Villager), 3);
    }

    #[test]
    fn same_seed_same_roles() {
        assert_eq!(narrator(9).players(), narrator(9).players());
    }

    #[test]
    fn undo_reverts_single_step() {
        let mut game = narrator(2);
        game.eliminate(3).expect("eliminate");
        assert!(!game.players()[3].alive);
        assert_eq!(game.undo(), Ok(UndoRecord::Eliminated { player: 3 }));
        assert!(game.players()[3].alive);
        assert_eq!(game.undo(), Err(PartyError::NothingToUndo));
    }

    #[test]
    fn undo_phase_advance() {
        let mut game = narrator(2);
        assert_eq!(game.advance_phase(), Phase::Day(1));
        assert_eq!(game.advance_phase(), Phase::Night(2));
        game.undo().expect("undo");
        assert_eq!(game.phase(), Phase::Day(1));
    }

    #[test]
    fn town_wins_when_mafia_gone() {
        let mut game = narrator(5);
        let mafia = game
            .players()
            .iter()
            .position(|p| p.role == Role::Mafia)
            .expect("mafia dealt");
        assert_eq!(game.winner(), None);
        game.eliminate(mafia).expect("eliminate");
        assert_eq!(game.winner(), Some(Team::Town));
    }

    #[test]
    fn rejects_mafia_majority() {
        let setup = MafiaSetup {
            mafia: 2,
            doctor: false,
            detective: false,
        };
        let result = Narrator::new(names(4), setup, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(PartyError::InvalidSetup(_))));
    }
}
