use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::{Action, Direction, PendingEffect, PlayerId};
use crate::card::{Card, CardValue, Color, DeckVariant, full_deck};
use crate::config::{GameConfig, StackRule, validate_seats};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction};
use crate::player::{Player, PlayerSeat};
use crate::snapshot::GameSnapshot;
use crate::state::{GameStatus, PlayerPublicState, PlayerView};

/// Builder that enables deterministic deck injection for testing and simulations.
pub struct GameBuilder {
    config: GameConfig,
    seats: Vec<PlayerSeat>,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new(seats: Vec<PlayerSeat>) -> Result<Self, GameError> {
        validate_seats(&seats)?;
        Ok(Self {
            config: GameConfig::default(),
            seats,
            deck: None,
        })
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use this exact draw pile (drawn from the back) instead of a shuffled deck.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_variant(mut self, variant: DeckVariant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn with_stack_rule(mut self, rule: StackRule) -> Self {
        self.config.stack_rule = rule;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn with_mercy_limit(mut self, limit: usize) -> Self {
        self.config.mercy_limit = limit;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Result of a successful play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub card: Card,
    /// Set when the card was added to an existing draw stack.
    pub stacked: bool,
    /// Follow-up the driver must resolve before play continues.
    pub follow_up: Option<PendingEffect>,
}

/// Cards drawn by a draw operation and how the loop ended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub drawn: Vec<Card>,
    /// The stop condition was met (matching card found, or full penalty drawn).
    pub satisfied: bool,
    /// The drawing player hit the mercy limit and is out.
    pub eliminated: bool,
    /// Deck and discard pile ran dry before the loop could finish.
    pub exhausted: bool,
}

/// UNO "No Mercy" rules engine. Owns every card in play for one game.
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    deck: Deck,
    discard: Vec<Card>,
    current_color: Color,
    direction: Direction,
    current_player: PlayerId,
    stacked_draw_count: u32,
    pending: Option<PendingEffect>,
    rng: StdRng,
}

impl Game {
    pub fn builder(seats: Vec<PlayerSeat>) -> Result<GameBuilder, GameError> {
        GameBuilder::new(seats)
    }

    pub fn new(seats: Vec<PlayerSeat>, config: GameConfig) -> Result<Self, GameError> {
        GameBuilder::new(seats)?.with_config(config).build()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_stacking(&self) -> bool {
        self.stacked_draw_count > 0
    }

    pub fn stacked_draw_count(&self) -> u32 {
        self.stacked_draw_count
    }

    pub fn pending(&self) -> Option<PendingEffect> {
        self.pending
    }

    /// Cards across deck, discard pile and every hand. Constant for the life of a game.
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.players.iter().map(Player::hand_size).sum::<usize>()
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated()).count()
    }

    pub fn status(&self) -> GameStatus {
        match self.check_winner() {
            Some(winner) => GameStatus::Finished { winner },
            None => GameStatus::Ongoing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.check_winner().is_some()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.check_winner()
    }

    /// Whether `card` may be played right now, ignoring whose hand it is in.
    pub fn can_play(&self, card: &Card) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let top = self.discard.last();
        if self.is_stacking() {
            if !card.is_stackable() {
                return false;
            }
            return match self.config.stack_rule {
                StackRule::AtLeastTop => card.draw_value() >= top.map_or(0, Card::draw_value),
                StackRule::AnyDraw => true,
            };
        }
        if card.is_wild() || card.color == Some(self.current_color) {
            return true;
        }
        top.is_some_and(|top| top.value == card.value)
    }

    /// Plays `card` from `player`'s hand and resolves its effect.
    ///
    /// `chosen_color` applies to wild cards; when omitted a color is picked at random.
    /// Color roulette leaves the color untouched until the next player resolves it.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: Card,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, GameError> {
        self.ensure_turn(player)?;
        self.ensure_no_pending()?;
        if !self.can_play(&card) {
            return Err(InvalidAction::IllegalCard(card).into());
        }
        let card = self.players[player]
            .take_card(&card)
            .ok_or(InvalidAction::CardNotInHand(card))?;
        let was_stacking = self.is_stacking();
        self.discard.push(card);
        self.resolve_color(card, chosen_color);
        debug!(
            "{} plays {card} (color now {})",
            self.players[player].name(),
            self.current_color
        );

        if was_stacking && card.is_stackable() {
            self.stacked_draw_count += card.draw_value();
            debug!("draw stack raised to {}", self.stacked_draw_count);
            self.next_turn();
            return Ok(PlayOutcome {
                card,
                stacked: true,
                follow_up: None,
            });
        }

        let follow_up = self.resolve_effect(player, card);
        Ok(PlayOutcome {
            card,
            stacked: false,
            follow_up,
        })
    }

    /// The current player takes the whole pending draw stack, then the turn passes.
    pub fn execute_stacked_draw(&mut self) -> Result<DrawReport, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if !self.is_stacking() {
            return Err(InvalidAction::NoStackPending.into());
        }
        let player = self.current_player;
        let count = self.stacked_draw_count;
        let mut report = DrawReport::default();
        for _ in 0..count {
            match self.draw_card() {
                Some(card) => {
                    self.players[player].receive(card);
                    report.drawn.push(card);
                }
                None => {
                    report.exhausted = true;
                    break;
                }
            }
        }
        report.satisfied = !report.exhausted;
        self.stacked_draw_count = 0;
        debug!(
            "{} takes {} of {count} stacked cards",
            self.players[player].name(),
            report.drawn.len()
        );
        report.eliminated = self.apply_mercy(player);
        self.next_turn();
        Ok(report)
    }

    /// Draws until a card that could legally be played shows up.
    ///
    /// Stops early at the mercy limit or when no card is left anywhere to draw.
    pub fn draw_until_playable(&mut self, player: PlayerId) -> Result<DrawReport, GameError> {
        self.ensure_turn(player)?;
        self.ensure_no_pending()?;
        if self.is_stacking() {
            return Err(InvalidAction::StackPending.into());
        }
        let report = self.draw_until(player, |game, card| game.can_play(card));
        debug!(
            "{} drew {} card(s) looking for a play",
            self.players[player].name(),
            report.drawn.len()
        );
        Ok(report)
    }

    /// Draws until a card of `color` shows up (wilds never match), then makes it the
    /// active color. Resolves a pending color roulette.
    pub fn draw_until_color(
        &mut self,
        player: PlayerId,
        color: Color,
    ) -> Result<DrawReport, GameError> {
        self.ensure_turn(player)?;
        match self.pending {
            None | Some(PendingEffect::ColorRoulette { .. }) => {}
            Some(_) => return Err(InvalidAction::FollowUpPending.into()),
        }
        if self.is_stacking() {
            return Err(InvalidAction::StackPending.into());
        }
        self.pending = None;
        let report = self.draw_until(player, |_, card| card.color == Some(color));
        self.current_color = color;
        debug!(
            "{} drew {} card(s) hunting for {color}",
            self.players[player].name(),
            report.drawn.len()
        );
        Ok(report)
    }

    /// Exchanges the full hands of two seats.
    pub fn swap_hands(&mut self, first: PlayerId, second: PlayerId) -> Result<(), GameError> {
        for seat in [first, second] {
            if seat >= self.players.len() {
                return Err(GameError::InvalidPlayer(seat));
            }
        }
        if first == second {
            return Ok(());
        }
        if let Some(PendingEffect::SwapHands { player }) = self.pending {
            if player == first || player == second {
                self.pending = None;
            }
        }
        let first_hand = self.players[first].take_hand();
        let second_hand = self.players[second].take_hand();
        self.players[first].set_hand(second_hand);
        self.players[second].set_hand(first_hand);
        debug!(
            "{} and {} swap hands",
            self.players[first].name(),
            self.players[second].name()
        );
        Ok(())
    }

    /// Every seat passes its hand one seat along the direction of play.
    pub fn rotate_hands(&mut self) {
        if self.players.len() < 2 {
            return;
        }
        let mut hands: Vec<Vec<Card>> = self.players.iter_mut().map(Player::take_hand).collect();
        match self.direction {
            Direction::Clockwise => hands.rotate_right(1),
            Direction::CounterClockwise => hands.rotate_left(1),
        }
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.set_hand(hand);
        }
        debug!("hands rotate {:?}", self.direction);
    }

    /// Removes every card of `color` from the player's hand and returns how many went.
    pub fn discard_all_color(&mut self, player: PlayerId, color: Color) -> Result<usize, GameError> {
        let seat = self
            .players
            .get_mut(player)
            .ok_or(GameError::InvalidPlayer(player))?;
        let cards = seat.take_color(color);
        let count = cards.len();
        debug!("{} discards {count} {color} card(s)", seat.name());
        self.bury_in_discard(cards);
        if self.pending == Some(PendingEffect::DiscardAll { player }) {
            self.pending = None;
        }
        Ok(count)
    }

    /// Moves to the next non-eliminated seat in the current direction.
    /// An unanswered swap or discard-all follow-up is dropped with the turn.
    pub fn next_turn(&mut self) {
        if matches!(
            self.pending,
            Some(PendingEffect::SwapHands { .. } | PendingEffect::DiscardAll { .. })
        ) {
            self.pending = None;
        }
        if self.active_count() <= 1 {
            if let Some(last) = self.players.iter().position(|p| !p.is_eliminated()) {
                self.current_player = last;
            }
            return;
        }
        let seats = self.players.len() as isize;
        let step = self.direction.step();
        let mut seat = self.current_player as isize;
        loop {
            seat = (seat + step).rem_euclid(seats);
            if !self.players[seat as usize].is_eliminated() {
                break;
            }
        }
        self.current_player = seat as usize;
    }

    /// An active player with an empty hand wins first; otherwise the last player standing.
    pub fn check_winner(&self) -> Option<PlayerId> {
        if let Some(id) = self
            .players
            .iter()
            .position(|p| !p.is_eliminated() && p.hand().is_empty())
        {
            return Some(id);
        }
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_eliminated());
        match (active.next(), active.next()) {
            (Some((id, _)), None) => Some(id),
            _ => None,
        }
    }

    /// Shuffles everything under the top discard back into the deck.
    pub fn reshuffle_discard(&mut self) {
        if self.discard.len() <= 1 {
            return;
        }
        let Some(top) = self.discard.pop() else {
            return;
        };
        let recycled = std::mem::replace(&mut self.discard, vec![top]);
        info!("reshuffling {} discarded card(s) into the deck", recycled.len());
        self.deck.extend(recycled);
        self.deck.shuffle(&mut self.rng);
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }

        let mut actions = Vec::new();
        match self.pending {
            Some(PendingEffect::SwapHands { .. }) => {
                for (id, other) in self.players.iter().enumerate() {
                    if id != player && !other.is_eliminated() {
                        actions.push(Action::SwapHands { with: id });
                    }
                }
                return Ok(actions);
            }
            Some(PendingEffect::DiscardAll { .. }) => {
                actions.extend(Color::ALL.map(|color| Action::DiscardAll { color }));
                return Ok(actions);
            }
            Some(PendingEffect::ColorRoulette { .. }) => {
                actions.extend(Color::ALL.map(|color| Action::SpinRoulette { color }));
                return Ok(actions);
            }
            None => {}
        }

        let mut seen: Vec<Card> = Vec::new();
        for card in self.players[player].hand() {
            if seen.contains(card) || !self.can_play(card) {
                continue;
            }
            seen.push(*card);
            if card.is_wild() && card.value != CardValue::WildColorRoulette {
                for color in Color::ALL {
                    actions.push(Action::Play {
                        card: *card,
                        color: Some(color),
                    });
                }
            } else {
                actions.push(Action::Play {
                    card: *card,
                    color: None,
                });
            }
        }

        if self.is_stacking() {
            actions.push(Action::AcceptPenalty);
        } else if actions.is_empty() {
            actions.push(Action::DrawUntilPlayable);
        }
        Ok(actions)
    }

    /// Applies one driver decision, including the turn hand-off the engine primitives
    /// leave to their caller.
    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        match action {
            Action::Play { card, color } => {
                self.play_card(player, card, color)?;
            }
            Action::SwapHands { with } => {
                if self.pending != Some(PendingEffect::SwapHands { player }) {
                    return Err(InvalidAction::NoFollowUpPending.into());
                }
                if with == player
                    || self
                        .players
                        .get(with)
                        .is_none_or(|other| other.is_eliminated())
                {
                    return Err(InvalidAction::InvalidSwapTarget(with).into());
                }
                self.swap_hands(player, with)?;
                self.pending = None;
                self.next_turn();
            }
            Action::DiscardAll { color } => {
                if self.pending != Some(PendingEffect::DiscardAll { player }) {
                    return Err(InvalidAction::NoFollowUpPending.into());
                }
                self.discard_all_color(player, color)?;
                self.pending = None;
                self.next_turn();
            }
            Action::AcceptPenalty => {
                self.execute_stacked_draw()?;
            }
            Action::DrawUntilPlayable => {
                let report = self.draw_until_playable(player)?;
                if !report.satisfied && !report.eliminated {
                    self.next_turn();
                }
            }
            Action::SpinRoulette { color } => {
                if !matches!(self.pending, Some(PendingEffect::ColorRoulette { .. })) {
                    return Err(InvalidAction::NoFollowUpPending.into());
                }
                let report = self.draw_until_color(player, color)?;
                if !report.eliminated {
                    self.next_turn();
                }
            }
        }
        if let Some(winner) = self.check_winner() {
            info!("{} wins", self.players[winner].name());
        }
        Ok(())
    }

    pub fn view(&self, perspective: PlayerId) -> Result<PlayerView, GameError> {
        let me = self.player(perspective)?;
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(id, player)| PlayerPublicState {
                id,
                name: player.name().to_string(),
                hand_size: player.hand_size(),
                is_human: player.is_human(),
                is_eliminated: player.is_eliminated(),
                is_current: id == self.current_player,
            })
            .collect();
        Ok(PlayerView {
            status: self.status(),
            self_player: perspective,
            current_player: self.current_player,
            direction: self.direction,
            top_card: self.top_card(),
            current_color: self.current_color,
            stacked_draw_count: self.stacked_draw_count,
            pending: self.pending,
            draw_pile_count: self.deck.len(),
            discard_pile_count: self.discard.len(),
            mercy_limit: self.config.mercy_limit,
            players,
            hand: me.hand().to_vec(),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config,
            players: self.players.clone(),
            deck: self.deck.clone(),
            discard: self.discard.clone(),
            current_color: self.current_color,
            direction: self.direction,
            current_player: self.current_player,
            stacked_draw_count: self.stacked_draw_count,
            pending: self.pending,
        }
    }

    /// Rebuilds a game from a snapshot. `seed` drives randomness from here on.
    pub fn restore(snapshot: GameSnapshot, seed: u64) -> Result<Self, GameError> {
        snapshot.config.validate()?;
        let seats: Vec<PlayerSeat> = snapshot
            .players
            .iter()
            .map(|p| PlayerSeat {
                name: p.name().to_string(),
                is_human: p.is_human(),
            })
            .collect();
        validate_seats(&seats)?;
        if snapshot.current_player >= snapshot.players.len() {
            return Err(GameError::InvalidConfiguration(
                "current player is out of range",
            ));
        }
        if snapshot.discard.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "discard pile must hold the top card",
            ));
        }
        if snapshot
            .players
            .iter()
            .any(|p| p.is_eliminated() && p.hand_size() > 0)
        {
            return Err(GameError::InvalidConfiguration(
                "eliminated seats must hold no cards",
            ));
        }
        let active = snapshot.players.iter().filter(|p| !p.is_eliminated()).count();
        if active > 0 && snapshot.players[snapshot.current_player].is_eliminated() {
            return Err(GameError::InvalidConfiguration(
                "current player is eliminated",
            ));
        }
        let owner = match snapshot.pending {
            Some(PendingEffect::SwapHands { player } | PendingEffect::DiscardAll { player }) => {
                Some(player)
            }
            Some(PendingEffect::ColorRoulette { target }) => Some(target),
            None => None,
        };
        if owner.is_some_and(|seat| seat != snapshot.current_player) {
            return Err(GameError::InvalidConfiguration(
                "pending follow-up belongs to another seat",
            ));
        }
        if owner.is_some() && snapshot.stacked_draw_count > 0 {
            return Err(GameError::InvalidConfiguration(
                "follow-up and draw stack cannot both be open",
            ));
        }
        Ok(Self {
            config: snapshot.config,
            players: snapshot.players,
            deck: snapshot.deck,
            discard: snapshot.discard,
            current_color: snapshot.current_color,
            direction: snapshot.direction,
            current_player: snapshot.current_player,
            stacked_draw_count: snapshot.stacked_draw_count,
            pending: snapshot.pending,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            seats,
            deck,
        } = builder;
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut deck = match deck {
            Some(cards) => Deck::new(cards),
            None => {
                let mut deck = Deck::new(full_deck(config.variant));
                deck.shuffle(&mut rng);
                deck
            }
        };

        if deck.len() < seats.len() * config.hand_size + 1 {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal",
            ));
        }

        let mut players: Vec<Player> = seats.into_iter().map(Player::new).collect();
        for player in players.iter_mut() {
            for _ in 0..config.hand_size {
                let card = deck.draw().ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing",
                ))?;
                player.receive(card);
            }
        }

        let (starter, current_color) = Self::flip_starting_card(&mut deck)?;
        info!(
            "dealt {} cards to {} players, starting on {starter}",
            config.hand_size,
            players.len()
        );

        Ok(Game {
            config,
            players,
            deck,
            discard: vec![starter],
            current_color,
            direction: Direction::Clockwise,
            current_player: 0,
            stacked_draw_count: 0,
            pending: None,
            rng,
        })
    }

    /// Flips until a number card turns up; anything else goes to the bottom of the deck.
    fn flip_starting_card(deck: &mut Deck) -> Result<(Card, Color), GameError> {
        for _ in 0..deck.len() {
            let Some(card) = deck.draw() else {
                break;
            };
            if let (true, Some(color)) = (card.is_number(), card.color) {
                return Ok((card, color));
            }
            deck.put_bottom(card);
        }
        Err(GameError::InvalidConfiguration(
            "deck holds no number card to start on",
        ))
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        let Some(seat) = self.players.get(player) else {
            return Err(GameError::InvalidPlayer(player));
        };
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if seat.is_eliminated() {
            return Err(GameError::PlayerEliminated(player));
        }
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        Ok(())
    }

    fn ensure_no_pending(&self) -> Result<(), InvalidAction> {
        match self.pending {
            None => Ok(()),
            Some(PendingEffect::ColorRoulette { .. }) => Err(InvalidAction::RoulettePending),
            Some(_) => Err(InvalidAction::FollowUpPending),
        }
    }

    fn resolve_color(&mut self, card: Card, chosen: Option<Color>) {
        if card.value == CardValue::WildColorRoulette {
            return;
        }
        let color = match (card.color, chosen) {
            (Some(own), _) => own,
            (None, Some(chosen)) => chosen,
            (None, None) => self.random_color(),
        };
        self.current_color = color;
    }

    fn random_color(&mut self) -> Color {
        Color::ALL[self.rng.gen_range(0..Color::ALL.len())]
    }

    /// Applies a card's effect outside of stacking. Returns the follow-up it opens, if any.
    fn resolve_effect(&mut self, player: PlayerId, card: Card) -> Option<PendingEffect> {
        let went_out = self.players[player].hand().is_empty();
        match card.value {
            CardValue::Number(0) if !went_out => {
                self.rotate_hands();
                self.next_turn();
            }
            CardValue::Number(7) if !went_out => {
                return self.open_follow_up(PendingEffect::SwapHands { player });
            }
            CardValue::DiscardAll if !went_out => {
                return self.open_follow_up(PendingEffect::DiscardAll { player });
            }
            CardValue::Number(_) | CardValue::Wild | CardValue::DiscardAll => self.next_turn(),
            CardValue::Skip => {
                self.next_turn();
                self.next_turn();
            }
            CardValue::SkipEveryone => {}
            CardValue::Reverse => {
                if self.active_count() >= 3 {
                    self.direction = self.direction.flipped();
                    self.next_turn();
                } else {
                    self.next_turn();
                    self.next_turn();
                }
            }
            CardValue::DrawTwo | CardValue::WildDrawSix | CardValue::WildDrawTen => {
                self.stacked_draw_count = card.draw_value();
                self.next_turn();
            }
            CardValue::WildReverseDrawFour => {
                if self.active_count() >= 3 {
                    self.direction = self.direction.flipped();
                }
                self.stacked_draw_count = card.draw_value();
                self.next_turn();
            }
            CardValue::WildColorRoulette => {
                self.next_turn();
                let target = self.current_player;
                return self.open_follow_up(PendingEffect::ColorRoulette { target });
            }
        }
        None
    }

    fn open_follow_up(&mut self, effect: PendingEffect) -> Option<PendingEffect> {
        self.pending = Some(effect);
        Some(effect)
    }

    fn draw_card(&mut self) -> Option<Card> {
        if let Some(card) = self.deck.draw() {
            return Some(card);
        }
        self.reshuffle_discard();
        self.deck.draw()
    }

    /// Shared loop for the draw-until operations. Never runs past the mercy limit.
    fn draw_until<F>(&mut self, player: PlayerId, found: F) -> DrawReport
    where
        F: Fn(&Game, &Card) -> bool,
    {
        let mut report = DrawReport::default();
        while self.players[player].hand_size() < self.config.mercy_limit {
            let Some(card) = self.draw_card() else {
                report.exhausted = true;
                break;
            };
            self.players[player].receive(card);
            report.drawn.push(card);
            if found(&*self, &card) {
                report.satisfied = true;
                break;
            }
        }
        report.eliminated = self.apply_mercy(player);
        if report.eliminated && player == self.current_player {
            self.next_turn();
        }
        report
    }

    /// Eliminates `player` if their hand reached the mercy limit. Their cards go back
    /// under the top discard.
    fn apply_mercy(&mut self, player: PlayerId) -> bool {
        let limit = self.config.mercy_limit;
        let seat = &mut self.players[player];
        if seat.is_eliminated() || seat.hand_size() < limit {
            return false;
        }
        let cards = seat.eliminate();
        info!(
            "{} is eliminated holding {} cards",
            seat.name(),
            cards.len()
        );
        self.bury_in_discard(cards);
        true
    }

    fn bury_in_discard(&mut self, cards: Vec<Card>) {
        let top = self.discard.pop();
        self.discard.extend(cards);
        self.discard.extend(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(count: usize) -> Vec<PlayerSeat> {
        (0..count).map(|i| PlayerSeat::cpu(format!("cpu{i}"))).collect()
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let a = GameBuilder::new(seats(4)).unwrap().with_seed(99).build().unwrap();
        let b = GameBuilder::new(seats(4)).unwrap().with_seed(99).build().unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn fresh_game_deals_and_flips_a_number() {
        let game = GameBuilder::new(seats(3)).unwrap().build().unwrap();
        for player in game.players() {
            assert_eq!(player.hand_size(), 7);
        }
        let top = game.top_card().expect("starting card");
        assert!(top.is_number());
        assert_eq!(Some(game.current_color()), top.color);
        assert_eq!(game.total_cards(), 108);
        assert!(!game.is_stacking());
    }

    #[test]
    fn starting_flip_buries_action_cards() {
        let mut deck = vec![Card::number(Color::Green, 3), Card::wild(CardValue::Wild)];
        deck.extend(std::iter::repeat(Card::number(Color::Red, 1)).take(2));
        let game = GameBuilder::new(seats(2))
            .unwrap()
            .with_hand_size(1)
            .with_deck(deck)
            .build()
            .unwrap();
        assert_eq!(game.top_card(), Some(Card::number(Color::Green, 3)));
        assert_eq!(game.deck().cards(), &[Card::wild(CardValue::Wild)]);
    }

    #[test]
    fn deck_without_numbers_is_rejected() {
        let deck = vec![Card::wild(CardValue::Wild); 5];
        let result = GameBuilder::new(seats(2))
            .unwrap()
            .with_hand_size(1)
            .with_deck(deck)
            .build();
        assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn restore_rejects_eliminated_seat_with_cards() {
        let game = GameBuilder::new(seats(3)).unwrap().build().unwrap();
        let mut snapshot = game.snapshot();
        let hand = snapshot.players[2].eliminate();
        assert!(!hand.is_empty());
        snapshot.players[2].receive(hand[0]);
        assert!(matches!(
            Game::restore(snapshot, 0),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn bury_keeps_top_card() {
        let mut game = GameBuilder::new(seats(2)).unwrap().build().unwrap();
        let top = game.top_card();
        game.bury_in_discard(vec![Card::wild(CardValue::Wild)]);
        assert_eq!(game.top_card(), top);
        assert_eq!(game.discard_pile().len(), 2);
    }
}
