//! The action processor.
//!
//! Every mutation of a [`GameState`] goes through here. An action is
//! first checked against the current phase and turn flags, then its
//! parameters are checked against the board. Only a fully validated
//! action touches the state, so a rejected action leaves it exactly as
//! it was.
//!
//! After an action runs, the processor decides whether the turn goes
//! on, passes to the opponent, or ends the game:
//!
//! - Develop opens the optional emissary window when an emissary is
//!   usable, otherwise ends the turn.
//! - Swap or Discard inside the window ends the turn; outside it they
//!   require a Develop to follow.
//! - Recall and Decree end the turn. EndGame ends the game.
//!
//! A finished turn ends the game when two river decks are empty: at
//! once if the second player just played, after one more turn if the
//! first player did.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, error, info, trace, warn};

use crate::board::territory::{CELLS, LINE_SIZE};
use crate::core::action::{Action, ActionKind, ActionRecord, Decision, SwapKind};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;
use crate::error::{EngineError, IllegalReason, MalformedAction};
use crate::nn::encoder::{EncodedState, NaishiEncoder, StateEncoder};
use crate::rules::emissary::SpotKind;
use crate::rules::result::GameResult;
use crate::rules::turn::Phase;
use crate::scoring::{calculate_score, determine_winner, resolve_ninjas, BestCopy, ScoreBreakdown};

/// Action kinds legal in a state, in code order.
pub type LegalKinds = SmallVec<[ActionKind; 7]>;

/// Bookkeeping returned with every transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub turn_count: u32,
    /// Player to act next.
    pub current_player: PlayerId,
    pub phase: Phase,
    pub legal_action_types: LegalKinds,
    /// Set once the game has terminated.
    pub result: Option<GameResult>,
}

/// Outcome of one accepted action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Observation for the player to act next.
    pub observation: EncodedState,
    /// Reward for the player who acted: +1/-1/0 on the terminating
    /// action, 0 otherwise.
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

/// What happens after an action has been carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// The same player acts again.
    Continue,
    EndTurn,
    EndGame,
}

fn in_range(field: &'static str, value: u8, bound: usize) -> Result<(), MalformedAction> {
    if usize::from(value) >= bound {
        return Err(MalformedAction::OutOfRange {
            field,
            value: i64::from(value),
            bound,
        });
    }
    Ok(())
}

fn distinct_in_range(field: &'static str, a: u8, b: u8, bound: usize) -> Result<(), MalformedAction> {
    in_range(field, a, bound)?;
    in_range(field, b, bound)?;
    if a == b {
        return Err(MalformedAction::SameIndex { field });
    }
    Ok(())
}

/// Unordered index pairs `a < b` below `bound`.
fn pairs(bound: u8) -> impl Iterator<Item = (u8, u8)> {
    (0..bound).flat_map(move |a| (a + 1..bound).map(move |b| (a, b)))
}

impl GameState {
    // === Legality ===

    /// Action kinds the current player may take. Empty once the game is over.
    #[must_use]
    pub fn legal_action_types(&self) -> LegalKinds {
        ActionKind::ALL
            .into_iter()
            .filter(|&kind| self.kind_status(kind).is_ok())
            .collect()
    }

    /// Whether `kind` is currently legal, ignoring parameters.
    #[must_use]
    pub fn is_kind_legal(&self, kind: ActionKind) -> bool {
        self.kind_status(kind).is_ok()
    }

    fn kind_status(&self, kind: ActionKind) -> Result<(), IllegalReason> {
        if self.is_over() {
            return Err(IllegalReason::GameOver);
        }
        if kind == ActionKind::Draft {
            return if self.draft.is_some() {
                Ok(())
            } else {
                Err(IllegalReason::DraftComplete)
            };
        }
        if self.draft.is_some() {
            return Err(IllegalReason::DraftInProgress);
        }
        if self.turn.must_develop && kind != ActionKind::Develop {
            return Err(IllegalReason::MustDevelop);
        }
        if self.turn.optional_emissary_available && !kind.is_emissary() {
            return Err(IllegalReason::EmissaryWindowOpen);
        }

        let player = self.current_player;
        match kind {
            ActionKind::Draft => Ok(()),
            // Always available; with every deck empty it is a pass.
            ActionKind::Develop => Ok(()),
            ActionKind::Swap => self.emissaries.check_place(player, SpotKind::Swap),
            ActionKind::Discard => {
                self.emissaries.check_place(player, SpotKind::Discard)?;
                if self.river.non_empty_decks() < 2 {
                    return Err(IllegalReason::NotEnoughDecks);
                }
                Ok(())
            }
            ActionKind::Recall => {
                if self.emissaries.recallable(player) == 0 {
                    return Err(IllegalReason::NothingToRecall);
                }
                Ok(())
            }
            ActionKind::Decree => self.emissaries.check_place(player, SpotKind::Decree),
            ActionKind::EndGame => {
                if !self.ending_available {
                    return Err(IllegalReason::EndingUnavailable);
                }
                Ok(())
            }
        }
    }

    /// True when the current player holds an emissary and some swap or
    /// discard spot could take it.
    #[must_use]
    pub fn can_use_optional_emissary(&self) -> bool {
        let player = self.current_player;
        if self.emissaries.reserve(player) == 0 {
            return false;
        }
        self.emissaries.has_free(SpotKind::Swap)
            || (self.emissaries.has_free(SpotKind::Discard) && self.river.non_empty_decks() >= 2)
    }

    /// Check `action` without applying it.
    pub fn validate(&self, action: &Action) -> Result<(), EngineError> {
        let kind = action.kind();
        self.kind_status(kind)
            .map_err(|reason| EngineError::illegal(kind, reason))?;

        let decks = self.river.deck_count();
        match *action {
            Action::Draft { give } => in_range("pos", give, self.config.draft_cards)?,
            Action::Develop { cell } => {
                in_range("pos", cell, CELLS)?;
                let deck = usize::from(cell) % LINE_SIZE;
                if self.river.is_empty(deck) && self.river.non_empty_decks() > 0 {
                    return Err(EngineError::illegal(kind, IllegalReason::EmptyDeck(deck)));
                }
            }
            Action::Swap(swap) => match swap {
                SwapKind::Hand { a, b } | SwapKind::Line { a, b } => {
                    distinct_in_range("pos1/pos2", a, b, LINE_SIZE)?;
                }
                SwapKind::Column { column } => in_range("pos1", column, LINE_SIZE)?,
                SwapKind::River { a, b } => distinct_in_range("pos1/pos2", a, b, decks)?,
            },
            Action::Discard { a, b } => distinct_in_range("deck1/deck2", a, b, decks)?,
            Action::Decree { cell } => in_range("pos", cell, CELLS)?,
            Action::Recall | Action::EndGame => {}
        }

        if kind != ActionKind::Develop {
            if let Some(&deck) = action.river_targets().iter().find(|&&d| self.river.is_empty(d)) {
                return Err(EngineError::illegal(kind, IllegalReason::EmptyDeck(deck)));
            }
        }
        Ok(())
    }

    /// Every concrete action that would be accepted right now.
    ///
    /// Pairs are listed once, lower index first.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let cells = CELLS as u8;
        let line = LINE_SIZE as u8;
        let decks = self.river.deck_count() as u8;

        let mut candidates = Vec::new();
        for kind in self.legal_action_types() {
            match kind {
                ActionKind::Draft => {
                    let give = self.config.draft_cards as u8;
                    candidates.extend((0..give).map(|give| Action::Draft { give }));
                }
                ActionKind::Develop => candidates.extend((0..cells).map(|cell| Action::Develop { cell })),
                ActionKind::Swap => {
                    for (a, b) in pairs(line) {
                        candidates.push(Action::Swap(SwapKind::Hand { a, b }));
                        candidates.push(Action::Swap(SwapKind::Line { a, b }));
                    }
                    candidates.extend((0..line).map(|column| Action::Swap(SwapKind::Column { column })));
                    candidates.extend(pairs(decks).map(|(a, b)| Action::Swap(SwapKind::River { a, b })));
                }
                ActionKind::Discard => candidates.extend(pairs(decks).map(|(a, b)| Action::Discard { a, b })),
                ActionKind::Recall => candidates.push(Action::Recall),
                ActionKind::Decree => candidates.extend((0..cells).map(|cell| Action::Decree { cell })),
                ActionKind::EndGame => candidates.push(Action::EndGame),
            }
        }

        candidates.retain(|action| self.validate(action).is_ok());
        candidates
    }

    // === Entry points ===

    /// Validate and apply one action for the current player.
    pub fn apply_action(&mut self, action: Action) -> Result<Transition, EngineError> {
        if let Err(err) = self.validate(&action) {
            debug!(player = %self.current_player, ?action, %err, "action rejected");
            return Err(err);
        }

        let actor = self.current_player;
        let turn = self.turn_count;
        debug!(%actor, ?action, turn, "applying action");

        let flow = match self.execute(actor, action) {
            Ok(flow) => flow,
            Err(err) => return Err(self.abort(err.to_string())),
        };
        self.history.push_back(ActionRecord::new(actor, action, turn));

        match flow {
            Flow::Continue => {}
            Flow::EndTurn => self.end_turn(),
            Flow::EndGame => self.finish(),
        }
        self.settle(actor)
    }

    /// Decode an encoded action and apply it.
    pub fn step(&mut self, raw: &[i64]) -> Result<Transition, EngineError> {
        let action = Action::decode(raw)?;
        self.apply_action(action)
    }

    /// Apply `action` to a copy, leaving `self` untouched.
    pub fn applied(&self, action: Action) -> Result<(GameState, Transition), EngineError> {
        let mut next = self.clone();
        let transition = next.apply_action(action)?;
        Ok((next, transition))
    }

    /// Decline the optional emissary window and end the turn.
    pub fn skip_optional_emissary(&mut self) -> Result<Transition, EngineError> {
        let rejected = |reason| EngineError::IllegalAction { kind: None, reason };
        if self.is_over() {
            return Err(rejected(IllegalReason::GameOver));
        }
        if !self.turn.optional_emissary_available {
            return Err(rejected(IllegalReason::NoEmissaryWindow));
        }

        let actor = self.current_player;
        debug!(%actor, turn = self.turn_count, "optional emissary skipped");
        self.history
            .push_back(ActionRecord::new(actor, Decision::SkipEmissary, self.turn_count));
        self.turn.optional_emissary_available = false;
        self.end_turn();
        self.settle(actor)
    }

    /// Apply one history entry: an action or a skip.
    pub fn apply_decision(&mut self, decision: Decision) -> Result<Transition, EngineError> {
        match decision {
            Decision::Act(action) => self.apply_action(action),
            Decision::SkipEmissary => self.skip_optional_emissary(),
        }
    }

    // === Scores ===

    /// Current score of each territory, with every Ninja copying the
    /// character that helps its owner most.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<ScoreBreakdown> {
        PlayerMap::new(|player| calculate_score(&resolve_ninjas(&self.territories[player], &mut BestCopy)))
    }

    // === Execution ===

    fn execute(&mut self, actor: PlayerId, action: Action) -> Result<Flow, EngineError> {
        let kind = action.kind();
        if kind != ActionKind::Draft {
            self.turn.last_action_type = Some(kind);
        }

        let flow = match action {
            Action::Draft { give } => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.record_choice(actor, give);
                }
                if actor == PlayerId::FIRST {
                    self.current_player = PlayerId::SECOND;
                } else {
                    self.complete_draft()?;
                }
                Flow::Continue
            }
            Action::Develop { cell } => {
                let deck = usize::from(cell) % LINE_SIZE;
                if let Some(card) = self.river.draw(deck) {
                    let covered = self.territories[actor].replace(usize::from(cell), card);
                    trace!(%actor, cell, %card, %covered, "developed");
                }
                if self.turn.must_develop {
                    self.turn.must_develop = false;
                    Flow::EndTurn
                } else if self.can_use_optional_emissary() {
                    self.turn.optional_emissary_available = true;
                    Flow::Continue
                } else {
                    Flow::EndTurn
                }
            }
            Action::Swap(swap) => {
                self.place(actor, kind, SpotKind::Swap)?;
                let territory = &mut self.territories[actor];
                match swap {
                    SwapKind::Hand { a, b } => territory.swap_in_hand(a.into(), b.into()),
                    SwapKind::Line { a, b } => territory.swap_in_line(a.into(), b.into()),
                    SwapKind::Column { column } => territory.swap_column(column.into()),
                    SwapKind::River { a, b } => {
                        if !self.river.swap_tops(a.into(), b.into()) {
                            return Err(EngineError::InvariantViolation(format!(
                                "river swap {a}/{b} hit an empty deck after validation"
                            )));
                        }
                    }
                }
                self.after_emissary()
            }
            Action::Discard { a, b } => {
                self.place(actor, kind, SpotKind::Discard)?;
                self.river.discard_tops(a.into(), b.into());
                self.after_emissary()
            }
            Action::Recall => {
                let returned = self.emissaries.recall(actor);
                trace!(%actor, returned, "emissaries recalled");
                Flow::EndTurn
            }
            Action::Decree { cell } => {
                self.place(actor, kind, SpotKind::Decree)?;
                let cell = usize::from(cell);
                let mine = self.territories[actor].get(cell);
                let theirs = self.territories[actor.opponent()].replace(cell, mine);
                self.territories[actor].replace(cell, theirs);
                Flow::EndTurn
            }
            Action::EndGame => Flow::EndGame,
        };
        Ok(flow)
    }

    fn place(&mut self, actor: PlayerId, kind: ActionKind, spot: SpotKind) -> Result<(), EngineError> {
        let index = self
            .emissaries
            .place(actor, spot)
            .map_err(|reason| EngineError::illegal(kind, reason))?;
        trace!(%actor, %spot, index, "emissary placed");
        Ok(())
    }

    fn after_emissary(&mut self) -> Flow {
        if self.turn.optional_emissary_available {
            self.turn.optional_emissary_available = false;
            Flow::EndTurn
        } else {
            self.turn.must_develop = true;
            Flow::Continue
        }
    }

    // === Turn and game end ===

    fn end_turn(&mut self) {
        let actor = self.current_player;
        if self.end_next_turn {
            self.finish();
            return;
        }
        if self.river.empty_decks() >= 2 {
            if actor == PlayerId::SECOND {
                self.finish();
                return;
            }
            self.end_next_turn = true;
            info!(last = %actor.opponent(), "two river decks empty, final turn");
        }
        self.advance_turn();
    }

    fn advance_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.turn_count += 1;
        self.turn = self.turn.clear_turn_state();
        debug!(player = %self.current_player, turn = self.turn_count, "turn advanced");
        if self.turn_count > self.config.max_turns {
            self.truncated = true;
            warn!(turns = self.turn_count, max = self.config.max_turns, "game truncated");
        }
    }

    fn finish(&mut self) {
        let scores = self.scores();
        let totals = [scores[PlayerId::FIRST].total(), scores[PlayerId::SECOND].total()];
        let result = determine_winner(
            totals,
            [&self.territories[PlayerId::FIRST], &self.territories[PlayerId::SECOND]],
        );
        self.terminated = true;
        self.result = Some(result);
        info!(?result, first = totals[0], second = totals[1], turns = self.turn_count, "game over");
    }

    /// Shared tail of every accepted action: refresh derived flags, check
    /// the invariants, and build the transition.
    fn settle(&mut self, actor: PlayerId) -> Result<Transition, EngineError> {
        if !self.ending_available && self.river.empty_decks() >= 1 {
            self.ending_available = true;
            info!("a river deck is empty, ending is available");
        }
        if let Err(reason) = self.check_invariants() {
            return Err(self.abort(reason));
        }

        let reward = match (&self.result, self.terminated) {
            (Some(result), true) => result.reward_for(actor),
            _ => 0.0,
        };
        Ok(Transition {
            observation: NaishiEncoder::default().encode(self, self.current_player),
            reward,
            terminated: self.terminated,
            truncated: self.truncated,
            info: self.step_info(),
        })
    }

    fn step_info(&self) -> StepInfo {
        StepInfo {
            turn_count: self.turn_count,
            current_player: self.current_player,
            phase: self.phase(),
            legal_action_types: self.legal_action_types(),
            result: self.result,
        }
    }

    fn check_invariants(&self) -> Result<(), String> {
        self.emissaries.check_conservation()?;
        if !self.turn.is_consistent() {
            return Err("emissary window open while a develop is required".to_string());
        }
        if self.terminated && self.truncated {
            return Err("game both terminated and truncated".to_string());
        }
        if self.terminated != self.result.is_some() {
            return Err("result and terminated flag disagree".to_string());
        }
        if self.draft.is_some() && self.turn_count != 0 {
            return Err(format!("draft still open at turn {}", self.turn_count));
        }
        Ok(())
    }

    fn abort(&mut self, reason: String) -> EngineError {
        error!(%reason, turn = self.turn_count, "engine invariant violated, game aborted");
        self.aborted = true;
        EngineError::InvariantViolation(reason)
    }
}
