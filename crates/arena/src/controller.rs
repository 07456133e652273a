//! The game loop.
//!
//! A [`Controller`] owns the authoritative [`Game`] and moves it forward one
//! ply at a time. Everything that happens to it arrives as an event on a
//! single queue: commands from the outside, resolved strategy decisions,
//! delayed ticks and restart timers. Strategies run in spawned tasks on a
//! copy of the game, so a slow remote call never holds the board.
//!
//! Two counters keep late arrivals harmless. `generation` goes up on every
//! reset; a decision or restart timer carrying an older generation is
//! dropped. `schedule_token` goes up whenever pending ticks should no longer
//! fire (pause, reset, game end).

use std::sync::Arc;
use std::time::{Duration, Instant};

use chess_core::{move_to_lan, Color, Decision, Game, StrategyError};
use classical_engine::{eval_bar_percent, evaluate, format_score};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::TurnClock;
use crate::config::{MatchSettings, PlayerConfig};
use crate::sink::{BoardRenderer, MoveLogEntry, StatusSink};
use crate::stats::{GameEnd, MatchStats};
use crate::strategy::StrategySelector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
    ClearStats,
    SetPlayer(Color, PlayerConfig),
    Shutdown,
}

enum Event {
    Command(Command),
    Tick {
        token: u64,
    },
    Resolved {
        generation: u64,
        result: Result<Decision, StrategyError>,
    },
    AutoRestart {
        generation: u64,
    },
}

/// A run that stopped on a failed turn, with the tally up to that point.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct MatchHalted {
    pub message: String,
    pub stats: MatchStats,
}

/// The turn whose decision is being computed.
struct PendingTurn {
    side: Color,
    label: String,
    remote: bool,
    started: Instant,
}

/// Sends commands to a running [`Controller`]. Cheap to clone.
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<Event>,
}

impl ControllerHandle {
    /// Returns `false` once the controller has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(Event::Command(command)).is_ok()
    }

    pub fn start(&self) -> bool {
        self.send(Command::Start)
    }

    pub fn toggle_pause(&self) -> bool {
        self.send(Command::TogglePause)
    }

    pub fn reset(&self) -> bool {
        self.send(Command::Reset)
    }

    pub fn clear_stats(&self) -> bool {
        self.send(Command::ClearStats)
    }

    pub fn set_player(&self, color: Color, player: PlayerConfig) -> bool {
        self.send(Command::SetPlayer(color, player))
    }

    pub fn shutdown(&self) -> bool {
        self.send(Command::Shutdown)
    }
}

pub struct Controller {
    settings: MatchSettings,
    selector: StrategySelector,
    renderer: Arc<dyn BoardRenderer>,
    sink: Arc<dyn StatusSink>,

    game: Game,
    phase: Phase,
    clock: TurnClock,
    stats: MatchStats,
    move_delay: Duration,
    /// Games finished since this controller was built; counts toward
    /// `stop_after_games` even if the stats are cleared.
    games_finished: u32,

    generation: u64,
    schedule_token: u64,
    in_flight: Option<PendingTurn>,
    rng: StdRng,
    /// Set when a failed turn stops the loop.
    halted: Option<String>,

    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Controller {
    pub fn new(
        settings: MatchSettings,
        selector: StrategySelector,
        renderer: Arc<dyn BoardRenderer>,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            move_delay: settings.move_delay,
            settings,
            selector,
            renderer,
            sink,
            game: Game::new(),
            phase: Phase::Idle,
            clock: TurnClock::new(),
            stats: MatchStats::new(),
            games_finished: 0,
            generation: 0,
            schedule_token: 0,
            in_flight: None,
            rng,
            halted: None,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn is_turn_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Process events until shutdown or until the game quota is met.
    ///
    /// With `stop_on_error` set, a failed turn ends the run with
    /// [`MatchHalted`] instead of leaving the game paused.
    pub async fn run(mut self) -> Result<MatchStats, MatchHalted> {
        while self.step().await {}
        info!(stats = %self.stats, "controller stopped");
        match self.halted {
            Some(message) => Err(MatchHalted {
                message,
                stats: self.stats,
            }),
            None => Ok(self.stats),
        }
    }

    /// Wait for and process one event. Returns `false` when the loop should
    /// stop.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.dispatch(event).await,
            None => false,
        }
    }

    async fn dispatch(&mut self, event: Event) -> bool {
        match event {
            Event::Command(Command::Shutdown) => return false,
            Event::Command(command) => self.apply_command(command),
            Event::Tick { token } => {
                if token == self.schedule_token && self.phase == Phase::Running {
                    self.begin_turn();
                } else {
                    debug!(token, current = self.schedule_token, "ignoring superseded tick");
                }
            }
            Event::Resolved { generation, result } => self.on_resolved(generation, result).await,
            Event::AutoRestart { generation } => {
                if generation == self.generation && self.phase == Phase::Finished {
                    self.reset();
                    self.start();
                }
            }
        }
        self.halted.is_none() && !self.quota_reached()
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::ClearStats => self.clear_stats(),
            Command::SetPlayer(color, player) => self.set_player(color, player),
            Command::Shutdown => {}
        }
    }

    fn quota_reached(&self) -> bool {
        self.settings
            .stop_after_games
            .is_some_and(|quota| self.games_finished >= quota)
    }

    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "start ignored");
            return;
        }
        self.move_delay = self.settings.move_delay;
        self.phase = Phase::Running;
        info!(
            game = self.stats.games_played + 1,
            white = self.settings.white.strategy.label(),
            black = self.settings.black.strategy.label(),
            "game started"
        );
        self.sink.status("Game in Progress");
        self.begin_turn();
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.schedule_token += 1;
                info!(ply = self.game.ply_count(), "paused");
                self.sink.status("Game Paused");
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                info!(ply = self.game.ply_count(), "resumed");
                self.sink.status("Game in Progress");
                self.begin_turn();
            }
            Phase::Idle | Phase::Finished => debug!(phase = ?self.phase, "pause ignored"),
        }
    }

    /// Back to a fresh board. Statistics are kept; decisions and timers
    /// from before the reset are dropped when they arrive.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.schedule_token += 1;
        self.in_flight = None;
        self.game = Game::new();
        self.clock.reset();
        self.phase = Phase::Idle;
        debug!(generation = self.generation, "reset");

        self.sink.log_cleared();
        self.sink.commentary_cleared();
        self.sink.status("Ready to Start");
        self.sink.clock(&self.clock);
        self.report_eval();
    }

    pub fn clear_stats(&mut self) {
        self.stats.clear();
        self.sink.stats(&self.stats);
        self.reset();
    }

    /// Takes effect from that side's next turn.
    pub fn set_player(&mut self, color: Color, player: PlayerConfig) {
        info!(side = color.name(), strategy = player.strategy.label(), "player changed");
        *self.settings.player_mut(color) = player;
    }

    fn begin_turn(&mut self) {
        if self.phase != Phase::Running || self.in_flight.is_some() || self.game.is_terminal() {
            return;
        }

        let side = self.game.side_to_move();
        let player = self.settings.player(side);
        let strategy = self.selector.strategy_for(player);
        let pending = PendingTurn {
            side,
            label: strategy.name().to_string(),
            remote: player.strategy.is_remote(),
            started: Instant::now(),
        };
        debug!(side = side.name(), strategy = %pending.label, ply = self.game.ply_count(), "turn started");
        self.in_flight = Some(pending);

        let mut rng = StdRng::seed_from_u64(self.rng.gen());
        let game = self.game.clone();
        let generation = self.generation;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = strategy.choose_move(&game, &mut rng).await;
            // The controller may be gone; nothing left to tell.
            let _ = tx.send(Event::Resolved { generation, result });
        });
    }

    async fn on_resolved(&mut self, generation: u64, result: Result<Decision, StrategyError>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale decision");
            return;
        }
        let Some(turn) = self.in_flight.take() else {
            warn!("decision arrived with no turn in flight");
            return;
        };

        if let Err(err) = self.complete_turn(&turn, result).await {
            warn!(side = turn.side.name(), strategy = %turn.label, error = %err, "turn failed");
            self.phase = Phase::Paused;
            self.schedule_token += 1;
            self.sink.status(&format!("Error: {err}"));
            if self.settings.stop_on_error {
                self.halted = Some(err.to_string());
            }
        }
    }

    async fn complete_turn(
        &mut self,
        turn: &PendingTurn,
        result: Result<Decision, StrategyError>,
    ) -> Result<(), StrategyError> {
        let decision = result?;
        if !self.game.is_legal(decision.mv) {
            return Err(StrategyError::Invariant(format!(
                "{} chose {}, which is not legal here",
                turn.label,
                move_to_lan(decision.mv)
            )));
        }

        self.clock.add(turn.side, turn.started.elapsed());
        let played = self.game.play(decision.mv)?;
        self.renderer.on_move_applied(&played.from, &played.to).await;

        let entry = MoveLogEntry::new(self.game.ply_count(), &turn.label, &played);
        debug!(%entry, "move applied");
        self.sink.move_logged(&entry);
        self.sink.status(if self.game.in_check() {
            "CHECK!"
        } else {
            "Game in Progress"
        });
        self.sink.clock(&self.clock);
        self.report_eval();
        match decision.commentary.as_deref() {
            Some(text) => self.sink.commentary(&entry, text),
            None if turn.remote => self.sink.commentary_cleared(),
            None => {}
        }

        if let Some(outcome) = self.game.outcome() {
            self.finish(GameEnd::Rules(outcome));
        } else if self
            .settings
            .max_plies
            .is_some_and(|max| self.game.ply_count() >= max)
        {
            self.finish(GameEnd::MoveLimit);
        } else if self.phase == Phase::Running {
            self.schedule_tick();
        }
        Ok(())
    }

    fn finish(&mut self, end: GameEnd) {
        self.phase = Phase::Finished;
        self.schedule_token += 1;
        self.stats.record(end);
        self.games_finished += 1;

        let line = format!("Game {}: {}", self.stats.games_played, end);
        info!(plies = self.game.ply_count(), clock = %self.clock, "{line}");
        self.sink.status(&end.to_string());
        self.sink.stats(&self.stats);
        self.sink.summary(&line);

        if self.settings.auto_restart && !self.quota_reached() {
            let generation = self.generation;
            self.post_after(self.settings.restart_delay, Event::AutoRestart { generation });
        }
    }

    fn schedule_tick(&mut self) {
        self.schedule_token += 1;
        let token = self.schedule_token;
        self.post_after(self.move_delay, Event::Tick { token });
    }

    fn post_after(&self, delay: Duration, event: Event) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
    }

    fn report_eval(&self) {
        let score = evaluate(self.game.position(), self.game.ply_count() as u32);
        self.sink.eval(eval_bar_percent(score), &format_score(score));
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
